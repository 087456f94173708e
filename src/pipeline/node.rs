//! Node abstraction for the pipeline.
//!
//! Two-layer design:
//! - **`ScriptComponent` trait**: implemented by every concrete component in
//!   `nodes/`. A component is parsed from a node's values, then emits its
//!   fragment. Parsing is where configuration errors surface; emission
//!   cannot fail.
//! - **`ComponentNode`**: one configured step in a pipeline: its kind, its
//!   unique name and its value bag. `ComponentKind` dispatches to the
//!   matching component with a plain `match`.

use crate::pipeline::emitter::{python, Fragment, ScriptStyle, TextEmitter};
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::id::{NodeId, UniqueName};
use crate::pipeline::kind::ComponentKind;
use crate::pipeline::schema;
use crate::pipeline::value::{ConfigValue, Values};

/// A component that renders one fragment of the generated script.
pub trait ScriptComponent: Sized {
    /// Build the component from a node's current values.
    fn from_values(values: &ValueReader<'_>) -> PipelineResult<Self>;

    /// Write the fragment. Every line goes through `out`.
    fn emit(&self, out: &mut TextEmitter<'_>);
}

/// Typed access to a node's values, attributing errors to the node.
pub struct ValueReader<'a> {
    node: &'a str,
    values: &'a Values,
}

impl<'a> ValueReader<'a> {
    pub fn new(node: &'a str, values: &'a Values) -> Self {
        Self { node, values }
    }

    pub fn node(&self) -> &str {
        self.node
    }

    pub fn values(&self) -> &'a Values {
        self.values
    }

    fn get(&self, key: &str) -> PipelineResult<&'a ConfigValue> {
        self.values
            .get(key)
            .ok_or_else(|| PipelineError::configuration(self.node, key, "required field is not set"))
    }

    fn mismatch(&self, key: &str, expected: &str, got: &ConfigValue) -> PipelineError {
        PipelineError::configuration(
            self.node,
            key,
            format!("expected {expected}, got {}", got.type_name()),
        )
    }

    /// A Python name, safe to interpolate as code.
    pub fn identifier(&self, key: &str) -> PipelineResult<&'a str> {
        let value = self.get(key)?;
        let s = value
            .as_str()
            .ok_or_else(|| self.mismatch(key, "identifier", value))?;
        python::identifier(s).map_err(|reason| PipelineError::configuration(self.node, key, reason))
    }

    pub fn text(&self, key: &str) -> PipelineResult<&'a str> {
        let value = self.get(key)?;
        value.as_str().ok_or_else(|| self.mismatch(key, "string", value))
    }

    pub fn optional_text(&self, key: &str) -> PipelineResult<Option<&'a str>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| self.mismatch(key, "string", value)),
        }
    }

    pub fn int(&self, key: &str) -> PipelineResult<i64> {
        let value = self.get(key)?;
        value.as_int().ok_or_else(|| self.mismatch(key, "int", value))
    }

    pub fn float(&self, key: &str) -> PipelineResult<f64> {
        let value = self.get(key)?;
        let v = value
            .as_float()
            .ok_or_else(|| self.mismatch(key, "float", value))?;
        if v.is_finite() {
            Ok(v)
        } else {
            Err(PipelineError::configuration(
                self.node,
                key,
                "must be a finite number",
            ))
        }
    }
}

/// One configured step of a pipeline.
#[derive(Debug, Clone)]
pub struct ComponentNode {
    id: NodeId,
    kind: ComponentKind,
    unique_name: UniqueName,
    values: Values,
    indent_level: usize,
}

impl ComponentNode {
    pub(crate) fn new(id: NodeId, kind: ComponentKind, unique_name: UniqueName, values: Values) -> Self {
        Self {
            id,
            kind,
            unique_name,
            values,
            indent_level: 0,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn unique_name(&self) -> &UniqueName {
        &self.unique_name
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn value(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    /// Nesting level the fragment starts at.
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    pub(crate) fn set_value(&mut self, key: String, value: ConfigValue) {
        self.values.insert(key, value);
    }

    pub(crate) fn set_indent_level(&mut self, level: usize) {
        self.indent_level = level;
    }

    /// Render this node's fragment from its current values.
    ///
    /// The values are re-checked against the kind's schema first, so a node
    /// missing a required field fails here instead of emitting a reference
    /// to an undefined name.
    pub fn render(&self, style: &ScriptStyle) -> PipelineResult<Fragment> {
        let name = self.unique_name.as_str();
        schema::check_complete(self.kind.schema(), name, &self.values)?;

        let reader = ValueReader::new(name, &self.values);
        let mut out = TextEmitter::new(style, self.indent_level);
        self.kind.render(&reader, &mut out)?;
        Ok(out.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, ConfigValue)]) -> Values {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_value_reader_missing_field() {
        let v = Values::new();
        let reader = ValueReader::new("VEGLStep60", &v);
        let err = reader.identifier("paramsInstance").unwrap_err();
        assert_eq!(err.node(), Some("VEGLStep60"));
        assert!(err.to_string().contains("paramsInstance"));
    }

    #[test]
    fn test_value_reader_types() {
        let v = values(&[
            ("a", ConfigValue::Int(3)),
            ("b", ConfigValue::from("txt")),
            ("c", ConfigValue::Float(f64::NAN)),
        ]);
        let reader = ValueReader::new("n", &v);
        assert_eq!(reader.int("a").unwrap(), 3);
        assert_eq!(reader.float("a").unwrap(), 3.0);
        assert_eq!(reader.text("b").unwrap(), "txt");
        assert_eq!(reader.optional_text("missing").unwrap(), None);
        assert!(reader.int("b").is_err());
        assert!(reader.float("c").is_err());
        assert!(reader.identifier("b").is_ok());
    }

    #[test]
    fn test_render_respects_indent_level() {
        let mut node = ComponentNode::new(
            NodeId(0),
            ComponentKind::AwsUtils,
            UniqueName::from("AWSUtils0"),
            Values::new(),
        );
        node.set_indent_level(1);
        let fragment = node.render(&ScriptStyle::default()).unwrap();
        assert!(fragment
            .as_str()
            .starts_with("    # ----- Autogenerated AWS Utility Functions -----\n"));
    }

    #[test]
    fn test_render_missing_required_value() {
        let node = ComponentNode::new(
            NodeId(0),
            ComponentKind::MeshStep,
            UniqueName::from("VEGLStep60"),
            Values::new(),
        );
        let err = node.render(&ScriptStyle::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Configuration { .. }));
    }
}
