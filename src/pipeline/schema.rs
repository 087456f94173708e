//! Configuration schemas for component kinds.
//!
//! Each kind declares its form fields via a static `FieldDescriptor` array.
//! The UI layer renders forms from these descriptors; the pipeline uses them
//! to validate values before they ever reach a node.

use crate::pipeline::emitter::python;
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::value::{ConfigValue, Values};
use serde::Serialize;

/// The type of value a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    /// A Python name (dotted names allowed), interpolated as code.
    Identifier,
    /// Free text, interpolated as a string literal.
    Text,
    Int,
    /// Floating point; integers are accepted and widened.
    Float,
    Bool,
}

/// Compile-time default for a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Str(&'static str),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl DefaultValue {
    pub fn to_value(self) -> ConfigValue {
        match self {
            DefaultValue::Str(s) => ConfigValue::String(s.to_string()),
            DefaultValue::Int(v) => ConfigValue::Int(v),
            DefaultValue::Float(v) => ConfigValue::Float(v),
            DefaultValue::Bool(v) => ConfigValue::Bool(v),
        }
    }
}

/// Static descriptor for one form field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub field_type: FieldType,
    pub default: Option<DefaultValue>,
    pub required: bool,
    /// Numeric fields only: value must be strictly greater than zero.
    pub positive: bool,
    /// Identifier fields only: names the value may not start with.
    pub reserved: &'static [&'static str],
}

impl FieldDescriptor {
    pub const fn required(name: &'static str, label: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            label,
            field_type,
            default: None,
            required: true,
            positive: false,
            reserved: &[],
        }
    }

    pub const fn optional(name: &'static str, label: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            label,
            field_type,
            default: None,
            required: false,
            positive: false,
            reserved: &[],
        }
    }

    pub const fn with_default(self, default: DefaultValue) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    pub const fn positive(self) -> Self {
        Self {
            positive: true,
            ..self
        }
    }

    pub const fn reserving(self, names: &'static [&'static str]) -> Self {
        Self {
            reserved: names,
            ..self
        }
    }

    /// Check `value` against this field, returning the normalized value.
    pub fn validate(&self, node: &str, value: &ConfigValue) -> PipelineResult<ConfigValue> {
        let mismatch = || {
            PipelineError::configuration(
                node,
                self.name,
                format!("expected {:?}, got {}", self.field_type, value.type_name()),
            )
        };

        let normalized = match self.field_type {
            FieldType::Identifier => {
                let s = value.as_str().ok_or_else(mismatch)?;
                python::identifier(s)
                    .map_err(|reason| PipelineError::configuration(node, self.name, reason))?;
                let root = s.split('.').next().unwrap_or(s);
                if self.reserved.contains(&root) {
                    return Err(PipelineError::configuration(
                        node,
                        self.name,
                        format!("'{root}' is already bound by the generated script"),
                    ));
                }
                value.clone()
            }
            FieldType::Text => {
                value.as_str().ok_or_else(mismatch)?;
                value.clone()
            }
            FieldType::Bool => {
                value.as_bool().ok_or_else(mismatch)?;
                value.clone()
            }
            FieldType::Int => {
                let v = value.as_int().ok_or_else(mismatch)?;
                if self.positive && v <= 0 {
                    return Err(PipelineError::configuration(
                        node,
                        self.name,
                        format!("must be greater than zero, got {v}"),
                    ));
                }
                value.clone()
            }
            FieldType::Float => {
                let v = value.as_float().ok_or_else(mismatch)?;
                if !v.is_finite() {
                    return Err(PipelineError::configuration(
                        node,
                        self.name,
                        "must be a finite number",
                    ));
                }
                if self.positive && v <= 0.0 {
                    return Err(PipelineError::configuration(
                        node,
                        self.name,
                        format!("must be greater than zero, got {v}"),
                    ));
                }
                ConfigValue::Float(v)
            }
        };

        Ok(normalized)
    }
}

/// Find a field by name.
pub fn field<'s>(schema: &'s [FieldDescriptor], name: &str) -> Option<&'s FieldDescriptor> {
    schema.iter().find(|f| f.name == name)
}

/// Validate a single key/value pair against `schema`.
pub fn validate_entry(
    schema: &[FieldDescriptor],
    node: &str,
    key: &str,
    value: &ConfigValue,
) -> PipelineResult<ConfigValue> {
    let descriptor = field(schema, key)
        .ok_or_else(|| PipelineError::configuration(node, key, "unknown field"))?;
    descriptor.validate(node, value)
}

/// Merge `values` over the schema defaults, validating every entry.
pub fn with_defaults(
    schema: &[FieldDescriptor],
    node: &str,
    values: &Values,
) -> PipelineResult<Values> {
    let mut merged = Values::new();

    for descriptor in schema {
        if let Some(default) = descriptor.default {
            merged.insert(descriptor.name.to_string(), default.to_value());
        }
    }

    for (key, value) in values {
        let normalized = validate_entry(schema, node, key, value)?;
        merged.insert(key.clone(), normalized);
    }

    Ok(merged)
}

/// Verify that every required field has a valid value.
pub fn check_complete(schema: &[FieldDescriptor], node: &str, values: &Values) -> PipelineResult<()> {
    for descriptor in schema {
        match values.get(descriptor.name) {
            Some(value) => {
                descriptor.validate(node, value)?;
            }
            None if descriptor.required => {
                return Err(PipelineError::configuration(
                    node,
                    descriptor.name,
                    "required field is not set",
                ));
            }
            None => {}
        }
    }
    Ok(())
}
