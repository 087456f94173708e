//! Pipeline container: the ordered, owned sequence of component nodes.
//!
//! Order is execution order in the generated script and only changes through
//! explicit `reorder`/`move_node` calls. Node names are derived from the
//! catalog's naming policy plus a per-kind ordinal that never goes
//! backwards, so a removed node's name is never handed out again.

use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::id::{NodeId, UniqueName};
use crate::pipeline::kind::ComponentKind;
use crate::pipeline::node::ComponentNode;
use crate::pipeline::registry::ComponentCatalog;
use crate::pipeline::schema;
use crate::pipeline::value::{ConfigValue, Values};
use std::collections::{BTreeMap, HashSet};

/// The main pipeline: an ordered list of component nodes.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    nodes: Vec<ComponentNode>,
    /// Next ordinal to hand out per kind.
    ordinals: BTreeMap<ComponentKind, u32>,
    next_id: u32,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Mutation ──

    /// Create a node of `kind`, append it and return a reference to it.
    ///
    /// `initial` is merged over the kind's schema defaults and validated,
    /// field by field and then across fields; invalid values reject the
    /// whole call and leave the pipeline unchanged.
    pub fn add_node(
        &mut self,
        catalog: &ComponentCatalog,
        kind: ComponentKind,
        initial: Values,
    ) -> PipelineResult<&ComponentNode> {
        let entry = catalog.entry(kind)?;

        let live = self.nodes.iter().filter(|n| n.kind() == kind).count() as u32;
        let ordinal = self.ordinals.get(&kind).copied().unwrap_or(0).max(live);
        let name = UniqueName::from_ordinal(&entry.naming.prefix, ordinal);

        if self.position(name.as_str()).is_some() {
            tracing::error!("Generated name '{}' collides with an existing node", name);
            return Err(PipelineError::NamingCollision(name));
        }

        let values = schema::with_defaults(kind.schema(), name.as_str(), &initial)?;
        kind.check_values(name.as_str(), &values)?;

        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.ordinals.insert(kind, ordinal + 1);

        tracing::info!("Added {} node '{}'", kind.tag(), name);
        self.nodes.push(ComponentNode::new(id, kind, name, values));

        let last = self.nodes.len() - 1;
        Ok(&self.nodes[last])
    }

    /// Remove the node called `name`.
    pub fn remove_node(&mut self, name: &str) -> PipelineResult<ComponentNode> {
        let index = self
            .position(name)
            .ok_or_else(|| PipelineError::NotFound(name.to_string()))?;
        let node = self.nodes.remove(index);
        tracing::info!("Removed node '{}'", name);
        Ok(node)
    }

    /// Replace the pipeline order. `order` must be a permutation of the
    /// current node names.
    pub fn reorder<S: AsRef<str>>(&mut self, order: &[S]) -> PipelineResult<()> {
        if order.len() != self.nodes.len() {
            return Err(PipelineError::InvalidOrder(format!(
                "expected {} names, got {}",
                self.nodes.len(),
                order.len()
            )));
        }

        let mut seen = HashSet::with_capacity(order.len());
        let mut indices = Vec::with_capacity(order.len());
        for name in order {
            let name = name.as_ref();
            if !seen.insert(name) {
                return Err(PipelineError::InvalidOrder(format!(
                    "'{name}' appears more than once"
                )));
            }
            let index = self.position(name).ok_or_else(|| {
                PipelineError::InvalidOrder(format!("'{name}' is not in the pipeline"))
            })?;
            indices.push(index);
        }

        let mut slots: Vec<Option<ComponentNode>> = self.nodes.drain(..).map(Some).collect();
        self.nodes = indices
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect();

        tracing::debug!("Pipeline reordered ({} nodes)", self.nodes.len());
        Ok(())
    }

    /// Move one node to `index`, shifting the others.
    pub fn move_node(&mut self, name: &str, index: usize) -> PipelineResult<()> {
        let from = self
            .position(name)
            .ok_or_else(|| PipelineError::NotFound(name.to_string()))?;
        if index >= self.nodes.len() {
            return Err(PipelineError::InvalidOrder(format!(
                "index {index} is out of range for {} nodes",
                self.nodes.len()
            )));
        }

        let mut order: Vec<UniqueName> =
            self.nodes.iter().map(|n| n.unique_name().clone()).collect();
        let moved = order.remove(from);
        order.insert(index, moved);
        self.reorder(&order)
    }

    /// Set one configuration value, validated against the node's schema and
    /// the values already set.
    pub fn configure(
        &mut self,
        name: &str,
        key: &str,
        value: impl Into<ConfigValue>,
    ) -> PipelineResult<()> {
        let index = self
            .position(name)
            .ok_or_else(|| PipelineError::NotFound(name.to_string()))?;
        let node = &mut self.nodes[index];

        let value = schema::validate_entry(node.kind().schema(), name, key, &value.into())?;

        let mut candidate = node.values().clone();
        candidate.insert(key.to_string(), value.clone());
        node.kind().check_values(name, &candidate)?;

        tracing::debug!("Configured {}.{} = {}", name, key, value);
        node.set_value(key.to_string(), value);
        Ok(())
    }

    /// Set the nesting level a node's fragment starts at. No built-in kind
    /// opens a block, so builds reject any level above 0.
    pub fn set_indent_level(&mut self, name: &str, level: usize) -> PipelineResult<()> {
        let index = self
            .position(name)
            .ok_or_else(|| PipelineError::NotFound(name.to_string()))?;
        self.nodes[index].set_indent_level(level);
        Ok(())
    }

    // ── Queries ──

    /// Nodes in execution order.
    pub fn list_nodes(&self) -> &[ComponentNode] {
        &self.nodes
    }

    /// Same as [`Pipeline::list_nodes`]; the enumeration the builder walks.
    pub fn shell_commands(&self) -> &[ComponentNode] {
        self.list_nodes()
    }

    pub fn get(&self, name: &str) -> Option<&ComponentNode> {
        self.nodes.iter().find(|n| n.unique_name() == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.unique_name() == name)
    }

    pub fn names(&self) -> Vec<UniqueName> {
        self.nodes.iter().map(|n| n.unique_name().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline_with(kinds: &[ComponentKind]) -> Pipeline {
        let catalog = ComponentCatalog::builtin();
        let mut p = Pipeline::new();
        for kind in kinds {
            p.add_node(&catalog, *kind, Values::new()).unwrap();
        }
        p
    }

    #[test]
    fn test_names_follow_kind_ordinals() {
        let p = pipeline_with(&[
            ComponentKind::AwsUtils,
            ComponentKind::MeshStep,
            ComponentKind::AwsUtils,
        ]);
        let names: Vec<_> = p.names().iter().map(|n| n.to_string()).collect();
        assert_eq!(names, ["AWSUtils0", "VEGLStep60", "AWSUtils1"]);
    }

    #[test]
    fn test_removed_name_not_reissued() {
        let catalog = ComponentCatalog::builtin();
        let mut p = pipeline_with(&[ComponentKind::AwsUtils, ComponentKind::AwsUtils]);
        p.remove_node("AWSUtils0").unwrap();
        let name = p
            .add_node(&catalog, ComponentKind::AwsUtils, Values::new())
            .unwrap()
            .unique_name()
            .clone();
        assert_eq!(name, "AWSUtils2");
    }

    #[test]
    fn test_defaults_applied_on_add() {
        let p = pipeline_with(&[ComponentKind::MeshStep]);
        let node = p.get("VEGLStep60").unwrap();
        assert_eq!(node.value("paramsInstance"), Some(&ConfigValue::from("VEGLParams")));
        assert_eq!(node.value("meshFile"), Some(&ConfigValue::from("mesh.msh")));
    }

    #[test]
    fn test_invalid_initial_values_rejected() {
        let catalog = ComponentCatalog::builtin();
        let mut p = Pipeline::new();
        let mut initial = Values::new();
        initial.insert("paramsInstance".into(), ConfigValue::from("not valid"));
        let err = p
            .add_node(&catalog, ComponentKind::MeshStep, initial)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Configuration { .. }));
        assert!(p.is_empty());

        // A rejected add does not consume an ordinal.
        let name = p
            .add_node(&catalog, ComponentKind::MeshStep, Values::new())
            .unwrap()
            .unique_name()
            .clone();
        assert_eq!(name, "VEGLStep60");
    }

    #[test]
    fn test_kind_missing_from_catalog() {
        let catalog = ComponentCatalog::new();
        let mut p = Pipeline::new();
        assert!(matches!(
            p.add_node(&catalog, ComponentKind::AwsUtils, Values::new()),
            Err(PipelineError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_prefix_collision_surfaced() {
        use crate::pipeline::registry::CatalogEntry;

        // Two kinds sharing a prefix is a catalog defect; it must not be swallowed.
        let mut catalog = ComponentCatalog::new();
        catalog.register(CatalogEntry::new(ComponentKind::AwsUtils, "Node"));
        catalog.register(CatalogEntry::new(ComponentKind::MeshStep, "Node"));

        let mut p = Pipeline::new();
        p.add_node(&catalog, ComponentKind::AwsUtils, Values::new())
            .unwrap();
        let err = p
            .add_node(&catalog, ComponentKind::MeshStep, Values::new())
            .unwrap_err();
        assert_eq!(err, PipelineError::NamingCollision(UniqueName::from("Node0")));
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_remove_unknown_reports_not_found() {
        let mut p = pipeline_with(&[ComponentKind::AwsUtils]);
        assert!(matches!(
            p.remove_node("AWSUtils9"),
            Err(PipelineError::NotFound(_))
        ));
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_reorder() {
        let mut p = pipeline_with(&[
            ComponentKind::AwsUtils,
            ComponentKind::JobParameters,
            ComponentKind::MeshStep,
        ]);
        p.reorder(&["VEGLStep60", "AWSUtils0", "VEGLParams0"]).unwrap();
        let names: Vec<_> = p.names().iter().map(|n| n.to_string()).collect();
        assert_eq!(names, ["VEGLStep60", "AWSUtils0", "VEGLParams0"]);
    }

    #[test]
    fn test_reorder_rejects_non_permutation() {
        let mut p = pipeline_with(&[ComponentKind::AwsUtils, ComponentKind::MeshStep]);
        let before = p.names();

        assert!(matches!(p.reorder(&["AWSUtils0"]), Err(PipelineError::InvalidOrder(_))));
        assert!(matches!(
            p.reorder(&["AWSUtils0", "AWSUtils0"]),
            Err(PipelineError::InvalidOrder(_))
        ));
        assert!(matches!(
            p.reorder(&["AWSUtils0", "Bogus"]),
            Err(PipelineError::InvalidOrder(_))
        ));
        assert_eq!(p.names(), before);
    }

    #[test]
    fn test_move_node() {
        let mut p = pipeline_with(&[
            ComponentKind::AwsUtils,
            ComponentKind::JobParameters,
            ComponentKind::MeshStep,
        ]);
        p.move_node("VEGLStep60", 0).unwrap();
        assert_eq!(p.position("VEGLStep60"), Some(0));
        assert_eq!(p.position("AWSUtils0"), Some(1));
        assert!(p.move_node("AWSUtils0", 3).is_err());
    }

    #[test]
    fn test_configure_validates() {
        let mut p = pipeline_with(&[ComponentKind::MeshStep]);
        p.configure("VEGLStep60", "paramsInstance", "jobParams").unwrap();
        assert_eq!(
            p.get("VEGLStep60").unwrap().value("paramsInstance"),
            Some(&ConfigValue::from("jobParams"))
        );

        let err = p
            .configure("VEGLStep60", "paramsInstance", "x = 1")
            .unwrap_err();
        assert_eq!(err.node(), Some("VEGLStep60"));
        // Rejected value does not replace the previous one.
        assert_eq!(
            p.get("VEGLStep60").unwrap().value("paramsInstance"),
            Some(&ConfigValue::from("jobParams"))
        );

        assert!(p.configure("VEGLStep60", "unknown", 1i64).is_err());
        assert!(p.configure("Missing0", "meshFile", "a").is_err());
    }

    #[test]
    fn test_instance_cannot_rebind_script_names() {
        let catalog = ComponentCatalog::builtin();
        let mut p = pipeline_with(&[ComponentKind::MeshStep]);

        for name in ["sys", "cell_x", "minEasting", "VEGLParameters"] {
            let err = p
                .configure("VEGLStep60", "paramsInstance", name)
                .unwrap_err();
            assert!(err.to_string().contains("already bound"), "{name} accepted");
        }
        assert_eq!(
            p.get("VEGLStep60").unwrap().value("paramsInstance"),
            Some(&ConfigValue::from("VEGLParams"))
        );

        let mut initial = Values::new();
        initial.insert("paramsInstance".into(), ConfigValue::from("subprocess"));
        assert!(p
            .add_node(&catalog, ComponentKind::JobParameters, initial)
            .is_err());
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_inverted_bounds_rejected_on_configure() {
        let catalog = ComponentCatalog::builtin();
        let mut p = Pipeline::new();
        let mut initial = Values::new();
        initial.insert("paddingMinEasting".into(), ConfigValue::Float(0.0));
        initial.insert("paddingMaxEasting".into(), ConfigValue::Float(100.0));
        p.add_node(&catalog, ComponentKind::JobParameters, initial)
            .unwrap();

        let err = p
            .configure("VEGLParams0", "paddingMaxEasting", -10.0)
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Configuration { ref field, .. } if field == "paddingMaxEasting"
        ));
        assert_eq!(
            p.get("VEGLParams0").unwrap().value("paddingMaxEasting"),
            Some(&ConfigValue::Float(100.0))
        );

        p.configure("VEGLParams0", "paddingMaxEasting", 250.0).unwrap();
        assert!(p.configure("VEGLParams0", "paddingMinEasting", 300i64).is_err());

        let mut inverted = Values::new();
        inverted.insert("paddingMinNorthing".into(), ConfigValue::Float(10.0));
        inverted.insert("paddingMaxNorthing".into(), ConfigValue::Float(10.0));
        assert!(p
            .add_node(&catalog, ComponentKind::JobParameters, inverted)
            .is_err());
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_node_ids_are_stable() {
        let catalog = ComponentCatalog::builtin();
        let mut p = Pipeline::new();
        let a = p
            .add_node(&catalog, ComponentKind::AwsUtils, Values::new())
            .unwrap()
            .id();
        let b = p
            .add_node(&catalog, ComponentKind::MeshStep, Values::new())
            .unwrap()
            .id();
        p.reorder(&["VEGLStep60", "AWSUtils0"]).unwrap();
        assert_eq!(p.get("AWSUtils0").unwrap().id(), a);
        assert_eq!(p.get("VEGLStep60").unwrap().id(), b);
        assert_ne!(a, b);
    }
}
