//! Component catalog.
//!
//! The catalog declares which component kinds a pipeline may hold and how
//! their nodes are named. It is built explicitly and passed by reference to
//! every `Pipeline` operation that creates nodes; there is no global
//! registration.

use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::kind::ComponentKind;
use crate::pipeline::schema::FieldDescriptor;
use serde::Serialize;
use std::collections::BTreeMap;

/// How nodes of a kind are named: `prefix` followed by a per-kind ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamingPolicy {
    pub prefix: String,
}

/// Everything the UI and the pipeline need to know about one kind.
///
/// `schema` and `imports` are read off the kind itself, which the pipeline
/// and builder consult directly; the entry carries them for forms.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub kind: ComponentKind,
    pub display_name: &'static str,
    pub description: &'static str,
    pub naming: NamingPolicy,
    schema: &'static [FieldDescriptor],
    imports: &'static [&'static str],
}

impl CatalogEntry {
    /// Entry with the kind's built-in metadata and the given name prefix.
    pub fn new(kind: ComponentKind, prefix: impl Into<String>) -> Self {
        Self {
            kind,
            display_name: kind.display_name(),
            description: kind.description(),
            naming: NamingPolicy {
                prefix: prefix.into(),
            },
            schema: kind.schema(),
            imports: kind.imports(),
        }
    }

    /// Form fields of the kind.
    pub fn schema(&self) -> &'static [FieldDescriptor] {
        self.schema
    }

    /// Python modules the kind's fragment relies on.
    pub fn imports(&self) -> &'static [&'static str] {
        self.imports
    }
}

/// The set of component kinds available to a pipeline.
#[derive(Debug, Clone, Default)]
pub struct ComponentCatalog {
    entries: BTreeMap<ComponentKind, CatalogEntry>,
}

impl ComponentCatalog {
    /// Empty catalog; register kinds with [`ComponentCatalog::register`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with every built-in kind and its default naming.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register(CatalogEntry::new(ComponentKind::AwsUtils, "AWSUtils"));
        catalog.register(CatalogEntry::new(ComponentKind::JobParameters, "VEGLParams"));
        catalog.register(CatalogEntry::new(ComponentKind::MeshStep, "VEGLStep6"));
        catalog
    }

    /// Add or replace the entry for a kind.
    pub fn register(&mut self, entry: CatalogEntry) {
        tracing::debug!(
            "Registered component kind {} with prefix '{}'",
            entry.kind.tag(),
            entry.naming.prefix
        );
        self.entries.insert(entry.kind, entry);
    }

    pub fn entry(&self, kind: ComponentKind) -> PipelineResult<&CatalogEntry> {
        self.entries
            .get(&kind)
            .ok_or_else(|| PipelineError::UnknownKind(kind.tag().to_string()))
    }

    /// Look up an entry by its kind tag, e.g. `"VEGLStep6"`.
    pub fn lookup(&self, tag: &str) -> PipelineResult<&CatalogEntry> {
        let kind: ComponentKind = tag.parse()?;
        self.entry(kind)
    }

    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Entries in a stable order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
