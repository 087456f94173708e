//! Script assembly pipeline.
//!
//! A job script is composed from configurable component nodes held in an
//! ordered `Pipeline`. Each node renders a Python fragment from its values;
//! the `ScriptBuilder` concatenates the fragments in pipeline order.
//!
//! # Architecture
//!
//! ```text
//! ComponentCatalog ──► Pipeline::add_node ──► [AWSUtils0] [VEGLParams0] [VEGLStep60]
//!                                                  │            │             │
//!                                                  ▼            ▼             ▼
//!                                  ScriptBuilder::build ──► preamble + fragments
//! ```
//!
//! # Design
//!
//! - **Closed kind set**: `ComponentKind` enum dispatches to the components
//!   in `nodes/` with a `match`.
//! - **Validate before render**: values are checked against the kind's
//!   schema on every write and again before rendering.
//! - **Explicit catalog**: no global registration; the catalog is passed by
//!   reference.
//! - **Pure builds**: `build` only reads the pipeline and performs no I/O.

pub mod builder;
pub mod container;
pub mod emitter;
pub mod error;
pub mod id;
pub mod kind;
pub mod node;
pub mod nodes;
pub mod registry;
pub mod schema;
pub mod value;

pub use builder::{BuildOptions, BuildReport, GeneratedScript, ScriptBuilder};
pub use container::Pipeline;
pub use emitter::{Fragment, ScriptStyle, TextEmitter};
pub use error::{PipelineError, PipelineResult};
pub use id::{NodeId, UniqueName};
pub use kind::ComponentKind;
pub use node::{ComponentNode, ScriptComponent, ValueReader};
pub use registry::{CatalogEntry, ComponentCatalog, NamingPolicy};
pub use schema::{DefaultValue, FieldDescriptor, FieldType};
pub use value::{ConfigValue, Values};
