//! # ScriptBuilder-RS: job script assembly
//!
//! Composes a runnable Python processing script for a geophysics job from a
//! pipeline of configurable components. Each component emits one fragment;
//! the builder concatenates the fragments in pipeline order.
//!
//! ## Architecture
//!
//! - **Pipeline**: ordered, owned component nodes with unique names
//! - **Catalog**: the component kinds on offer, their form schemas and naming
//! - **Builder**: pure, fail-fast concatenation of node fragments
//! - **Preview**: viewer switching for job output files
//!
//! ## Example
//!
//! ```ignore
//! use scriptbuilder_rs::pipeline::{ComponentCatalog, ComponentKind, Pipeline, ScriptBuilder, Values};
//!
//! let catalog = ComponentCatalog::builtin();
//! let mut pipeline = Pipeline::new();
//! pipeline.add_node(&catalog, ComponentKind::AwsUtils, Values::new())?;
//! pipeline.add_node(&catalog, ComponentKind::MeshStep, Values::new())?;
//! pipeline.configure("VEGLStep60", "paramsInstance", "jobParams")?;
//!
//! let script = ScriptBuilder::default().build(&pipeline)?;
//! println!("{}", script.text);
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod preview;

// Re-export commonly used types
pub use config::{BuilderConfig, ProjectFile, ProjectNode};
pub use error::{Result, ScriptBuilderError};
pub use pipeline::{
    BuildOptions, ComponentCatalog, ComponentKind, ComponentNode, ConfigValue, GeneratedScript,
    Pipeline, PipelineError, ScriptBuilder, UniqueName, Values,
};
pub use preview::{PreviewKind, PreviewPanel};
