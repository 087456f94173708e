//! Configuration module for the script builder
//!
//! This module handles:
//! - Builder settings (indentation, newline, preamble, best-effort mode)
//! - Project files (`.sbproj`) holding a saved job pipeline
//!
//! # Config Location
//!
//! Builder settings are read from the platform-appropriate config directory
//! under `scriptbuilder-rs`:
//! - **Linux**: `~/.config/scriptbuilder-rs/config.toml`
//! - **macOS**: `~/Library/Application Support/scriptbuilder-rs/config.toml`
//! - **Windows**: `%APPDATA%\scriptbuilder-rs\config.toml`
//!
//! # Example
//!
//! ```ignore
//! use scriptbuilder_rs::config::{BuilderConfig, ProjectFile};
//! use scriptbuilder_rs::pipeline::ComponentCatalog;
//!
//! let config = BuilderConfig::load_or_default();
//! let catalog = ComponentCatalog::builtin();
//!
//! let project = ProjectFile::load("inversion.sbproj")?;
//! let pipeline = project.to_pipeline(&catalog)?;
//! let script = config.script_builder().build(&pipeline)?;
//! ```

use crate::error::{Result, ResultExt, ScriptBuilderError};
use crate::pipeline::{
    BuildOptions, ComponentCatalog, ComponentKind, Pipeline, ScriptBuilder, ScriptStyle,
    UniqueName, Values,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for config directories
pub const APP_ID: &str = "scriptbuilder-rs";

/// Builder settings filename
pub const CONFIG_FILE: &str = "config.toml";

/// Project file extension
pub const PROJECT_FILE_EXTENSION: &str = "sbproj";

// ==================== Config Directory ====================

/// Get the application config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID))
}

/// Get the path to the builder settings file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

// ==================== Builder Config ====================

/// Settings applied to every build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Indentation and newline conventions
    #[serde(default)]
    pub style: ScriptStyle,

    /// Emit the interpreter line, banner and imports
    #[serde(default = "default_true")]
    pub preamble: bool,

    /// Skip failing nodes instead of aborting the build
    #[serde(default)]
    pub best_effort: bool,
}

fn default_true() -> bool {
    true
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            style: ScriptStyle::default(),
            preamble: true,
            best_effort: false,
        }
    }
}

impl BuilderConfig {
    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        Self::from_toml(&content).with_context(|| format!("Failed to parse config {:?}", path))
    }

    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config
            .style
            .validate()
            .map_err(|reason| ScriptBuilderError::Config(format!("style: {reason}")))?;
        Ok(config)
    }

    /// Load settings from the default location, returning defaults on any error
    pub fn load_or_default() -> Self {
        match config_path() {
            Some(path) if path.exists() => Self::load(&path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load builder config, using defaults: {}", e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    pub fn options(&self) -> BuildOptions {
        BuildOptions {
            preamble: self.preamble,
            best_effort: self.best_effort,
        }
    }

    /// Create a builder using these settings
    pub fn script_builder(&self) -> ScriptBuilder {
        ScriptBuilder::new(self.style.clone(), self.options())
    }
}

// ==================== Project File ====================

/// One saved node of a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectNode {
    /// Component kind tag
    pub kind: ComponentKind,

    /// Name the node had when saved; names are reassigned on load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<UniqueName>,

    /// Configuration values
    #[serde(default)]
    pub values: Values,

    /// Nesting level of the node's fragment
    #[serde(default)]
    pub indent_level: usize,
}

/// Project file format for saving a job pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Project file format version for future compatibility
    #[serde(default = "default_project_version")]
    pub version: u32,

    /// Project name
    #[serde(default)]
    pub name: String,

    /// Nodes in pipeline order
    #[serde(default)]
    pub nodes: Vec<ProjectNode>,
}

fn default_project_version() -> u32 {
    1
}

impl Default for ProjectFile {
    fn default() -> Self {
        Self {
            version: 1,
            name: "Untitled Job".to_string(),
            nodes: Vec::new(),
        }
    }
}

impl ProjectFile {
    /// Create a new, empty project
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Snapshot a pipeline into a project
    pub fn from_pipeline(name: impl Into<String>, pipeline: &Pipeline) -> Self {
        let nodes = pipeline
            .list_nodes()
            .iter()
            .map(|node| ProjectNode {
                kind: node.kind(),
                name: Some(node.unique_name().clone()),
                values: node.values().clone(),
                indent_level: node.indent_level(),
            })
            .collect();

        Self {
            version: 1,
            name: name.into(),
            nodes,
        }
    }

    /// Rebuild the pipeline described by this project
    pub fn to_pipeline(&self, catalog: &ComponentCatalog) -> Result<Pipeline> {
        let mut pipeline = Pipeline::new();

        for (index, saved) in self.nodes.iter().enumerate() {
            let node = pipeline
                .add_node(catalog, saved.kind, saved.values.clone())
                .with_context(|| format!("Failed to restore node #{index} of '{}'", self.name))?;
            let name = node.unique_name().clone();

            if let Some(saved_name) = &saved.name {
                if *saved_name != name {
                    tracing::debug!("Node '{}' restored as '{}'", saved_name, name);
                }
            }
            if saved.indent_level > 0 {
                pipeline.set_indent_level(name.as_str(), saved.indent_level)?;
            }
        }

        tracing::info!("Loaded project '{}' ({} nodes)", self.name, pipeline.len());
        Ok(pipeline)
    }

    /// Load a project file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScriptBuilderError::Config(format!("Failed to read project file {:?}: {}", path, e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            ScriptBuilderError::Config(format!("Failed to parse project file {:?}: {}", path, e))
        })
    }

    /// Save project file to disk as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ScriptBuilderError::Config(format!(
                        "Failed to create project directory: {}",
                        e
                    ))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| {
            ScriptBuilderError::Config(format!("Failed to serialize project: {}", e))
        })?;

        std::fs::write(path, content).map_err(|e| {
            ScriptBuilderError::Config(format!("Failed to write project file {:?}: {}", path, e))
        })
    }
}
