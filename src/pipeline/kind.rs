//! Component kind enumeration.
//!
//! The closed set of component variants a pipeline can hold. Each kind knows
//! its tag, its form schema and which component renders it.

use crate::pipeline::emitter::TextEmitter;
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::node::{ScriptComponent, ValueReader};
use crate::pipeline::nodes::{aws_utils, job_params, mesh_step};
use crate::pipeline::nodes::{AwsUtilsComponent, JobParamsComponent, MeshStepComponent};
use crate::pipeline::schema::FieldDescriptor;
use crate::pipeline::value::Values;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Types of components that can be added to a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Reusable upload/download helpers around the `aws` command line tool.
    #[serde(rename = "AWSUtils")]
    AwsUtils,
    /// Python object exposing the job's region, cell sizes and depth.
    #[serde(rename = "VEGLJobObject")]
    JobParameters,
    /// Step 6: derive the inversion mesh and write it as a UBC-GIF file.
    #[serde(rename = "VEGLStep6")]
    MeshStep,
}

impl ComponentKind {
    /// Stable tag used in project files and by the UI.
    pub fn tag(&self) -> &'static str {
        match self {
            ComponentKind::AwsUtils => "AWSUtils",
            ComponentKind::JobParameters => "VEGLJobObject",
            ComponentKind::MeshStep => "VEGLStep6",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentKind::AwsUtils => "AWS Utils Object",
            ComponentKind::JobParameters => "VEGL Job Parameters Object",
            ComponentKind::MeshStep => "VEGL Step 6 - Mesh Definition",
        }
    }

    /// Get all available component kinds.
    pub fn all() -> &'static [ComponentKind] {
        &[
            ComponentKind::AwsUtils,
            ComponentKind::JobParameters,
            ComponentKind::MeshStep,
        ]
    }

    pub fn description(&self) -> &'static str {
        match self {
            ComponentKind::AwsUtils =>
                "Defines awsUpload and awsDownload helpers.\n\
                 Wraps the aws command line tool.\n\
                 Takes no configuration.",

            ComponentKind::JobParameters =>
                "Creates the job parameters object.\n\
                 Exposes padded bounds, cell sizes and inversion depth.\n\
                 Other steps read from it by instance name.",

            ComponentKind::MeshStep =>
                "Calculates the mesh cell counts.\n\
                 Writes a UBC-GIF mesh file.\n\
                 Exits the script with status 1 if the write fails.",
        }
    }

    /// Form fields accepted by this kind.
    pub fn schema(&self) -> &'static [FieldDescriptor] {
        match self {
            ComponentKind::AwsUtils => aws_utils::SCHEMA,
            ComponentKind::JobParameters => job_params::SCHEMA,
            ComponentKind::MeshStep => mesh_step::SCHEMA,
        }
    }

    /// Python modules the emitted fragment relies on.
    pub fn imports(&self) -> &'static [&'static str] {
        match self {
            ComponentKind::AwsUtils => aws_utils::IMPORTS,
            ComponentKind::JobParameters => &[],
            ComponentKind::MeshStep => mesh_step::IMPORTS,
        }
    }

    /// Checks spanning several fields, run whenever a node's values change.
    pub fn check_values(&self, node: &str, values: &Values) -> PipelineResult<()> {
        match self {
            ComponentKind::JobParameters => job_params::check_bounds(node, values),
            ComponentKind::AwsUtils | ComponentKind::MeshStep => Ok(()),
        }
    }

    /// Render a fragment for this kind from `values`.
    pub fn render(&self, values: &ValueReader<'_>, out: &mut TextEmitter<'_>) -> PipelineResult<()> {
        match self {
            ComponentKind::AwsUtils => AwsUtilsComponent::from_values(values)?.emit(out),
            ComponentKind::JobParameters => JobParamsComponent::from_values(values)?.emit(out),
            ComponentKind::MeshStep => MeshStepComponent::from_values(values)?.emit(out),
        }
        Ok(())
    }
}

impl FromStr for ComponentKind {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentKind::all()
            .iter()
            .copied()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| PipelineError::UnknownKind(s.to_string()))
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
