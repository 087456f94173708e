//! File preview panel state.
//!
//! The results panel shows one job output file at a time through one of a
//! small, fixed set of viewers. This module only tracks which viewer is
//! active and what it was asked to show; fetching and drawing the file is
//! left to the viewer implementations.

use crate::error::{Result, ScriptBuilderError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The viewers the panel can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PreviewKind {
    /// Placeholder shown when no file is selected.
    #[default]
    Empty,
    Log,
    PlainText,
    Image,
}

impl PreviewKind {
    pub fn tag(&self) -> &'static str {
        match self {
            PreviewKind::Empty => "empty",
            PreviewKind::Log => "log",
            PreviewKind::PlainText => "plaintext",
            PreviewKind::Image => "image",
        }
    }

    pub fn all() -> &'static [PreviewKind] {
        &[
            PreviewKind::Empty,
            PreviewKind::Log,
            PreviewKind::PlainText,
            PreviewKind::Image,
        ]
    }
}

impl FromStr for PreviewKind {
    type Err = ScriptBuilderError;

    fn from_str(s: &str) -> Result<Self> {
        PreviewKind::all()
            .iter()
            .copied()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| ScriptBuilderError::Preview(format!("unknown preview kind '{s}'")))
    }
}

/// What the active viewer was asked to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRequest {
    pub job_id: String,
    pub file_name: String,
    /// File size in bytes, as reported by the job's file listing.
    pub size: u64,
}

/// Card-style switcher over the preview viewers.
#[derive(Debug, Clone, Default)]
pub struct PreviewPanel {
    active: PreviewKind,
    request: Option<PreviewRequest>,
}

impl PreviewPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> PreviewKind {
        self.active
    }

    pub fn request(&self) -> Option<&PreviewRequest> {
        self.request.as_ref()
    }

    /// Show `file_name` of `job_id` in the viewer identified by `kind`.
    ///
    /// An unknown viewer tag, or the `empty` placeholder, is rejected and
    /// leaves the panel as it was.
    pub fn preview(
        &mut self,
        job_id: impl Into<String>,
        file_name: impl Into<String>,
        size: u64,
        kind: &str,
    ) -> Result<&PreviewRequest> {
        let kind: PreviewKind = kind.parse()?;
        if kind == PreviewKind::Empty {
            return Err(ScriptBuilderError::Preview(
                "the empty viewer cannot show a file; use clear_preview".to_string(),
            ));
        }

        let request = PreviewRequest {
            job_id: job_id.into(),
            file_name: file_name.into(),
            size,
        };
        tracing::debug!(
            "Previewing {} of job {} as {}",
            request.file_name,
            request.job_id,
            kind.tag()
        );

        self.active = kind;
        Ok(self.request.insert(request))
    }

    /// Return to the empty placeholder.
    pub fn clear_preview(&mut self) {
        self.active = PreviewKind::Empty;
        self.request = None;
    }

    /// The request to re-fetch when the user presses refresh.
    pub fn refresh(&self) -> Option<&PreviewRequest> {
        match self.active {
            PreviewKind::Empty => None,
            _ => self.request.as_ref(),
        }
    }
}
