use super::container::Pipeline;
use super::emitter::{Fragment, ScriptStyle, TextEmitter};
use super::error::{PipelineError, PipelineResult};
use super::id::UniqueName;
use super::node::ComponentNode;
use std::collections::BTreeSet;
use std::path::Path;

/// Options controlling how a pipeline is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Emit the interpreter line, banner and import block.
    pub preamble: bool,
    /// Skip nodes that fail to render instead of aborting the build.
    pub best_effort: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            preamble: true,
            best_effort: false,
        }
    }
}

/// Summary of one build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    /// Nodes whose fragments made it into the script, in emission order.
    pub emitted: Vec<UniqueName>,

    /// Nodes skipped in best-effort mode, with the reason.
    pub failures: Vec<(UniqueName, String)>,

    /// Python modules imported by the preamble.
    pub imports: Vec<&'static str>,
}

impl BuildReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The assembled script, ready to hand to job submission.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedScript {
    pub text: String,
    pub report: BuildReport,
}

impl GeneratedScript {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Write the script text to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::write(path, &self.text)
    }
}

/// Concatenates node fragments into one script.
pub struct ScriptBuilder {
    style: ScriptStyle,
    options: BuildOptions,
}

impl ScriptBuilder {
    pub fn new(style: ScriptStyle, options: BuildOptions) -> Self {
        Self { style, options }
    }

    pub fn style(&self) -> &ScriptStyle {
        &self.style
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Assemble the script for the current pipeline snapshot.
    ///
    /// Nodes are rendered in pipeline order and their fragments joined with
    /// nothing in between. The pipeline is only read. Unless best-effort mode
    /// is on, the first node that fails aborts the build and no text is
    /// returned.
    pub fn build(&self, pipeline: &Pipeline) -> PipelineResult<GeneratedScript> {
        let mut report = BuildReport::default();
        let mut body = String::new();

        for node in pipeline.shell_commands() {
            match self.render_node(node) {
                Ok(fragment) => {
                    body.push_str(fragment.as_str());
                    report.emitted.push(node.unique_name().clone());
                }
                Err(err) if self.options.best_effort => {
                    tracing::warn!("Skipping node '{}': {}", node.unique_name(), err);
                    report
                        .failures
                        .push((node.unique_name().clone(), err.to_string()));
                }
                Err(err) => {
                    tracing::error!("Build aborted at node '{}': {}", node.unique_name(), err);
                    return Err(PipelineError::Build {
                        node: node.unique_name().clone(),
                        source: Box::new(err),
                    });
                }
            }
        }

        let mut text = String::new();
        if self.options.preamble {
            let imports: BTreeSet<&'static str> = pipeline
                .shell_commands()
                .iter()
                .filter(|node| report.emitted.contains(node.unique_name()))
                .flat_map(|node| node.kind().imports().iter().copied())
                .collect();
            report.imports = imports.into_iter().collect();
            text.push_str(&self.preamble(&report.imports));
        }
        text.push_str(&body);

        tracing::info!(
            "Script built: {} fragments, {} skipped, {} bytes",
            report.emitted.len(),
            report.failures.len(),
            text.len()
        );

        Ok(GeneratedScript { text, report })
    }

    /// Render one node at top level.
    ///
    /// No built-in component opens a block, so a fragment nested deeper than
    /// level 0 would have nothing to nest inside.
    fn render_node(&self, node: &ComponentNode) -> PipelineResult<Fragment> {
        if node.indent_level() > 0 {
            return Err(PipelineError::configuration(
                node.unique_name().as_str(),
                "indentLevel",
                format!(
                    "level {} has no enclosing block to nest in",
                    node.indent_level()
                ),
            ));
        }
        node.render(&self.style)
    }

    fn preamble(&self, imports: &[&str]) -> String {
        let mut out = TextEmitter::new(&self.style, 0);
        out.line("#!/usr/bin/env python");
        out.comment("Generated by scriptbuilder. Edits are lost when the job is rebuilt.");
        for module in imports {
            out.line(format!("import {module}"));
        }
        out.blank();
        out.finish().into_string()
    }
}

impl Default for ScriptBuilder {
    fn default() -> Self {
        Self::new(ScriptStyle::default(), BuildOptions::default())
    }
}
