//! ScriptBuilder - Main Entry Point
//!
//! Builds a job script from a saved project, or lists the available
//! component kinds and their configuration fields.

use anyhow::Context;
use clap::{Parser, Subcommand};
use scriptbuilder_rs::{BuilderConfig, ComponentCatalog, ProjectFile};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "scriptbuilder", version, about = "Assemble job scripts from component pipelines")]
struct Cli {
    /// Builder settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the script for a project file
    Build {
        /// Project file (.sbproj, JSON)
        project: PathBuf,

        /// Write the script here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Omit the interpreter line, banner and imports
        #[arg(long)]
        no_preamble: bool,

        /// Skip components that fail to render
        #[arg(long)]
        best_effort: bool,
    },
    /// Print the component catalog with configuration schemas as JSON
    Catalog,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so a script on stdout stays clean
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,scriptbuilder_rs=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => BuilderConfig::load(path)?,
        None => BuilderConfig::load_or_default(),
    };
    let catalog = ComponentCatalog::builtin();

    match cli.command {
        Command::Build {
            project,
            output,
            no_preamble,
            best_effort,
        } => {
            config.preamble &= !no_preamble;
            config.best_effort |= best_effort;

            let project_file = ProjectFile::load(&project)?;
            let pipeline = project_file.to_pipeline(&catalog)?;
            let script = config.script_builder().build(&pipeline)?;

            for (node, reason) in &script.report.failures {
                tracing::warn!("Component '{}' left out: {}", node, reason);
            }

            match output {
                Some(path) => {
                    script
                        .write_to(&path)
                        .with_context(|| format!("Failed to write script to {:?}", path))?;
                    tracing::info!("Wrote {:?}", path);
                }
                None => print!("{}", script.text),
            }
        }
        Command::Catalog => {
            let entries: Vec<_> = catalog.entries().collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}
