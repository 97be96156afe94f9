//! Command implementations and dispatch logic.
//!
//! Every command works on a `CommandContext` holding the merged configuration.

use std::process::ExitCode;

use anyhow::Context;
use camino::Utf8Path;
use inilayer_config::AggregateConfig;
use tracing::info;

pub mod get;
pub mod set;
pub mod show;
pub mod sources;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub config: AggregateConfig,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Load the primary file and its overlays
    pub fn load(primary: &Utf8Path, overlays: &[impl AsRef<Utf8Path>]) -> anyhow::Result<Self> {
        let config = AggregateConfig::open(primary, overlays)
            .with_context(|| format!("Failed to load configuration from {}", primary))?
            .context("No primary configuration file was given")?;

        if config.sources().is_empty() {
            anyhow::bail!("None of the configuration files exist (primary: {})", primary);
        }

        Ok(Self {
            config,
            output: OutputHandler::new(),
        })
    }
}

/// Dispatch a command to its handler
pub fn dispatch_command(command: Commands, ctx: &mut CommandContext) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Sources => {
            info!("Listing configuration sources");
            sources::execute(ctx)
        }
        Commands::Show { kind, json } => {
            info!("Showing merged configuration (kind: {:?}, json: {})", kind, json);
            show::execute(kind, json, ctx)
        }
        Commands::Get { key, kind } => {
            info!("Reading {} (kind: {:?})", key, kind);
            get::execute(&key, kind, ctx)
        }
        Commands::Set { key, value, kind, target, strict, dry_run } => {
            info!("Setting {} = {} as {} (dry_run: {})", key, value, kind, dry_run);
            let request = set::SetRequest {
                key,
                value,
                kind,
                target,
                strict,
                dry_run,
            };
            set::execute(request, ctx)
        }
    }
}
