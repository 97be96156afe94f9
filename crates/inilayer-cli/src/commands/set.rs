//! `inilayer set` command implementation.
//!
//! Coerces the text to the requested kind, routes the write through the
//! merged configuration and flushes every source.

use std::process::ExitCode;

use anyhow::Context;
use camino::Utf8PathBuf;
use inilayer_config::{ConfigValue, ValueKind, WritePolicy};
use inilayer_core::error::LayerError;

use super::CommandContext;

/// Arguments of `inilayer set`
#[derive(Debug, Clone)]
pub struct SetRequest {
    pub key: String,
    pub value: String,
    pub kind: ValueKind,
    pub target: Option<Utf8PathBuf>,
    pub strict: bool,
    pub dry_run: bool,
}

/// Execute the `inilayer set` command
pub fn execute(request: SetRequest, ctx: &mut CommandContext) -> anyhow::Result<ExitCode> {
    let value = ConfigValue::parse_as(request.kind, &request.value).ok_or_else(|| {
        LayerError::InvalidValue {
            kind: request.kind.to_string(),
            raw: request.value.clone(),
        }
    })?;
    let target = request.target.as_deref().filter(|path| !path.as_str().is_empty());

    if request.strict {
        ctx.config.set_write_policy(WritePolicy::Strict);
    }

    let matched = match target {
        Some(path) => ctx.config.source(path).is_some(),
        None => ctx.config.sources().iter().any(|source| source.has_key(&request.key)),
    };

    ctx.config.set_value(&request.key, value.clone(), target)?;

    if !matched {
        match target {
            Some(path) => ctx.output.warn(&format!("{} is not a loaded source; nothing written", path)),
            None => ctx.output.warn(&format!(
                "'{}' is not defined in any source; pass --target to create it",
                request.key
            )),
        }
        return Ok(ExitCode::SUCCESS);
    }

    if ctx.config.get(request.kind, &request.key).as_ref() != Some(&value) {
        ctx.output.warn(&format!(
            "'{}' was written but a later source still overrides it",
            request.key
        ));
    }

    if request.dry_run {
        ctx.output.info("Dry run: no files were changed");
    } else {
        ctx.config
            .flush_all()
            .context("Failed to write configuration files")?;
        ctx.output.success(&format!("Set {} = {} ({})", request.key, value, request.kind));
    }

    Ok(ExitCode::SUCCESS)
}
