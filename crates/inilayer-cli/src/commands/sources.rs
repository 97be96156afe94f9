//! `inilayer sources` command implementation.
//!
//! Lists every loaded source in override order with its entry count.

use std::process::ExitCode;

use super::CommandContext;

/// Execute the `inilayer sources` command
pub fn execute(ctx: &CommandContext) -> anyhow::Result<ExitCode> {
    for (index, source) in ctx.config.sources().iter().enumerate() {
        let role = if index == 0 { "base" } else { "override" };
        ctx.output.step(
            &format!("{}.", index + 1),
            &format!("{} ({}, {} entries)", source.path(), role, source.maps().len()),
        );
    }
    Ok(ExitCode::SUCCESS)
}
