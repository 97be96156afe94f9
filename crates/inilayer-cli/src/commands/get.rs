//! `inilayer get` command implementation.

use std::process::ExitCode;

use inilayer_config::ValueKind;

use super::CommandContext;

/// Execute the `inilayer get` command
///
/// Prints the merged value and exits with failure when the key is unset.
pub fn execute(key: &str, kind: Option<ValueKind>, ctx: &CommandContext) -> anyhow::Result<ExitCode> {
    let value = match kind {
        Some(kind) => ctx.config.get(kind, key),
        None => ctx.config.lookup(key),
    };

    match value {
        Some(value) => {
            println!("{}", value);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            match kind {
                Some(kind) => ctx.output.error(&format!("'{}' is not set as {}", key, kind)),
                None => ctx.output.error(&format!("'{}' is not set", key)),
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
