//! Unit tests for CLI commands.

use super::*;
use camino::Utf8PathBuf;
use clap::Parser;
use inilayer_config::{ConfigValue, ValueKind};
use tempfile::TempDir;

const BASE: &str = "[sectionInt]\nPORT = 80\n\n[sectionStringList]\nHOSTS = [a, b]\n";
const LOCAL: &str = "[sectionInt]\nPORT = 8080\n";

/// Write a base and a local override file into a fresh temp directory
fn create_sources() -> (TempDir, Utf8PathBuf, Utf8PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let base = dir.join("base.conf");
    let local = dir.join("local.conf");
    std::fs::write(&base, BASE).unwrap();
    std::fs::write(&local, LOCAL).unwrap();
    (temp_dir, base, local)
}

fn set_request(key: &str, value: &str, kind: ValueKind) -> set::SetRequest {
    set::SetRequest {
        key: key.to_string(),
        value: value.to_string(),
        kind,
        target: None,
        strict: false,
        dry_run: false,
    }
}

#[test]
fn test_load_requires_an_existing_source() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();

    let result = CommandContext::load(&dir.join("missing.conf"), &[] as &[Utf8PathBuf]);
    assert!(result.is_err());
}

#[test]
fn test_load_reports_parse_errors_with_context() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let bad = dir.join("bad.conf");
    std::fs::write(&bad, "nonsense\n").unwrap();

    let err = CommandContext::load(&bad, &[] as &[Utf8PathBuf]).err().unwrap();
    assert!(err.to_string().starts_with("Failed to load configuration from"));
    assert!(err.downcast_ref::<inilayer_core::error::LayerError>().is_some());
}

#[test]
fn test_render_text_skips_empty_sections() {
    let (_temp_dir, base, local) = create_sources();
    let ctx = CommandContext::load(&base, &[local]).unwrap();

    let text = show::render_text(ctx.config.maps(), &show::selected_kinds(None));

    assert_eq!(text, "[sectionInt]\nPORT = 8080\n\n[sectionStringList]\nHOSTS = [a,b]\n");
}

#[test]
fn test_render_json_groups_by_kind() {
    let (_temp_dir, base, local) = create_sources();
    let ctx = CommandContext::load(&base, &[local]).unwrap();

    let json = show::render_json(ctx.config.maps(), &show::selected_kinds(Some(ValueKind::Int))).unwrap();

    assert_eq!(json, serde_json::json!({ "int": { "PORT": 8080 } }));
}

#[test]
fn test_set_writes_and_flushes() {
    let (_temp_dir, base, local) = create_sources();
    let mut ctx = CommandContext::load(&base, &[&local]).unwrap();

    set::execute(set_request("PORT", "9090", ValueKind::Int), &mut ctx).unwrap();

    let reloaded = CommandContext::load(&base, &[&local]).unwrap();
    assert_eq!(reloaded.config.get(ValueKind::Int, "PORT"), Some(ConfigValue::Int(9090)));
    assert!(std::fs::read_to_string(&base).unwrap().contains("PORT = 9090"));
}

#[test]
fn test_set_dry_run_leaves_files_alone() {
    let (_temp_dir, base, local) = create_sources();
    let mut ctx = CommandContext::load(&base, &[&local]).unwrap();

    let mut request = set_request("PORT", "1", ValueKind::Int);
    request.dry_run = true;
    set::execute(request, &mut ctx).unwrap();

    assert_eq!(ctx.config.get(ValueKind::Int, "PORT"), Some(ConfigValue::Int(1)));
    assert_eq!(std::fs::read_to_string(&base).unwrap(), BASE);
    assert_eq!(std::fs::read_to_string(&local).unwrap(), LOCAL);
}

#[test]
fn test_set_rejects_invalid_text() {
    let (_temp_dir, base, local) = create_sources();
    let mut ctx = CommandContext::load(&base, &[&local]).unwrap();

    let err = set::execute(set_request("PORT", "eighty", ValueKind::Int), &mut ctx).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<inilayer_core::error::LayerError>(),
        Some(inilayer_core::error::LayerError::InvalidValue { .. })
    ));
}

#[test]
fn test_set_unknown_key_writes_nothing() {
    let (_temp_dir, base, local) = create_sources();
    let mut ctx = CommandContext::load(&base, &[&local]).unwrap();

    set::execute(set_request("NEW", "1", ValueKind::Int), &mut ctx).unwrap();

    assert_eq!(std::fs::read_to_string(&base).unwrap(), BASE);
    assert!(!ctx.config.contains_key("NEW"));
}

#[test]
fn test_set_unknown_key_strict_fails() {
    let (_temp_dir, base, local) = create_sources();
    let mut ctx = CommandContext::load(&base, &[&local]).unwrap();

    let mut request = set_request("NEW", "1", ValueKind::Int);
    request.strict = true;
    assert!(set::execute(request, &mut ctx).is_err());
}

#[test]
fn test_set_with_target_creates_key() {
    let (_temp_dir, base, local) = create_sources();
    let mut ctx = CommandContext::load(&base, &[&local]).unwrap();

    let mut request = set_request("DEBUG", "true", ValueKind::Bool);
    request.target = Some(local.clone());
    set::execute(request, &mut ctx).unwrap();

    let reloaded = CommandContext::load(&base, &[&local]).unwrap();
    assert_eq!(reloaded.config.get(ValueKind::Bool, "DEBUG"), Some(ConfigValue::Bool(true)));
    assert!(!std::fs::read_to_string(&base).unwrap().contains("DEBUG"));
}

#[test]
fn test_get_exit_codes() {
    let (_temp_dir, base, local) = create_sources();
    let ctx = CommandContext::load(&base, &[local]).unwrap();

    assert_eq!(get::execute("PORT", None, &ctx).unwrap(), ExitCode::SUCCESS);
    assert_eq!(get::execute("PORT", Some(ValueKind::Bool), &ctx).unwrap(), ExitCode::FAILURE);
    assert_eq!(get::execute("MISSING", None, &ctx).unwrap(), ExitCode::FAILURE);
}

#[test]
fn test_set_accepts_negative_values() {
    let cli = crate::Cli::try_parse_from(["inilayer", "set", "PORT", "-5", "--kind", "int"]).unwrap();

    let Commands::Set { key, value, kind, .. } = cli.command else {
        panic!("expected the set command");
    };
    assert_eq!(key, "PORT");
    assert_eq!(value, "-5");
    assert_eq!(kind, ValueKind::Int);

    let (_temp_dir, base, local) = create_sources();
    let mut ctx = CommandContext::load(&base, &[&local]).unwrap();
    set::execute(set_request(&key, &value, kind), &mut ctx).unwrap();
    assert_eq!(ctx.config.get(ValueKind::Int, "PORT"), Some(ConfigValue::Int(-5)));
}

#[test]
fn test_set_rejects_unsafe_key() {
    let (_temp_dir, base, local) = create_sources();
    let mut ctx = CommandContext::load(&base, &[&local]).unwrap();

    let mut request = set_request("a=b", "5", ValueKind::Int);
    request.target = Some(base.clone());
    let err = set::execute(request, &mut ctx).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<inilayer_core::error::LayerError>(),
        Some(inilayer_core::error::LayerError::InvalidKey { .. })
    ));
    assert_eq!(std::fs::read_to_string(&base).unwrap(), BASE);
}
