//! Configuration tests
//!
//! Config paths, YAML persistence and command-line overrides.

mod common;

use clap::Parser;
use pretty_csv::cli::CliArgs;
use pretty_csv::config_paths;
use pretty_csv::csv::Separator;
use pretty_csv::{BorderStyle, FormatOptions, LineStyle};

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("pretty-csv"));
    }
}

#[test]
fn test_config_file_is_yaml() {
    if let Some(file) = config_paths::config_file() {
        assert_eq!(file.file_name().unwrap(), "config.yaml");
    }
}

// ========================================================================
// Persistence Tests
// ========================================================================

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let options = FormatOptions {
        separator: Separator::Byte(b'\t'),
        border_style: BorderStyle::DoubleRule,
        double_header: true,
        title: Some("sales".to_string()),
        ..Default::default()
    };
    options.save_to(&path).unwrap();

    let loaded = FormatOptions::load_from(&path).unwrap();
    assert_eq!(loaded, options);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("separator: tab"));
    assert!(text.contains("border_style: double-rule"));
}

#[test]
fn test_invalid_yaml_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "separator: [not, a, char]\n").unwrap();

    assert!(FormatOptions::load_from(&path).is_err());
}

#[test]
fn test_invalid_separator_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "separator: \"::\"\n").unwrap();

    let err = FormatOptions::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("invalid separator"));
}

// ========================================================================
// CLI Overlay Tests
// ========================================================================

#[test]
fn test_cli_overrides_loaded_options() {
    let mut options = FormatOptions {
        border_style: BorderStyle::None,
        ..Default::default()
    };
    let args = CliArgs::try_parse_from(["pretty-csv", "--border", "double", "--ascii", "x.psv"])
        .unwrap();
    args.apply_to(&mut options);

    assert_eq!(options.border_style, BorderStyle::DoubleRule);
    assert_eq!(options.separator, Separator::Byte(b'|'));
    assert_eq!(options.layout().line_style, LineStyle::Ascii);
}

#[test]
fn test_cli_rejects_bad_separator() {
    assert!(CliArgs::try_parse_from(["pretty-csv", "--separator", "ab"]).is_err());
}

#[test]
fn test_cli_options_drive_rendering() {
    let mut options = FormatOptions::default();
    CliArgs::try_parse_from(["pretty-csv", "-b", "none", "--ascii", "-s", ";"])
        .unwrap()
        .apply_to(&mut options);

    let lines = common::lines_of(&common::format("a;b\n1;2\n", &options));
    assert_eq!(lines, ["a b", "- -", "1 2", "(1 rows)"]);
}
