use clap::Parser;
use std::path::PathBuf;

// Import types from the main crate
use testforge::cli::{Cli, Commands};

#[test]
fn test_cli_help() {
    let result = Cli::try_parse_from(vec!["testforge", "--help"]);
    assert!(result.is_err()); // --help causes early exit with error
}

#[test]
fn test_cli_version() {
    let result = Cli::try_parse_from(vec!["testforge", "--version"]);
    assert!(result.is_err()); // --version causes early exit with error
}

// ============================================================================
// Global Options Tests
// ============================================================================

#[test]
fn test_global_config_option() {
    let cli = Cli::try_parse_from(vec![
        "testforge",
        "--config",
        "/custom/config.yaml",
        "signatures",
        "--header-file",
        "math.h",
    ])
    .unwrap();

    assert_eq!(cli.config, PathBuf::from("/custom/config.yaml"));
}

#[test]
fn test_global_config_default() {
    let cli =
        Cli::try_parse_from(vec!["testforge", "signatures", "--header-file", "math.h"]).unwrap();

    assert_eq!(cli.config, PathBuf::from(".testforge/config.yaml"));
}

#[test]
fn test_global_verbose_single() {
    let cli = Cli::try_parse_from(vec![
        "testforge",
        "-v",
        "signatures",
        "--header-file",
        "math.h",
    ])
    .unwrap();

    assert_eq!(cli.verbose, 1);
}

#[test]
fn test_global_verbose_multiple() {
    let cli = Cli::try_parse_from(vec![
        "testforge",
        "-vvv",
        "signatures",
        "--header-file",
        "math.h",
    ])
    .unwrap();

    assert_eq!(cli.verbose, 3);
}

#[test]
fn test_global_json_flag() {
    let cli = Cli::try_parse_from(vec![
        "testforge",
        "--json",
        "signatures",
        "--header-file",
        "math.h",
    ])
    .unwrap();

    assert!(cli.json);
}

#[test]
fn test_global_options_combined() {
    let cli = Cli::try_parse_from(vec![
        "testforge",
        "--config",
        "/tmp/config.yaml",
        "-vv",
        "--json",
        "signatures",
        "--header-file",
        "math.h",
    ])
    .unwrap();

    assert_eq!(cli.config, PathBuf::from("/tmp/config.yaml"));
    assert_eq!(cli.verbose, 2);
    assert!(cli.json);
}

// ============================================================================
// Run Command Tests
// ============================================================================

#[test]
fn test_run_minimal() {
    let cli = Cli::try_parse_from(vec![
        "testforge",
        "run",
        "--source-file",
        "math.c",
        "--header-file",
        "math.h",
    ])
    .unwrap();

    match cli.command {
        Commands::Run(args) => {
            assert_eq!(args.source_file, PathBuf::from("math.c"));
            assert_eq!(args.header_file, PathBuf::from("math.h"));
            assert!(args.compiler.is_none());
            assert!(args.model.is_none());
            assert!(args.build_dir.is_none());
            assert!(args.jobs.is_none());
            assert!(args.strategies.is_empty());
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_run_with_all_overrides() {
    let cli = Cli::try_parse_from(vec![
        "testforge",
        "run",
        "--source-file",
        "src/math.c",
        "--header-file",
        "include/math.h",
        "--compiler",
        "clang",
        "--model",
        "gpt-4o",
        "--build-dir",
        "/tmp/scratch",
        "--jobs",
        "8",
    ])
    .unwrap();

    match cli.command {
        Commands::Run(args) => {
            assert_eq!(args.source_file, PathBuf::from("src/math.c"));
            assert_eq!(args.header_file, PathBuf::from("include/math.h"));
            assert_eq!(args.compiler.as_deref(), Some("clang"));
            assert_eq!(args.model.as_deref(), Some("gpt-4o"));
            assert_eq!(args.build_dir, Some(PathBuf::from("/tmp/scratch")));
            assert_eq!(args.jobs, Some(8));
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_run_jobs_short_flag() {
    let cli = Cli::try_parse_from(vec![
        "testforge",
        "run",
        "--source-file",
        "math.c",
        "--header-file",
        "math.h",
        "-j",
        "4",
    ])
    .unwrap();

    match cli.command {
        Commands::Run(args) => assert_eq!(args.jobs, Some(4)),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_run_strategy_repeatable() {
    let cli = Cli::try_parse_from(vec![
        "testforge",
        "run",
        "--source-file",
        "math.c",
        "--header-file",
        "math.h",
        "--strategy",
        "happy-path",
        "--strategy",
        "edge-case",
    ])
    .unwrap();

    match cli.command {
        Commands::Run(args) => {
            assert_eq!(args.strategies, vec!["happy-path", "edge-case"]);
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_run_requires_source_file() {
    let result = Cli::try_parse_from(vec!["testforge", "run", "--header-file", "math.h"]);
    assert!(result.is_err());
}

#[test]
fn test_run_requires_header_file() {
    let result = Cli::try_parse_from(vec!["testforge", "run", "--source-file", "math.c"]);
    assert!(result.is_err());
}

// ============================================================================
// Signatures Command Tests
// ============================================================================

#[test]
fn test_signatures_command() {
    let cli = Cli::try_parse_from(vec![
        "testforge",
        "signatures",
        "--header-file",
        "include/math.h",
    ])
    .unwrap();

    match cli.command {
        Commands::Signatures(args) => {
            assert_eq!(args.header_file, PathBuf::from("include/math.h"));
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_signatures_requires_header_file() {
    let result = Cli::try_parse_from(vec!["testforge", "signatures"]);
    assert!(result.is_err());
}

// ============================================================================
// Invalid Input Tests
// ============================================================================

#[test]
fn test_unknown_subcommand_rejected() {
    let result = Cli::try_parse_from(vec!["testforge", "explode"]);
    assert!(result.is_err());
}

#[test]
fn test_missing_subcommand_rejected() {
    let result = Cli::try_parse_from(vec!["testforge"]);
    assert!(result.is_err());
}

#[test]
fn test_jobs_rejects_non_numeric() {
    let result = Cli::try_parse_from(vec![
        "testforge",
        "run",
        "--source-file",
        "math.c",
        "--header-file",
        "math.h",
        "--jobs",
        "many",
    ]);
    assert!(result.is_err());
}
