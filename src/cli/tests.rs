use std::path::Path;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::repository::InvalidNamePolicy;

#[test]
fn test_cli_parsing_defaults() {
    let cli = Cli::parse_from(["repoclean", "prune"]);
    assert_eq!(cli.global_opts().repo(), Path::new("/var/lib/pkgrepo"));
    assert_eq!(cli.global_opts().verbose(), 0);
    assert!(!cli.global_opts().quiet());

    match cli.command() {
        Commands::Prune {
            keep,
            dry_run,
            on_invalid,
            leave_signatures,
        } => {
            assert_eq!(*keep, 1);
            assert!(!*dry_run);
            assert_eq!(*on_invalid, InvalidNamePolicy::Skip);
            assert!(!*leave_signatures);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_prune_options() {
    let cli = Cli::parse_from([
        "repoclean",
        "--repo",
        "/srv/repo",
        "prune",
        "--keep",
        "0",
        "--dry-run",
        "--on-invalid",
        "abort",
        "--leave-signatures",
    ]);
    assert_eq!(cli.global_opts().repo(), Path::new("/srv/repo"));

    match cli.command() {
        Commands::Prune {
            keep,
            dry_run,
            on_invalid,
            leave_signatures,
        } => {
            assert_eq!(*keep, 0);
            assert!(*dry_run);
            assert_eq!(*on_invalid, InvalidNamePolicy::Abort);
            assert!(*leave_signatures);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_negative_keep_is_rejected() {
    let result = Cli::try_parse_from(["repoclean", "prune", "--keep", "-1"]);
    assert!(result.is_err());
}

#[test]
fn test_unknown_policy_is_rejected() {
    let result = Cli::try_parse_from(["repoclean", "prune", "--on-invalid", "guess"]);
    assert!(result.is_err());
}

#[test]
fn test_verbose_flag() {
    let cli = Cli::parse_from(["repoclean", "-vv", "list"]);
    assert_eq!(cli.global_opts().verbose(), 2);
    assert!(matches!(cli.command(), Commands::List { keep: 1, .. }));
}

#[test]
fn test_global_flag_positioning() {
    // Global flags can be placed anywhere
    let cli = Cli::parse_from(["repoclean", "list", "--repo", "repo", "--quiet"]);
    assert_eq!(cli.global_opts().repo(), Path::new("repo"));
    assert!(cli.global_opts().quiet());
}

#[test]
fn test_quiet_conflicts_with_verbose() {
    let result = Cli::try_parse_from(["repoclean", "-v", "-q", "list"]);
    assert!(result.is_err());
}

#[test]
fn test_vercmp_arguments() {
    let cli = Cli::parse_from(["repoclean", "vercmp", "1:1.0-1", "2.0-1"]);
    match cli.command() {
        Commands::Vercmp { first, second } => {
            assert_eq!(first, "1:1.0-1");
            assert_eq!(second, "2.0-1");
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_subcommand_is_required() {
    assert!(Cli::try_parse_from(["repoclean"]).is_err());
}

#[test]
fn test_cli_builder() {
    let cli = Cli::builder()
        .repo("custom/repo")
        .verbose(2)
        .quiet(false)
        .command(Commands::List {
            keep: 2,
            on_invalid: InvalidNamePolicy::Skip,
        })
        .build()
        .expect("Failed to build CLI");

    assert_eq!(cli.global_opts().repo(), Path::new("custom/repo"));
    assert_eq!(cli.global_opts().verbose(), 2);
    assert!(matches!(cli.command(), Commands::List { keep: 2, .. }));

    let cli = Cli::builder()
        .command(Commands::Vercmp {
            first: "1".to_string(),
            second: "2".to_string(),
        })
        .build()
        .expect("Failed to build CLI");
    assert_eq!(cli.global_opts().repo(), Path::new("/var/lib/pkgrepo"));

    assert!(Cli::builder().build().is_err());
}

#[test]
fn test_cli_debug_assert() {
    use clap::CommandFactory;
    <Cli as CommandFactory>::command().debug_assert();
}
