use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["keel", "up", "-v", "-p", "/srv/app", "-d", ":memory:"]).unwrap();
    assert!(matches!(cli.command, Commands::Up));
    assert!(cli.global.verbose);
    assert_eq!(cli.global.project_dir, "/srv/app");
    assert_eq!(cli.global.database.as_deref(), Some(":memory:"));
}

#[test]
fn parse_status_json() {
    let cli = Cli::try_parse_from(["keel", "status", "--json"]).unwrap();
    match cli.command {
        Commands::Status(args) => assert!(args.json),
        other => panic!("expected status, got {other:?}"),
    }
}

#[test]
fn parse_new_joins_words() {
    let cli = Cli::try_parse_from(["keel", "new", "add", "profile", "image"]).unwrap();
    match cli.command {
        Commands::New(args) => assert_eq!(args.name, vec!["add", "profile", "image"]),
        other => panic!("expected new, got {other:?}"),
    }
}
