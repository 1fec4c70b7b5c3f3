//! Command-line interface: argument parsing and command dispatch.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};

use crate::Settings;
use crate::io::{Envelope, ErrorDetails, ExitCode};
use serde::Serialize;

/// Run a parsed command line with already loaded settings.
pub fn run(cli: Cli, settings: Settings) -> anyhow::Result<ExitCode> {
    let json = cli.json;
    match cli.command {
        Commands::Init { force } => commands::init::run_init(force, json),
        Commands::Config => commands::init::run_config(&settings, json),
        Commands::Index {
            paths,
            output,
            threads,
            dry_run,
        } => commands::index::run(
            commands::index::IndexArgs {
                paths,
                output,
                threads,
                dry_run,
            },
            settings,
            json,
        ),
        Commands::Parse { file } => commands::parse::run(&file, settings, json),
        Commands::Search {
            term,
            dir,
            section,
            limit,
            scope,
        } => commands::search::run(
            commands::search::SearchArgs {
                term,
                dir,
                section,
                limit,
                scope,
            },
            &settings,
            json,
        ),
        Commands::Inspect { file } => commands::inspect::run(&file, json),
        Commands::Validate { dir } => commands::validate::run(dir, &settings, json),
    }
}

/// Print an envelope on stdout and pass its exit code through.
pub(crate) fn emit<T: Serialize>(envelope: Envelope<T>, exit: ExitCode) -> anyhow::Result<ExitCode> {
    println!("{}", envelope.to_json()?);
    Ok(exit)
}

/// Report a failure in the selected output mode.
pub(crate) fn fail(
    json: bool,
    exit: ExitCode,
    message: impl std::fmt::Display,
    hint: Option<&str>,
) -> anyhow::Result<ExitCode> {
    if json {
        let mut envelope: Envelope<()> = if exit == ExitCode::NotFound {
            Envelope::not_found(message.to_string())
        } else {
            Envelope::error(exit, message.to_string())
        };
        if let Some(hint) = hint {
            envelope = envelope.with_hint(hint).with_error_details(ErrorDetails {
                suggestions: vec![hint.to_string()],
                context: None,
            });
        }
        return emit(envelope, exit);
    }

    eprintln!("Error: {message}");
    if let Some(hint) = hint {
        eprintln!("{hint}");
    }
    Ok(exit)
}
