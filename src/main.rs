use clap::Parser;
use doxsearch::cli::{self, Cli, Commands};
use doxsearch::io::ExitCode;
use doxsearch::{Settings, logging};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::ConfigError.into();
        }
    };

    logging::init_with_config(&settings.logging);

    // Init creates the settings file, so a missing one is expected there.
    if cli.config.is_none()
        && !matches!(cli.command, Commands::Init { .. })
        && let Err(warning) = Settings::check_init()
    {
        tracing::debug!("{warning}");
    }

    match cli::run(cli, settings) {
        Ok(exit) => exit.into(),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::IoError.into()
        }
    }
}
