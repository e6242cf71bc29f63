use clap::Parser;
use env_logger::Target;
use eyre::{Report, Result};
use grond_complete::app;
use grond_complete::cli::{Cli, Command};
use log::debug;
use std::fs::OpenOptions;

fn setup_logging() -> Result<(), Report> {
    let log_dir = dirs::data_local_dir()
        .ok_or_else(|| eyre::eyre!("Could not determine local data directory"))?
        .join("grond-complete")
        .join("logs");

    std::fs::create_dir_all(&log_dir)?;
    let log_file_path = log_dir.join("grond-complete.log");

    let log_file = OpenOptions::new().create(true).append(true).open(&log_file_path)?;

    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"))
        .target(Target::Pipe(Box::new(log_file)))
        .try_init()?;

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let completing = matches!(cli.command, Command::Complete(_));

    // Setup logging first; a completion request carries on without it
    if let Err(e) = setup_logging()
        && !completing
    {
        eprintln!("Failed to setup logging: {e}");
        std::process::exit(1);
    }
    debug!("Starting grond-complete");

    let stdout = std::io::stdout();
    if let Err(e) = app::run(cli, &mut stdout.lock()) {
        if completing {
            debug!("completion failed: {e}");
            return;
        }
        eprintln!("{e}");
        std::process::exit(1);
    }
}
