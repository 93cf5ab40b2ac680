//! VSH CLI - interactive shell over an archived virtual filesystem.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;
use std::process::ExitCode;
use vsh_core::{shell, Config, Session, VshError};

mod input;

#[derive(Parser)]
#[command(name = "vsh")]
#[command(about = "Shell emulator over a tar.gz virtual filesystem", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file: CSV with a username,fs_path,log_path header, or TOML
    #[arg(short, long, default_value = "config.csv")]
    config: PathBuf,
}

fn main() -> ExitCode {
    // Initialize tracing subscriber
    // Respects RUST_LOG environment variable (e.g., RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), err);
            let hint = err
                .chain()
                .find_map(|cause| cause.downcast_ref::<VshError>())
                .and_then(VshError::recovery_suggestion);
            if let Some(hint) = hint {
                eprintln!("  {}", style(hint).dim());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    // Set up input first: once the session starts, the tree must be packed back
    let mut input = input::TerminalInput::spawn().context("Failed to set up terminal input")?;
    let mut session = Session::start(&config).context("Failed to start session")?;

    // The archive is packed even if the loop itself failed
    let outcome = shell::run(&mut session, &mut input, &mut std::io::stdout());
    let packed = session
        .close()
        .with_context(|| format!("Failed to write archive {}", config.fs_path.display()));

    outcome.context("Session aborted")?;
    packed?;
    Ok(())
}
