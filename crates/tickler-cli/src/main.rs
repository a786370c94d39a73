use clap::Parser;
use owo_colors::{OwoColorize, Style};
use tickler_core::error::CoreError;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod parser;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = config::Config::new().unwrap_or_default();
    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Preview(command) => commands::preview::preview_command(command, &config),
        cli::Commands::Tz(command) => commands::tz::tz_command(command),
        cli::Commands::Sweep(command) => commands::sweep::sweep_command(command, &config).await,
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::InvalidTimezone(s) => {
                eprintln!(
                    "{} {}. Use IANA names like 'America/New_York'.",
                    "Error:".style(error_style),
                    s
                );
            }
            CoreError::InvalidDateInput(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
}
