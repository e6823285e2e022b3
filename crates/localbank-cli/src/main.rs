//! LocalBank ONE
//!
//! Entry point for the `localbank` binary.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::io::BufRead;

use anyhow::{Context, Result};
use clap::Parser;
use localbank_auth::hash_password;
use localbank_cli::config_handlers::handle_config_command;
use localbank_cli::{AdminAction, Cli, Command, LocalbankConfig, build_state, listen_addr};
use localbank_core::ConfigManager;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,localbank=debug".into()),
        )
        .init();

    let config_path = cli.config.as_deref();
    match cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    }) {
        Command::Serve { host, port } => serve(config_path, host, port).await,
        Command::Config { action } => {
            handle_config_command(config_path, action)?;
            Ok(())
        }
        Command::Admin {
            action: AdminAction::HashPassword,
        } => {
            eprint!("Password: ");
            let password = read_password(std::io::stdin().lock())?;
            println!("{}", hash_password(&password)?);
            Ok(())
        }
    }
}

async fn serve(config_path: Option<&str>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = LocalbankConfig::load(config_path).context("loading configuration")?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let addr = listen_addr(&host, port)?;

    let state = build_state(&config)?;
    tracing::info!(
        storage = state.data.store().name(),
        auth = state.auth.name(),
        "LocalBank ONE starting"
    );
    localbank_api::serve(state, addr).await?;
    Ok(())
}

/// First line of `reader`, without its line ending.
fn read_password(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("reading password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        anyhow::bail!("password must not be empty");
    }
    Ok(password.to_string())
}
