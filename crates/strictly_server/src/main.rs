//! Strictly Memory - Unified CLI
//!
//! Serve the game over HTTP, play a board file automatically, or preview one.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use strictly_server::{
    GameBackend, LocalBackend, RecallPlayer, RestGameClient, ServerConfig, read_board_file,
    run_game_with,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port, config } => run_server(host, port, config).await,
        Command::Play {
            board,
            server_url,
            delay_ms,
            config,
        } => play(board, server_url, delay_ms, config).await,
        Command::Show { board } => show(board),
    }
}

/// Run the HTTP game server
#[instrument]
async fn run_server(
    host: Option<String>,
    port: Option<u16>,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = ServerConfig::load(config.as_deref())?.with_cli(host, port);

    info!(address = %config.address(), "Starting Strictly Memory server");
    strictly_server::serve(&config).await
}

/// Play a board file with the recall player
#[instrument]
async fn play(
    board: PathBuf,
    server_url: Option<String>,
    delay_ms: Option<u64>,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = ServerConfig::load(config.as_deref())?.with_mismatch_delay_ms(delay_ms);
    let spec = read_board_file(&board)?;

    let backend: Box<dyn GameBackend> = match server_url {
        Some(url) => {
            let client = RestGameClient::new(url);
            client.health().await?;
            info!(server = %client.base_url(), "Playing against server");
            Box::new(client)
        }
        None => {
            info!("Playing in-process");
            Box::new(LocalBackend::default())
        }
    };

    let mut player = RecallPlayer::new("recall");
    let summary = run_game_with(
        backend.as_ref(),
        &mut player,
        &spec,
        config.mismatch_delay(),
        |turn, view| println!("Turn {turn}\n{view}\n"),
    )
    .await?;

    println!(
        "Finished in {} turns: {} matches, {} mismatches",
        summary.turns(),
        summary.matches(),
        summary.mismatches()
    );
    Ok(())
}

/// Print a board file face down
fn show(board: PathBuf) -> Result<()> {
    let spec = read_board_file(&board)?;
    let session = spec.into_session()?;
    println!("{}", session.view().look().trim_end());
    println!();
    println!("{}", session.display());
    Ok(())
}
