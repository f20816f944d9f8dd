//! Drives a whole game through a backend with one player.

use crate::{GameBackend, Player};
use anyhow::{Context, Result};
use derive_getters::Getters;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use strictly_memory::{BoardSpec, BoardView};
use tracing::{debug, info, instrument};

/// Tally of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize)]
pub struct GameSummary {
    /// Pairs of picks made.
    #[getter(copy)]
    turns: usize,
    /// Turns that found a pair.
    #[getter(copy)]
    matches: usize,
    /// Turns that had to be resolved.
    #[getter(copy)]
    mismatches: usize,
}

/// Reads and parses a board file.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn read_board_file(path: impl AsRef<Path>) -> Result<BoardSpec> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read board file {}", path.display()))?;
    let spec = text
        .parse::<BoardSpec>()
        .with_context(|| format!("Invalid board file {}", path.display()))?;
    info!(rows = spec.rows(), cols = spec.cols(), "Loaded board file");
    Ok(spec)
}

/// Plays the board layout to completion.
///
/// Each turn is two picks. A mismatched pair stays face up for
/// `mismatch_delay` before it is resolved.
pub async fn run_game<B, P>(
    backend: &B,
    player: &mut P,
    spec: &BoardSpec,
    mismatch_delay: Duration,
) -> Result<GameSummary>
where
    B: GameBackend + ?Sized,
    P: Player + ?Sized,
{
    run_game_with(backend, player, spec, mismatch_delay, |_, _| {}).await
}

/// Like [`run_game`], calling `on_turn` with the board after each turn's second pick.
#[instrument(skip_all, fields(player = player.name(), rows = spec.rows(), cols = spec.cols()))]
pub async fn run_game_with<B, P, F>(
    backend: &B,
    player: &mut P,
    spec: &BoardSpec,
    mismatch_delay: Duration,
    mut on_turn: F,
) -> Result<GameSummary>
where
    B: GameBackend + ?Sized,
    P: Player + ?Sized,
    F: FnMut(usize, &BoardView) + Send,
{
    backend.new_game(spec).await?;
    info!("Game started");

    let cards = spec.rows() * spec.cols();
    let turn_limit = cards.saturating_mul(cards).max(1);
    let mut summary = GameSummary::default();

    loop {
        let board = backend.board().await?;
        if board.complete() {
            break;
        }
        if summary.turns >= turn_limit {
            anyhow::bail!("Game did not finish within {} turns", turn_limit);
        }

        let first = player.choose(&board).await?;
        let revealed = backend.pick(first).await?;
        player.observe(revealed.flipped(), revealed.value());

        let board = backend.board().await?;
        let second = player.choose(&board).await?;
        let revealed = backend.pick(second).await?;
        player.observe(revealed.flipped(), revealed.value());

        summary.turns += 1;
        let after = backend.board().await?;
        on_turn(summary.turns, &after);

        match revealed.matched() {
            Some(true) => {
                summary.matches += 1;
                debug!(turn = summary.turns, %first, %second, "Matched");
            }
            Some(false) => {
                summary.mismatches += 1;
                debug!(turn = summary.turns, %first, %second, "Mismatched");
                if !mismatch_delay.is_zero() {
                    tokio::time::sleep(mismatch_delay).await;
                }
                backend.resolve().await?;
            }
            None => anyhow::bail!("Second pick at {} reported no match outcome", second),
        }
    }

    info!(
        turns = summary.turns,
        matches = summary.matches,
        mismatches = summary.mismatches,
        "Game complete"
    );
    Ok(summary)
}
