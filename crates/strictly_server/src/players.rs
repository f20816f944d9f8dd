//! Player trait and the automated memory player.

use anyhow::Result;
use std::collections::HashMap;
use strictly_memory::{BoardView, CardValue, CellState, Coord};
use tracing::debug;

/// Something that decides which card to turn next.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Picks a face-down card on `board`.
    async fn choose(&mut self, board: &BoardView) -> Result<Coord>;

    /// Learns the value revealed at `coord`.
    fn observe(&mut self, coord: Coord, value: &CardValue);

    /// Returns the player's display name.
    fn name(&self) -> &str;
}

/// Player with perfect recall.
///
/// Turns a known pair when it has one, finishes a pair whose partner it
/// remembers, and otherwise explores an unseen card.
#[derive(Debug, Clone)]
pub struct RecallPlayer {
    name: String,
    seen: HashMap<Coord, CardValue>,
}

impl RecallPlayer {
    /// Creates a player with an empty memory.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            seen: HashMap::new(),
        }
    }

    /// Number of positions whose value is remembered.
    pub fn remembered(&self) -> usize {
        self.seen.len()
    }

    fn learn(&mut self, board: &BoardView) {
        for (coord, cell) in board.iter() {
            if let Some(value) = cell.value() {
                self.seen.insert(coord, value.clone());
            }
        }
    }

    fn known_partner(&self, face_down: &[Coord], coord: Coord, value: &CardValue) -> Option<Coord> {
        face_down
            .iter()
            .copied()
            .find(|c| *c != coord && self.seen.get(c) == Some(value))
    }

    fn known_pair(&self, face_down: &[Coord]) -> Option<Coord> {
        face_down.iter().copied().find(|&coord| {
            self.seen
                .get(&coord)
                .is_some_and(|value| self.known_partner(face_down, coord, value).is_some())
        })
    }

    fn unseen(&self, face_down: &[Coord]) -> Option<Coord> {
        face_down.iter().copied().find(|c| !self.seen.contains_key(c))
    }
}

#[async_trait::async_trait]
impl Player for RecallPlayer {
    async fn choose(&mut self, board: &BoardView) -> Result<Coord> {
        self.learn(board);
        let face_down = board.face_down();

        let pending = board
            .iter()
            .find(|(_, cell)| cell.state() == CellState::Pending)
            .and_then(|(coord, cell)| cell.value().clone().map(|value| (coord, value)));

        let choice = match pending {
            Some((first, value)) => self
                .known_partner(&face_down, first, &value)
                .or_else(|| self.unseen(&face_down)),
            None => self
                .known_pair(&face_down)
                .or_else(|| self.unseen(&face_down)),
        }
        .or_else(|| face_down.first().copied());

        let Some(coord) = choice else {
            anyhow::bail!("No face-down cards left");
        };
        debug!(player = %self.name, %coord, "Chose card");
        Ok(coord)
    }

    fn observe(&mut self, coord: Coord, value: &CardValue) {
        self.seen.insert(coord, value.clone());
    }

    fn name(&self) -> &str {
        &self.name
    }
}
