//! The single active game, shared across requests.

use crate::ServerError;
use std::sync::{Arc, Mutex, MutexGuard};
use strictly_memory::{BoardView, CardValue, PickResult, ResolveResult, Session, SessionError};
use tracing::{debug, info, instrument, warn};

/// Holds at most one memory session behind a mutex.
///
/// Cloning shares the same session. Every operation takes the lock for the
/// duration of one synchronous core call and releases it before returning.
#[derive(Debug, Clone)]
pub struct SessionManager {
    session: Arc<Mutex<Option<Session>>>,
}

impl SessionManager {
    /// Creates a manager with no game.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session manager");
        Self {
            session: Arc::new(Mutex::new(None)),
        }
    }

    /// Replaces the current game with a fresh one.
    ///
    /// The new session is built before the lock is taken, so a rejected
    /// shape leaves the previous game playable.
    #[instrument(skip(self, values))]
    pub fn new_game<I>(&self, rows: usize, cols: usize, values: I) -> Result<(), ServerError>
    where
        I: IntoIterator,
        I::Item: Into<CardValue>,
    {
        let session = Session::create(rows, cols, values)?;
        let replaced = self.lock().replace(session).is_some();
        info!(rows, cols, replaced, "New game started");
        Ok(())
    }

    /// Turns over the card at `(row, col)`.
    #[instrument(skip(self))]
    pub fn pick(&self, row: i64, col: i64) -> Result<PickResult, ServerError> {
        self.with_session(|session| session.pick(row, col))
    }

    /// Flips a mismatched pair back face down.
    #[instrument(skip(self))]
    pub fn resolve(&self) -> Result<ResolveResult, ServerError> {
        self.with_session(Session::resolve)
    }

    /// Snapshot of the current board.
    #[instrument(skip(self))]
    pub fn view(&self) -> Result<BoardView, ServerError> {
        let guard = self.lock();
        let session = guard.as_ref().ok_or(ServerError::NoActiveGame)?;
        debug!(complete = session.is_complete(), "Read board");
        Ok(session.view())
    }

    /// Returns true once a game has been created.
    pub fn has_game(&self) -> bool {
        self.lock().is_some()
    }

    fn with_session<T>(
        &self,
        op: impl FnOnce(&mut Session) -> Result<T, SessionError>,
    ) -> Result<T, ServerError> {
        let mut guard = self.lock();
        let session = guard.as_mut().ok_or(ServerError::NoActiveGame)?;
        Ok(op(session)?)
    }

    // Core operations are all-or-nothing, so a poisoned session is still whole.
    fn lock(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(|poisoned| {
            warn!("Session lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operations_need_a_game() {
        let manager = SessionManager::new();
        assert!(!manager.has_game());
        assert_eq!(manager.pick(0, 0).unwrap_err(), ServerError::NoActiveGame);
        assert_eq!(manager.resolve().unwrap_err(), ServerError::NoActiveGame);
        assert_eq!(manager.view().unwrap_err(), ServerError::NoActiveGame);
    }

    #[test]
    fn test_failed_new_game_keeps_previous() {
        let manager = SessionManager::new();
        manager.new_game(1, 2, ["A", "A"]).unwrap();
        manager.pick(0, 0).unwrap();

        let err = manager.new_game(2, 2, ["A"]).unwrap_err();
        assert_eq!(err.kind(), "shape_mismatch");

        let result = manager.pick(0, 1).unwrap();
        assert_eq!(result.matched(), Some(true));
    }

    #[test]
    fn test_new_game_discards_pending_picks() {
        let manager = SessionManager::new();
        manager.new_game(1, 2, ["A", "B"]).unwrap();
        manager.pick(0, 0).unwrap();
        manager.pick(0, 1).unwrap();

        manager.new_game(1, 2, ["A", "B"]).unwrap();
        assert!(manager.pick(0, 0).is_ok());
    }

    #[test]
    fn test_clones_share_the_session() {
        let manager = SessionManager::new();
        let handle = manager.clone();
        manager.new_game(1, 2, ["x", "x"]).unwrap();
        assert!(handle.has_game());
    }

    #[test]
    fn test_recovers_from_poisoned_lock() {
        let manager = SessionManager::new();
        manager.new_game(1, 2, ["x", "x"]).unwrap();

        let poisoner = manager.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.session.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(manager.pick(0, 0).is_ok());
    }
}
