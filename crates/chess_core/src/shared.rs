//! A game handle that can be shared between threads.
//!
//! Every operation, including read-only queries, takes the same exclusive lock: the legality
//! checks move pieces around on the board while they run.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{piece::Color, Game, GameStatus, MoveReport, Result};

#[derive(Clone, Debug, Default)]
pub struct SharedGame(Arc<Mutex<Game>>);

impl SharedGame {
    pub fn new(game: Game) -> Self {
        SharedGame(Arc::new(Mutex::new(game)))
    }

    pub fn load(&self, fen: &str) -> Result<()> {
        self.0.lock().load(fen)
    }

    pub fn submit_move(&self, from: &str, to: &str) -> Result<MoveReport> {
        self.0.lock().submit_move(from, to)
    }

    pub fn current_turn(&self) -> Color {
        self.0.lock().current_turn()
    }

    pub fn status(&self, color: Color) -> Result<GameStatus> {
        self.0.lock().status(color)
    }

    pub fn render(&self) -> String {
        self.0.lock().render()
    }

    /// Runs `f` with the lock held, for sequences that must not interleave with other callers.
    pub fn with<R>(&self, f: impl FnOnce(&mut Game) -> R) -> R {
        f(&mut self.0.lock())
    }

    /// A copy of the current game.
    pub fn snapshot(&self) -> Game {
        self.0.lock().clone()
    }
}

impl From<Game> for SharedGame {
    fn from(game: Game) -> Self {
        SharedGame::new(game)
    }
}
