// Core chess rules: board state, position loading, move generation and legality
pub mod board;
pub mod error;
pub mod fen;
pub mod game;
pub mod moves;
pub mod piece;
pub mod rules;
pub mod shared;
pub mod square;

// Re-export main types for convenience
pub use board::{Board, TemporaryMove};
pub use error::{ChessError, FenError, IllegalMove, Result, SquareError};
pub use game::{Game, MoveReport};
pub use moves::Move;
pub use piece::{Color, Piece, PieceType};
pub use rules::GameStatus;
pub use shared::SharedGame;
pub use square::Square;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 8;

/// The standard initial position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq";
