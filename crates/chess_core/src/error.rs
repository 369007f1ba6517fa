use thiserror::Error;

use crate::{Color, PieceType, Square};

/// Why a position string could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("Invalid FEN: missing {field} field")]
    MissingField { field: &'static str },

    #[error("Invalid FEN: unrecognized character '{ch}'")]
    InvalidCharacter { ch: char },

    #[error("Invalid FEN: invalid empty square count {run} on rank {rank}")]
    InvalidEmptyRun { run: u32, rank: u8 },

    #[error("Invalid FEN: rank {rank} has {files} squares instead of 8")]
    RankLength { rank: u8, files: usize },

    #[error("Invalid FEN: expected 8 ranks, found {found}")]
    RankCount { found: usize },

    #[error("Invalid FEN: invalid active color '{found}'")]
    InvalidActiveColor { found: String },
}

/// A malformed two-character coordinate token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid square '{token}'")]
pub struct SquareError {
    pub token: String,
}

/// A rejected move. The board is never modified when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("Move out of bounds")]
    OutOfBounds,

    #[error("There is no piece at position {square}")]
    NoPiece { square: Square },

    #[error("It is not {color}'s turn to move!")]
    WrongTurn { color: Color },

    #[error("{color}'s {piece} cannot move to {to}")]
    CannotMoveTo {
        color: Color,
        piece: PieceType,
        to: Square,
    },

    #[error("Move leaves the king in check")]
    LeavesKingInCheck,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("{color} king not found on the board")]
    MissingKing { color: Color },

    #[error(transparent)]
    Illegal(#[from] IllegalMove),
}

pub type Result<T> = std::result::Result<T, ChessError>;
