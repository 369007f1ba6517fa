use std::fmt;

use log::trace;

use crate::{
    piece::{Color, PieceType},
    Piece, Square, BOARD_SIZE,
};

const FILE_LABELS: &str = "    a   b   c   d   e   f   g   h";
const RANK_SEPARATOR: &str = "  ---------------------------------";

/// The 8x8 grid. Each slot owns at most one piece; a piece's recorded square always
/// matches the slot holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
    current_turn: Color,
    // Carried through from the position string, never interpreted
    castling_rights: String,
}

/// A move applied by [`Board::apply_temporary`] that has not yet been undone or committed.
///
/// It holds whatever the destination square held before the move, so the position can be
/// restored exactly. Dropping it without calling [`Board::undo_temporary`] or
/// [`TemporaryMove::commit`] leaves the move on the board and destroys the captured piece.
#[must_use = "a temporary move must be undone or committed"]
#[derive(Debug, PartialEq, Eq)]
pub struct TemporaryMove {
    from: Square,
    to: Square,
    captured: Option<Piece>,
}

impl TemporaryMove {
    pub fn from(&self) -> Square {
        self.from
    }

    pub fn to(&self) -> Square {
        self.to
    }

    pub fn captured(&self) -> Option<&Piece> {
        self.captured.as_ref()
    }

    /// Makes the move permanent, handing back the captured piece (if any) to be dropped.
    pub fn commit(self) -> Option<Piece> {
        self.captured
    }
}

impl Board {
    /// The standard initial position, White to move.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_initial_position();
        board.castling_rights = "KQkq".to_string();
        board
    }

    fn setup_initial_position(&mut self) {
        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for (file, &piece_type) in (0u8..).zip(back_rank.iter()) {
            for (color, back, pawns) in [(Color::White, 0, 1), (Color::Black, 7, 6)] {
                if let Some(square) = Square::new(file, back) {
                    self.place_piece(Piece::new(piece_type, color, square));
                }
                if let Some(square) = Square::new(file, pawns) {
                    self.place_piece(Piece::new(PieceType::Pawn, color, square));
                }
            }
        }
    }

    pub fn empty() -> Self {
        Self {
            squares: [[None; BOARD_SIZE]; BOARD_SIZE],
            current_turn: Color::White,
            castling_rights: String::new(),
        }
    }

    pub fn get_piece(&self, square: Square) -> Option<&Piece> {
        let (rank, file) = square.index();
        self.squares[rank][file].as_ref()
    }

    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    pub fn castling_rights(&self) -> &str {
        &self.castling_rights
    }

    pub(crate) fn set_current_turn(&mut self, color: Color) {
        self.current_turn = color;
    }

    pub(crate) fn set_castling_rights(&mut self, rights: &str) {
        self.castling_rights = rights.to_string();
    }

    pub(crate) fn switch_turn(&mut self) {
        self.current_turn = self.current_turn.opposite();
    }

    /// Puts `piece` on its recorded square, dropping any previous occupant.
    pub(crate) fn place_piece(&mut self, piece: Piece) {
        let (rank, file) = piece.square().index();
        self.squares[rank][file] = Some(piece);
    }

    fn take_piece(&mut self, square: Square) -> Option<Piece> {
        let (rank, file) = square.index();
        self.squares[rank][file].take()
    }

    fn set_slot(&mut self, square: Square, occupant: Option<Piece>) {
        let (rank, file) = square.index();
        self.squares[rank][file] = occupant;
    }

    /// All pieces in board-scan order (rank 1 first, a-file first within a rank).
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.squares.iter().flatten().flatten()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |piece| piece.color == color)
    }

    /// Moves the piece on `from` to `to`, remembering the previous occupant of `to`.
    /// Returns `None` (and changes nothing) when `from` is empty.
    pub fn apply_temporary(&mut self, from: Square, to: Square) -> Option<TemporaryMove> {
        let mut piece = self.take_piece(from)?;
        piece.set_square(to);
        let captured = self.take_piece(to);
        self.place_piece(piece);
        trace!("temporary move {}-{}", from, to);
        Some(TemporaryMove { from, to, captured })
    }

    /// Restores the position exactly as it was before `apply_temporary`.
    pub fn undo_temporary(&mut self, temporary: TemporaryMove) {
        trace!(
            "undo temporary move {}-{}",
            temporary.from(),
            temporary.to()
        );
        let TemporaryMove { from, to, captured } = temporary;
        let moved = self.take_piece(to);
        self.set_slot(to, captured);
        if let Some(mut piece) = moved {
            piece.set_square(from);
            self.place_piece(piece);
        }
    }

    /// Evaluates `check` against the position after moving `from` to `to`, then restores the
    /// board. The closure only sees a shared reference, so the restore runs on every path.
    pub fn probe<R>(
        &mut self,
        from: Square,
        to: Square,
        check: impl FnOnce(&Board) -> R,
    ) -> Option<R> {
        let temporary = self.apply_temporary(from, to)?;
        let result = check(self);
        self.undo_temporary(temporary);
        Some(result)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{FILE_LABELS}")?;
        writeln!(f, "{RANK_SEPARATOR}")?;
        for (rank, row) in self.squares.iter().enumerate().rev() {
            write!(f, "{} ", rank + 1)?;
            for slot in row {
                match slot {
                    Some(piece) => write!(f, "| {} ", piece.fen_char())?,
                    None => write!(f, "|   ")?,
                }
            }
            writeln!(f, "|")?;
            writeln!(f, "{RANK_SEPARATOR}")?;
        }
        Ok(())
    }
}
