use std::fmt;

use log::{debug, info};

use crate::{
    error::IllegalMove,
    moves::Move,
    piece::{Color, PieceType},
    rules::{self, GameStatus},
    Board, Result, Square,
};

/// The outcome of a committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    pub color: Color,
    pub piece: PieceType,
    pub from: Square,
    pub to: Square,
    pub captured: Option<PieceType>,
    /// Position of the side now to move.
    pub status: GameStatus,
}

impl fmt::Display for MoveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}'s {} moves from {} to {}",
            self.color, self.piece, self.from, self.to
        )?;
        if let Some(captured) = self.captured {
            write!(f, " taking {}'s {}", self.color.opposite(), captured)?;
        }
        let opponent = self.color.opposite();
        match self.status {
            GameStatus::Normal => Ok(()),
            GameStatus::Check => write!(f, "\n{opponent} is in check"),
            GameStatus::Checkmate => write!(f, "\n{opponent} is in checkmate"),
            GameStatus::Stalemate => write!(f, "\nThe game is in stalemate"),
        }
    }
}

/// A single game: one board, mutated in place by loads and moves.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Game {
    board: Board,
}

impl Game {
    pub fn new() -> Self {
        Self { board: Board::new() }
    }

    pub fn from_fen(fen: &str) -> Result<Self> {
        Ok(Self {
            board: Board::from_fen(fen)?,
        })
    }

    /// Replaces the whole position. On error the previous position is kept.
    pub fn load(&mut self, fen: &str) -> Result<()> {
        self.board = Board::from_fen(fen)?;
        info!("A new board state is loaded: {}", fen);
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Color {
        self.board.current_turn()
    }

    pub fn find_king(&self, color: Color) -> Result<Square> {
        rules::find_king(&self.board, color)
    }

    pub fn is_king_safe(&self, color: Color) -> Result<bool> {
        rules::is_king_safe(&self.board, color)
    }

    /// See [`rules::is_checkmate`]: only meaningful when `color` is known to be in check.
    pub fn is_checkmate(&mut self, color: Color) -> Result<bool> {
        rules::is_checkmate(&mut self.board, color)
    }

    /// See [`rules::is_stalemate`]: only meaningful when `color` is known not to be in check.
    pub fn is_stalemate(&mut self, color: Color) -> Result<bool> {
        rules::is_stalemate(&mut self.board, color)
    }

    pub fn status(&mut self, color: Color) -> Result<GameStatus> {
        rules::status(&mut self.board, color)
    }

    pub fn legal_moves(&mut self, from: Square) -> Result<Vec<Square>> {
        rules::legal_moves(&mut self.board, from)
    }

    /// The board as text, rank 8 at the top.
    pub fn render(&self) -> String {
        self.board.to_string()
    }

    /// Plays `from` -> `to` for the side to move, given as coordinate tokens like `E2`.
    ///
    /// A rejected move, or any error, leaves the game exactly as it was. A committed move
    /// always hands the turn to the other side.
    pub fn submit_move(&mut self, from: &str, to: &str) -> Result<MoveReport> {
        let result = self.try_move(from, to);
        if let Err(err) = &result {
            debug!("move {}-{} rejected: {}", from, to, err);
        }
        result
    }

    fn try_move(&mut self, from: &str, to: &str) -> Result<MoveReport> {
        let (Some(from), Some(to)) = (Square::from_algebraic(from), Square::from_algebraic(to))
        else {
            return Err(IllegalMove::OutOfBounds.into());
        };

        let piece = *self
            .board
            .get_piece(from)
            .ok_or(IllegalMove::NoPiece { square: from })?;

        if piece.color != self.board.current_turn() {
            return Err(IllegalMove::WrongTurn { color: piece.color }.into());
        }

        if !Move::new(from, to).is_valid(&self.board) {
            return Err(IllegalMove::CannotMoveTo {
                color: piece.color,
                piece: piece.piece_type,
                to,
            }
            .into());
        }

        let temporary = self
            .board
            .apply_temporary(from, to)
            .ok_or(IllegalMove::NoPiece { square: from })?;

        // Everything that can fail is evaluated before the move is committed
        let status = match self.evaluate_applied(piece.color) {
            Ok(status) => status,
            Err(err) => {
                self.board.undo_temporary(temporary);
                return Err(err);
            }
        };

        let captured = temporary.commit().map(|captured| captured.piece_type);
        self.board.switch_turn();

        let report = MoveReport {
            color: piece.color,
            piece: piece.piece_type,
            from,
            to,
            captured,
            status,
        };
        info!("{}", report);
        Ok(report)
    }

    // Checks the mover's king and classifies the position for the opponent
    fn evaluate_applied(&mut self, mover: Color) -> Result<GameStatus> {
        if !rules::is_king_safe(&self.board, mover)? {
            return Err(IllegalMove::LeavesKingInCheck.into());
        }
        rules::status(&mut self.board, mover.opposite())
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.board, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ChessError, FenError, STARTING_FEN};

    fn sq(token: &str) -> Square {
        Square::from_algebraic(token).unwrap()
    }

    fn rejected(game: &mut Game, from: &str, to: &str) -> IllegalMove {
        let before = game.clone();
        let err = game.submit_move(from, to).unwrap_err();
        assert_eq!(*game, before, "rejected move {from}-{to} changed the game");
        match err {
            ChessError::Illegal(illegal) => illegal,
            other => panic!("expected an illegal move, got {other:?}"),
        }
    }

    #[test]
    fn new_game_is_start_position() {
        let game = Game::new();
        assert_eq!(game.board().to_fen(), STARTING_FEN);
        assert_eq!(game.current_turn(), Color::White);
    }

    #[test]
    fn committed_move_reports_and_flips_turn() {
        let mut game = Game::new();
        let report = game.submit_move("E2", "E4").unwrap();
        assert_eq!(report.to_string(), "White's Pawn moves from E2 to E4");
        assert_eq!(report.status, GameStatus::Normal);
        assert_eq!(game.current_turn(), Color::Black);
        assert!(game.board().get_piece(sq("E2")).is_none());
        assert_eq!(game.board().get_piece(sq("E4")).unwrap().square(), sq("E4"));
    }

    #[test]
    fn tokens_are_case_insensitive() {
        let mut game = Game::new();
        assert!(game.submit_move("g1", "f3").is_ok());
        assert_eq!(
            game.board().get_piece(sq("F3")).map(|p| p.piece_type),
            Some(PieceType::Knight)
        );
    }

    #[test]
    fn each_rejection_reason() {
        let mut game = Game::new();
        assert_eq!(rejected(&mut game, "E9", "E4"), IllegalMove::OutOfBounds);
        assert_eq!(rejected(&mut game, "E2", "J4"), IllegalMove::OutOfBounds);
        assert_eq!(
            rejected(&mut game, "E3", "E4"),
            IllegalMove::NoPiece { square: sq("E3") }
        );
        assert_eq!(
            rejected(&mut game, "E7", "E5"),
            IllegalMove::WrongTurn { color: Color::Black }
        );
        assert_eq!(
            rejected(&mut game, "F1", "C4"),
            IllegalMove::CannotMoveTo {
                color: Color::White,
                piece: PieceType::Bishop,
                to: sq("C4"),
            }
        );

        game.load("4r1k1/8/8/8/8/8/4B3/4K3 w -").unwrap();
        assert_eq!(
            rejected(&mut game, "E2", "D3"),
            IllegalMove::LeavesKingInCheck
        );
    }

    #[test]
    fn geometry_gate_agrees_with_move_validity() {
        let game = Game::new();
        let white: Vec<Square> = game
            .board()
            .pieces_of(Color::White)
            .map(|piece| piece.square())
            .collect();
        for from in white {
            for to in Square::all() {
                let mut attempt = game.clone();
                let outcome = attempt.submit_move(&from.to_string(), &to.to_string());
                let refused_geometry = matches!(
                    outcome,
                    Err(ChessError::Illegal(IllegalMove::CannotMoveTo { .. }))
                );
                assert_eq!(
                    refused_geometry,
                    !Move::new(from, to).is_valid(game.board()),
                    "{from}-{to}"
                );
            }
        }
    }

    #[test]
    fn capture_is_reported_and_piece_removed() {
        let mut game = Game::from_fen("rnbqkbnr/pp1pp1pp/4p2p/6P1/8/2P5/PPP1PPP1/RNBQKBNR w KQkq")
            .unwrap();
        let report = game.submit_move("H1", "H6").unwrap();
        assert_eq!(report.captured, Some(PieceType::Pawn));
        assert_eq!(
            report.to_string(),
            "White's Rook moves from H1 to H6 taking Black's Pawn"
        );
        assert_eq!(game.board().pieces().count(), 31);
    }

    #[test]
    fn failed_load_keeps_previous_game() {
        let mut game = Game::new();
        game.submit_move("E2", "E4").unwrap();
        let before = game.clone();
        let err = game.load("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR z KQkq");
        assert_eq!(
            err,
            Err(ChessError::Fen(FenError::InvalidActiveColor {
                found: "z".to_string()
            }))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn missing_king_rolls_back_the_move() {
        let mut game = Game::from_fen("8/8/8/8/8/8/4P3/4K3 w -").unwrap();
        let before = game.clone();
        assert_eq!(
            game.submit_move("E2", "E3"),
            Err(ChessError::MissingKing { color: Color::Black })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn check_is_reported_for_the_opponent() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/R3K3 w -").unwrap();
        let report = game.submit_move("A1", "A8").unwrap();
        assert_eq!(report.status, GameStatus::Check);
        assert_eq!(
            report.to_string(),
            "White's Rook moves from A1 to A8\nBlack is in check"
        );
        assert!(!game.is_king_safe(Color::Black).unwrap());
        assert_eq!(game.find_king(Color::Black).unwrap(), sq("E8"));
    }

    #[test]
    fn render_reflects_live_board() {
        let mut game = Game::new();
        game.submit_move("E2", "E4").unwrap();
        let render = game.render();
        assert!(render.contains("4 |   |   |   |   | P |   |   |   |"));
        assert!(render.contains("2 | P | P | P | P |   | P | P | P |"));
        assert_eq!(render, game.to_string());
    }
}
