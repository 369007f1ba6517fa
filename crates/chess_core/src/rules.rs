//! King safety, checkmate and stalemate.
//!
//! Every query is answered from scratch by enumerating pseudo-legal moves. Hypothetical
//! positions are examined through [`Board::probe`], which always puts the board back.

use std::fmt;

use log::{debug, warn};

use crate::{
    error::ChessError,
    piece::{Color, PieceType},
    Board, Result, Square,
};

/// Classification of a position for the side about to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Normal,
    Check,
    Checkmate,
    Stalemate,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameStatus::Normal => "normal",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        })
    }
}

/// First king of `color` in board-scan order.
pub fn find_king(board: &Board, color: Color) -> Result<Square> {
    board
        .pieces_of(color)
        .find(|piece| piece.piece_type == PieceType::King)
        .map(|king| king.square())
        .ok_or_else(|| {
            warn!("{} king not found on the board", color);
            ChessError::MissingKing { color }
        })
}

/// A king is safe when no enemy piece has its square among its pseudo-legal destinations.
pub fn is_king_safe(board: &Board, color: Color) -> Result<bool> {
    let king = find_king(board, color)?;
    let attacked = board
        .pieces_of(color.opposite())
        .any(|enemy| enemy.pseudo_legal_moves(board).contains(&king));
    Ok(!attacked)
}

// Whether moving from -> to leaves `color`'s king safe. The board is restored afterwards.
fn safe_after(board: &mut Board, from: Square, to: Square, color: Color) -> Result<bool> {
    board
        .probe(from, to, |after| is_king_safe(after, color))
        .transpose()
        .map(|safe| safe.unwrap_or(false))
}

// Snapshot of every piece of `color` with its pseudo-legal destinations, in scan order.
fn candidate_moves(board: &Board, color: Color) -> Vec<(Square, Vec<Square>)> {
    board
        .pieces_of(color)
        .map(|piece| (piece.square(), piece.pseudo_legal_moves(board)))
        .collect()
}

/// Whether `color` has no move that leaves its king safe.
///
/// Callers must already know the king is attacked: on a position where it is safe this
/// almost always answers `false`, which says nothing about check. Use [`status`] for a
/// self-contained classification.
pub fn is_checkmate(board: &mut Board, color: Color) -> Result<bool> {
    let king = find_king(board, color)?;

    // King moves first, then every other piece
    let view: &Board = board;
    let king_moves = view
        .get_piece(king)
        .map(|piece| piece.pseudo_legal_moves(view))
        .unwrap_or_default();
    for to in king_moves {
        if safe_after(board, king, to, color)? {
            debug!("{} king escapes to {}", color, to);
            return Ok(false);
        }
    }

    for (from, destinations) in candidate_moves(board, color) {
        if from == king {
            continue;
        }
        for to in destinations {
            if safe_after(board, from, to, color)? {
                debug!("{} escapes check with {}-{}", color, from, to);
                return Ok(false);
            }
        }
    }

    Ok(true)
}

/// Whether every move available to `color` leaves its king attacked (or there are none).
///
/// Like [`is_checkmate`] this does not look at the current position: callers must already
/// know the king is safe.
pub fn is_stalemate(board: &mut Board, color: Color) -> Result<bool> {
    for (from, destinations) in candidate_moves(board, color) {
        for to in destinations {
            if safe_after(board, from, to, color)? {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// A pseudo-legal move of the piece on `from` that does not leave its own king attacked.
pub fn is_legal_move(board: &mut Board, from: Square, to: Square) -> Result<bool> {
    let Some(piece) = board.get_piece(from).copied() else {
        return Ok(false);
    };
    if !piece.pseudo_legal_moves(board).contains(&to) {
        return Ok(false);
    }
    safe_after(board, from, to, piece.color)
}

/// Legal destinations of the piece on `from`; empty when the square is empty.
pub fn legal_moves(board: &mut Board, from: Square) -> Result<Vec<Square>> {
    let Some(piece) = board.get_piece(from).copied() else {
        return Ok(Vec::new());
    };
    let mut moves = Vec::new();
    for to in piece.pseudo_legal_moves(board) {
        if safe_after(board, from, to, piece.color)? {
            moves.push(to);
        }
    }
    Ok(moves)
}

/// Classifies the position for `color`, checking king safety before running the mate tests.
pub fn status(board: &mut Board, color: Color) -> Result<GameStatus> {
    let status = if !is_king_safe(board, color)? {
        if is_checkmate(board, color)? {
            GameStatus::Checkmate
        } else {
            GameStatus::Check
        }
    } else if is_stalemate(board, color)? {
        GameStatus::Stalemate
    } else {
        GameStatus::Normal
    };
    debug!("{} status: {}", color, status);
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::STARTING_FEN;

    fn sq(token: &str) -> Square {
        Square::from_algebraic(token).unwrap()
    }

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn finds_kings() {
        let board = board(STARTING_FEN);
        assert_eq!(find_king(&board, Color::White).unwrap(), sq("E1"));
        assert_eq!(find_king(&board, Color::Black).unwrap(), sq("E8"));
    }

    #[test]
    fn missing_king_is_an_error() {
        let mut board = board("8/8/8/8/8/8/8/4K3 w -");
        assert_eq!(
            is_king_safe(&board, Color::Black),
            Err(ChessError::MissingKing { color: Color::Black })
        );
        assert!(is_checkmate(&mut board, Color::Black).is_err());
        assert!(status(&mut board, Color::Black).is_err());
    }

    #[test]
    fn rook_on_open_file_gives_check() {
        let board = board("4k3/8/8/8/8/8/8/4RK2 b -");
        assert!(!is_king_safe(&board, Color::Black).unwrap());
        assert!(is_king_safe(&board, Color::White).unwrap());
    }

    #[test]
    fn pawn_only_attacks_occupied_diagonals() {
        // The pawn's diagonal only counts once something stands on it
        let board = board("8/8/8/8/8/6p1/8/7K w -");
        assert!(is_king_safe(&board, Color::White).unwrap());
        let board = self::board("8/8/8/8/8/6p1/7K/8 w -");
        assert!(!is_king_safe(&board, Color::White).unwrap());
    }

    #[test]
    fn back_rank_mate_is_checkmate() {
        let mut board = board("6k1/5ppp/8/8/8/8/8/3R2K1 w -");
        let before = board.clone();
        assert!(is_king_safe(&board, Color::Black).unwrap());

        board.apply_temporary(sq("D1"), sq("D8")).unwrap().commit();
        assert!(!is_king_safe(&board, Color::Black).unwrap());
        assert!(is_checkmate(&mut board, Color::Black).unwrap());
        assert_eq!(
            status(&mut board, Color::Black).unwrap(),
            GameStatus::Checkmate
        );
        assert_ne!(board, before);
    }

    #[test]
    fn check_that_can_be_blocked_is_not_mate() {
        let mut board = board("3R2k1/5ppp/8/8/8/8/4r3/6K1 b -");
        assert!(!is_king_safe(&board, Color::Black).unwrap());
        assert!(!is_checkmate(&mut board, Color::Black).unwrap());
        assert_eq!(status(&mut board, Color::Black).unwrap(), GameStatus::Check);
        assert!(is_legal_move(&mut board, sq("E2"), sq("E8")).unwrap());
        assert!(!is_legal_move(&mut board, sq("E2"), sq("E1")).unwrap());
    }

    #[test]
    fn mate_queries_leave_board_untouched() {
        let mut board = board("3R2k1/5ppp/8/8/8/8/4r3/6K1 b -");
        let before = board.clone();
        is_checkmate(&mut board, Color::Black).unwrap();
        is_stalemate(&mut board, Color::Black).unwrap();
        legal_moves(&mut board, sq("E2")).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn cornered_king_is_stalemated() {
        let mut board = board("8/8/8/8/8/6p1/5k2/7K w -");
        assert!(is_king_safe(&board, Color::White).unwrap());
        assert!(is_stalemate(&mut board, Color::White).unwrap());
        assert_eq!(
            status(&mut board, Color::White).unwrap(),
            GameStatus::Stalemate
        );
    }

    #[test]
    fn start_position_is_normal() {
        let mut board = board(STARTING_FEN);
        assert_eq!(
            status(&mut board, Color::White).unwrap(),
            GameStatus::Normal
        );
        assert!(!is_stalemate(&mut board, Color::Black).unwrap());
    }

    #[test]
    fn pinned_piece_has_no_legal_moves() {
        let mut board = board("4r1k1/8/8/8/8/8/4B3/4K3 w -");
        assert!(legal_moves(&mut board, sq("E2")).unwrap().is_empty());
        assert!(!is_legal_move(&mut board, sq("E2"), sq("D3")).unwrap());
        assert!(is_legal_move(&mut board, sq("E1"), sq("D1")).unwrap());
        assert!(!is_legal_move(&mut board, sq("E1"), sq("E2")).unwrap());
        assert!(!is_legal_move(&mut board, sq("A3"), sq("A4")).unwrap());
    }

    #[test]
    fn legal_moves_filter_self_check() {
        let mut board = board("4k3/8/8/8/8/8/3r4/4K3 w -");
        let mut moves: Vec<String> = legal_moves(&mut board, sq("E1"))
            .unwrap()
            .iter()
            .map(Square::to_string)
            .collect();
        moves.sort();
        // The rook is undefended; D1, E2 and F2 stay on its lines
        assert_eq!(moves, ["D2", "F1"]);
    }
}
