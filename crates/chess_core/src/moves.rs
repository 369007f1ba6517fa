use std::fmt;

use crate::{piece::PieceType, Board, Piece, Square};

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];
const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// True when a piece stands on `from` and `to` is among its pseudo-legal destinations.
    pub fn is_valid(&self, board: &Board) -> bool {
        match board.get_piece(self.from) {
            Some(piece) => piece.pseudo_legal_moves(board).contains(&self.to),
            None => false,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl Piece {
    /// Destinations reachable by this piece's geometry, stopping at the first occupant in
    /// each direction. Own-side squares are never included; whether the move exposes the
    /// mover's king is not considered here.
    pub fn pseudo_legal_moves(&self, board: &Board) -> Vec<Square> {
        match self.piece_type {
            PieceType::Pawn => self.pawn_moves(board),
            PieceType::Knight => self.step_moves(board, &KNIGHT_JUMPS),
            PieceType::Bishop => self.slide_moves(board, &DIAGONAL),
            PieceType::Rook => self.slide_moves(board, &ORTHOGONAL),
            PieceType::Queen => self.slide_moves(board, &ALL_DIRECTIONS),
            PieceType::King => self.step_moves(board, &KING_STEPS),
        }
    }

    fn is_enemy_of(&self, other: &Piece) -> bool {
        self.color != other.color
    }

    fn slide_moves(&self, board: &Board, directions: &[(i8, i8)]) -> Vec<Square> {
        let mut moves = Vec::new();
        for &(rank_step, file_step) in directions {
            let mut current = self.square();
            while let Some(next) = current.offset(rank_step, file_step) {
                match board.get_piece(next) {
                    None => moves.push(next),
                    Some(occupant) => {
                        if self.is_enemy_of(occupant) {
                            moves.push(next);
                        }
                        break;
                    }
                }
                current = next;
            }
        }
        moves
    }

    fn step_moves(&self, board: &Board, offsets: &[(i8, i8)]) -> Vec<Square> {
        offsets
            .iter()
            .filter_map(|&(rank_delta, file_delta)| self.square().offset(rank_delta, file_delta))
            .filter(|&target| match board.get_piece(target) {
                None => true,
                Some(occupant) => self.is_enemy_of(occupant),
            })
            .collect()
    }

    fn pawn_moves(&self, board: &Board) -> Vec<Square> {
        let mut moves = Vec::new();
        let direction = self.color.pawn_direction();
        let from = self.square();

        // A pawn on its last rank stays a pawn and has nowhere to go
        let Some(ahead) = from.offset(direction, 0) else {
            return moves;
        };

        if board.get_piece(ahead).is_none() {
            moves.push(ahead);

            if from.rank() == self.color.pawn_start_rank() {
                if let Some(double) = from.offset(2 * direction, 0) {
                    if board.get_piece(double).is_none() {
                        moves.push(double);
                    }
                }
            }
        }

        for file_delta in [-1, 1] {
            if let Some(target) = from.offset(direction, file_delta) {
                if let Some(occupant) = board.get_piece(target) {
                    if self.is_enemy_of(occupant) {
                        moves.push(target);
                    }
                }
            }
        }

        moves
    }
}
