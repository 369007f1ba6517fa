use log::debug;

use crate::{error::FenError, piece::Color, Board, Piece, Square, BOARD_SIZE};

const PIECE_LETTERS: &str = "pnbrqkPNBRQK";

impl Board {
    /// Parses `<ranks 8..1> <w|b> <castling>`; any further fields are ignored.
    ///
    /// Nothing is returned unless the whole layout and active color are valid.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut fields = fen.split_whitespace();
        let placement = fields
            .next()
            .ok_or(FenError::MissingField { field: "piece placement" })?;

        let mut board = Board::empty();
        parse_placement(&mut board, placement)?;

        let active = fields
            .next()
            .ok_or(FenError::MissingField { field: "active color" })?;
        let color = match active {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidActiveColor {
                    found: other.to_string(),
                })
            }
        };
        board.set_current_turn(color);

        // Castling rights are kept verbatim and never validated
        board.set_castling_rights(fields.next().unwrap_or("-"));

        debug!(
            "parsed position with {} pieces, {} to move",
            board.pieces().count(),
            color
        );
        Ok(board)
    }

    /// Writes the position back out in the form `from_fen` accepts.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for rank in (0..BOARD_SIZE as u8).rev() {
            let mut empty = 0;
            for file in 0..BOARD_SIZE as u8 {
                let piece = Square::new(file, rank)
                    .and_then(|square| self.get_piece(square));
                match piece {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.current_turn() {
            Color::White => 'w',
            Color::Black => 'b',
        });
        fen.push(' ');
        if self.castling_rights().is_empty() {
            fen.push('-');
        } else {
            fen.push_str(self.castling_rights());
        }
        fen
    }
}

fn parse_placement(board: &mut Board, placement: &str) -> Result<(), FenError> {
    let size = BOARD_SIZE as u8;
    // Ranks are listed from the 8th down to the 1st
    let mut rank = size - 1;
    let mut file: u8 = 0;

    for ch in placement.chars() {
        match ch {
            '/' => {
                if file != size {
                    return Err(FenError::RankLength {
                        rank: rank + 1,
                        files: file as usize,
                    });
                }
                if rank == 0 {
                    return Err(FenError::RankCount {
                        found: BOARD_SIZE + 1,
                    });
                }
                rank -= 1;
                file = 0;
            }
            '0'..='9' => {
                let run = ch.to_digit(10).unwrap_or(0);
                if run < 1 || run > size as u32 || file as u32 + run > size as u32 {
                    return Err(FenError::InvalidEmptyRun { run, rank: rank + 1 });
                }
                file += run as u8;
            }
            _ => {
                if !PIECE_LETTERS.contains(ch) {
                    return Err(FenError::InvalidCharacter { ch });
                }
                let square = Square::new(file, rank).ok_or(FenError::RankLength {
                    rank: rank + 1,
                    files: file as usize + 1,
                })?;
                let piece = Piece::from_fen_char(ch, square)
                    .ok_or(FenError::InvalidCharacter { ch })?;
                board.place_piece(piece);
                file += 1;
            }
        }
    }

    if rank != 0 {
        return Err(FenError::RankCount {
            found: (size - rank) as usize,
        });
    }
    if file != size {
        return Err(FenError::RankLength {
            rank: 1,
            files: file as usize,
        });
    }
    Ok(())
}
