use std::fmt;
use std::str::FromStr;

use crate::error::SquareError;
use crate::BOARD_SIZE;

/// A board coordinate. Rank 0 is the first rank, file 0 is the a-file.
/// Only on-board values can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    rank: u8, // 0-7
    file: u8, // a-h (0-7)
}

impl Square {
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if (file as usize) < BOARD_SIZE && (rank as usize) < BOARD_SIZE {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    pub fn file(self) -> u8 {
        self.file
    }

    /// Parses a `<file><rank>` token such as `E2`. File letters are accepted in either case.
    pub fn from_algebraic(notation: &str) -> Option<Self> {
        let mut chars = notation.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => (file.to_ascii_lowercase(), rank),
            _ => return None,
        };

        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }

        Some(Self {
            file: (file as u8) - b'a',
            rank: (rank as u8) - b'1',
        })
    }

    /// The square `rank_delta` ranks and `file_delta` files away, if it is still on the board.
    pub fn offset(self, rank_delta: i8, file_delta: i8) -> Option<Self> {
        let rank = self.rank as i8 + rank_delta;
        let file = self.file as i8 + file_delta;
        if rank < 0 || file < 0 {
            return None;
        }
        Self::new(file as u8, rank as u8)
    }

    /// Every square in board-scan order: rank by rank from the first, files a to h within a rank.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE as u8)
            .flat_map(|rank| (0..BOARD_SIZE as u8).map(move |file| Square { rank, file }))
    }

    pub(crate) fn index(self) -> (usize, usize) {
        (self.rank as usize, self.file as usize)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.file) as char, self.rank + 1)
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s).ok_or_else(|| SquareError {
            token: s.to_string(),
        })
    }
}
