//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};

/// One of the two marks a party plays.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Mark {
    /// Mark X (moves first by convention).
    X,
    /// Mark O.
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Returns the single-character symbol for this mark.
    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    Empty,
    /// Cell holding a mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::Occupied(mark) => mark.symbol(),
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::Occupied(Mark::X)),
            'O' | 'o' => Some(Cell::Occupied(Mark::O)),
            _ => None,
        }
    }
}

/// 3x3 board, a passive container of nine cells in row-major order.
///
/// Reachability (mark counts consistent with alternating play) is guarded
/// by [`crate::Match`], not by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

/// Error parsing a board from its text encoding.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardParseError {
    /// Encoding did not contain exactly nine cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(usize),
    /// Encoding contained a character that is not a cell symbol.
    #[display("Invalid cell symbol {:?} at index {}", symbol, index)]
    InvalidSymbol {
        /// Offending character.
        symbol: char,
        /// Index of the character.
        index: usize,
    },
}

impl std::error::Error for BoardParseError {}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Builds a board from explicit cells.
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks if the cell at `index` exists and is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Counts cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Occupied(mark))
            .count()
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Writes a mark without any legality checks.
    pub(crate) fn place(&mut self, index: usize, mark: Mark) {
        self.cells[index] = Cell::Occupied(mark);
    }

    /// Encodes the board as nine characters (`X`, `O`, `-`).
    pub fn encode(&self) -> String {
        self.cells.iter().map(|c| c.symbol()).collect()
    }

    /// Parses the nine-character encoding produced by [`Board::encode`].
    pub fn decode(s: &str) -> Result<Self, BoardParseError> {
        let symbols: Vec<char> = s.trim().chars().collect();
        if symbols.len() != 9 {
            return Err(BoardParseError::WrongLength(symbols.len()));
        }

        let mut cells = [Cell::Empty; 9];
        for (index, symbol) in symbols.into_iter().enumerate() {
            cells[index] = Cell::from_symbol(symbol)
                .ok_or(BoardParseError::InvalidSymbol { symbol, index })?;
        }
        Ok(Self { cells })
    }

    /// Formats the board as a human-readable grid, numbering empty cells 1-9.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.cells[index] {
                    Cell::Empty => result.push_str(&(index + 1).to_string()),
                    Cell::Occupied(mark) => result.push(mark.symbol()),
                }
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::str::FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}

/// Terminal status of a board or match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Play continues.
    Ongoing,
    /// A mark completed a line.
    Win(Mark),
    /// Board is full with no line.
    Draw,
}

impl Status {
    /// Returns true for `Win` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Ongoing)
    }

    /// Returns the winning mark if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Status::Win(mark) => Some(*mark),
            Status::Ongoing | Status::Draw => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Ongoing => write!(f, "Ongoing"),
            Status::Win(mark) => write!(f, "{} wins", mark),
            Status::Draw => write!(f, "Draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let board: Board = "XO-X-O--X".parse().expect("valid board");
        assert_eq!(board.get(0), Some(Cell::Occupied(Mark::X)));
        assert_eq!(board.get(1), Some(Cell::Occupied(Mark::O)));
        assert_eq!(board.get(2), Some(Cell::Empty));
        assert_eq!(board.encode(), "XO-X-O--X");
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        assert_eq!(Board::decode("XO"), Err(BoardParseError::WrongLength(2)));
        assert_eq!(
            Board::decode("XO-X-O--Z"),
            Err(BoardParseError::InvalidSymbol {
                symbol: 'Z',
                index: 8
            })
        );
    }

    #[test]
    fn test_counts() {
        let board: Board = "XOX-O----".parse().expect("valid board");
        assert_eq!(board.count(Mark::X), 2);
        assert_eq!(board.count(Mark::O), 2);
        assert_eq!(board.occupied(), 4);
    }

    #[test]
    fn test_display_grid() {
        let board: Board = "X---O----".parse().expect("valid board");
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }
}
