//! Named board cells.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A cell of the board, row-major from the top left.
///
/// Indices run 0-8. Players see the 1-9 numbering printed by
/// [`Board::display`](crate::Board::display).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::FromRepr,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Position {
    /// Index 0.
    #[strum(to_string = "top-left", serialize = "top left")]
    TopLeft,
    /// Index 1.
    #[strum(to_string = "top-center", serialize = "top center", serialize = "top")]
    TopCenter,
    /// Index 2.
    #[strum(to_string = "top-right", serialize = "top right")]
    TopRight,
    /// Index 3.
    #[strum(to_string = "middle-left", serialize = "middle left", serialize = "left")]
    MiddleLeft,
    /// Index 4.
    #[strum(to_string = "center", serialize = "centre", serialize = "middle")]
    Center,
    /// Index 5.
    #[strum(to_string = "middle-right", serialize = "middle right", serialize = "right")]
    MiddleRight,
    /// Index 6.
    #[strum(to_string = "bottom-left", serialize = "bottom left")]
    BottomLeft,
    /// Index 7.
    #[strum(to_string = "bottom-center", serialize = "bottom center", serialize = "bottom")]
    BottomCenter,
    /// Index 8.
    #[strum(to_string = "bottom-right", serialize = "bottom right")]
    BottomRight,
}

impl Position {
    /// The four corners, in index order.
    pub const CORNERS: [Position; 4] = [
        Position::TopLeft,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomRight,
    ];

    /// Board index, 0-8.
    pub fn index(self) -> usize {
        usize::from(self as u8)
    }

    /// Number shown to players, 1-9.
    pub fn number(self) -> usize {
        self.index() + 1
    }

    /// Cell at `index`, if on the board.
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index).ok().and_then(Self::from_repr)
    }

    /// Reads player input: a number 1-9 or a name such as `center` or
    /// `top left`, case-insensitively.
    #[instrument]
    pub fn parse_cell(input: &str) -> Option<Self> {
        let input = input.trim();
        match input.parse::<usize>() {
            Ok(number) => number.checked_sub(1).and_then(Self::from_index),
            Err(_) => input.parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_indices_follow_declaration_order() {
        for (index, pos) in Position::iter().enumerate() {
            assert_eq!(pos.index(), index);
            assert_eq!(Position::from_index(index), Some(pos));
        }
        assert_eq!(Position::from_index(9), None);
        assert_eq!(Position::from_index(256), None);
    }

    #[test]
    fn test_numbers_are_one_based() {
        assert_eq!(Position::parse_cell("1"), Some(Position::TopLeft));
        assert_eq!(Position::parse_cell(" 5 "), Some(Position::Center));
        assert_eq!(Position::parse_cell("9"), Some(Position::BottomRight));
        assert_eq!(Position::parse_cell("0"), None);
        assert_eq!(Position::parse_cell("10"), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(Position::parse_cell("Bottom-Right"), Some(Position::BottomRight));
        assert_eq!(Position::parse_cell("top left"), Some(Position::TopLeft));
        assert_eq!(Position::parse_cell("centre"), Some(Position::Center));
        assert_eq!(Position::parse_cell("nowhere"), None);
        assert_eq!(Position::MiddleRight.to_string(), "middle-right");
    }
}
