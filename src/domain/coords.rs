//! Coordinate mapping between visual grid positions and board squares.
//! Pure functions, no GPUI dependencies - this is the domain layer.

use shakmaty::{File, Rank, Square};

/// Which side is shown at the bottom of the rendered board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Orientation {
    #[default]
    White,
    Black,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::White => Orientation::Black,
            Orientation::Black => Orientation::White,
        }
    }

    /// Convert a visual row/col (0-indexed, row 0 = top of the rendered
    /// board) to the square it shows under this orientation.
    pub fn to_actual(self, row: usize, col: usize) -> Square {
        let (row, col) = match self {
            Orientation::White => (row, col),
            Orientation::Black => (7 - row, 7 - col),
        };
        square_at(row, col)
    }

    /// Convert a square to the visual row/col it occupies under this
    /// orientation. Inverse of [`Orientation::to_actual`].
    #[allow(dead_code)] // Used in tests, may be used in future
    pub fn to_visual(self, square: Square) -> (usize, usize) {
        let (row, col) = board_indices(square);
        match self {
            Orientation::White => (row, col),
            Orientation::Black => (7 - row, 7 - col),
        }
    }
}

/// Convert row/col (0-indexed, row 0 = rank 8) to a square. This is the
/// same convention the server's board payload uses for its outer array.
pub fn square_at(row: usize, col: usize) -> Square {
    let file = File::new(col as u32);
    let rank = Rank::new(7 - row as u32); // row 0 = rank 8, row 7 = rank 1
    Square::from_coords(file, rank)
}

/// Row/col of a square under the row-0-equals-rank-8 convention.
pub fn board_indices(square: Square) -> (usize, usize) {
    let row = 7 - u32::from(square.rank()) as usize;
    let col = u32::from(square.file()) as usize;
    (row, col)
}

/// Parse a two-character square name ("e4"). Accepts upper- or lowercase
/// file letters; anything else is rejected.
pub fn parse_square(text: &str) -> Option<Square> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return None;
    }

    let file = match bytes[0].to_ascii_lowercase() {
        b @ b'a'..=b'h' => File::new((b - b'a') as u32),
        _ => return None,
    };
    let rank = match bytes[1] {
        b @ b'1'..=b'8' => Rank::new((b - b'1') as u32),
        _ => return None,
    };

    Some(Square::from_coords(file, rank))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_round_trip_both_orientations() {
        for orientation in [Orientation::White, Orientation::Black] {
            for row in 0..8 {
                for col in 0..8 {
                    let square = orientation.to_actual(row, col);
                    assert_eq!(orientation.to_visual(square), (row, col));
                }
            }
        }
    }

    #[test]
    fn test_white_orientation_is_identity() {
        assert_eq!(Orientation::White.to_actual(0, 0), Square::A8);
        assert_eq!(Orientation::White.to_actual(7, 0), Square::A1);
        assert_eq!(Orientation::White.to_actual(7, 7), Square::H1);
        assert_eq!(Orientation::White.to_actual(6, 4), Square::E2);
    }

    #[test]
    fn test_black_orientation_mirrors_both_axes() {
        assert_eq!(Orientation::Black.to_actual(0, 0), Square::H1);
        assert_eq!(Orientation::Black.to_actual(7, 7), Square::A8);
        assert_eq!(Orientation::Black.to_actual(1, 3), Square::E2);
    }

    #[test]
    fn test_flipped_toggles() {
        assert_eq!(Orientation::White.flipped(), Orientation::Black);
        assert_eq!(Orientation::Black.flipped().flipped(), Orientation::Black);
    }

    #[test]
    fn test_parse_accepts_all_64_squares() {
        let mut count = 0;
        for file in 'a'..='h' {
            for rank in '1'..='8' {
                let name = format!("{file}{rank}");
                let square = parse_square(&name).expect("valid square");
                assert_eq!(square.to_string(), name);
                count += 1;
            }
        }
        assert_eq!(count, 64);
    }

    #[test]
    fn test_parse_is_case_insensitive_on_files() {
        assert_eq!(parse_square("E4"), Some(Square::E4));
    }

    #[test]
    fn test_parse_rejects_malformed_names() {
        for bad in ["", "e", "e44", "i4", "e0", "e9", "4e", "ee", "44", "é4"] {
            assert_eq!(parse_square(bad), None, "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_board_indices_matches_server_convention() {
        assert_eq!(board_indices(Square::A8), (0, 0));
        assert_eq!(board_indices(Square::H1), (7, 7));
        assert_eq!(board_indices(Square::E2), (6, 4));
    }
}
