//! View models for rendering the board and move list.
//!
//! These types are DTOs that prepare session state for display. They live
//! in the UI layer, not the domain layer.

use shakmaty::{Piece, Square};

/// Display data for one board square, in visual order.
#[derive(Clone, Debug)]
pub struct SquareCell {
    /// The square this cell shows under the current orientation
    pub square: Square,
    pub piece: Option<Piece>,
    /// Base shade from the absolute coordinates (stable across flips)
    pub is_light: bool,
    pub is_selected: bool,
    pub is_legal_target: bool,
    /// Legal target holding an opposing piece (capture hint)
    pub is_capture_hint: bool,
    pub is_last_move: bool,
    /// King of the side to move while that side is in check
    pub is_check: bool,
    /// Coordinate labels on the board edge
    pub file_label: Option<char>,
    pub rank_label: Option<char>,
}

/// One full move of the history table: number, white's ply, black's ply.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MoveRow {
    pub number: usize,
    pub white: String,
    pub black: Option<String>,
}
