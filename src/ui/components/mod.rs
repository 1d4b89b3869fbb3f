mod piece;
mod square;

pub use piece::{piece_glyph, render_piece};
pub use square::render_square;
