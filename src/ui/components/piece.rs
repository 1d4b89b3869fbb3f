//! Piece rendering component.

use gpui::{div, prelude::*, px, rgb};
use shakmaty::{Color, Piece, Role};

use crate::ui::theme::{PIECE_BLACK, PIECE_WHITE};

/// Glyph for a piece. The filled form is used for both sides; the side is
/// carried by the tint.
pub fn piece_glyph(piece: Piece) -> &'static str {
    match piece.role {
        Role::King => "\u{265A}",
        Role::Queen => "\u{265B}",
        Role::Rook => "\u{265C}",
        Role::Bishop => "\u{265D}",
        Role::Knight => "\u{265E}",
        Role::Pawn => "\u{265F}",
    }
}

/// Render a chess piece centered in its container.
pub fn render_piece(piece: Piece, glyph_size: f32) -> impl IntoElement {
    let tint = match piece.color {
        Color::White => PIECE_WHITE,
        Color::Black => PIECE_BLACK,
    };

    div()
        .size_full()
        .flex()
        .items_center()
        .justify_center()
        .text_size(px(glyph_size))
        .text_color(rgb(tint))
        .child(piece_glyph(piece))
}
