//! Square rendering component.

use gpui::{div, prelude::*, px, rgb};

use crate::ui::components::render_piece;
use crate::ui::theme::{TARGET_MARKER, TEXT_SECONDARY, square_background};
use crate::ui::view_models::SquareCell;

/// Render a single board square with its piece and highlights.
pub fn render_square(cell: &SquareCell, square_size: f32, glyph_size: f32) -> impl IntoElement {
    let background = square_background(
        cell.is_light,
        cell.is_selected,
        cell.is_last_move,
        cell.is_check,
    );

    // Empty legal targets show a dot; occupied ones a capture ring.
    let target_dot = (cell.is_legal_target && !cell.is_capture_hint).then(|| {
        div()
            .absolute()
            .size(px(square_size * 0.3))
            .rounded_full()
            .bg(rgb(TARGET_MARKER))
    });

    div()
        .flex_shrink_0() // never shrink - maintain aspect ratio
        .relative()
        .size(px(square_size))
        .bg(background)
        .flex()
        .items_center()
        .justify_center()
        .when(cell.is_capture_hint, |el| {
            el.border_2().border_color(rgb(TARGET_MARKER))
        })
        .when_some(cell.piece, |el, piece| {
            el.child(render_piece(piece, glyph_size))
        })
        .when_some(target_dot, |el, dot| el.child(dot))
        .when_some(cell.file_label, |el, file| {
            el.child(
                div()
                    .absolute()
                    .bottom_0()
                    .right_0()
                    .pr_1()
                    .text_xs()
                    .text_color(rgb(TEXT_SECONDARY))
                    .child(file.to_string()),
            )
        })
        .when_some(cell.rank_label, |el, rank| {
            el.child(
                div()
                    .absolute()
                    .top_0()
                    .left_0()
                    .pl_1()
                    .text_xs()
                    .text_color(rgb(TEXT_SECONDARY))
                    .child(rank.to_string()),
            )
        })
}
