//! Move list panel - displays the confirmed move history in paired rows.

use gpui::{App, Div, Entity, div, prelude::*, px, rgb};

use crate::models::SessionModel;
use crate::ui::display::move_rows;
use crate::ui::theme::{BORDER_COLOR, MOVE_LIST_BG, TEXT_PRIMARY, TEXT_SECONDARY};

/// Render the move list panel for the session.
/// Returns a Div element that can be used as a child.
pub fn render_move_list_panel(session: &Entity<SessionModel>, cx: &App) -> Div {
    let model = session.read(cx);
    let rows = move_rows(model.state().history());

    div()
        .flex_1()
        .min_h_0()
        .flex()
        .flex_col()
        .bg(rgb(MOVE_LIST_BG))
        .border_1()
        .border_color(rgb(BORDER_COLOR))
        .rounded_md()
        .overflow_hidden()
        // Header (fixed)
        .child(
            div()
                .p_4()
                .pb_2()
                .text_color(rgb(TEXT_PRIMARY))
                .border_b_1()
                .border_color(rgb(BORDER_COLOR))
                .child("Move History"),
        )
        // Scrollable moves content
        .child(
            div()
                .id("move-list-scroll")
                .flex_1()
                .min_h_0()
                .overflow_y_scroll()
                .p_4()
                .pt_2()
                .flex()
                .flex_col()
                .gap_1()
                .when(rows.is_empty(), |el| {
                    el.child(
                        div()
                            .text_color(rgb(TEXT_SECONDARY))
                            .text_sm()
                            .child("No moves yet"),
                    )
                })
                .children(rows.into_iter().map(|row| {
                    div()
                        .flex()
                        .items_center()
                        .gap_2()
                        .py_1()
                        .child(
                            div()
                                .text_color(rgb(TEXT_SECONDARY))
                                .text_sm()
                                .w(px(40.0))
                                .child(format!("{}.", row.number)),
                        )
                        .child(
                            div()
                                .text_color(rgb(TEXT_PRIMARY))
                                .text_sm()
                                .flex_1()
                                .child(row.white),
                        )
                        .when_some(row.black, |el, black| {
                            el.child(
                                div()
                                    .text_color(rgb(TEXT_PRIMARY))
                                    .text_sm()
                                    .flex_1()
                                    .child(black),
                            )
                        })
                })),
        )
}
