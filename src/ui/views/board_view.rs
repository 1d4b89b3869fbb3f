//! Chess board view - the main board with click-to-move interaction.

use gpui::{
    Context, Entity, MouseButton, MouseDownEvent, Pixels, Size, Subscription, Window, canvas, div,
    prelude::*, px, rgb,
};
use gpui_component::resizable::{h_resizable, resizable_panel};

use crate::models::SessionModel;
use crate::ui::components::render_square;
use crate::ui::display::board_cells;
use crate::ui::layout::BoardMetrics;
use crate::ui::theme::{
    BOARD_PADDING, INITIAL_LEFT_PANEL, INITIAL_RIGHT_PANEL, PANEL_BG, TEXT_SECONDARY,
};
use crate::ui::views::{render_control_panel, render_move_list_panel};

/// The main view: board on the left, controls and move history on the
/// right, observing a SessionModel.
pub struct BoardView {
    session: Entity<SessionModel>,
    /// Measured board panel size from canvas
    panel_size: Size<Pixels>,
    _subscription: Subscription,
}

impl BoardView {
    pub fn new(session: Entity<SessionModel>, cx: &mut Context<Self>) -> Self {
        let _subscription = cx.observe(&session, |_, _, cx| cx.notify());
        Self {
            session,
            panel_size: Size {
                width: px(INITIAL_LEFT_PANEL),
                height: px(620.0),
            },
            _subscription,
        }
    }
}

impl Render for BoardView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let session_click = self.session.clone();
        let view_measure = cx.entity().clone();

        let metrics = BoardMetrics::new(self.panel_size);
        let square_size = metrics.square_size();
        let glyph_size = metrics.glyph_size();
        let board_total_size = metrics.board_total_size();

        let model = self.session.read(cx);
        let cells = board_cells(model.state());

        // Board element with fixed size - always maintains 1:1 aspect ratio
        let board = div()
            .flex_shrink_0()
            .flex()
            .flex_col()
            .w(px(board_total_size))
            .h(px(board_total_size))
            .overflow_hidden()
            .rounded_md()
            .when(cells.is_empty(), |el| {
                el.flex()
                    .items_center()
                    .justify_center()
                    .text_color(rgb(TEXT_SECONDARY))
                    .child("Waiting for the game service...")
            })
            .children(cells.chunks(8).map(|row| {
                div()
                    .flex()
                    .flex_shrink_0()
                    .children(row.iter().map(|cell| {
                        render_square(cell, square_size, glyph_size)
                    }))
            }));

        let board_panel_content = div()
            .id("board-panel")
            .relative()
            .size_full()
            .overflow_hidden()
            .bg(rgb(PANEL_BG))
            .p(px(BOARD_PADDING))
            .child(board)
            // Mouse down: resolve the square and feed the selection
            // machine; everything else is the model's decision.
            .on_mouse_down(
                MouseButton::Left,
                move |ev: &MouseDownEvent, _window, cx| {
                    let pos = ev.position;
                    if let Some((row, col)) = metrics.square_at(pos.x.into(), pos.y.into()) {
                        session_click.update(cx, |model, cx| {
                            model.square_clicked(row, col, cx);
                        });
                    }
                },
            );

        // Canvas to measure actual panel size
        let measure_canvas = canvas(
            move |bounds, _window, cx| {
                view_measure.update(cx, |view, cx| {
                    if view.panel_size != bounds.size {
                        view.panel_size = bounds.size;
                        cx.notify();
                    }
                });
            },
            |_, _, _, _| {},
        )
        .absolute()
        .top_0()
        .left_0()
        .size_full();

        // Wrap board panel content with measuring canvas
        let board_panel_with_measure = div()
            .relative()
            .size_full()
            .child(measure_canvas)
            .child(board_panel_content);

        // Right side: controls above the move history
        let side_panel = div()
            .size_full()
            .flex()
            .flex_col()
            .gap_3()
            .bg(rgb(PANEL_BG))
            .p(px(BOARD_PADDING))
            .child(render_control_panel(&self.session, cx))
            .child(render_move_list_panel(&self.session, cx));

        // Main resizable layout
        div().size_full().font_family("Berkeley Mono").child(
            h_resizable("chess-layout")
                .child(
                    resizable_panel()
                        .size(px(INITIAL_LEFT_PANEL))
                        .size_range(px(320.)..px(1200.))
                        .child(board_panel_with_measure),
                )
                .child(
                    resizable_panel()
                        .size(px(INITIAL_RIGHT_PANEL))
                        .size_range(px(220.)..Pixels::MAX)
                        .child(side_panel),
                ),
        )
    }
}
