//! Control panel - status readout and the session's action buttons.

use gpui::{App, Div, Entity, SharedString, div, prelude::*, px, rgb};
use gpui_component::Disableable;
use gpui_component::button::{Button, ButtonVariants};
use shakmaty::Role;

use crate::domain::chess::side_label;
use crate::domain::session::EngineLevel;
use crate::models::SessionModel;
use crate::ui::display::{selection_label, state_label, status_badge, turn_label};
use crate::ui::theme::{
    BADGE_ACTIVE, BADGE_CHECK, BADGE_ENDED, BORDER_COLOR, BUTTON_BG, BUTTON_DISABLED_TEXT,
    BUTTON_HOVER_BG, BUTTON_SELECTED_BG, MOVE_LIST_BG, PROMPT_FOCUS_BORDER, TEXT_ERROR,
    TEXT_PRIMARY, TEXT_SECONDARY,
};

const PROMOTION_OPTIONS: [(Option<Role>, &str); 5] = [
    (None, "-"),
    (Some(Role::Queen), "Q"),
    (Some(Role::Rook), "R"),
    (Some(Role::Bishop), "B"),
    (Some(Role::Knight), "N"),
];

/// Render the control panel for the session.
pub fn render_control_panel(session: &Entity<SessionModel>, cx: &App) -> Div {
    let model = session.read(cx);
    let state = model.state();
    let controls = state.controls();
    let (status, status_is_error) = state.status();
    let status = status.to_string();

    let badge = status_badge(state);
    let badge_color = match badge {
        "Game Over" => BADGE_ENDED,
        "Check" => BADGE_CHECK,
        _ => BADGE_ACTIVE,
    };

    let (fullmove, halfmove) = match state.game() {
        Some(game) => (
            game.fullmove_number.to_string(),
            game.halfmove_clock.to_string(),
        ),
        None => ("-".to_string(), "-".to_string()),
    };

    let auto_reply = state.auto_reply();
    let engine_level = state.engine_level();
    let promotion_choice = state.promotion_choice();
    let promotion_focused = state.promotion_prompt().is_some();
    let selection_text = selection_label(state);
    let turn_text = turn_label(state);
    let state_text = state_label(state);

    // Per-button handles into the session model.
    let session_new = session.clone();
    let session_reset = session.clone();
    let session_undo = session.clone();
    let session_engine = session.clone();
    let session_flip = session.clone();
    let session_auto = session.clone();

    let header = div()
        .flex()
        .items_center()
        .justify_between()
        .px_4()
        .py_2()
        .border_b_1()
        .border_color(rgb(BORDER_COLOR))
        .child(
            div()
                .text_color(rgb(TEXT_PRIMARY))
                .font_weight(gpui::FontWeight::SEMIBOLD)
                .child("Game"),
        )
        .child(
            div()
                .text_xs()
                .text_color(rgb(badge_color))
                .child(badge),
        );

    let meta = div()
        .flex()
        .flex_wrap()
        .gap_4()
        .px_4()
        .py_2()
        .text_xs()
        .text_color(rgb(TEXT_SECONDARY))
        .child(format!("Turn: {turn_text}"))
        .child(format!("State: {state_text}"))
        .child(format!("Move: {fullmove}"))
        .child(format!("Halfmove clock: {halfmove}"))
        .child(format!("Engine side: {}", side_label(state.engine_side())))
        .child(selection_text);

    let message = div()
        .px_4()
        .py_2()
        .text_sm()
        .text_color(if status_is_error {
            rgb(TEXT_ERROR)
        } else {
            rgb(TEXT_PRIMARY)
        })
        .child(status);

    let game_buttons = div()
        .flex()
        .flex_wrap()
        .items_center()
        .gap_2()
        .px_4()
        .py_2()
        .child(
            Button::new("new-game")
                .label("New Game")
                .primary()
                .compact()
                .disabled(!controls.can_new_game)
                .on_click(move |_, _, cx| {
                    session_new.update(cx, |model, cx| model.new_game(cx));
                }),
        )
        .child(
            Button::new("reset-game")
                .label("Reset")
                .danger()
                .compact()
                .disabled(!controls.can_reset)
                .on_click(move |_, _, cx| {
                    session_reset.update(cx, |model, cx| model.reset_game(cx));
                }),
        )
        .child(action_button("undo", "Undo", controls.can_undo, move |cx| {
            session_undo.update(cx, |model, cx| model.undo(cx));
        }))
        .child(action_button(
            "engine-move",
            "Engine Move",
            controls.can_engine_move,
            move |cx| {
                session_engine.update(cx, |model, cx| model.request_engine_move(cx));
            },
        ))
        .child(action_button("flip-board", "Flip", true, move |cx| {
            session_flip.update(cx, |model, cx| model.flip_orientation(cx));
        }));

    let auto_reply_toggle = action_button(
        "auto-reply",
        if auto_reply {
            "Auto reply: on"
        } else {
            "Auto reply: off"
        },
        true,
        move |cx| {
            session_auto.update(cx, |model, cx| {
                let enabled = !model.state().auto_reply();
                model.set_auto_reply(enabled, cx);
            });
        },
    );

    let level_chips = div()
        .flex()
        .items_center()
        .gap_1()
        .child(
            div()
                .text_xs()
                .text_color(rgb(TEXT_SECONDARY))
                .child("Level:"),
        )
        .children(EngineLevel::ALL.into_iter().map(|level| {
            let session_level = session.clone();
            choice_chip(
                SharedString::from(format!("level-{}", level.wire_name())),
                level.label(),
                level == engine_level,
                controls.can_set_level,
                move |cx| {
                    session_level.update(cx, |model, cx| model.set_engine_level(level, cx));
                },
            )
        }));

    let promotion_chips = div()
        .flex()
        .items_center()
        .gap_1()
        .px_2()
        .py_1()
        .rounded(px(4.0))
        .when(promotion_focused, |el| {
            el.border_1().border_color(rgb(PROMPT_FOCUS_BORDER))
        })
        .child(
            div()
                .text_xs()
                .text_color(rgb(TEXT_SECONDARY))
                .child("Promote:"),
        )
        .children(PROMOTION_OPTIONS.into_iter().map(|(choice, label)| {
            let session_promotion = session.clone();
            choice_chip(
                SharedString::from(format!("promotion-{label}")),
                label,
                choice == promotion_choice,
                controls.can_choose_promotion,
                move |cx| {
                    session_promotion.update(cx, |model, cx| model.pick_promotion(choice, cx));
                },
            )
        }));

    let engine_row = div()
        .flex()
        .flex_wrap()
        .items_center()
        .gap_3()
        .px_4()
        .py_2()
        .child(auto_reply_toggle)
        .child(level_chips)
        .child(promotion_chips);

    div()
        .flex_shrink_0()
        .flex()
        .flex_col()
        .bg(rgb(MOVE_LIST_BG))
        .border_1()
        .border_color(rgb(BORDER_COLOR))
        .rounded_md()
        .overflow_hidden()
        .child(header)
        .child(message)
        .child(meta)
        .child(game_buttons)
        .child(engine_row)
}

/// Render a simple action button (enabled or greyed out).
fn action_button(
    id: &'static str,
    label: &'static str,
    enabled: bool,
    on_click: impl Fn(&mut App) + 'static,
) -> impl IntoElement {
    div()
        .id(SharedString::from(format!("control-{id}")))
        .px_3()
        .py_1()
        .rounded(px(4.0))
        .text_sm()
        .text_color(if enabled {
            rgb(TEXT_PRIMARY)
        } else {
            rgb(BUTTON_DISABLED_TEXT)
        })
        .bg(rgb(BUTTON_BG))
        .when(enabled, |el| {
            el.cursor_pointer()
                .hover(|s| s.bg(rgb(BUTTON_HOVER_BG)))
                .on_click(move |_ev, _window, cx| {
                    on_click(cx);
                })
        })
        .child(label)
}

/// Render a small selectable chip (level / promotion choices).
fn choice_chip(
    id: SharedString,
    label: &'static str,
    selected: bool,
    enabled: bool,
    on_click: impl Fn(&mut App) + 'static,
) -> impl IntoElement {
    div()
        .id(id)
        .px_2()
        .py_1()
        .rounded(px(3.0))
        .text_xs()
        .text_color(if enabled {
            rgb(TEXT_PRIMARY)
        } else {
            rgb(BUTTON_DISABLED_TEXT)
        })
        .bg(if selected {
            rgb(BUTTON_SELECTED_BG)
        } else {
            rgb(BUTTON_BG)
        })
        .when(enabled, |el| {
            el.cursor_pointer()
                .hover(|s| s.bg(rgb(BUTTON_HOVER_BG)))
                .on_click(move |_ev, _window, cx| {
                    on_click(cx);
                })
        })
        .child(label)
}
