//! Session model - owns the session state and drives the game service.
//!
//! This model is the only place network requests are issued. Requests run
//! as blocking calls on the background executor; their results re-enter
//! the foreground through a weak entity handle, where the pure session
//! state applies them (or drops them, for superseded lookups).
//!
//! Architecture:
//! - `SessionState` holds all interaction state and its invariants
//! - each user action spawns at most one request task
//! - mutating requests are gated by the session's busy flag; legal-target
//!   lookups are not, they are superseded by generation instead

use std::sync::Arc;

use gpui::{AsyncApp, Context, WeakEntity};
use shakmaty::{Role, Square};
use tracing::{debug, warn};

use crate::domain::session::{Command, EngineLevel, MoveSpec, SessionState};
use crate::net::GameClient;

pub struct SessionModel {
    state: SessionState,
    client: Arc<GameClient>,
}

impl SessionModel {
    pub fn new(client: GameClient) -> Self {
        Self {
            state: SessionState::new(),
            client: Arc::new(client),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Kick off the initial game, like the page load of a web client.
    pub fn start(&mut self, cx: &mut Context<Self>) {
        self.new_game(cx);
    }

    // --- board interaction ---

    pub fn square_clicked(&mut self, row: usize, col: usize, cx: &mut Context<Self>) {
        match self.state.square_clicked(row, col) {
            Some(Command::FetchLegalTargets { generation, from }) => {
                self.fetch_legal_targets(generation, from, cx);
            }
            Some(Command::SubmitMove { spec }) => {
                self.submit_move(spec, cx);
            }
            None => {}
        }
        cx.notify();
    }

    fn fetch_legal_targets(&self, generation: u64, from: Square, cx: &mut Context<Self>) {
        let Some(game_id) = self.state.game_id().map(str::to_string) else {
            return;
        };
        let client = self.client.clone();

        cx.spawn(async move |this: WeakEntity<SessionModel>, cx: &mut AsyncApp| {
            let result = cx
                .background_executor()
                .spawn(async move { client.legal_targets(&game_id, from) })
                .await;

            // Lookup failures read as "no targets"; they are a secondary
            // feature and must not interrupt the interaction.
            let targets = match result {
                Ok(targets) => targets,
                Err(err) => {
                    warn!("legal-target lookup failed: {err}");
                    Vec::new()
                }
            };

            let _ = this.update(cx, |session, cx| {
                if session.state.apply_legal_targets(generation, from, targets) {
                    cx.notify();
                } else {
                    debug!(generation, "legal-target result arrived after supersession");
                }
            });
        })
        .detach();
    }

    fn submit_move(&mut self, spec: MoveSpec, cx: &mut Context<Self>) {
        let Some(game_id) = self.state.game_id().map(str::to_string) else {
            return;
        };
        if !self.state.begin_mutation() {
            return;
        }
        let client = self.client.clone();
        let spec_for_apply = spec.clone();

        cx.spawn(async move |this: WeakEntity<SessionModel>, cx: &mut AsyncApp| {
            let result = cx
                .background_executor()
                .spawn(async move { client.submit_move(&game_id, &spec) })
                .await;

            let _ = this.update(cx, |session, cx| {
                let reply_due = session.state.apply_move_result(&spec_for_apply, result);
                if reply_due {
                    session.request_engine_move(cx);
                }
                cx.notify();
            });
        })
        .detach();
    }

    /// Submit a free-text move, e.g. from a command palette. Blank input
    /// is rejected locally.
    #[allow(dead_code)] // Reserved for a text entry surface
    pub fn submit_move_text(&mut self, input: &str, cx: &mut Context<Self>) {
        let Some(spec) = MoveSpec::text(input, self.state.promotion_choice()) else {
            self.state.set_status_message("Enter a move first.");
            cx.notify();
            return;
        };
        if !self.state.controls().can_submit_move {
            return;
        }
        self.submit_move(spec, cx);
        cx.notify();
    }

    // --- game lifecycle ---

    pub fn new_game(&mut self, cx: &mut Context<Self>) {
        if !self.state.begin_mutation() {
            return;
        }
        cx.notify();
        let client = self.client.clone();

        cx.spawn(async move |this: WeakEntity<SessionModel>, cx: &mut AsyncApp| {
            let result = cx
                .background_executor()
                .spawn(async move { client.create_game() })
                .await;

            let _ = this.update(cx, |session, cx| {
                session.state.apply_game_started(result);
                cx.notify();
            });
        })
        .detach();
    }

    pub fn reset_game(&mut self, cx: &mut Context<Self>) {
        let Some(game_id) = self.state.game_id().map(str::to_string) else {
            // No game yet; a reset means the same as starting one.
            self.new_game(cx);
            return;
        };
        if !self.state.begin_mutation() {
            return;
        }
        cx.notify();
        let client = self.client.clone();

        cx.spawn(async move |this: WeakEntity<SessionModel>, cx: &mut AsyncApp| {
            let result = cx
                .background_executor()
                .spawn(async move { client.reset_game(&game_id) })
                .await;

            let _ = this.update(cx, |session, cx| {
                session.state.apply_game_started(result);
                cx.notify();
            });
        })
        .detach();
    }

    pub fn undo(&mut self, cx: &mut Context<Self>) {
        if !self.state.controls().can_undo {
            return;
        }
        let Some(game_id) = self.state.game_id().map(str::to_string) else {
            return;
        };
        if !self.state.begin_mutation() {
            return;
        }
        cx.notify();
        let client = self.client.clone();

        cx.spawn(async move |this: WeakEntity<SessionModel>, cx: &mut AsyncApp| {
            let result = cx
                .background_executor()
                .spawn(async move { client.undo(&game_id, 1) })
                .await;

            let _ = this.update(cx, |session, cx| {
                let reply_due = session.state.apply_undo_result(result);
                if reply_due {
                    session.request_engine_move(cx);
                }
                cx.notify();
            });
        })
        .detach();
    }

    pub fn request_engine_move(&mut self, cx: &mut Context<Self>) {
        if !self.state.controls().can_engine_move {
            return;
        }
        let Some(game_id) = self.state.game_id().map(str::to_string) else {
            return;
        };
        if !self.state.begin_mutation() {
            return;
        }
        self.state.set_status_message("Engine thinking...");
        cx.notify();
        let client = self.client.clone();
        let level = self.state.engine_level();

        cx.spawn(async move |this: WeakEntity<SessionModel>, cx: &mut AsyncApp| {
            let result = cx
                .background_executor()
                .spawn(async move { client.engine_move(&game_id, level) })
                .await;

            let _ = this.update(cx, |session, cx| {
                session.state.apply_engine_result(result);
                cx.notify();
            });
        })
        .detach();
    }

    // --- settings and prompts ---

    pub fn flip_orientation(&mut self, cx: &mut Context<Self>) {
        self.state.flip_orientation();
        cx.notify();
    }

    pub fn set_engine_level(&mut self, level: EngineLevel, cx: &mut Context<Self>) {
        if !self.state.controls().can_set_level {
            return;
        }
        self.state.set_engine_level(level);
        cx.notify();
    }

    pub fn set_auto_reply(&mut self, enabled: bool, cx: &mut Context<Self>) {
        self.state.set_auto_reply(enabled);
        // Switching it on while it is already the computer's turn acts
        // immediately; the policy is re-checked at every later boundary.
        if enabled && self.state.engine_reply_due() {
            self.request_engine_move(cx);
        }
        cx.notify();
    }

    /// Pick a promotion piece: remembered for future submissions and, if
    /// a move is parked on the promotion prompt, resubmits it.
    pub fn pick_promotion(&mut self, choice: Option<Role>, cx: &mut Context<Self>) {
        self.state.set_promotion_choice(choice);
        if let Some(role) = choice {
            if let Some(Command::SubmitMove { spec }) = self.state.choose_promotion(role) {
                self.submit_move(spec, cx);
            }
        }
        cx.notify();
    }
}
