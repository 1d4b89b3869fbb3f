//! Session state - the interaction state machine for one game.
//!
//! `SessionState` owns everything the window shows: the cached server
//! game state, the current selection with its legal-target set, the
//! confirmed move history, the view orientation, and the busy flag that
//! serializes mutating round trips. It is pure and synchronous: methods
//! either mutate state directly or hand back a [`Command`] for the
//! caller to execute against the network. All ordering rules live here:
//!
//! - only the legal-target result carrying the current generation for
//!   the currently selected square is ever applied; anything else is
//!   dropped
//! - at most one mutating request is outstanding; its `apply_*` method
//!   clears the busy flag on every exit path
//! - the cached game state is replaced wholesale, never patched

use std::collections::HashSet;

use shakmaty::{Color, Role, Square};
use tracing::{debug, warn};

use crate::domain::chess::GameState;
use crate::domain::coords::Orientation;
use crate::domain::history::MoveHistory;
use crate::net::{ApiError, MoveOutcome, UndoOutcome};

/// Engine strength, serialized to the server's level names.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum EngineLevel {
    Easy,
    #[default]
    Hard,
    VeryHard,
}

impl EngineLevel {
    pub const ALL: [EngineLevel; 3] = [EngineLevel::Easy, EngineLevel::Hard, EngineLevel::VeryHard];

    pub fn wire_name(self) -> &'static str {
        match self {
            EngineLevel::Easy => "easy",
            EngineLevel::Hard => "hard",
            EngineLevel::VeryHard => "very_hard",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EngineLevel::Easy => "Easy",
            EngineLevel::Hard => "Hard",
            EngineLevel::VeryHard => "Very hard",
        }
    }
}

/// A move submission: either explicit coordinates or free-form text the
/// server parses. The two shapes are validated independently.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum MoveSpec {
    Coords {
        from: Square,
        to: Square,
        promotion: Option<Role>,
    },
    Text {
        input: String,
        promotion: Option<Role>,
    },
}

impl MoveSpec {
    pub fn coords(from: Square, to: Square, promotion: Option<Role>) -> Self {
        MoveSpec::Coords {
            from,
            to,
            promotion,
        }
    }

    /// Free-text submission; rejects input that is blank after trimming.
    pub fn text(input: &str, promotion: Option<Role>) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        Some(MoveSpec::Text {
            input: input.to_string(),
            promotion,
        })
    }
}

/// Network work a state transition asks the caller to perform.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command {
    FetchLegalTargets { generation: u64, from: Square },
    SubmitMove { spec: MoveSpec },
}

/// The current selection and the legal destinations resolved for it.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    square: Option<Square>,
    targets: HashSet<Square>,
    generation: u64,
    pending: bool,
}

impl Selection {
    pub fn square(&self) -> Option<Square> {
        self.square
    }

    pub fn is_target(&self, square: Square) -> bool {
        self.targets.contains(&square)
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// True while a legal-target lookup for the selection is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Which user affordances are currently allowed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Controls {
    pub can_submit_move: bool,
    pub can_engine_move: bool,
    pub can_choose_promotion: bool,
    pub can_undo: bool,
    pub can_new_game: bool,
    pub can_reset: bool,
    pub can_set_level: bool,
}

pub struct SessionState {
    game: Option<GameState>,
    selection: Selection,
    history: MoveHistory,
    orientation: Orientation,
    busy: bool,
    auto_reply: bool,
    engine_side: Color,
    engine_level: EngineLevel,
    promotion_choice: Option<Role>,
    /// Move waiting for a promotion piece after the server rejected it
    /// with "promotion required". While set, the promotion picker is the
    /// focused control.
    promotion_prompt: Option<(Square, Square)>,
    status: String,
    status_is_error: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            game: None,
            selection: Selection::default(),
            history: MoveHistory::new(),
            orientation: Orientation::White,
            busy: false,
            auto_reply: true,
            engine_side: Color::Black,
            engine_level: EngineLevel::default(),
            promotion_choice: None,
            promotion_prompt: None,
            status: "Starting game...".to_string(),
            status_is_error: false,
        }
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn game_id(&self) -> Option<&str> {
        self.game.as_ref().map(|game| game.game_id.as_str())
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    pub fn auto_reply(&self) -> bool {
        self.auto_reply
    }

    pub fn engine_side(&self) -> Color {
        self.engine_side
    }

    pub fn engine_level(&self) -> EngineLevel {
        self.engine_level
    }

    pub fn promotion_choice(&self) -> Option<Role> {
        self.promotion_choice
    }

    pub fn promotion_prompt(&self) -> Option<(Square, Square)> {
        self.promotion_prompt
    }

    pub fn status(&self) -> (&str, bool) {
        (&self.status, self.status_is_error)
    }

    pub fn last_move(&self) -> Option<(Square, Square)> {
        self.history.last_move()
    }

    // --- view settings ---

    pub fn flip_orientation(&mut self) {
        self.orientation = self.orientation.flipped();
    }

    pub fn set_engine_level(&mut self, level: EngineLevel) {
        self.engine_level = level;
    }

    #[allow(dead_code)] // Used in tests, may be used in future
    pub fn set_engine_side(&mut self, side: Color) {
        self.engine_side = side;
    }

    pub fn set_auto_reply(&mut self, enabled: bool) {
        self.auto_reply = enabled;
    }

    pub fn set_promotion_choice(&mut self, choice: Option<Role>) {
        self.promotion_choice = choice;
    }

    // --- selection state machine ---

    /// Handle a click on the visual square at (row, col). Returns the
    /// network work the click requires, if any. Clicks are no-ops when
    /// there is no board or the game has ended.
    pub fn square_clicked(&mut self, row: usize, col: usize) -> Option<Command> {
        let game = self.game.as_ref()?;
        if game.ended {
            return None;
        }

        let square = self.orientation.to_actual(row, col);
        let own_piece = game.is_own_piece(square);

        match self.selection.square {
            None => own_piece.then(|| self.begin_selection(square)),
            Some(current) if current == square => {
                self.clear_selection();
                None
            }
            Some(_) if own_piece => Some(self.begin_selection(square)),
            Some(current) => {
                if !self.selection.is_target(square) {
                    return None;
                }
                // Mutations are serialized; lookups are not.
                if self.busy {
                    return None;
                }
                Some(Command::SubmitMove {
                    spec: MoveSpec::coords(current, square, self.promotion_choice),
                })
            }
        }
    }

    fn begin_selection(&mut self, square: Square) -> Command {
        self.selection.generation += 1;
        self.selection.square = Some(square);
        self.selection.targets.clear();
        self.selection.pending = true;
        self.promotion_prompt = None;
        Command::FetchLegalTargets {
            generation: self.selection.generation,
            from: square,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.square = None;
        self.selection.targets.clear();
        self.selection.pending = false;
    }

    /// Install a resolved legal-target set. The result is applied only if
    /// it carries the current generation and the selection has not moved
    /// to another square; stale results are dropped silently. Returns
    /// whether the result was applied.
    pub fn apply_legal_targets(
        &mut self,
        generation: u64,
        from: Square,
        targets: Vec<Square>,
    ) -> bool {
        if generation != self.selection.generation || self.selection.square != Some(from) {
            debug!(generation, %from, "dropping superseded legal-target result");
            return false;
        }
        self.selection.targets = targets.into_iter().collect();
        self.selection.pending = false;
        true
    }

    // --- busy gating ---

    /// Mark a mutating round trip as started. Returns false if one is
    /// already outstanding.
    pub fn begin_mutation(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    // --- applying server responses ---

    /// Result of "new game" or "reset": the history restarts with the
    /// returned state.
    pub fn apply_game_started(&mut self, result: Result<GameState, ApiError>) {
        self.busy = false;
        match result {
            Ok(state) => {
                self.history.reset();
                self.promotion_prompt = None;
                self.set_status(state.message.clone(), false);
                self.install_state(state);
            }
            Err(err) => {
                warn!("starting game failed: {err}");
                self.set_status(err.to_string(), true);
            }
        }
    }

    /// Result of a player move submission. `spec` is the submission that
    /// produced it, used to park the move when the server asks for a
    /// promotion piece. Returns true when an automatic engine reply is
    /// now due.
    pub fn apply_move_result(
        &mut self,
        spec: &MoveSpec,
        result: Result<MoveOutcome, ApiError>,
    ) -> bool {
        self.busy = false;
        match result {
            Ok(outcome) => {
                if !self.history.record_played(&outcome.played) {
                    warn!(token = %outcome.played, "server sent an unreadable move token");
                }
                self.promotion_prompt = None;
                self.set_status(outcome.state.message.clone(), false);
                self.install_state(outcome.state);
                self.engine_reply_due()
            }
            Err(ApiError::PromotionRequired(message)) => {
                if let MoveSpec::Coords { from, to, .. } = spec {
                    self.promotion_prompt = Some((*from, *to));
                }
                self.set_status(message, true);
                false
            }
            Err(err) => {
                self.set_status(err.to_string(), true);
                false
            }
        }
    }

    /// Result of a requested engine move. Never chains another engine
    /// request.
    pub fn apply_engine_result(&mut self, result: Result<MoveOutcome, ApiError>) {
        self.busy = false;
        match result {
            Ok(outcome) => {
                if !self.history.record_played(&outcome.played) {
                    warn!(token = %outcome.played, "server sent an unreadable move token");
                }
                self.set_status(outcome.state.message.clone(), false);
                self.install_state(outcome.state);
            }
            Err(err) => {
                self.set_status(err.to_string(), true);
            }
        }
    }

    /// Result of an undo request. The history drops exactly as many
    /// half-moves as the server reports taken back. Returns true when an
    /// automatic engine reply is now due.
    pub fn apply_undo_result(&mut self, result: Result<UndoOutcome, ApiError>) -> bool {
        self.busy = false;
        match result {
            Ok(outcome) => {
                self.history.record_undone(outcome.undone as usize);
                self.promotion_prompt = None;
                self.set_status(outcome.state.message.clone(), false);
                self.install_state(outcome.state);
                self.engine_reply_due()
            }
            Err(err) => {
                self.set_status(err.to_string(), true);
                false
            }
        }
    }

    fn install_state(&mut self, state: GameState) {
        self.game = Some(state);
        self.clear_selection();
    }

    fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = text.into();
        self.status_is_error = is_error;
    }

    pub fn set_status_message(&mut self, text: impl Into<String>) {
        self.set_status(text, false);
    }

    // --- promotion prompt ---

    /// Resolve the parked promotion move with the chosen piece. Also
    /// remembers the choice for subsequent submissions.
    pub fn choose_promotion(&mut self, role: Role) -> Option<Command> {
        self.promotion_choice = Some(role);
        let (from, to) = self.promotion_prompt.take()?;
        Some(Command::SubmitMove {
            spec: MoveSpec::coords(from, to, Some(role)),
        })
    }

    // --- turn orchestration ---

    /// Whether an automatic engine reply should be requested right now:
    /// auto-reply is on, the game is live, and it is the computer's turn.
    /// Evaluated fresh at every turn boundary, never cached.
    pub fn engine_reply_due(&self) -> bool {
        self.auto_reply
            && self
                .game
                .as_ref()
                .is_some_and(|game| !game.ended && game.turn == self.engine_side)
    }

    // --- control affordances ---

    pub fn controls(&self) -> Controls {
        let live_game = self.game.as_ref().is_some_and(|game| !game.ended);
        let acting = !self.busy && live_game;
        Controls {
            can_submit_move: acting,
            can_engine_move: acting,
            can_choose_promotion: acting,
            can_undo: !self.busy && self.game.is_some() && !self.history.is_empty(),
            can_new_game: !self.busy,
            can_reset: !self.busy,
            can_set_level: !self.busy,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
