//! Wire types for the game service's JSON API.
//!
//! This module owns the request/response shapes and their conversion into
//! domain values; it does not issue requests (that's the client's job).

use anyhow::{Context, bail};
use serde::Deserialize;
use serde_json::{Value, json};
use shakmaty::Square;
use tracing::warn;

use crate::domain::chess::{Board, GameState, parse_cell, parse_side};
use crate::domain::coords::parse_square;
use crate::domain::history::promotion_char;
use crate::domain::session::{EngineLevel, MoveSpec};

/// A state payload as the server sends it. Move and undo responses carry
/// the extra `played_move` / `undone_steps` fields on the same shape.
#[derive(Debug, Deserialize)]
pub struct GameStateBody {
    pub game_id: String,
    pub board: Vec<Vec<String>>,
    pub turn: String,
    pub fullmove_number: u32,
    pub halfmove_clock: u32,
    pub check: bool,
    pub ended: bool,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub played_move: Option<String>,
    #[serde(default)]
    pub undone_steps: Option<u32>,
}

impl GameStateBody {
    /// Convert into the domain state, validating the board shape and all
    /// cell codes. A payload that fails here is treated as malformed and
    /// never partially applied.
    pub fn into_state(self) -> anyhow::Result<GameState> {
        if self.board.len() != 8 {
            bail!("board has {} rows, expected 8", self.board.len());
        }

        let mut board: Board = [[None; 8]; 8];
        for (r, row) in self.board.iter().enumerate() {
            if row.len() != 8 {
                bail!("board row {r} has {} cells, expected 8", row.len());
            }
            for (c, cell) in row.iter().enumerate() {
                board[r][c] = parse_cell(cell)
                    .with_context(|| format!("unreadable cell {cell:?} at row {r}, col {c}"))?;
            }
        }

        let turn = parse_side(&self.turn)
            .with_context(|| format!("unreadable side to move {:?}", self.turn))?;
        let winner = match &self.winner {
            None => None,
            Some(side) => Some(
                parse_side(side).with_context(|| format!("unreadable winner {side:?}"))?,
            ),
        };

        Ok(GameState {
            game_id: self.game_id,
            board,
            turn,
            fullmove_number: self.fullmove_number,
            halfmove_clock: self.halfmove_clock,
            check: self.check,
            ended: self.ended,
            result: self.result,
            winner,
            message: self.message,
        })
    }
}

/// Error payload for non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub struct FailureBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub promotion_required: bool,
}

/// Response of the legal-moves query.
#[derive(Debug, Deserialize)]
pub struct LegalMovesBody {
    #[serde(default)]
    pub targets: Vec<String>,
}

impl LegalMovesBody {
    /// Destination squares, skipping any name that does not parse.
    pub fn into_targets(self) -> Vec<Square> {
        self.targets
            .into_iter()
            .filter_map(|name| {
                let square = parse_square(&name);
                if square.is_none() {
                    warn!(target_name = %name, "skipping unreadable legal-target square");
                }
                square
            })
            .collect()
    }
}

/// Body of a move submission: coordinates or free text, each with an
/// optional promotion letter.
pub fn move_body(spec: &MoveSpec) -> Value {
    match spec {
        MoveSpec::Coords {
            from,
            to,
            promotion,
        } => {
            let mut body = json!({
                "start": from.to_string(),
                "end": to.to_string(),
            });
            if let Some(role) = promotion {
                body["promotion"] = json!(promotion_char(*role).to_string());
            }
            body
        }
        MoveSpec::Text { input, promotion } => {
            let mut body = json!({ "move": input });
            if let Some(role) = promotion {
                body["promotion"] = json!(promotion_char(*role).to_string());
            }
            body
        }
    }
}

/// Body of an engine-move request.
pub fn engine_move_body(level: EngineLevel) -> Value {
    json!({
        "level": level.wire_name(),
        "use_stockfish": true,
    })
}

/// Body of an undo request.
pub fn undo_body(steps: u32) -> Value {
    json!({ "steps": steps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::{Color, Role};

    const STATE_JSON: &str = r#"{
        "game_id": "abc-123",
        "board": [
            ["bR", "bN", "bB", "bQ", "bK", "bB", "bN", "bR"],
            ["bP", "bP", "bP", "bP", "bP", "bP", "bP", "bP"],
            [".", ".", ".", ".", ".", ".", ".", "."],
            [".", ".", ".", ".", ".", ".", ".", "."],
            [".", ".", ".", ".", "wP", ".", ".", "."],
            [".", ".", ".", ".", ".", ".", ".", "."],
            ["wP", "wP", "wP", "wP", ".", "wP", "wP", "wP"],
            ["wR", "wN", "wB", "wQ", "wK", "wB", "wN", "wR"]
        ],
        "turn": "b",
        "fullmove_number": 1,
        "halfmove_clock": 0,
        "castling_rights": {"wK": true, "wQ": true, "bK": true, "bQ": true},
        "en_passant_target": "e3",
        "check": false,
        "ended": false,
        "result": null,
        "winner": null,
        "message": "Played e2->e4. B to move.",
        "played_move": "e2e4",
        "move_side": "w",
        "move_source": "player"
    }"#;

    #[test]
    fn test_state_round_trip_from_server_json() {
        let body: GameStateBody = serde_json::from_str(STATE_JSON).expect("deserializes");
        assert_eq!(body.played_move.as_deref(), Some("e2e4"));
        assert_eq!(body.undone_steps, None);

        let state = body.into_state().expect("converts");
        assert_eq!(state.game_id, "abc-123");
        assert_eq!(state.turn, Color::Black);
        assert!(!state.ended);
        assert_eq!(state.winner, None);
        let pawn = state.piece_at(Square::E4).expect("pawn on e4");
        assert_eq!(pawn.color, Color::White);
        assert_eq!(pawn.role, Role::Pawn);
        assert!(state.piece_at(Square::E2).is_none());
    }

    #[test]
    fn test_state_rejects_short_board() {
        let mut body: GameStateBody = serde_json::from_str(STATE_JSON).unwrap();
        body.board.pop();
        assert!(body.into_state().is_err());
    }

    #[test]
    fn test_state_rejects_unknown_cell_code() {
        let mut body: GameStateBody = serde_json::from_str(STATE_JSON).unwrap();
        body.board[0][0] = "wX".to_string();
        assert!(body.into_state().is_err());
    }

    #[test]
    fn test_state_rejects_unknown_turn() {
        let mut body: GameStateBody = serde_json::from_str(STATE_JSON).unwrap();
        body.turn = "white".to_string();
        assert!(body.into_state().is_err());
    }

    #[test]
    fn test_failure_body_defaults() {
        let failure: FailureBody = serde_json::from_str(r#"{"error": "Invalid move."}"#).unwrap();
        assert_eq!(failure.error.as_deref(), Some("Invalid move."));
        assert!(!failure.promotion_required);

        let failure: FailureBody = serde_json::from_str(
            r#"{"error": "Promotion required. Choose Q, R, B, or N.", "promotion_required": true}"#,
        )
        .unwrap();
        assert!(failure.promotion_required);
    }

    #[test]
    fn test_legal_moves_skips_unreadable_targets() {
        let body: LegalMovesBody =
            serde_json::from_str(r#"{"from": "e2", "targets": ["e3", "e4", "z9"]}"#).unwrap();
        assert_eq!(body.into_targets(), vec![Square::E3, Square::E4]);
    }

    #[test]
    fn test_move_body_with_coordinates() {
        let spec = MoveSpec::coords(Square::E2, Square::E4, None);
        assert_eq!(move_body(&spec), json!({"start": "e2", "end": "e4"}));

        let spec = MoveSpec::coords(Square::E7, Square::E8, Some(Role::Knight));
        assert_eq!(
            move_body(&spec),
            json!({"start": "e7", "end": "e8", "promotion": "n"})
        );
    }

    #[test]
    fn test_move_body_with_free_text() {
        let spec = MoveSpec::text("e2 e4", None).expect("valid input");
        assert_eq!(move_body(&spec), json!({"move": "e2 e4"}));

        assert_eq!(MoveSpec::text("   ", None), None);
    }

    #[test]
    fn test_engine_move_body_levels() {
        assert_eq!(
            engine_move_body(EngineLevel::VeryHard),
            json!({"level": "very_hard", "use_stockfish": true})
        );
        assert_eq!(
            engine_move_body(EngineLevel::Easy),
            json!({"level": "easy", "use_stockfish": true})
        );
    }

    #[test]
    fn test_undo_body() {
        assert_eq!(undo_body(2), json!({"steps": 2}));
    }
}
