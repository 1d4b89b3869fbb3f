//! HTTP client for the game service.
//!
//! One method per remote capability, all single-shot (no retries). A
//! blocking reqwest client keeps the GUI free of an async-runtime
//! dependency; callers run these methods on the background executor.

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use shakmaty::Square;
use thiserror::Error;
use tracing::debug;

use crate::domain::chess::GameState;
use crate::domain::session::{EngineLevel, MoveSpec};
use crate::net::protocol::{
    FailureBody, GameStateBody, LegalMovesBody, engine_move_body, move_body, undo_body,
};

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

/// Failures a service call can surface. The server's own message is
/// carried verbatim where it sent one.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    IllegalMove(String),
    #[error("{0}")]
    PromotionRequired(String),
    #[error("{0}")]
    EngineUnavailable(String),
    #[error("{0}")]
    GameEnded(String),
    #[error("{0}")]
    NothingToUndo(String),
    #[error("Unreadable server response: {0}")]
    Malformed(String),
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// A move response: the refreshed state plus the token actually played.
#[derive(Debug)]
pub struct MoveOutcome {
    pub state: GameState,
    pub played: String,
}

/// An undo response: the refreshed state plus how many half-moves the
/// server actually took back (possibly fewer than requested).
#[derive(Debug)]
pub struct UndoOutcome {
    pub state: GameState,
    pub undone: u32,
}

/// Which endpoint a failure came from; drives its classification.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Endpoint {
    Game,
    Moves,
    EngineMove,
    Undo,
}

pub struct GameClient {
    http: Client,
    base_url: String,
}

impl GameClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Build a client from the `CHESS_SERVER` environment variable,
    /// falling back to the local development server.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("CHESS_SERVER").unwrap_or_else(|_| DEFAULT_SERVER.to_string());
        Self::new(base_url)
    }

    pub fn create_game(&self) -> Result<GameState, ApiError> {
        debug!("creating game");
        let request = self.http.post(format!("{}/api/games", self.base_url));
        let body = self.read_state(request, Endpoint::Game)?;
        into_state(body)
    }

    /// Re-read the current state without mutating anything.
    #[allow(dead_code)] // Reserved for re-syncing after a transport failure
    pub fn fetch_game(&self, game_id: &str) -> Result<GameState, ApiError> {
        debug!(game_id, "fetching game state");
        let request = self
            .http
            .get(format!("{}/api/games/{}", self.base_url, game_id));
        let body = self.read_state(request, Endpoint::Game)?;
        into_state(body)
    }

    pub fn reset_game(&self, game_id: &str) -> Result<GameState, ApiError> {
        debug!(game_id, "resetting game");
        let request = self
            .http
            .post(format!("{}/api/games/{}/reset", self.base_url, game_id));
        let body = self.read_state(request, Endpoint::Game)?;
        into_state(body)
    }

    /// Destination squares for the piece on `from`. An empty list is a
    /// normal answer (no piece, no moves); callers treat failures the
    /// same way.
    pub fn legal_targets(&self, game_id: &str, from: Square) -> Result<Vec<Square>, ApiError> {
        debug!(game_id, %from, "querying legal targets");
        let response = self
            .http
            .get(format!(
                "{}/api/games/{}/legal-moves",
                self.base_url, game_id
            ))
            .query(&[("from", from.to_string())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let failure = read_failure(response);
            return Err(classify_failure(Endpoint::Game, status, failure));
        }

        let body: LegalMovesBody = response.json()?;
        Ok(body.into_targets())
    }

    pub fn submit_move(&self, game_id: &str, spec: &MoveSpec) -> Result<MoveOutcome, ApiError> {
        debug!(game_id, ?spec, "submitting move");
        let request = self
            .http
            .post(format!("{}/api/games/{}/moves", self.base_url, game_id))
            .json(&move_body(spec));
        let body = self.read_state(request, Endpoint::Moves)?;
        into_move_outcome(body)
    }

    pub fn engine_move(&self, game_id: &str, level: EngineLevel) -> Result<MoveOutcome, ApiError> {
        debug!(game_id, level = level.wire_name(), "requesting engine move");
        let request = self
            .http
            .post(format!(
                "{}/api/games/{}/engine-move",
                self.base_url, game_id
            ))
            .json(&engine_move_body(level));
        let body = self.read_state(request, Endpoint::EngineMove)?;
        into_move_outcome(body)
    }

    pub fn undo(&self, game_id: &str, steps: u32) -> Result<UndoOutcome, ApiError> {
        debug!(game_id, steps, "requesting undo");
        let request = self
            .http
            .post(format!("{}/api/games/{}/undo", self.base_url, game_id))
            .json(&undo_body(steps));
        let body = self.read_state(request, Endpoint::Undo)?;

        let undone = body
            .undone_steps
            .ok_or_else(|| ApiError::Malformed("undo response lacks undone_steps".to_string()))?;
        let state = into_state(body)?;
        Ok(UndoOutcome { state, undone })
    }

    fn read_state(
        &self,
        request: RequestBuilder,
        endpoint: Endpoint,
    ) -> Result<GameStateBody, ApiError> {
        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let failure = read_failure(response);
            return Err(classify_failure(endpoint, status, failure));
        }
        Ok(response.json()?)
    }
}

fn read_failure(response: Response) -> FailureBody {
    response.json().unwrap_or_default()
}

fn classify_failure(endpoint: Endpoint, status: StatusCode, failure: FailureBody) -> ApiError {
    let message = failure
        .error
        .unwrap_or_else(|| format!("Request failed ({status})."));

    match endpoint {
        Endpoint::Moves => {
            if failure.promotion_required {
                ApiError::PromotionRequired(message)
            } else if message == "Game is already finished." {
                ApiError::GameEnded(message)
            } else if message.starts_with("Invalid move input")
                || message.starts_with("Invalid piece selection")
            {
                ApiError::InvalidInput(message)
            } else {
                ApiError::IllegalMove(message)
            }
        }
        Endpoint::EngineMove => {
            if message == "Game is already finished." {
                ApiError::GameEnded(message)
            } else {
                ApiError::EngineUnavailable(message)
            }
        }
        Endpoint::Undo => {
            if message == "No moves to undo." {
                ApiError::NothingToUndo(message)
            } else {
                ApiError::InvalidInput(message)
            }
        }
        Endpoint::Game => ApiError::InvalidInput(message),
    }
}

fn into_state(body: GameStateBody) -> Result<GameState, ApiError> {
    body.into_state()
        .map_err(|err| ApiError::Malformed(err.to_string()))
}

fn into_move_outcome(body: GameStateBody) -> Result<MoveOutcome, ApiError> {
    let played = body
        .played_move
        .clone()
        .ok_or_else(|| ApiError::Malformed("move response lacks played_move".to_string()))?;
    let state = into_state(body)?;
    Ok(MoveOutcome { state, played })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(error: &str, promotion_required: bool) -> FailureBody {
        FailureBody {
            error: Some(error.to_string()),
            promotion_required,
        }
    }

    #[test]
    fn test_move_failures_are_classified() {
        let err = classify_failure(
            Endpoint::Moves,
            StatusCode::BAD_REQUEST,
            failure("Promotion required. Choose Q, R, B, or N.", true),
        );
        assert!(matches!(err, ApiError::PromotionRequired(_)));

        let err = classify_failure(
            Endpoint::Moves,
            StatusCode::BAD_REQUEST,
            failure("Game is already finished.", false),
        );
        assert!(matches!(err, ApiError::GameEnded(_)));

        let err = classify_failure(
            Endpoint::Moves,
            StatusCode::BAD_REQUEST,
            failure("Invalid move input.", false),
        );
        assert!(matches!(err, ApiError::InvalidInput(_)));

        let err = classify_failure(
            Endpoint::Moves,
            StatusCode::BAD_REQUEST,
            failure("Illegal move: king would be in check.", false),
        );
        assert!(matches!(err, ApiError::IllegalMove(_)));
    }

    #[test]
    fn test_engine_failures_are_classified() {
        let err = classify_failure(
            Endpoint::EngineMove,
            StatusCode::INTERNAL_SERVER_ERROR,
            failure("Engine failed to choose a move.", false),
        );
        assert!(matches!(err, ApiError::EngineUnavailable(_)));

        let err = classify_failure(
            Endpoint::EngineMove,
            StatusCode::BAD_REQUEST,
            failure("Game is already finished.", false),
        );
        assert!(matches!(err, ApiError::GameEnded(_)));
    }

    #[test]
    fn test_undo_failures_are_classified() {
        let err = classify_failure(
            Endpoint::Undo,
            StatusCode::BAD_REQUEST,
            failure("No moves to undo.", false),
        );
        assert!(matches!(err, ApiError::NothingToUndo(_)));
    }

    #[test]
    fn test_missing_error_message_gets_a_generic_one() {
        let err = classify_failure(
            Endpoint::Game,
            StatusCode::NOT_FOUND,
            FailureBody::default(),
        );
        assert_eq!(err.to_string(), "Request failed (404 Not Found).");
    }

    #[test]
    fn test_server_message_is_carried_verbatim() {
        let err = classify_failure(
            Endpoint::Moves,
            StatusCode::BAD_REQUEST,
            failure("Invalid piece selection.", false),
        );
        assert_eq!(err.to_string(), "Invalid piece selection.");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = GameClient::new("http://localhost:5000/");
        assert_eq!(client.base_url, "http://localhost:5000");
    }
}
