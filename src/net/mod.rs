pub mod client;
pub mod protocol;

pub use client::{ApiError, GameClient, MoveOutcome, UndoOutcome};
