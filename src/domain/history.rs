//! Move history tracking over the tokens the server acknowledges.
//!
//! The history is a linear record of confirmed moves: it only grows when
//! the server reports a played move and only shrinks from the tail when
//! the server reports moves taken back. The "last move" highlight pair is
//! derived from the trailing token.

use std::fmt;

use shakmaty::{Role, Square};

use crate::domain::coords::parse_square;

/// A played move in the server's compact encoding: start square, end
/// square, optional promotion piece.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveToken {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl MoveToken {
    /// Parse a token such as "e2e4", "e7e8q", or "e7e8=q".
    /// Case-insensitive; the promotion separator is optional because the
    /// server omits it while user-facing text includes it.
    pub fn parse(text: &str) -> Option<Self> {
        if !text.is_ascii() {
            return None;
        }
        let text = text.to_ascii_lowercase();

        let from = parse_square(text.get(0..2)?)?;
        let to = parse_square(text.get(2..4)?)?;

        let promotion = match text.get(4..) {
            None | Some("") => None,
            Some(rest) => {
                let letter = rest.strip_prefix('=').unwrap_or(rest);
                if letter.len() != 1 {
                    return None;
                }
                Some(promotion_role(letter.as_bytes()[0] as char)?)
            }
        };

        Some(MoveToken {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            write!(f, "={}", promotion_char(role))?;
        }
        Ok(())
    }
}

/// Promotion piece letter as shown in tokens.
pub fn promotion_char(role: Role) -> char {
    match role {
        Role::Queen => 'q',
        Role::Rook => 'r',
        Role::Bishop => 'b',
        Role::Knight => 'n',
        Role::King => 'k',
        Role::Pawn => 'p',
    }
}

fn promotion_role(letter: char) -> Option<Role> {
    match letter {
        'q' => Some(Role::Queen),
        'r' => Some(Role::Rook),
        'b' => Some(Role::Bishop),
        'n' => Some(Role::Knight),
        _ => None,
    }
}

/// Ordered record of the moves the server has confirmed.
#[derive(Clone, Debug, Default)]
pub struct MoveHistory {
    tokens: Vec<MoveToken>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[MoveToken] {
        &self.tokens
    }

    #[allow(dead_code)] // Used in tests, may be used in future
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Append a confirmed move. Returns false (recording nothing) if the
    /// token does not parse.
    pub fn record_played(&mut self, token: &str) -> bool {
        match MoveToken::parse(token) {
            Some(parsed) => {
                self.tokens.push(parsed);
                true
            }
            None => false,
        }
    }

    /// Remove up to `count` trailing moves, clamped to the available
    /// length. Returns how many were removed.
    pub fn record_undone(&mut self, count: usize) -> usize {
        let removed = count.min(self.tokens.len());
        self.tokens.truncate(self.tokens.len() - removed);
        removed
    }

    pub fn reset(&mut self) {
        self.tokens.clear();
    }

    /// The (start, end) pair of the most recent move, for highlighting.
    pub fn last_move(&self) -> Option<(Square, Square)> {
        self.tokens.last().map(|token| (token.from, token.to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_token() {
        let token = MoveToken::parse("e2e4").unwrap();
        assert_eq!(token.from, Square::E2);
        assert_eq!(token.to, Square::E4);
        assert_eq!(token.promotion, None);
    }

    #[test]
    fn test_parse_promotion_with_and_without_separator() {
        let wire = MoveToken::parse("e7e8q").unwrap();
        let display = MoveToken::parse("e7e8=q").unwrap();
        assert_eq!(wire, display);
        assert_eq!(wire.promotion, Some(Role::Queen));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let token = MoveToken::parse("E7E8=N").unwrap();
        assert_eq!(token.to, Square::E8);
        assert_eq!(token.promotion, Some(Role::Knight));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "e2", "e2e", "e2x4", "e2e4=", "e2e4k", "e2e4qq", "i2e4"] {
            assert!(MoveToken::parse(bad).is_none(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_display_normalizes_to_lowercase_with_separator() {
        assert_eq!(MoveToken::parse("E2E4").unwrap().to_string(), "e2e4");
        assert_eq!(MoveToken::parse("e7e8q").unwrap().to_string(), "e7e8=q");
    }

    #[test]
    fn test_record_played_updates_last_move() {
        let mut history = MoveHistory::new();
        assert!(history.record_played("e2e4"));
        assert_eq!(history.last_move(), Some((Square::E2, Square::E4)));

        assert!(history.record_played("e7e5"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.last_move(), Some((Square::E7, Square::E5)));
    }

    #[test]
    fn test_record_played_rejects_unparseable_token() {
        let mut history = MoveHistory::new();
        assert!(!history.record_played("resign"));
        assert!(history.is_empty());
        assert_eq!(history.last_move(), None);
    }

    #[test]
    fn test_record_undone_clamps_to_length() {
        let mut history = MoveHistory::new();
        history.record_played("e2e4");
        history.record_played("e7e5");
        history.record_played("g1f3");

        assert_eq!(history.record_undone(2), 2);
        assert_eq!(history.len(), 1);
        assert_eq!(history.last_move(), Some((Square::E2, Square::E4)));

        assert_eq!(history.record_undone(5), 1);
        assert!(history.is_empty());
        assert_eq!(history.last_move(), None);
    }

    #[test]
    fn test_record_undone_on_empty_is_noop() {
        let mut history = MoveHistory::new();
        assert_eq!(history.record_undone(3), 0);
        assert!(history.is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut history = MoveHistory::new();
        history.record_played("e2e4");
        history.reset();
        assert!(history.is_empty());
        assert_eq!(history.last_move(), None);
    }
}
