//! Pure chess domain types and utilities.
//! No GPUI dependencies - this is the domain layer.

use shakmaty::{Color, Piece, Role, Square};

use crate::domain::coords::board_indices;

/// 8x8 grid of square contents, outer index 0 = rank 8 (the server's
/// board payload convention).
pub type Board = [[Option<Piece>; 8]; 8];

/// Parse a board cell from the wire: "." for an empty square, otherwise a
/// side letter (w/b) followed by a kind letter (K Q R B N P).
pub fn parse_cell(text: &str) -> Option<Option<Piece>> {
    if text == "." {
        return Some(None);
    }

    let mut chars = text.chars();
    let side = chars.next()?;
    let kind = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    let color = match side {
        'w' => Color::White,
        'b' => Color::Black,
        _ => return None,
    };
    let role = match kind.to_ascii_uppercase() {
        'K' => Role::King,
        'Q' => Role::Queen,
        'R' => Role::Rook,
        'B' => Role::Bishop,
        'N' => Role::Knight,
        'P' => Role::Pawn,
        _ => return None,
    };

    Some(Some(Piece { color, role }))
}

/// Parse the wire encoding of a side ("w" or "b").
pub fn parse_side(text: &str) -> Option<Color> {
    match text {
        "w" => Some(Color::White),
        "b" => Some(Color::Black),
        _ => None,
    }
}

pub fn side_label(color: Color) -> &'static str {
    match color {
        Color::White => "WHITE",
        Color::Black => "BLACK",
    }
}

/// The client's cached copy of the server-owned game state. It is always
/// replaced wholesale from a successful server response, never patched
/// field by field.
#[derive(Clone, Debug)]
pub struct GameState {
    pub game_id: String,
    pub board: Board,
    pub turn: Color,
    pub fullmove_number: u32,
    pub halfmove_clock: u32,
    pub check: bool,
    pub ended: bool,
    pub result: Option<String>,
    pub winner: Option<Color>,
    pub message: String,
}

impl GameState {
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let (row, col) = board_indices(square);
        self.board[row][col]
    }

    /// Whether the square holds a piece belonging to the side to move.
    pub fn is_own_piece(&self, square: Square) -> bool {
        self.piece_at(square)
            .is_some_and(|piece| piece.color == self.turn)
    }
}

#[cfg(test)]
pub(crate) fn board_from_rows(rows: [[&str; 8]; 8]) -> Board {
    let mut board: Board = [[None; 8]; 8];
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            board[r][c] = parse_cell(cell).expect("valid cell code");
        }
    }
    board
}

/// Starting-position fixture shared by the session and display tests.
#[cfg(test)]
pub(crate) fn initial_state() -> GameState {
    GameState {
        game_id: "test-game".to_string(),
        board: board_from_rows([
            ["bR", "bN", "bB", "bQ", "bK", "bB", "bN", "bR"],
            ["bP", "bP", "bP", "bP", "bP", "bP", "bP", "bP"],
            [".", ".", ".", ".", ".", ".", ".", "."],
            [".", ".", ".", ".", ".", ".", ".", "."],
            [".", ".", ".", ".", ".", ".", ".", "."],
            [".", ".", ".", ".", ".", ".", ".", "."],
            ["wP", "wP", "wP", "wP", "wP", "wP", "wP", "wP"],
            ["wR", "wN", "wB", "wQ", "wK", "wB", "wN", "wR"],
        ]),
        turn: Color::White,
        fullmove_number: 1,
        halfmove_clock: 0,
        check: false,
        ended: false,
        result: None,
        winner: None,
        message: "W to move.".to_string(),
    }
}
