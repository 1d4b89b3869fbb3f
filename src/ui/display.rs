//! Display generation for the board and status area.
//!
//! This module transforms session state into display-ready view models.
//! It lives in the UI layer and depends on domain, not vice versa.

use shakmaty::Role;

use crate::domain::chess::side_label;
use crate::domain::coords::board_indices;
use crate::domain::history::MoveHistory;
use crate::domain::session::SessionState;
use crate::ui::view_models::{MoveRow, SquareCell};

/// Build the 64 board cells in visual order (row 0 first, left to right).
/// Returns an empty list until the first game state arrives.
pub fn board_cells(session: &SessionState) -> Vec<SquareCell> {
    let Some(game) = session.game() else {
        return Vec::new();
    };

    let orientation = session.orientation();
    let selection = session.selection();
    let last_move = session.last_move();
    let mut cells = Vec::with_capacity(64);

    for row in 0..8 {
        for col in 0..8 {
            let square = orientation.to_actual(row, col);
            let piece = game.piece_at(square);
            let (board_row, board_col) = board_indices(square);

            let is_legal_target = selection.is_target(square);
            let is_check = game.check
                && !game.ended
                && piece.is_some_and(|p| p.color == game.turn && p.role == Role::King);

            cells.push(SquareCell {
                square,
                piece,
                is_light: (board_row + board_col) % 2 == 0,
                is_selected: selection.square() == Some(square),
                is_legal_target,
                is_capture_hint: is_legal_target && piece.is_some(),
                is_last_move: last_move
                    .is_some_and(|(start, end)| start == square || end == square),
                is_check,
                file_label: (row == 7).then(|| file_char(square)),
                rank_label: (col == 0).then(|| rank_char(square)),
            });
        }
    }

    cells
}

fn file_char(square: shakmaty::Square) -> char {
    (b'a' + u32::from(square.file()) as u8) as char
}

fn rank_char(square: shakmaty::Square) -> char {
    (b'1' + u32::from(square.rank()) as u8) as char
}

/// Pair the history's plies into numbered rows for the move list.
pub fn move_rows(history: &MoveHistory) -> Vec<MoveRow> {
    history
        .tokens()
        .chunks(2)
        .enumerate()
        .map(|(i, chunk)| MoveRow {
            number: i + 1,
            white: chunk[0].to_string(),
            black: chunk.get(1).map(|token| token.to_string()),
        })
        .collect()
}

/// Short badge for the game's overall condition.
pub fn status_badge(session: &SessionState) -> &'static str {
    match session.game() {
        None => "Active",
        Some(game) if game.ended => "Game Over",
        Some(game) if game.check => "Check",
        Some(_) => "Active",
    }
}

/// One-word game condition for the meta table.
pub fn state_label(session: &SessionState) -> String {
    match session.game() {
        None => "-".to_string(),
        Some(game) if game.ended => game
            .result
            .clone()
            .unwrap_or_else(|| "finished".to_string()),
        Some(game) if game.check => "check".to_string(),
        Some(_) => "active".to_string(),
    }
}

/// Side to move, for the meta table.
pub fn turn_label(session: &SessionState) -> &'static str {
    match session.game() {
        None => "-",
        Some(game) => side_label(game.turn),
    }
}

/// Text for the selection readout under the board.
pub fn selection_label(session: &SessionState) -> String {
    let selection = session.selection();
    match selection.square() {
        None => "Selected: none".to_string(),
        Some(square) if selection.is_pending() => format!("Selected: {square} (loading...)"),
        Some(square) => format!("Selected: {square} ({} legal)", selection.target_count()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chess::initial_state;
    use crate::domain::session::Command;
    use shakmaty::Square;

    fn session_with_board() -> SessionState {
        let mut session = SessionState::new();
        session.set_auto_reply(false);
        session.begin_mutation();
        session.apply_game_started(Ok(initial_state()));
        session
    }

    #[test]
    fn test_board_cells_empty_without_game() {
        assert!(board_cells(&SessionState::new()).is_empty());
    }

    #[test]
    fn test_board_cells_cover_the_board() {
        let session = session_with_board();
        let cells = board_cells(&session);
        assert_eq!(cells.len(), 64);

        // a8 is shown top-left under white orientation and is a light square.
        let first = &cells[0];
        assert_eq!(first.square, Square::A8);
        assert!(first.is_light);
        assert!(first.piece.is_some());
    }

    #[test]
    fn test_labels_sit_on_the_board_edges() {
        let session = session_with_board();
        let cells = board_cells(&session);

        let labeled_files: Vec<char> = cells.iter().filter_map(|c| c.file_label).collect();
        assert_eq!(labeled_files, ('a'..='h').collect::<Vec<_>>());

        let labeled_ranks: Vec<char> = cells.iter().filter_map(|c| c.rank_label).collect();
        assert_eq!(labeled_ranks, ('1'..='8').rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_labels_follow_orientation() {
        let mut session = session_with_board();
        session.flip_orientation();
        let cells = board_cells(&session);

        let labeled_files: Vec<char> = cells.iter().filter_map(|c| c.file_label).collect();
        assert_eq!(labeled_files, ('a'..='h').rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_selection_and_target_flags() {
        let mut session = session_with_board();
        let command = session.square_clicked(6, 4).expect("selection starts");
        let (generation, from) = match command {
            Command::FetchLegalTargets { generation, from } => (generation, from),
            other => panic!("unexpected command {other:?}"),
        };
        session.apply_legal_targets(generation, from, vec![Square::E3, Square::E4]);

        let cells = board_cells(&session);
        let e2 = cells.iter().find(|c| c.square == Square::E2).unwrap();
        assert!(e2.is_selected);
        let e4 = cells.iter().find(|c| c.square == Square::E4).unwrap();
        assert!(e4.is_legal_target);
        assert!(!e4.is_capture_hint); // empty square
    }

    #[test]
    fn test_move_rows_pair_plies() {
        let mut history = MoveHistory::new();
        history.record_played("e2e4");
        history.record_played("e7e5");
        history.record_played("g1f3");

        let rows = move_rows(&history);
        assert_eq!(
            rows,
            vec![
                MoveRow {
                    number: 1,
                    white: "e2e4".to_string(),
                    black: Some("e7e5".to_string()),
                },
                MoveRow {
                    number: 2,
                    white: "g1f3".to_string(),
                    black: None,
                },
            ]
        );
    }

    #[test]
    fn test_status_badge_reflects_game_condition() {
        let mut session = session_with_board();
        assert_eq!(status_badge(&session), "Active");

        let mut checked = initial_state();
        checked.check = true;
        session.begin_mutation();
        session.apply_game_started(Ok(checked));
        assert_eq!(status_badge(&session), "Check");

        let mut ended = initial_state();
        ended.ended = true;
        ended.result = Some("stalemate".to_string());
        session.begin_mutation();
        session.apply_game_started(Ok(ended));
        assert_eq!(status_badge(&session), "Game Over");
        assert_eq!(state_label(&session), "stalemate");
    }

    #[test]
    fn test_selection_label_tracks_lookup_progress() {
        let mut session = session_with_board();
        assert_eq!(selection_label(&session), "Selected: none");

        let command = session.square_clicked(6, 4).unwrap();
        assert_eq!(selection_label(&session), "Selected: e2 (loading...)");

        if let Command::FetchLegalTargets { generation, from } = command {
            session.apply_legal_targets(generation, from, vec![Square::E3, Square::E4]);
        }
        assert_eq!(selection_label(&session), "Selected: e2 (2 legal)");
    }
}
