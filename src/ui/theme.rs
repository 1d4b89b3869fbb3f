//! Theme constants and colors for the chess UI.

use gpui::{Rgba, rgb};

// Layout constants
pub const BOARD_PADDING: f32 = 20.0;
pub const GLYPH_SCALE: f32 = 0.72; // piece glyph size relative to square

// Initial panel sizes
pub const INITIAL_LEFT_PANEL: f32 = 540.0;
pub const INITIAL_RIGHT_PANEL: f32 = 320.0;

// Board colors
pub const LIGHT_SQUARE: u32 = 0xEFD9B5;
pub const DARK_SQUARE: u32 = 0xB48764;
pub const SELECTED_SQUARE: u32 = 0x829769;
pub const LAST_MOVE_SQUARE: u32 = 0xCDD26A;
pub const CHECK_SQUARE: u32 = 0xE06C5E;
pub const TARGET_MARKER: u32 = 0x646F40;

// Piece colors (glyphs are tinted, the glyph shape is shared)
pub const PIECE_WHITE: u32 = 0xFAFAF5;
pub const PIECE_BLACK: u32 = 0x1F1F1F;

// Panel colors
pub const PANEL_BG: u32 = 0x2a2a2a;
pub const MOVE_LIST_BG: u32 = 0x1e1e1e;
pub const BORDER_COLOR: u32 = 0x4a4a4a;
pub const TEXT_PRIMARY: u32 = 0xffffff;
pub const TEXT_SECONDARY: u32 = 0x888888;
pub const TEXT_ERROR: u32 = 0xf87171;

// Status badge colors
pub const BADGE_ACTIVE: u32 = 0x4ade80;
pub const BADGE_CHECK: u32 = 0xfbbf24;
pub const BADGE_ENDED: u32 = 0xf87171;

// Control colors
pub const BUTTON_BG: u32 = 0x3a3a3a;
pub const BUTTON_HOVER_BG: u32 = 0x4a4a4a;
pub const BUTTON_DISABLED_TEXT: u32 = 0x555555;
pub const BUTTON_SELECTED_BG: u32 = 0x4a6da7;
pub const PROMPT_FOCUS_BORDER: u32 = 0xfbbf24;

/// Background for a board square given its base shade and highlights.
pub fn square_background(
    is_light: bool,
    is_selected: bool,
    is_last_move: bool,
    is_check: bool,
) -> Rgba {
    if is_check {
        rgb(CHECK_SQUARE)
    } else if is_selected {
        rgb(SELECTED_SQUARE)
    } else if is_last_move {
        rgb(LAST_MOVE_SQUARE)
    } else if is_light {
        rgb(LIGHT_SQUARE)
    } else {
        rgb(DARK_SQUARE)
    }
}
