//! Board layout calculations - sizing and mouse position resolution.

use gpui::{Pixels, Size, px};

use crate::ui::theme::{BOARD_PADDING, GLYPH_SCALE};

/// Layout metrics for the board panel, derived from its measured size.
#[derive(Clone, Copy, Debug)]
pub struct BoardMetrics {
    pub panel_size: Size<Pixels>,
}

impl BoardMetrics {
    pub fn new(panel_size: Size<Pixels>) -> Self {
        Self { panel_size }
    }

    /// Square size that fits an 8x8 board in the measured panel.
    pub fn square_size(&self) -> f32 {
        let panel_width: f32 = self.panel_size.width.into();
        let panel_height: f32 = self.panel_size.height.into();
        let available_width = panel_width - BOARD_PADDING * 2.0;
        let available_height = panel_height - BOARD_PADDING * 2.0;
        (available_width.min(available_height) / 8.0).max(30.0)
    }

    pub fn glyph_size(&self) -> f32 {
        self.square_size() * GLYPH_SCALE
    }

    pub fn board_total_size(&self) -> f32 {
        self.square_size() * 8.0
    }

    /// Resolve a position relative to the board panel to the visual
    /// row/col it falls on, if any.
    pub fn square_at(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let board_x = x - BOARD_PADDING;
        let board_y = y - BOARD_PADDING;

        if board_x < 0.0 || board_y < 0.0 {
            return None;
        }

        let square_size = self.square_size();
        let col = (board_x / square_size) as usize;
        let row = (board_y / square_size) as usize;

        if row < 8 && col < 8 { Some((row, col)) } else { None }
    }
}

impl Default for BoardMetrics {
    fn default() -> Self {
        Self::new(Size {
            width: px(540.0),
            height: px(600.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_at_maps_corners() {
        let metrics = BoardMetrics::default();
        let square = metrics.square_size();

        assert_eq!(
            metrics.square_at(BOARD_PADDING + 1.0, BOARD_PADDING + 1.0),
            Some((0, 0))
        );
        assert_eq!(
            metrics.square_at(
                BOARD_PADDING + square * 7.5,
                BOARD_PADDING + square * 7.5
            ),
            Some((7, 7))
        );
    }

    #[test]
    fn test_square_at_rejects_outside_positions() {
        let metrics = BoardMetrics::default();
        let square = metrics.square_size();

        assert_eq!(metrics.square_at(5.0, 40.0), None);
        assert_eq!(
            metrics.square_at(BOARD_PADDING + square * 8.5, BOARD_PADDING),
            None
        );
    }
}
