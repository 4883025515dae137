//! GameView: maps a `GameSession` into a terminal framebuffer.
//!
//! This module is pure (no I/O), so it can be unit-tested.

use crate::core::{GameSession, PieceTile};
use crate::term::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::PieceKind;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Fill color for each piece kind.
pub fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0x67, 0xf8, 0xff),
        PieceKind::O => Rgb::new(0xff, 0xd8, 0x53),
        PieceKind::J => Rgb::new(0x22, 0x67, 0xf9),
        PieceKind::L => Rgb::new(0xf4, 0x9b, 0x1e),
        PieceKind::S => Rgb::new(0x2f, 0xd1, 0x1d),
        PieceKind::Z => Rgb::new(0xd7, 0x2e, 0x2e),
        PieceKind::T => Rgb::new(0xab, 0x38, 0xec),
    }
}

/// A lightweight terminal view of a running game.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render the session into a framebuffer sized to the viewport.
    pub fn render(&self, session: &GameSession, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let grid = session.grid();
        let grid_cols = grid.width() as u16 * self.cell_w;
        let grid_rows = grid.height() as u16 * self.cell_h;
        let frame_w = grid_cols + 2;
        let frame_h = grid_rows + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let empty = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG);
        let border = CellStyle::default();

        fb.fill_rect(start_x + 1, start_y + 1, grid_cols, grid_rows, '·', empty);
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        for (pos, tile) in grid.occupied_cells() {
            self.fill_grid_cell(
                &mut fb,
                start_x,
                start_y,
                pos.x as u16,
                pos.y as u16,
                '█',
                CellStyle::new(kind_color(tile.kind), PLAYFIELD_BG),
            );
        }

        if let Some(piece) = session.active_piece() {
            let style = CellStyle::new(kind_color(piece.kind()), PLAYFIELD_BG).bold();
            for tile in piece.tiles() {
                self.draw_tile(&mut fb, start_x, start_y, tile, style);
            }
        }

        self.draw_side_panel(&mut fb, session, viewport, start_x, start_y, frame_w);

        if session.game_over() {
            self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }

        fb
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        tile: &PieceTile,
        style: CellStyle,
    ) {
        let pos = tile.grid_pos();
        if pos.x < 0 || pos.y < 0 {
            return;
        }
        self.fill_grid_cell(fb, start_x, start_y, pos.x as u16, pos.y as u16, '█', style);
    }

    fn fill_grid_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        session: &GameSession,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x.saturating_add(6) > viewport.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = start_y;
        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        match session.supply().bag().remaining().first() {
            Some(&kind) => {
                fb.put_str(
                    panel_x,
                    y,
                    &kind.as_str().to_ascii_uppercase(),
                    CellStyle::new(kind_color(kind), Rgb::new(0, 0, 0)),
                );
            }
            None => fb.put_str(panel_x, y, "-", value),
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "KEYS", label);
        for line in ["←→ move", "↓ drop", "↑ turn", "␣ slam", "q quit"] {
            y = y.saturating_add(1);
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, value);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoardConfig;

    fn count_blocks(fb: &FrameBuffer) -> usize {
        let mut n = 0;
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                if fb.get(x, y).map(|c| c.ch) == Some('█') {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_render_fits_viewport() {
        let session = GameSession::new(BoardConfig::default(), 1);
        let view = GameView::default();
        let fb = view.render(&session, Viewport::new(80, 24));
        assert_eq!(fb.width(), 80);
        assert_eq!(fb.height(), 24);
    }

    #[test]
    fn test_active_piece_tiles_are_drawn() {
        let mut session = GameSession::new(BoardConfig::default(), 1);

        struct Idle;
        impl crate::core::supply::ActionInput for Idle {
            fn is_pressed(&self, _: crate::types::GameAction) -> bool {
                false
            }
            fn is_just_pressed(&self, _: crate::types::GameAction) -> bool {
                false
            }
        }
        session.tick(crate::types::TICK_MS, &Idle);
        assert!(session.active_piece().is_some());

        let view = GameView::new(2, 1);
        let fb = view.render(&session, Viewport::new(80, 24));
        // Four tiles, two columns each.
        assert_eq!(count_blocks(&fb), 8);
    }

    #[test]
    fn test_small_viewport_does_not_panic() {
        let session = GameSession::new(BoardConfig::default(), 1);
        let view = GameView::default();
        let fb = view.render(&session, Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
