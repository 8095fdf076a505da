//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer};
use crate::types::{Cell, Rgb, BOARD_SIZE};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const BLOCK: char = '█';
const PREVIEW_ROWS: u16 = 4;

/// Board, side panel and banner renderer.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

/// Where the board frame landed in the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardFrame {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Frame placement for a viewport (border included).
    pub fn board_frame(&self, viewport: Viewport) -> BoardFrame {
        let w = BOARD_SIZE as u16 * self.cell_w + 2;
        let h = BOARD_SIZE as u16 * self.cell_h + 2;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        BoardFrame { x, y, w, h }
    }

    /// Terminal position of the top-left character of board cell (x, y).
    pub fn cell_origin(&self, frame: BoardFrame, x: u16, y: u16) -> (u16, u16) {
        (
            frame.x + 1 + x * self.cell_w,
            frame.y + 1 + y * self.cell_h,
        )
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only resized
    /// when the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_banner(snap, None, viewport, fb);
    }

    /// Render, then center `banner` over the board.
    pub fn render_into_with_banner(
        &self,
        snap: &GameSnapshot,
        banner: Option<&str>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let frame = self.board_frame(viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        self.draw_border(fb, frame, border);

        for y in 0..BOARD_SIZE as i8 {
            for x in 0..BOARD_SIZE as i8 {
                match snap.cell_at(x, y) {
                    Some(Cell::Occupied(color)) => self.draw_block(fb, frame, x as u16, y as u16, color),
                    _ => self.draw_empty(fb, frame, x as u16, y as u16),
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if let Some(text) = banner {
            self.draw_banner(fb, frame, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: BoardFrame, style: CellStyle) {
        let BoardFrame { x, y, w, h } = frame;

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

    fn draw_empty(&self, fb: &mut FrameBuffer, frame: BoardFrame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        let (px, py) = self.cell_origin(frame, x, y);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px, py, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: BoardFrame, x: u16, y: u16, color: Rgb) {
        let (px, py) = self.cell_origin(frame, x, y);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, BLOCK, CellStyle::new(color, PLAY_BG));
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: BoardFrame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        match snap.next {
            Some(next) => {
                for &(dx, dy) in next.shape.iter() {
                    let px = panel_x + dx as u16 * self.cell_w;
                    let py = y + dy as u16;
                    fb.fill_rect(px, py, self.cell_w, 1, BLOCK, CellStyle::new(next.color, PANEL_BG));
                }
            }
            None => {
                fb.put_char(panel_x, y, '-', value);
            }
        }
        y += PREVIEW_ROWS + 1;

        fb.put_str(panel_x, y, "GAMES", label);
        fb.put_u32(panel_x, y + 1, snap.games_played, value);
    }

    fn draw_banner(&self, fb: &mut FrameBuffer, frame: BoardFrame, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}
