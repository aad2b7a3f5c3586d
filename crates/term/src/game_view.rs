//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested against a framebuffer.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{Cell as BoardCell, EMPTY_CELL};

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

/// Host-side overlay state that is not part of the engine snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudState {
    /// Show the "GAME OVER" banner over the board
    pub game_over_banner: bool,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const SIDE_PANEL_W: u16 = 14;

/// Colour for a cell identifier: cyan, blue, orange, yellow, green, purple, red.
pub fn palette(id: BoardCell) -> Option<Rgb> {
    match id {
        1 => Some(Rgb::new(0, 255, 255)),
        2 => Some(Rgb::new(0, 0, 255)),
        3 => Some(Rgb::new(255, 165, 0)),
        4 => Some(Rgb::new(255, 255, 0)),
        5 => Some(Rgb::new(0, 128, 0)),
        6 => Some(Rgb::new(128, 0, 128)),
        7 => Some(Rgb::new(255, 0, 0)),
        _ => None,
    }
}

/// A lightweight terminal renderer for the board and its side panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { cell_w: 2, cell_h: 1 }
    }
}

/// Top-left corner of the board frame plus its outer size
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers keep one framebuffer across frames; it is only reallocated when
    /// the viewport grows.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: HudState,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::PLAIN);

        let board_w = (snap.width as u16).saturating_mul(self.cell_w);
        let board_h = (snap.height as u16).saturating_mul(self.cell_h);
        let frame_w = board_w.saturating_add(2);
        let frame_h = board_h.saturating_add(2);
        // Centre board plus side panel horizontally
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w.saturating_add(SIDE_PANEL_W)) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
            w: frame_w,
            h: frame_h,
        };

        let bg = Style {
            fg: Rgb::new(90, 90, 100),
            bg: BOARD_BG,
            bold: false,
            dim: true,
        };
        fb.fill_rect(frame.x + 1, frame.y + 1, board_w, board_h, ' ', bg);
        draw_border(fb, frame, Style::PLAIN);

        for row in 0..snap.height {
            for col in 0..snap.width {
                let id = snap.cell(row, col);
                if id == EMPTY_CELL {
                    self.fill_cell(fb, frame, row as i32, col as i32, '·', bg);
                } else {
                    self.draw_block(fb, frame, row as i32, col as i32, id);
                }
            }
        }

        for (row, col, id) in snap.active.cells() {
            if row >= 0 && col >= 0 && (row as usize) < snap.height && (col as usize) < snap.width {
                self.draw_block(fb, frame, row, col, id);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if hud.game_over_banner {
            draw_overlay_text(fb, frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: HudState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, row: i32, col: i32, id: BoardCell) {
        let style = Style {
            fg: palette(id).unwrap_or(Rgb::new(220, 220, 220)),
            bg: BOARD_BG,
            bold: true,
            dim: false,
        };
        self.fill_cell(fb, frame, row, col, '█', style);
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        row: i32,
        col: i32,
        ch: char,
        style: Style,
    ) {
        let px = frame.x + 1 + (col as u16) * self.cell_w;
        let py = frame.y + 1 + (row as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x.saturating_add(10) > viewport.width {
            return;
        }

        let label = Style {
            fg: Rgb::new(220, 220, 220),
            bg: PANEL_BG,
            bold: true,
            dim: false,
        };
        let value = Style {
            bold: false,
            ..label
        };

        let mut y = frame.y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("SPEED", snap.drop_interval_ms),
            ("GAMES", snap.games_played),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), n, value);
            if name == "SPEED" {
                let digits = n.max(1).ilog10() as u16 + 1;
                fb.put_str(panel_x + digits, y.saturating_add(1), "ms", value);
            }
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        for (r, c, id) in snap.next_topology.filled() {
            let style = Style {
                fg: palette(id).unwrap_or(value.fg),
                ..value
            };
            let x = panel_x + (c as u16) * self.cell_w;
            fb.fill_rect(x, y + r as u16, self.cell_w, 1, '█', style);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: Style) {
    let Frame { x, y, w, h } = frame;
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

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let mid_y = frame.y.saturating_add(frame.h / 2);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let style = Style {
        fg: Rgb::new(255, 255, 255),
        bg: PANEL_BG,
        bold: true,
        dim: false,
    };
    fb.put_str(x, mid_y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Engine;

    fn screen(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| fb.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn palette_covers_every_identifier() {
        assert!(palette(EMPTY_CELL).is_none());
        assert!((1..=7).all(|id| palette(id).is_some()));
        assert!(palette(8).is_none());
    }

    #[test]
    fn renders_panel_labels() {
        let snap = Engine::new(1).snapshot();
        let fb = GameView::default().render(&snap, HudState::default(), Viewport::new(60, 24));
        let text = screen(&fb);
        for label in ["SCORE", "SPEED", "GAMES", "NEXT", "1000ms"] {
            assert!(text.contains(label), "missing {label}:\n{text}");
        }
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn banner_only_when_requested() {
        let snap = GameSnapshot::default();
        let hud = HudState {
            game_over_banner: true,
        };
        let fb = GameView::default().render(&snap, hud, Viewport::new(60, 24));
        assert!(screen(&fb).contains("GAME OVER"));
    }

    #[test]
    fn locked_cell_uses_palette_colour() {
        let mut snap = GameSnapshot::default();
        let last = snap.board.len() - 1;
        snap.board[last] = 7;
        snap.active.y = -10;
        let fb = GameView::default().render(&snap, HudState::default(), Viewport::new(22, 22));
        // 22 wide frame at x=0, bottom-right cell occupies columns 19..=20 of row 20
        let cell = fb.get(19, 20).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, Rgb::new(255, 0, 0));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let snap = GameSnapshot::default();
        let fb = GameView::default().render(&snap, HudState::default(), Viewport::new(3, 2));
        assert_eq!(fb.width(), 3);
    }
}
