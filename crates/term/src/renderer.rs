//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are compared row by row against the last one shown. A row that
//! changed is rewritten from column 0 in style runs; unchanged rows cost
//! nothing. The first frame, a resize, or `invalidate` clears the screen and
//! writes every row.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal,
};

use crate::fb::{FrameBuffer, Glyph, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Frame currently on screen; `None` forces a full redraw
    shown: Option<FrameBuffer>,
    bytes: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            bytes: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.bytes.clear();
        queue!(
            self.bytes,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap
        )?;
        self.flush()
    }

    /// Undo everything `enter` did.
    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        queue!(
            self.bytes,
            ResetColor,
            SetAttribute(Attribute::Reset),
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Redraw everything on the next `present` (terminal resize).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `fb`, then hand the previously shown buffer back through `fb`.
    ///
    /// Callers keep rendering into the same `&mut FrameBuffer` every frame;
    /// the two buffers trade places so nothing is cloned.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.bytes.clear();
        encode_frame_into(self.shown.as_ref(), fb, &mut self.bytes)?;
        self.flush()?;

        let mut back = self.shown.take().unwrap_or_else(|| FrameBuffer::new(0, 0));
        std::mem::swap(&mut back, fb);
        self.shown = Some(back);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.bytes)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode the escape sequences that turn `shown` into `next`.
///
/// With no comparable `shown` frame (none yet, or a different size) the
/// screen is cleared and every row written. Returns the number of rows written.
pub fn encode_frame_into(
    shown: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<u16> {
    let shown = shown.filter(|s| s.width() == next.width() && s.height() == next.height());
    if shown.is_none() {
        queue!(out, terminal::Clear(terminal::ClearType::All))?;
    }

    let mut written = 0;
    for y in 0..next.height() {
        let row = next.row(y);
        if shown.is_some_and(|s| s.row(y) == row) {
            continue;
        }
        queue!(out, cursor::MoveTo(0, y))?;
        encode_row_into(row, out)?;
        written += 1;
    }

    if written > 0 {
        queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
    }
    Ok(written)
}

/// Print a row as runs of same-styled glyphs.
fn encode_row_into(row: &[Glyph], out: &mut Vec<u8>) -> Result<()> {
    let mut run = String::with_capacity(row.len() * 3);
    let mut rest = row;
    while let Some(first) = rest.first() {
        let style = first.style;
        let len = rest.iter().take_while(|g| g.style == style).count();
        run.clear();
        run.extend(rest[..len].iter().map(|g| g.ch));
        queue_style(out, style)?;
        queue!(out, Print(&run))?;
        rest = &rest[len..];
    }
    Ok(())
}

fn queue_style(out: &mut Vec<u8>, style: Style) -> Result<()> {
    let rgb = |c: crate::fb::Rgb| Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    };
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(rgb(style.fg)),
        SetBackgroundColor(rgb(style.bg))
    )?;
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}
