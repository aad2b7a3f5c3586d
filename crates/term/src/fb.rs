//! Character framebuffer the game view draws into.
//!
//! Storage is one `Vec<Glyph>` per screen row so the renderer can compare
//! and flush whole rows. Every write is clipped to the buffer.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Foreground, background and weight of a glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Style {
    /// Light grey on black, normal weight
    pub const PLAIN: Style = Style {
        fg: Rgb::new(220, 220, 220),
        bg: Rgb::new(0, 0, 0),
        bold: false,
        dim: false,
    };
}

impl Default for Style {
    fn default() -> Self {
        Self::PLAIN
    }
}

/// One styled character on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph {
        ch: ' ',
        style: Style::PLAIN,
    };
}

impl Default for Glyph {
    fn default() -> Self {
        Self::BLANK
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    rows: Vec<Vec<Glyph>>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            rows: vec![vec![Glyph::BLANK; width as usize]; height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.rows.len() as u16
    }

    /// Change dimensions in place; existing row allocations are reused.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width != width {
            self.width = width;
            for row in &mut self.rows {
                row.resize(width as usize, Glyph::BLANK);
            }
        }
        self.rows
            .resize_with(height as usize, || vec![Glyph::BLANK; width as usize]);
    }

    /// Paint every glyph blank in `style`
    pub fn clear(&mut self, style: Style) {
        let blank = Glyph { ch: ' ', style };
        for row in &mut self.rows {
            row.fill(blank);
        }
    }

    /// Row `y`, or an empty slice past the bottom
    pub fn row(&self, y: u16) -> &[Glyph] {
        self.rows.get(y as usize).map_or(&[][..], Vec::as_slice)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.row(y).get(x as usize).copied()
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if let Some(glyph) = self
            .rows
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            *glyph = Glyph { ch, style };
        }
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: Style) {
        for (ch, cx) in s.chars().zip(x..self.width) {
            self.put_char(cx, y, ch, style);
        }
    }

    /// Write a decimal number without allocating.
    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: Style) {
        let mut digits = [0u8; 10];
        let mut n = value;
        let mut len = 0;
        loop {
            digits[len] = b'0' + (n % 10) as u8;
            len += 1;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        for (i, d) in digits[..len].iter().rev().enumerate() {
            self.put_char(x.saturating_add(i as u16), y, *d as char, style);
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: Style) {
        for row in y..y.saturating_add(h) {
            for col in x..x.saturating_add(w) {
                self.put_char(col, row, ch, style);
            }
        }
    }

    /// Row `y` as plain text
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|g| g.ch).collect()
    }
}
