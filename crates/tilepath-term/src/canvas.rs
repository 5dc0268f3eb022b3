//! The [`Canvas`] type, a width x height buffer of styled [`Glyph`]s, and
//! the [`Frame`] diff between two canvases.

use std::ops::BitOr;

// ---------------------------------------------------------------------------
// Color / AttrMask / Style
// ---------------------------------------------------------------------------

/// An RGB colour packed into a `u32` (0x00RRGGBB).
///
/// [`Color::DEFAULT`] leaves the terminal's own colour in place.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    /// The default / unset colour (0).
    pub const DEFAULT: Self = Self(0);

    /// Construct from individual RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Red component.
    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Green component.
    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Blue component.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

/// Bitmask of text attributes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct AttrMask(pub u8);

impl AttrMask {
    pub const NONE: Self = Self(0);
    pub const BOLD: Self = Self(1 << 0);
    pub const DIM: Self = Self(1 << 1);

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for AttrMask {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Foreground, background and attributes of a glyph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub attrs: AttrMask,
}

impl Style {
    #[inline]
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    #[inline]
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    #[inline]
    pub const fn with_attrs(mut self, attrs: AttrMask) -> Self {
        self.attrs = attrs;
        self
    }
}

// ---------------------------------------------------------------------------
// Glyph
// ---------------------------------------------------------------------------

/// A styled character occupying one terminal cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    #[inline]
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }
}

impl Default for Glyph {
    #[inline]
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style {
                fg: Color::DEFAULT,
                bg: Color::DEFAULT,
                attrs: AttrMask::NONE,
            },
        }
    }
}

/// Never drawn; marks every cell of an invalidated canvas as changed.
const STALE: Glyph = Glyph {
    ch: '\0',
    style: Style {
        fg: Color::DEFAULT,
        bg: Color::DEFAULT,
        attrs: AttrMask::NONE,
    },
};

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// A fixed-size, row-major buffer of glyphs. Writes outside the canvas are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    glyphs: Vec<Glyph>,
    width: i32,
    height: i32,
}

impl Canvas {
    /// Create a blank canvas. Negative sizes are clamped to zero.
    pub fn new(width: i32, height: i32) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        Self {
            glyphs: vec![Glyph::default(); width as usize * height as usize],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Read the glyph at (`x`, `y`), or the default glyph outside the
    /// canvas.
    pub fn at(&self, x: i32, y: i32) -> Glyph {
        self.index(x, y)
            .map(|i| self.glyphs[i])
            .unwrap_or_default()
    }

    /// Set the glyph at (`x`, `y`).
    pub fn set(&mut self, x: i32, y: i32, glyph: Glyph) {
        if let Some(i) = self.index(x, y) {
            self.glyphs[i] = glyph;
        }
    }

    /// Fill every cell with `glyph`.
    pub fn fill(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    /// Write `text` left to right from (`x`, `y`), clipped at the right
    /// edge. Returns the number of cells written.
    pub fn text(&mut self, x: i32, y: i32, text: &str, style: Style) -> i32 {
        let mut written = 0;
        for (dx, ch) in text.chars().enumerate() {
            let cx = x + dx as i32;
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Glyph::new(ch, style));
            written += 1;
        }
        written
    }

    /// Mark every cell as changed so the next diff repaints everything.
    pub fn invalidate(&mut self) {
        self.glyphs.fill(STALE);
    }

    /// Copy `other` into `self`, reallocating when the sizes differ.
    pub fn copy_from(&mut self, other: &Canvas) {
        self.glyphs.clone_from(&other.glyphs);
        self.width = other.width;
        self.height = other.height;
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single glyph that changed between canvases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub glyph: Glyph,
    pub x: i32,
    pub y: i32,
}

/// The glyphs that changed between two canvases, in row-major order.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
}

/// Compute the difference between `prev` and `curr`.
///
/// Cells of `curr` outside `prev` always count as changed.
pub fn compute_frame(prev: &Canvas, curr: &Canvas) -> Frame {
    let mut cells = Vec::new();
    for y in 0..curr.height {
        for x in 0..curr.width {
            let glyph = curr.at(x, y);
            let changed = match prev.index(x, y) {
                Some(i) => prev.glyphs[i] != glyph,
                None => true,
            };
            if changed {
                cells.push(FrameCell { glyph, x, y });
            }
        }
    }
    Frame {
        cells,
        width: curr.width,
        height: curr.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_components() {
        let c = Color::from_rgb(0x12, 0x34, 0x56);
        assert_eq!((c.r(), c.g(), c.b()), (0x12, 0x34, 0x56));
        assert_eq!(c.0, 0x123456);
    }

    #[test]
    fn set_and_at_ignore_outside() {
        let mut c = Canvas::new(4, 2);
        let g = Glyph::new('x', Style::default());
        c.set(3, 1, g);
        c.set(4, 0, g);
        c.set(-1, 0, g);
        assert_eq!(c.at(3, 1), g);
        assert_eq!(c.at(4, 0), Glyph::default());
    }

    #[test]
    fn text_is_clipped() {
        let mut c = Canvas::new(5, 1);
        let n = c.text(2, 0, "hello", Style::default());
        assert_eq!(n, 3);
        assert_eq!(c.at(4, 0).ch, 'l');
    }

    #[test]
    fn frame_contains_only_changes() {
        let a = Canvas::new(3, 2);
        let mut b = Canvas::new(3, 2);
        b.set(1, 0, Glyph::new('A', Style::default()));
        let frame = compute_frame(&a, &b);
        assert_eq!(frame.cells.len(), 1);
        assert_eq!((frame.cells[0].x, frame.cells[0].y), (1, 0));
        assert_eq!(frame.cells[0].glyph.ch, 'A');
    }

    #[test]
    fn invalidated_canvas_repaints_everything() {
        let mut a = Canvas::new(3, 2);
        let b = Canvas::new(3, 2);
        assert!(compute_frame(&a, &b).cells.is_empty());
        a.invalidate();
        assert_eq!(compute_frame(&a, &b).cells.len(), 6);
    }

    #[test]
    fn growing_canvas_repaints_new_area() {
        let a = Canvas::new(2, 1);
        let b = Canvas::new(3, 1);
        let frame = compute_frame(&a, &b);
        assert_eq!(frame.cells.len(), 1);
        assert_eq!(frame.cells[0].x, 2);
    }
}
