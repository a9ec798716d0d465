//! Character canvas and 2D primitives
//!
//! Shapes are given in court units and rasterised onto cells: a cell is
//! covered when its centre falls inside the shape.

use glam::Vec2;

use crate::Rgb;
use crate::ui::{GLYPH_H, GLYPH_W, Rect};

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Rgb::WHITE,
            bg: Rgb::BLACK,
        }
    }
}

/// Grid of cells, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    /// A canvas covering `size` court units
    pub fn for_court(size: Vec2) -> Self {
        Self::new(
            (size.x / GLYPH_W).round() as usize,
            (size.y / GLYPH_H).round() as usize,
        )
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Cell> {
        (col < self.width && row < self.height).then(|| &self.cells[row * self.width + col])
    }

    fn get_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col < self.width && row < self.height {
            Some(&mut self.cells[row * self.width + col])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Characters of one row, for inspection
    pub fn row_text(&self, row: usize) -> String {
        self.rows()
            .nth(row)
            .map(|cells| cells.iter().map(|c| c.ch).collect())
            .unwrap_or_default()
    }

    /// Centre of a cell in court units
    #[inline]
    fn cell_center(col: i32, row: i32) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) * GLYPH_W,
            (row as f32 + 0.5) * GLYPH_H,
        )
    }

    /// Cell containing a court position
    #[inline]
    fn cell_at(p: Vec2) -> (i32, i32) {
        ((p.x / GLYPH_W).floor() as i32, (p.y / GLYPH_H).floor() as i32)
    }

    /// Cell range (inclusive) whose centres may fall inside `min..max`
    fn cell_span(min: Vec2, max: Vec2) -> ((i32, i32), (i32, i32)) {
        (Self::cell_at(min), Self::cell_at(max))
    }

    pub fn clear(&mut self, bg: Rgb) {
        for cell in &mut self.cells {
            *cell = Cell {
                ch: ' ',
                fg: Rgb::WHITE,
                bg,
            };
        }
    }

    /// Paint every cell whose centre satisfies `inside`
    fn paint(&mut self, min: Vec2, max: Vec2, bg: Rgb, inside: impl Fn(Vec2) -> bool) {
        let ((c0, r0), (c1, r1)) = Self::cell_span(min, max);
        for row in r0..=r1 {
            for col in c0..=c1 {
                if inside(Self::cell_center(col, row)) {
                    if let Some(cell) = self.get_mut(col, row) {
                        cell.ch = ' ';
                        cell.bg = bg;
                    }
                }
            }
        }
    }

    /// Filled rectangle
    pub fn fill_rect(&mut self, rect: Rect, bg: Rgb) {
        let min = rect.top_left();
        let max = min + Vec2::new(rect.w, rect.h);
        self.paint(min, max, bg, |p| {
            p.x >= min.x && p.x < max.x && p.y >= min.y && p.y < max.y
        });
    }

    /// Rectangle outline `thickness` court units wide, drawn inside `rect`.
    /// Each edge is at least one cell thick.
    pub fn outline_rect(&mut self, rect: Rect, thickness: f32, bg: Rgb) {
        let tx = thickness.max(GLYPH_W);
        let ty = thickness.max(GLYPH_H);
        let Rect { x, y, w, h } = rect;
        self.fill_rect(Rect::new(x, y, w, ty), bg);
        self.fill_rect(Rect::new(x, y + h - ty, w, ty), bg);
        self.fill_rect(Rect::new(x, y, tx, h), bg);
        self.fill_rect(Rect::new(x + w - tx, y, tx, h), bg);
    }

    /// Vertical line one cell wide through `x`
    pub fn vline(&mut self, x: f32, y0: f32, y1: f32, bg: Rgb) {
        let col = (x / GLYPH_W).floor();
        self.fill_rect(Rect::new(col * GLYPH_W, y0, GLYPH_W, y1 - y0), bg);
    }

    /// Filled circle
    pub fn circle(&mut self, center: Vec2, radius: f32, bg: Rgb) {
        let r = Vec2::splat(radius);
        self.paint(center - r, center + r, bg, |p| {
            p.distance_squared(center) <= radius * radius
        });
    }

    /// Ring between two radii. The band is widened to at least a cell so
    /// thin rings stay visible.
    pub fn ring(&mut self, center: Vec2, inner_radius: f32, outer_radius: f32, bg: Rgb) {
        let band = (outer_radius - inner_radius).max(GLYPH_W);
        let inner = outer_radius - band;
        let r = Vec2::splat(outer_radius);
        self.paint(center - r, center + r, bg, |p| {
            let d = p.distance(center);
            d >= inner && d <= outer_radius
        });
    }

    /// Text starting at a court position. Keeps the background underneath.
    pub fn text(&mut self, at: Vec2, text: &str, fg: Rgb) {
        let (col, row) = Self::cell_at(at);
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.get_mut(col + i as i32, row) {
                cell.ch = ch;
                cell.fg = fg;
            }
        }
    }

    /// Text on a solid background
    pub fn label(&mut self, at: Vec2, text: &str, fg: Rgb, bg: Rgb) {
        let (col, row) = Self::cell_at(at);
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.get_mut(col + i as i32, row) {
                *cell = Cell { ch, fg, bg };
            }
        }
    }

    /// Text centred horizontally on `center.x`, on the row of `center.y`
    pub fn text_centered(&mut self, center: Vec2, text: &str, fg: Rgb) {
        let half = text.chars().count() as f32 * GLYPH_W / 2.0;
        self.text(Vec2::new(center.x - half, center.y), text, fg);
    }

    /// Several lines of text, one row apart
    pub fn block(&mut self, at: Vec2, lines: &[String], fg: Rgb) {
        for (i, line) in lines.iter().enumerate() {
            self.text(at + Vec2::new(0.0, i as f32 * GLYPH_H), line, fg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_court_canvas_size() {
        let canvas = Canvas::for_court(Vec2::new(1000.0, 500.0));
        assert_eq!((canvas.width(), canvas.height()), (100, 25));
    }

    #[test]
    fn test_circle_covers_center_not_corners() {
        let mut canvas = Canvas::new(20, 10);
        canvas.circle(Vec2::new(100.0, 100.0), 35.0, Rgb::RED);
        assert_eq!(canvas.get(10, 5).unwrap().bg, Rgb::RED);
        assert_eq!(canvas.get(6, 3).unwrap().bg, Rgb::BLACK);
        assert_eq!(canvas.get(13, 3).unwrap().bg, Rgb::BLACK);
    }

    #[test]
    fn test_shapes_clip_at_edges() {
        let mut canvas = Canvas::new(4, 2);
        canvas.circle(Vec2::new(0.0, 0.0), 500.0, Rgb::BLUE);
        canvas.fill_rect(Rect::new(-100.0, -100.0, 1000.0, 1000.0), Rgb::GREEN);
        assert!(canvas.rows().flatten().all(|c| c.bg == Rgb::GREEN));
    }

    #[test]
    fn test_text_keeps_background() {
        let mut canvas = Canvas::new(10, 2);
        canvas.clear(Rgb::GREEN);
        canvas.text(Vec2::new(20.0, 20.0), "Hi", Rgb::RED);
        assert_eq!(canvas.row_text(1), "  Hi      ");
        let cell = canvas.get(2, 1).unwrap();
        assert_eq!((cell.fg, cell.bg), (Rgb::RED, Rgb::GREEN));
    }

    #[test]
    fn test_text_centered() {
        let mut canvas = Canvas::new(10, 1);
        canvas.text_centered(Vec2::new(50.0, 0.0), "abcd", Rgb::WHITE);
        assert_eq!(canvas.row_text(0), "   abcd   ");
    }

    #[test]
    fn test_ring_leaves_middle_empty() {
        let mut canvas = Canvas::new(100, 25);
        canvas.ring(Vec2::new(500.0, 250.0), 70.0, 75.0, Rgb::WHITE);
        // cell containing the centre stays untouched
        assert_eq!(canvas.get(50, 12).unwrap().bg, Rgb::BLACK);
        // a cell on the rim is painted
        assert_eq!(canvas.get(42, 12).unwrap().bg, Rgb::WHITE);
    }
}
