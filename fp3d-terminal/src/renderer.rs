/// ASCII line rasterizer for terminal rendering
use crossterm::{
    style::{self, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use fp3d_core::{Color, LineCanvas, Vec4};
use log::trace;
use std::io::Write;

/// Each terminal cell covers two vertical pixel rows so that pixels are
/// roughly square.
pub const PIXEL_ROWS_PER_CELL: usize = 2;

/// Longest line, in multiples of the viewport perimeter, worth stepping through
const MAX_LINE_SPAN: i64 = 8;

/// ASCII renderer that draws projected wireframe edges as characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f64>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f64::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::WHITE; size],
        }
    }

    /// Size of the pixel grid the projector should map onto
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.width as f64, (self.height * PIXEL_ROWS_PER_CELL) as f64)
    }

    pub fn clear(&mut self) {
        for i in 0..self.depth_buffer.len() {
            self.depth_buffer[i] = f64::INFINITY;
            self.char_buffer[i] = ' ';
            self.color_buffer[i] = Color::WHITE;
        }
    }

    /// Character at a cell, for inspection
    pub fn cell(&self, column: usize, row: usize) -> Option<char> {
        (column < self.width && row < self.height).then(|| self.char_buffer[row * self.width + column])
    }

    fn plot(&mut self, column: i64, row: i64, depth: f64, glyph: char, color: Color) {
        if column < 0 || row < 0 || column >= self.width as i64 || row >= self.height as i64 {
            return;
        }
        let idx = row as usize * self.width + column as usize;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = glyph;
            self.color_buffer[idx] = color;
        }
    }

    /// Plain text rows, without colour
    pub fn to_lines(&self) -> Vec<String> {
        self.char_buffer
            .chunks(self.width.max(1))
            .map(|row| row.iter().collect())
            .collect()
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let Color { r, g, b } = self.color_buffer[idx];
                writer.queue(SetForegroundColor(style::Color::Rgb { r, g, b }))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Pick a character that follows the line's slope on screen (y grows down).
fn slope_glyph(dx: f64, dy: f64) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay * 2.0 < ax {
        '-'
    } else if ax * 2.0 < ay {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

impl LineCanvas for AsciiRenderer {
    /// Step along the line cell by cell, interpolating depth.
    fn stroke_line(&mut self, from: Vec4, to: Vec4, color: Color) {
        let rows = PIXEL_ROWS_PER_CELL as f64;
        let (x0, y0) = (from.x, from.y / rows);
        let (x1, y1) = (to.x, to.y / rows);
        let (dx, dy) = (x1 - x0, y1 - y0);

        let steps = dx.abs().max(dy.abs()).ceil() as i64;
        let limit = MAX_LINE_SPAN * (self.width + self.height) as i64;
        if steps > limit {
            trace!("line spans {} cells, not drawn", steps);
            return;
        }

        let glyph = slope_glyph(dx, dy);
        let steps = steps.max(1);
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let depth = from.z + (to.z - from.z) * t;
            self.plot(
                (x0 + dx * t).floor() as i64,
                (y0 + dy * t).floor() as i64,
                depth,
                glyph,
                color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64, depth: f64) -> Vec4 {
        Vec4::new(x, y, depth, 1.0)
    }

    #[test]
    fn test_horizontal_line() {
        let mut renderer = AsciiRenderer::new(10, 5);
        renderer.stroke_line(point(1.0, 4.0, 0.5), point(8.0, 4.0, 0.5), Color::RED);
        assert_eq!(renderer.to_lines()[2], " -------- ");
    }

    #[test]
    fn test_vertical_line_uses_bar() {
        let mut renderer = AsciiRenderer::new(5, 5);
        renderer.stroke_line(point(2.0, 0.0, 0.5), point(2.0, 9.0, 0.5), Color::RED);
        for row in 0..5 {
            assert_eq!(renderer.cell(2, row), Some('|'));
        }
    }

    #[test]
    fn test_nearer_line_wins() {
        let mut renderer = AsciiRenderer::new(5, 5);
        renderer.stroke_line(point(0.0, 4.0, 0.9), point(4.0, 4.0, 0.9), Color::RED);
        renderer.stroke_line(point(2.0, 0.0, 0.1), point(2.0, 9.0, 0.1), Color::BLUE);
        assert_eq!(renderer.cell(2, 2), Some('|'));
        renderer.stroke_line(point(0.0, 4.0, 0.9), point(4.0, 4.0, 0.9), Color::RED);
        assert_eq!(renderer.cell(2, 2), Some('|'));
    }

    #[test]
    fn test_off_screen_and_huge_lines_are_safe() {
        let mut renderer = AsciiRenderer::new(4, 4);
        renderer.stroke_line(point(-50.0, -50.0, 0.5), point(-10.0, -10.0, 0.5), Color::RED);
        renderer.stroke_line(point(0.0, 0.0, 0.5), point(1e12, 3.0, 0.5), Color::RED);
        assert!(renderer.to_lines().iter().all(|l| l.trim().is_empty()));
    }

    #[test]
    fn test_clear_resets_buffers() {
        let mut renderer = AsciiRenderer::new(3, 3);
        renderer.stroke_line(point(0.0, 0.0, 0.5), point(2.0, 0.0, 0.5), Color::RED);
        renderer.clear();
        assert_eq!(renderer.cell(1, 0), Some(' '));
    }

    #[test]
    fn test_slope_glyphs() {
        assert_eq!(slope_glyph(1.0, 1.0), '\\');
        assert_eq!(slope_glyph(1.0, -1.0), '/');
        assert_eq!(slope_glyph(5.0, 0.5), '-');
        assert_eq!(slope_glyph(0.2, -4.0), '|');
    }
}
