//! a character grid that scenes paint onto, one cell per grid step
use crate::config::WindowSize;
use crate::render::assets::{Rgb, Sprite};
use crate::render::Surface;
use crate::types::GRID;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
};
use std::io::{self, Write};

/// A glyph and its colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    #[allow(missing_docs)]
    pub glyph: char,
    #[allow(missing_docs)]
    pub color: Rgb,
}

/// Character grid covering a window, 20 units per cell on both axes
#[derive(Debug, Clone, PartialEq)]
pub struct TextCanvas {
    cols: u16,
    rows: u16,
    background: Rgb,
    cells: Vec<Cell>,
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

impl TextCanvas {
    /// a blank canvas of `cols` by `rows` cells
    pub fn new(cols: u16, rows: u16) -> Self {
        let background = Rgb(0, 0, 0);
        TextCanvas {
            cols,
            rows,
            background,
            cells: vec![
                Cell {
                    glyph: ' ',
                    color: background,
                };
                cols as usize * rows as usize
            ],
        }
    }

    /// a canvas with one cell per grid position of `window`
    pub fn for_window(window: WindowSize) -> Self {
        let cols = (window.width / GRID + 1).max(1) as u16;
        let rows = (window.height / GRID + 1).max(1) as u16;
        TextCanvas::new(cols, rows)
    }

    #[allow(missing_docs)]
    pub fn cols(&self) -> u16 {
        self.cols
    }

    #[allow(missing_docs)]
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// the cell a point in units falls on
    pub fn cell_of(point: (f32, f32)) -> (i32, i32) {
        let g = GRID as f32;
        ((point.0 / g).round() as i32, (point.1 / g).round() as i32)
    }

    /// the cell at `col`, `row`, `None` off the canvas
    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        self.index(col, row).map(|i| self.cells[i])
    }

    /// the glyphs of one row as a string
    pub fn row_text(&self, row: u16) -> String {
        let start = row as usize * self.cols as usize;
        self.cells[start..start + self.cols as usize]
            .iter()
            .map(|c| c.glyph)
            .collect()
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            None
        } else {
            Some(row as usize * self.cols as usize + col as usize)
        }
    }

    fn put(&mut self, col: i32, row: i32, glyph: char, color: Rgb) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = Cell { glyph, color };
        }
    }

    /// Queues the canvas for printing, clipped to `limit` columns and rows.
    ///
    /// Runs of cells sharing a colour are printed with a single colour change.
    pub fn queue_to<W: Write>(&self, out: &mut W, limit: (u16, u16)) -> io::Result<()> {
        let cols = self.cols.min(limit.0) as usize;
        let rows = self.rows.min(limit.1);
        queue!(out, SetBackgroundColor(to_color(self.background)))?;

        for row in 0..rows {
            queue!(out, MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            let line = &self.cells[start..start + cols];

            let mut run = String::new();
            let mut run_color = None;
            for cell in line {
                if run_color != Some(cell.color) {
                    if let Some(color) = run_color {
                        queue!(out, SetForegroundColor(to_color(color)), Print(&run))?;
                    }
                    run.clear();
                    run_color = Some(cell.color);
                }
                run.push(cell.glyph);
            }
            if let Some(color) = run_color {
                queue!(out, SetForegroundColor(to_color(color)), Print(&run))?;
            }
        }
        Ok(())
    }
}

impl Surface for TextCanvas {
    fn fill(&mut self, color: Rgb) {
        self.background = color;
        for cell in self.cells.iter_mut() {
            *cell = Cell { glyph: ' ', color };
        }
    }

    /// Puts the glyph for the nearest eighth turn on the cell under the
    /// sprite's centre.
    fn blit(&mut self, sprite: &Sprite, top_left: (f32, f32), rotation: f32) {
        let radians = rotation.to_radians();
        let extent = sprite.width * (radians.cos().abs() + radians.sin().abs());
        let center = (top_left.0 + extent / 2.0, top_left.1 + extent / 2.0);
        // glyph 0 faces right, an unrotated sprite faces up
        let eighth = ((rotation / 45.0).round() as i32 + 2).rem_euclid(8) as usize;
        let (col, row) = Self::cell_of(center);
        self.put(col, row, sprite.glyph(eighth), sprite.color);
    }

    fn blit_frame(&mut self, sprite: &Sprite, top_left: (f32, f32), frame: usize) {
        let half = sprite.width / 2.0;
        let (col, row) = Self::cell_of((top_left.0 + half, top_left.1 + half));
        self.put(col, row, sprite.glyph(frame), sprite.color);
    }

    fn text(&mut self, top_left: (f32, f32), text: &str, color: Rgb) {
        let (col, row) = Self::cell_of(top_left);
        for (i, glyph) in text.chars().enumerate() {
            self.put(col + i as i32, row, glyph, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::segments;
    use crate::render::assets::{Assets, SpriteKind};
    use crate::render::{Overlay, Scene};
    use crate::types::Position;

    #[test]
    fn test_canvas_covers_window() {
        let c = TextCanvas::for_window(WindowSize::default());
        assert_eq!((c.cols(), c.rows()), (52, 39));
    }

    #[test]
    fn test_blit_picks_glyph_by_rotation() {
        let head = SpriteKind::Head.fallback();
        let mut c = TextCanvas::new(10, 10);
        c.blit(&head, (45.0, 45.0), -90.0);
        assert_eq!(c.get(3, 3).map(|c| c.glyph), Some('▶'));
        c.blit(&head, (45.0, 45.0), 0.0);
        assert_eq!(c.get(3, 3).map(|c| c.glyph), Some('▲'));
        c.blit(&head, (45.0, 45.0), 180.0);
        assert_eq!(c.get(3, 3).map(|c| c.glyph), Some('▼'));
        c.blit(&head, (45.0, 45.0), 90.0);
        assert_eq!(c.get(3, 3).map(|c| c.glyph), Some('◀'));
    }

    #[test]
    fn test_corner_blit_lands_on_its_cell() {
        let body = SpriteKind::Body.fallback();
        let mut c = TextCanvas::new(10, 10);
        let shift = body.width * std::f32::consts::SQRT_2 / 2.0;
        c.blit(&body, (100.0 - shift, 60.0 - shift), -45.0);
        assert_eq!(c.get(5, 3).map(|c| c.glyph), Some('╱'));
    }

    #[test]
    fn test_text_and_clipping() {
        let mut c = TextCanvas::new(6, 2);
        c.fill(Rgb(1, 1, 1));
        c.text((20.0, 20.0), "Snake Lottery", Rgb(9, 9, 9));
        assert_eq!(c.row_text(1), " Snake");
        assert_eq!(c.row_text(0), "      ");
        assert_eq!(c.get(1, 1).map(|c| c.color), Some(Rgb(9, 9, 9)));
        assert_eq!(c.get(6, 1), None);
    }

    #[test]
    fn test_scene_paints_snake() {
        let cells = [
            Position::new(20, 100),
            Position::new(40, 100),
            Position::new(60, 100),
        ];
        let scene = Scene {
            window: WindowSize::default(),
            segments: segments(&cells),
            ball: None,
            explosion: None,
            overlay: Overlay::Drawing,
            digits: &[],
            max_number: 288,
        };
        let mut c = TextCanvas::for_window(scene.window);
        scene.draw(&mut c, &mut Assets::builtin());
        assert!(c.row_text(5).starts_with(" →━▶"));
    }

    #[test]
    fn test_queue_batches_colour_runs() {
        let mut c = TextCanvas::new(4, 1);
        c.fill(Rgb(0, 0, 0));
        c.text((0.0, 0.0), "ab", Rgb(200, 0, 0));
        let mut out = Vec::new();
        c.queue_to(&mut out, (80, 24)).expect("writing to a vec");
        let printed = String::from_utf8(out).expect("utf8");
        assert!(printed.contains("ab"));
        assert!(printed.contains("  "));
        assert!(printed.ends_with("  "));
    }
}
