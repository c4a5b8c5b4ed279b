use std::ops::Range;

use super::Cell;
use crate::layout::{Rect, Vector2};
use crate::text::char_width;
use crate::types::Color;

/// One frame of terminal output, a cell per column and row.
///
/// Drawing methods take the backend's clip area and silently drop anything
/// outside it or outside the grid. Positions are signed so callers can draw
/// partially off-screen.
#[derive(Debug, Clone)]
pub struct Buffer {
    columns: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            columns,
            rows,
            cells: vec![Cell::default(); usize::from(columns) * usize::from(rows)],
        }
    }

    pub fn width(&self) -> u16 {
        self.columns
    }

    pub fn height(&self) -> u16 {
        self.rows
    }

    pub fn size(&self) -> Vector2 {
        Vector2::new(f32::from(self.columns), f32::from(self.rows))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.slot(i32::from(x), i32::from(y)).map(|slot| &self.cells[slot])
    }

    /// Cell at a signed position, if it is on the grid and inside `clip`.
    pub fn visible_mut(&mut self, x: i32, y: i32, clip: Option<Rect>) -> Option<&mut Cell> {
        let center = Vector2::new(x as f32 + 0.5, y as f32 + 0.5);
        if clip.is_some_and(|clip| !clip.contains(center)) {
            return None;
        }
        let slot = self.slot(x, y)?;
        Some(&mut self.cells[slot])
    }

    /// Columns and rows covered by `rect` once clipped.
    pub fn span(&self, rect: Rect, clip: Option<Rect>) -> (Range<u16>, Range<u16>) {
        let rect = clip.map_or(rect, |clip| rect.intersect(&clip));
        let column = |x: f32| x.round().clamp(0.0, f32::from(self.columns)) as u16;
        let row = |y: f32| y.round().clamp(0.0, f32::from(self.rows)) as u16;
        (
            column(rect.x)..column(rect.right()),
            row(rect.y)..row(rect.bottom()),
        )
    }

    /// Paint the background of every cell in `rect`.
    pub fn fill(&mut self, rect: Rect, clip: Option<Rect>, color: Color) {
        let (columns, rows) = self.span(rect, clip);
        for y in rows {
            for x in columns.clone() {
                if let Some(slot) = self.slot(i32::from(x), i32::from(y)) {
                    self.cells[slot].fill(color);
                }
            }
        }
    }

    /// Write `ch` at a position and return how many columns it takes. Wide
    /// characters claim the next cell as well.
    pub fn put(&mut self, x: i32, y: i32, ch: char, fg: Color, clip: Option<Rect>) -> i32 {
        let width = char_width(ch) as i32;
        if width == 0 {
            return 0;
        }
        if let Some(cell) = self.visible_mut(x, y, clip) {
            cell.set_glyph(ch, fg);
            if width > 1 {
                if let Some(slot) = self.slot(x + 1, y) {
                    self.cells[slot].wide_continuation = true;
                }
            }
        }
        width
    }

    /// Cells that differ from `previous`, with their column and row.
    pub fn changes<'a>(
        &'a self,
        previous: &'a Buffer,
    ) -> impl Iterator<Item = (u16, u16, &'a Cell)> + 'a {
        let columns = usize::from(self.columns.max(1));
        self.cells
            .iter()
            .zip(&previous.cells)
            .enumerate()
            .filter(|(_, (now, before))| now != before)
            .map(move |(slot, (cell, _))| ((slot % columns) as u16, (slot / columns) as u16, cell))
    }

    /// Blank every cell for the next frame.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::default());
    }

    fn slot(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < usize::from(self.columns) && y < usize::from(self.rows))
            .then(|| y * usize::from(self.columns) + x)
    }
}
