//! Turns pointer gestures into cell placements.
//!
//! Holding the sand button stamps a filled disc of one hue per frame, the hue
//! advancing with every stamp. Dragging with the barrier button lays a
//! continuous Bresenham line between successive pointer positions.

use crate::cell::Material;
use crate::Grid;

/// Hues cycle through `2..=720`: `(hue + 1) % HUE_CYCLE + 1`.
const HUE_CYCLE: u16 = 720;

/// Map a pixel position to `(row, col)`. Negative pixels land off the grid.
#[must_use]
pub fn pixel_to_cell(px: i32, py: i32, cell_size: u32) -> (i32, i32) {
    let size = i32::try_from(cell_size).unwrap_or(i32::MAX).max(1);
    (py.div_euclid(size), px.div_euclid(size))
}

/// Offsets `(dr, dc)` inside a disc of `radius`: `dr² + dc² <= radius²`.
pub fn disc(radius: i32) -> impl Iterator<Item = (i32, i32)> {
    let r = radius.max(0);
    let r2 = i64::from(r).pow(2);
    (-r..=r).flat_map(move |dc| {
        (-r..=r)
            .filter(move |&dr| i64::from(dc).pow(2) + i64::from(dr).pow(2) <= r2)
            .map(move |dr| (dr, dc))
    })
}

/// Bresenham line over `(row, col)` cells, both endpoints included.
#[derive(Debug, Clone)]
pub struct Line {
    cur: (i32, i32),
    end: (i32, i32),
    d_row: i32,
    d_col: i32,
    step_row: i32,
    step_col: i32,
    err: i32,
    done: bool,
}

impl Line {
    #[must_use]
    pub fn new(from: (i32, i32), to: (i32, i32)) -> Self {
        let d_col = (to.1 - from.1).abs();
        let d_row = (to.0 - from.0).abs();
        Self {
            cur: from,
            end: to,
            d_row,
            d_col,
            step_row: if from.0 < to.0 { 1 } else { -1 },
            step_col: if from.1 < to.1 { 1 } else { -1 },
            err: d_col - d_row,
            done: false,
        }
    }
}

impl Iterator for Line {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let point = self.cur;
        if point == self.end {
            self.done = true;
            return Some(point);
        }
        let e2 = 2 * self.err;
        if e2 > -self.d_row {
            self.err -= self.d_row;
            self.cur.1 += self.step_col;
        }
        if e2 < self.d_col {
            self.err += self.d_col;
            self.cur.0 += self.step_row;
        }
        Some(point)
    }
}

/// Per-session pointer state: the current sand hue and the barrier stroke
/// anchor.
#[derive(Debug, Clone)]
pub struct Gesture {
    hue: u16,
    stroke: Option<(i32, i32)>,
    pub brush_radius: i32,
}

impl Gesture {
    #[must_use]
    pub fn new(brush_radius: i32) -> Self {
        Self {
            hue: 0,
            stroke: None,
            brush_radius,
        }
    }

    #[must_use]
    pub fn hue(&self) -> u16 {
        self.hue
    }

    fn next_hue(&mut self) -> Material {
        self.hue = (self.hue + 1) % HUE_CYCLE + 1;
        Material::sand(self.hue)
    }

    /// Fill the brush disc around `(row, col)` with sand of the next hue.
    /// Returns how many cells were filled.
    pub fn stamp_sand(&mut self, grid: &mut Grid, row: i32, col: i32) -> usize {
        let material = self.next_hue();
        disc(self.brush_radius)
            .filter(|&(dr, dc)| grid.place(row + dr, col + dc, material))
            .count()
    }

    /// Anchor a barrier stroke at `(row, col)` and mark that cell.
    pub fn begin_stroke(&mut self, grid: &mut Grid, row: i32, col: i32) -> usize {
        self.stroke = Some((row, col));
        usize::from(grid.place(row, col, Material::BARRIER))
    }

    /// Draw barrier from the anchor to `(row, col)` and move the anchor
    /// there. Starts a new stroke if none is active.
    pub fn extend_stroke(&mut self, grid: &mut Grid, row: i32, col: i32) -> usize {
        let Some(anchor) = self.stroke else {
            return self.begin_stroke(grid, row, col);
        };
        self.stroke = Some((row, col));
        Line::new(anchor, (row, col))
            .filter(|&(r, c)| grid.place(r, c, Material::BARRIER))
            .count()
    }

    pub fn end_stroke(&mut self) {
        self.stroke = None;
    }

    #[must_use]
    pub fn stroke_active(&self) -> bool {
        self.stroke.is_some()
    }
}
