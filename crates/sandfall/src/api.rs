//! Relative-offset API for the per-cell update rule.
//!
//! `dy` grows downward: `(0, 1)` is the cell below, `(-1, 1)` down-left.

use crate::cell::Material;
use crate::Grid;

/// Out-of-bounds reads return Barrier, writes are no-ops.
#[derive(Debug)]
pub struct CellApi<'a> {
    pub grid: &'a mut Grid,
    pub row: i32,
    pub col: i32,
}

impl<'a> CellApi<'a> {
    pub fn new(grid: &'a mut Grid, row: i32, col: i32) -> Self {
        Self { grid, row, col }
    }

    #[must_use]
    pub fn get(&self, dx: i32, dy: i32) -> Material {
        self.grid.get(self.row + dy, self.col + dx)
    }

    #[must_use]
    pub fn velocity(&self) -> u16 {
        self.grid.velocity(self.row, self.col)
    }

    pub fn set_velocity(&mut self, velocity: u16) {
        self.grid.set_velocity(self.row, self.col, velocity);
    }

    /// Rows of empty space directly below, capped at `limit` and at the
    /// bottom edge.
    #[must_use]
    pub fn open_below(&self, limit: u16) -> u16 {
        let room = (self.grid.rows as i32 - 1 - self.row).max(0);
        let limit = i32::from(limit).min(room);
        for step in 1..=limit {
            if !self.get(0, step).is_empty() {
                return (step - 1) as u16;
            }
        }
        limit as u16
    }

    /// Move this cell's material to `(dx, dy)` and clear the source.
    /// `velocity` of `None` leaves the destination's velocity untouched.
    pub fn relocate(&mut self, dx: i32, dy: i32, velocity: Option<u16>) {
        let me = self.get(0, 0);
        let (row, col) = (self.row + dy, self.col + dx);
        if !self.grid.in_bounds(row, col) {
            return;
        }
        self.grid.set(row, col, me);
        if let Some(v) = velocity {
            self.grid.set_velocity(row, col, v);
        }
        self.grid.clear(self.row, self.col);
    }
}
