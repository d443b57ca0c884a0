//! Falling sand cellular automaton.

pub mod api;
pub mod cell;
pub mod color;
pub mod config;
#[cfg(target_arch = "wasm32")]
mod console;
pub mod elements;
pub mod input;
pub mod rng;
pub mod universe;

use cell::Material;
use rng::TickRng;
use wasm_bindgen::prelude::*;

pub use config::{ConfigError, SimConfig};
pub use universe::Universe;

/// Set up panic reporting and console logging. Call once from JS before
/// creating a `Universe`.
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    console::install(log::LevelFilter::Info);

    log::info!("sandfall {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Two parallel row-major fields: material id and fall velocity.
/// Out-of-bounds reads return Barrier, writes are no-ops.
#[derive(Debug, Clone)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    materials: Vec<Material>,
    velocities: Vec<u16>,
    pub generation: u32,
}

impl Grid {
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            materials: vec![Material::EMPTY; rows * cols],
            velocities: vec![1; rows * cols],
            generation: 0,
        }
    }

    /// Clear every cell to empty with velocity 1.
    pub fn initialize(&mut self) {
        self.materials.fill(Material::EMPTY);
        self.velocities.fill(1);
        log::debug!("grid {}x{} reset", self.rows, self.cols);
    }

    pub fn reset(&mut self) {
        self.initialize();
    }

    #[must_use]
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && (row as usize) < self.rows && col >= 0 && (col as usize) < self.cols
    }

    fn index(&self, row: i32, col: i32) -> usize {
        row as usize * self.cols + col as usize
    }

    #[must_use]
    pub fn get(&self, row: i32, col: i32) -> Material {
        if self.in_bounds(row, col) {
            self.materials[self.index(row, col)]
        } else {
            Material::BARRIER
        }
    }

    #[must_use]
    pub fn velocity(&self, row: i32, col: i32) -> u16 {
        if self.in_bounds(row, col) {
            self.velocities[self.index(row, col)]
        } else {
            1
        }
    }

    /// Put `material` into an empty in-bounds cell. Occupied or off-grid
    /// targets are ignored. Returns whether the cell was written.
    pub fn place(&mut self, row: i32, col: i32, material: Material) -> bool {
        if !self.get(row, col).is_empty() {
            return false;
        }
        self.set(row, col, material);
        true
    }

    pub(crate) fn set(&mut self, row: i32, col: i32, material: Material) {
        if self.in_bounds(row, col) {
            let idx = self.index(row, col);
            self.materials[idx] = material;
        }
    }

    pub(crate) fn set_velocity(&mut self, row: i32, col: i32, velocity: u16) {
        if self.in_bounds(row, col) {
            let idx = self.index(row, col);
            self.velocities[idx] = velocity;
        }
    }

    pub(crate) fn clear(&mut self, row: i32, col: i32) {
        if self.in_bounds(row, col) {
            let idx = self.index(row, col);
            self.materials[idx] = Material::EMPTY;
            self.velocities[idx] = 1;
        }
    }

    #[must_use]
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    #[must_use]
    pub fn velocities(&self) -> &[u16] {
        &self.velocities
    }

    /// Number of sand cells.
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.materials.iter().filter(|m| m.is_sand()).count()
    }

    /// Advance the simulation by one tick. Returns how many grains moved.
    ///
    /// Scans bottom-to-top starting one row above the floor, in place, so a
    /// grain can fall into space vacated earlier in the same tick. Even rows
    /// scan right-to-left and odd rows left-to-right.
    pub fn update<R: TickRng + ?Sized>(&mut self, rng: &mut R) -> usize {
        self.generation = self.generation.wrapping_add(1);
        let rows = self.rows as i32;
        let cols = self.cols as i32;
        let mut moved = 0;

        for row in (0..rows - 1).rev() {
            let leftward = row % 2 == 0;
            for i in 0..cols {
                let col = if leftward { cols - 1 - i } else { i };
                let kind = self.get(row, col).kind();
                if kind != cell::Kind::Sand {
                    continue;
                }
                let mut api = api::CellApi::new(self, row, col);
                if elements::update_cell(kind, &mut api, rng) {
                    moved += 1;
                }
            }
        }
        moved
    }
}
