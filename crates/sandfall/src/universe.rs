//! Browser-facing wrapper: owns the grid, its random source and the pointer
//! gesture state, and exposes flat buffers for zero-copy reads from JS.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::cell::Material;
use crate::config::{ConfigError, SimConfig};
use crate::input::{pixel_to_cell, Gesture};
use crate::{color, Grid};

#[wasm_bindgen]
#[derive(Debug)]
pub struct Universe {
    grid: Grid,
    rng: SmallRng,
    gesture: Gesture,
    config: SimConfig,
    pixels: Vec<u8>,
}

impl Universe {
    /// Build from a validated config.
    ///
    /// # Errors
    ///
    /// Whatever [`SimConfig::validate`] rejects.
    pub fn from_config(config: SimConfig) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            log::warn!("rejected config: {err}");
            return Err(err);
        }
        Ok(Self::build(config))
    }

    /// Default settings with the given grid size.
    ///
    /// # Errors
    ///
    /// Sizes [`SimConfig::validate`] rejects.
    pub fn with_size(rows: u32, cols: u32) -> Result<Self, ConfigError> {
        let (rows, cols) = (rows as usize, cols as usize);
        let defaults = SimConfig::default();
        // Tiny grids get a brush no wider than themselves.
        let fit = i32::try_from(rows.max(cols)).unwrap_or(i32::MAX);
        Self::from_config(SimConfig {
            rows,
            cols,
            brush_radius: defaults.brush_radius.min(fit),
            ..defaults
        })
    }

    fn build(config: SimConfig) -> Self {
        log::info!(
            "universe {}x{} (cell {}px, brush {}, seed {:#x})",
            config.rows,
            config.cols,
            config.cell_size,
            config.brush_radius,
            config.seed
        );
        Self {
            grid: Grid::new(config.rows, config.cols),
            rng: SmallRng::seed_from_u64(config.seed),
            gesture: Gesture::new(config.brush_radius),
            pixels: vec![0; config.rows * config.cols * 4],
            config,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn cell_at(&self, px: i32, py: i32) -> (i32, i32) {
        pixel_to_cell(px, py, self.config.cell_size)
    }
}

#[wasm_bindgen]
impl Universe {
    /// # Errors
    ///
    /// An empty or oversized grid.
    #[wasm_bindgen(constructor)]
    pub fn new(rows: u32, cols: u32) -> Result<Universe, JsError> {
        Ok(Self::with_size(rows, cols)?)
    }

    /// # Errors
    ///
    /// Malformed or invalid config JSON.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<Universe, JsError> {
        Ok(Self::from_config(SimConfig::from_json(json)?)?)
    }

    /// Advance one tick. Returns how many grains moved.
    pub fn tick(&mut self) -> u32 {
        let moved = self.grid.update(&mut self.rng);
        log::trace!("tick {}: {moved} moved", self.grid.generation);
        moved as u32
    }

    pub fn reset(&mut self) {
        self.grid.initialize();
        self.gesture.end_stroke();
    }

    pub fn reseed(&mut self, seed: u64) {
        log::debug!("reseeded with {seed:#x}");
        self.rng = SmallRng::seed_from_u64(seed);
    }

    /// Place a raw material id into an empty cell.
    pub fn set_cell(&mut self, row: i32, col: i32, material: u16) -> bool {
        self.grid.place(row, col, Material(material))
    }

    #[must_use]
    pub fn get_cell(&self, row: i32, col: i32) -> u16 {
        self.grid.get(row, col).0
    }

    /// Stamp the sand brush at a pixel position.
    pub fn pour_sand(&mut self, px: i32, py: i32) -> u32 {
        let (row, col) = self.cell_at(px, py);
        self.gesture.stamp_sand(&mut self.grid, row, col) as u32
    }

    pub fn barrier_start(&mut self, px: i32, py: i32) -> u32 {
        let (row, col) = self.cell_at(px, py);
        self.gesture.begin_stroke(&mut self.grid, row, col) as u32
    }

    pub fn barrier_drag(&mut self, px: i32, py: i32) -> u32 {
        let (row, col) = self.cell_at(px, py);
        self.gesture.extend_stroke(&mut self.grid, row, col) as u32
    }

    pub fn barrier_end(&mut self) {
        self.gesture.end_stroke();
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.grid.rows as u32
    }

    #[must_use]
    pub fn cols(&self) -> u32 {
        self.grid.cols as u32
    }

    #[must_use]
    pub fn cell_size(&self) -> u32 {
        self.config.cell_size
    }

    #[must_use]
    pub fn generation(&self) -> u32 {
        self.grid.generation
    }

    #[must_use]
    pub fn particle_count(&self) -> u32 {
        self.grid.particle_count() as u32
    }

    /// Row-major `u16` material ids, `rows * cols` long.
    #[must_use]
    pub fn materials_ptr(&self) -> *const u16 {
        self.grid.materials().as_ptr().cast::<u16>()
    }

    /// Refresh the RGBA frame buffer from the current grid.
    pub fn render(&mut self) {
        color::fill_rgba(self.grid.materials(), &mut self.pixels);
    }

    #[must_use]
    pub fn pixels_ptr(&self) -> *const u8 {
        self.pixels.as_ptr()
    }

    #[must_use]
    pub fn pixels_len(&self) -> u32 {
        self.pixels.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Universe {
        Universe::from_config(SimConfig {
            rows: 20,
            cols: 30,
            ..SimConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn with_size_uses_requested_size() {
        let universe = Universe::with_size(200, 320).unwrap();
        assert_eq!((universe.rows(), universe.cols()), (200, 320));
        assert_eq!(universe.pixels_len(), 200 * 320 * 4);
        assert_eq!(universe.cell_size(), 4);
    }

    #[test]
    fn oversized_grid_is_rejected_before_allocating() {
        assert!(matches!(
            Universe::with_size(70_000, 70_000),
            Err(ConfigError::TooTall { .. })
        ));
        assert!(matches!(
            Universe::with_size(60_000, 60_000),
            Err(ConfigError::TooLarge { .. })
        ));
        assert!(matches!(
            Universe::with_size(0, 10),
            Err(ConfigError::EmptyGrid { .. })
        ));
        assert!(Universe::with_size(200, 320).is_ok());
    }

    #[test]
    fn tiny_grid_gets_a_fitting_brush() {
        let universe = Universe::with_size(2, 1).unwrap();
        assert_eq!(universe.config().brush_radius, 2);
        assert_eq!(Universe::with_size(1, 1).unwrap().config().brush_radius, 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SimConfig {
            rows: 0,
            ..SimConfig::default()
        };
        assert!(Universe::from_config(config).is_err());
    }

    #[test]
    fn pour_sand_maps_pixels_to_cells() {
        let mut universe = small();
        // Pixel (40, 40) with 4px cells is cell (10, 10).
        assert_eq!(universe.pour_sand(40, 40), 29);
        assert!(Material(universe.get_cell(10, 10)).is_sand());
        assert_eq!(universe.particle_count(), 29);
    }

    #[test]
    fn barrier_drag_draws_line() {
        let mut universe = small();
        universe.barrier_start(0, 40);
        universe.barrier_drag(36, 40);
        universe.barrier_end();
        for col in 0..=9 {
            assert_eq!(universe.get_cell(10, col), Material::BARRIER.0);
        }
    }

    #[test]
    fn same_seed_same_history() {
        let run = || {
            let mut universe = small();
            universe.pour_sand(60, 8);
            universe.pour_sand(64, 20);
            for _ in 0..40 {
                universe.tick();
            }
            universe.grid().materials().to_vec()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn tick_settles_and_reset_clears() {
        let mut universe = small();
        universe.pour_sand(60, 20);
        let grains = universe.particle_count();
        let mut last = u32::MAX;
        for _ in 0..500 {
            last = universe.tick();
            if last == 0 {
                break;
            }
        }
        assert_eq!(last, 0);
        assert_eq!(universe.particle_count(), grains);
        assert_eq!(universe.generation(), universe.grid().generation);

        universe.reset();
        assert_eq!(universe.particle_count(), 0);
        assert!(universe.grid().velocities().iter().all(|&v| v == 1));
    }

    #[test]
    fn render_colours_every_cell() {
        let mut universe = small();
        universe.set_cell(0, 0, 1);
        universe.set_cell(0, 1, 241);
        universe.render();
        let px = universe.pixels();
        assert_eq!(&px[0..4], &[255, 255, 255, 255]);
        assert_eq!(&px[4..8], &[0, 255, 0, 175]);
        assert_eq!(&px[8..12], &[0, 0, 0, 255]);
    }

    #[test]
    fn materials_ptr_points_at_grid() {
        let mut universe = small();
        universe.set_cell(0, 2, 99);
        let ptr = universe.materials_ptr();
        // SAFETY: the grid holds rows * cols materials and outlives `ptr`.
        let raw = unsafe { std::slice::from_raw_parts(ptr, 20 * 30) };
        assert_eq!(raw[2], 99);
    }
}
