//! Material id to RGBA colour.

use crate::cell::{Kind, Material};

/// Width of one colour-wheel sector in hue units.
const SECTOR: f32 = 120.0;

/// Sand is drawn slightly translucent.
const SAND_ALPHA: u8 = 175;

/// Empty is opaque black, Barrier opaque white, sand walks the colour wheel
/// in six sectors of `SECTOR` hues each.
#[must_use]
pub fn material_rgba(material: Material) -> [u8; 4] {
    match material.kind() {
        Kind::Empty => [0, 0, 0, 255],
        Kind::Barrier => [255, 255, 255, 255],
        Kind::Sand => {
            let h = f32::from(material.0 - 1) / SECTOR;
            let sector = h as u32;
            let fract = h - sector as f32;
            let (r, g, b) = match sector {
                0 => (1.0, fract, 0.0),
                1 => (1.0 - fract, 1.0, 0.0),
                2 => (0.0, 1.0, fract),
                3 => (0.0, 1.0 - fract, 1.0),
                4 => (fract, 0.0, 1.0),
                5 => (1.0, 0.0, 1.0 - fract),
                _ => (0.0, 0.0, 0.0),
            };
            [channel(r), channel(g), channel(b), SAND_ALPHA]
        }
    }
}

fn channel(x: f32) -> u8 {
    (x * 255.0) as u8
}

/// Write the colour of every material into `out`, four bytes per cell.
/// Stops at whichever slice runs out first.
pub fn fill_rgba(materials: &[Material], out: &mut [u8]) {
    for (m, px) in materials.iter().zip(out.chunks_exact_mut(4)) {
        px.copy_from_slice(&material_rgba(*m));
    }
}
