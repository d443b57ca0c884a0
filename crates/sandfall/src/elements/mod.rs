//! Per-material update functions dispatched from the tick loop.

mod sand;

use crate::api::CellApi;
use crate::cell::Kind;
use crate::rng::TickRng;

/// Dispatch to the update function for `kind`. Returns whether the cell moved.
///
/// Barrier and Empty are no-ops and should be skipped before calling this.
pub fn update_cell<R: TickRng + ?Sized>(kind: Kind, api: &mut CellApi, rng: &mut R) -> bool {
    match kind {
        Kind::Sand => sand::update_sand(api, rng),
        Kind::Empty | Kind::Barrier => false,
    }
}
