//! Sand: falls with a growing reach, then slumps diagonally.

use crate::api::CellApi;
use crate::rng::TickRng;

/// Apply the transition rule to the sand cell under `api`.
/// Returns whether the particle moved.
pub fn update_sand<R: TickRng + ?Sized>(api: &mut CellApi, rng: &mut R) -> bool {
    // Straight fall, accelerating while unobstructed.
    if api.get(0, 1).is_empty() {
        let velocity = api.velocity();
        let reach = api.open_below(velocity);
        let fall = reach.saturating_sub(rng.jitter()).max(1);
        api.relocate(0, i32::from(fall), Some(velocity.saturating_add(1)));
        return true;
    }

    // Off-grid neighbours read as Barrier, which covers the edge columns.
    let down_left = api.get(-1, 1).is_empty();
    let down_right = api.get(1, 1).is_empty();
    let left_open = !api.get(-1, 0).is_barrier();
    let right_open = !api.get(1, 0).is_barrier();

    if down_left && down_right && left_open && right_open {
        let dx = if rng.pick_left() { -1 } else { 1 };
        api.relocate(dx, 1, None);
        return true;
    }
    if down_right && right_open {
        api.relocate(1, 1, None);
        return true;
    }
    if down_left && left_open {
        api.relocate(-1, 1, None);
        return true;
    }

    // Supported: come to rest.
    api.set_velocity(1);
    false
}
