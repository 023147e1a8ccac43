//! Obstacle generator - randomized gap placement
//!
//! The upper barrier height is drawn uniformly from the integer steps in
//! `[min_edge_margin, play_area_height - gap_height - min_edge_margin]`; the
//! lower barrier takes the remainder so `top + gap + bottom == height`.

use crate::rng::RandomSource;
use crate::world::Obstacle;

/// Build a fresh obstacle at `spawn_x`.
///
/// Callers must have validated `gap_height + 2 * min_edge_margin <= play_area_height`;
/// if they have not, the top barrier collapses to `min_edge_margin`. Placement
/// is uniform only while the span fits in `u32`, which `GameConfig::validate`
/// guarantees through `MAX_PLAY_AREA_HEIGHT`.
pub fn generate<R: RandomSource + ?Sized>(
    play_area_height: f64,
    gap_height: f64,
    min_edge_margin: f64,
    spawn_x: f64,
    rng: &mut R,
) -> Obstacle {
    let span = (play_area_height - gap_height - 2.0 * min_edge_margin).max(0.0);
    let steps = (span.floor() as u32).saturating_add(1);
    let top_height = min_edge_margin + rng.next_range(steps) as f64;
    let bottom_height = play_area_height - top_height - gap_height;

    Obstacle {
        x: spawn_x,
        top_height,
        bottom_height,
        passed: false,
    }
}
