//! Procedural row generation
//!
//! Every row carries one guaranteed pad whose lane is at most one lateral
//! step from the previous row's guaranteed lane, so the river is always
//! solvable. The other lanes get optional decoy pads.

use rand::Rng;

use super::lane::Lane;
use super::world::Platform;
use crate::settings::Tuning;

/// Output of a single row generation
#[derive(Debug, Clone)]
pub struct GeneratedRow {
    pub row: u32,
    /// Lane of the pad that continues the guaranteed path (the next cursor)
    pub guaranteed: Lane,
    /// Pads placed in this row, left to right
    pub platforms: Vec<Platform>,
}

/// Generate one row from the running guaranteed-lane cursor
pub fn generate_row<R: Rng + ?Sized>(
    row: u32,
    cursor: Lane,
    tuning: &Tuning,
    rng: &mut R,
) -> GeneratedRow {
    // Legal cursor moves in -1, 0, +1 order; staying put is always legal
    let moves: Vec<Lane> = [cursor.offset(-1), Some(cursor), cursor.offset(1)]
        .into_iter()
        .flatten()
        .collect();
    let guaranteed = moves[rng.random_range(0..moves.len())];

    let mut platforms = Vec::with_capacity(Lane::ALL.len());
    for lane in Lane::ALL {
        let has_pad = lane == guaranteed || rng.random_bool(tuning.extra_pad_chance);
        if has_pad {
            platforms.push(Platform::decorated(lane, row, tuning, rng));
        }
    }

    GeneratedRow {
        row,
        guaranteed,
        platforms,
    }
}

/// A fully populated row (start zone); the cursor passes through unchanged
pub fn full_row<R: Rng + ?Sized>(
    row: u32,
    cursor: Lane,
    tuning: &Tuning,
    rng: &mut R,
) -> GeneratedRow {
    let platforms = Lane::ALL
        .into_iter()
        .map(|lane| Platform::decorated(lane, row, tuning, rng))
        .collect();

    GeneratedRow {
        row,
        guaranteed: cursor,
        platforms,
    }
}
