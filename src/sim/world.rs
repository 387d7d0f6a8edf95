//! The sliding strip of generated rows
//!
//! Owns every live lily pad. Rows are generated ahead of the actor in
//! batches and culled once they fall far enough behind. Changes are queued
//! so the renderer can create and release pad visuals.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::lane::Lane;
use super::row_gen::{GeneratedRow, full_row, generate_row};
use crate::settings::Tuning;

/// A lily pad: a safe landing spot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub lane: Lane,
    pub row: u32,
    /// False once the pad has been culled
    pub active: bool,
    /// Lightness offset applied to the pad color (cosmetic)
    pub tint: f32,
    /// Carries a flower ornament (cosmetic)
    pub flower: bool,
}

impl Platform {
    pub fn new(lane: Lane, row: u32) -> Self {
        Self {
            lane,
            row,
            active: true,
            tint: 0.0,
            flower: false,
        }
    }

    /// A pad with randomized decoration
    pub fn decorated<R: Rng + ?Sized>(lane: Lane, row: u32, tuning: &Tuning, rng: &mut R) -> Self {
        let tint = (rng.random::<f32>() - 0.5) * tuning.tint_jitter;
        let flower = rng.random_bool(tuning.flower_chance);
        Self {
            tint,
            flower,
            ..Self::new(lane, row)
        }
    }
}

/// Pad lifecycle notifications for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldChange {
    Added(Platform),
    Removed(Platform),
    /// Everything previously added is gone
    Cleared,
}

/// Sliding window of generated rows
#[derive(Debug, Clone)]
pub struct WorldStrip {
    /// Live pads keyed by (row, lane); the key enforces one pad per cell
    platforms: BTreeMap<(u32, Lane), Platform>,
    /// Guaranteed lane of every live row
    path: BTreeMap<u32, Lane>,
    /// Guaranteed lane of the last generated row
    cursor: Lane,
    furthest_row: Option<u32>,
    changes: Vec<WorldChange>,
}

impl Default for WorldStrip {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldStrip {
    /// Create an empty strip
    pub fn new() -> Self {
        Self {
            platforms: BTreeMap::new(),
            path: BTreeMap::new(),
            cursor: Lane::Center,
            furthest_row: None,
            changes: Vec::new(),
        }
    }

    /// Discard everything and build the starting window
    pub fn initialize<R: Rng + ?Sized>(&mut self, tuning: &Tuning, rng: &mut R) {
        if !self.platforms.is_empty() {
            self.platforms.clear();
            self.changes.push(WorldChange::Cleared);
        }
        self.path.clear();
        self.cursor = Lane::Center;
        self.furthest_row = None;

        for row in 0..tuning.safe_rows {
            let generated = full_row(row, self.cursor, tuning, rng);
            self.insert_row(generated);
        }
        for row in tuning.safe_rows..tuning.initial_rows {
            let generated = generate_row(row, self.cursor, tuning, rng);
            self.insert_row(generated);
        }

        log::info!(
            "World initialized: {} pads over {} rows",
            self.platforms.len(),
            tuning.initial_rows
        );
    }

    /// Generate rows `from_row + 1 ..= from_row + count`, continuing the path
    pub fn extend<R: Rng + ?Sized>(
        &mut self,
        from_row: u32,
        count: u32,
        tuning: &Tuning,
        rng: &mut R,
    ) -> RangeInclusive<u32> {
        let rows = from_row + 1..=from_row + count;
        for row in rows.clone() {
            let generated = generate_row(row, self.cursor, tuning, rng);
            self.insert_row(generated);
        }
        log::debug!("World extended: rows {}..={}", rows.start(), rows.end());
        rows
    }

    /// Drop every pad with `row < actor_row - margin`; returns how many went
    pub fn cull(&mut self, actor_row: u32, margin: u32) -> usize {
        let threshold = actor_row.saturating_sub(margin);

        let kept = self.platforms.split_off(&(threshold, Lane::Left));
        let culled = std::mem::replace(&mut self.platforms, kept);
        let kept_path = self.path.split_off(&threshold);
        self.path = kept_path;

        let count = culled.len();
        for (_, mut platform) in culled {
            platform.active = false;
            self.changes.push(WorldChange::Removed(platform));
        }
        if count > 0 {
            log::debug!("Culled {} pads behind row {}", count, threshold);
        }
        count
    }

    /// Is there a live pad at (lane, row)?
    #[inline]
    pub fn has_platform_at(&self, lane: Lane, row: u32) -> bool {
        self.platforms.contains_key(&(row, lane))
    }

    /// Live pads ordered by row, then lane
    pub fn platforms(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.values()
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Furthest generated row (tracked incrementally)
    pub fn furthest_row(&self) -> Option<u32> {
        self.furthest_row
    }

    /// Guaranteed lane of the last generated row
    #[cfg(test)]
    pub fn cursor(&self) -> Lane {
        self.cursor
    }

    /// Guaranteed lane of a live row
    pub fn guaranteed_lane(&self, row: u32) -> Option<Lane> {
        self.path.get(&row).copied()
    }

    /// Place a pad directly (used to build fixed layouts)
    pub fn insert_platform(&mut self, platform: Platform) {
        self.furthest_row = Some(self.furthest_row.map_or(platform.row, |f| f.max(platform.row)));
        if let Some(old) = self.platforms.insert((platform.row, platform.lane), platform.clone()) {
            self.changes.push(WorldChange::Removed(Platform {
                active: false,
                ..old
            }));
        }
        self.changes.push(WorldChange::Added(platform));
    }

    /// Take queued pad notifications
    pub fn drain_changes(&mut self) -> Vec<WorldChange> {
        std::mem::take(&mut self.changes)
    }

    fn insert_row(&mut self, generated: GeneratedRow) {
        debug_assert!(
            generated.guaranteed.distance(self.cursor) <= 1,
            "guaranteed path broken at row {}",
            generated.row
        );
        self.cursor = generated.guaranteed;
        self.path.insert(generated.row, generated.guaranteed);
        for platform in generated.platforms {
            self.insert_platform(platform);
        }
        // A row without pads still counts as generated
        self.furthest_row = Some(self.furthest_row.map_or(generated.row, |f| f.max(generated.row)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn world(seed: u64) -> (WorldStrip, Pcg32, Tuning) {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut world = WorldStrip::new();
        world.initialize(&tuning, &mut rng);
        (world, rng, tuning)
    }

    fn rows_present(world: &WorldStrip) -> Vec<u32> {
        let mut rows: Vec<u32> = world.platforms().map(|p| p.row).collect();
        rows.dedup();
        rows
    }

    #[test]
    fn test_initialize_safe_zone() {
        let (world, _, _) = world(42);
        for row in 0..3 {
            for lane in Lane::ALL {
                assert!(world.has_platform_at(lane, row), "missing {:?} at row {}", lane, row);
            }
        }
        assert_eq!(rows_present(&world), (0..20).collect::<Vec<_>>());
        assert_eq!(world.furthest_row(), Some(19));
    }

    #[test]
    fn test_initialize_path_is_reachable() {
        let (world, _, _) = world(9);
        let mut prev = Lane::Center;
        for row in 0..20 {
            let lane = world.guaranteed_lane(row).unwrap();
            assert!(lane.distance(prev) <= 1);
            assert!(world.has_platform_at(lane, row));
            prev = lane;
        }
        assert_eq!(world.cursor(), prev);
    }

    #[test]
    fn test_reinitialize_clears() {
        let (mut world, mut rng, tuning) = world(1);
        world.extend(19, 5, &tuning, &mut rng);
        world.drain_changes();

        world.initialize(&tuning, &mut rng);
        let changes = world.drain_changes();
        assert_eq!(changes.first(), Some(&WorldChange::Cleared));
        assert_eq!(world.furthest_row(), Some(19));
        assert!(world.platforms().all(|p| p.row < 20));
    }

    #[test]
    fn test_extend_adds_rows_beyond_furthest() {
        let (mut world, mut rng, tuning) = world(5);
        let furthest = world.furthest_row().unwrap();
        let rows = world.extend(furthest, 5, &tuning, &mut rng);
        assert_eq!(rows, 20..=24);
        assert_eq!(world.furthest_row(), Some(24));
        assert_eq!(rows_present(&world), (0..25).collect::<Vec<_>>());
        // Path continues across the batch boundary
        assert!(world.guaranteed_lane(20).unwrap().distance(world.guaranteed_lane(19).unwrap()) <= 1);
    }

    #[test]
    fn test_cull_threshold() {
        let (mut world, _, _) = world(77);
        let before: Vec<Platform> = world.platforms().filter(|p| p.row >= 5).cloned().collect();
        world.drain_changes();

        let removed = world.cull(10, 5);
        assert!(removed > 0);
        assert!(world.platforms().all(|p| p.row >= 5));
        for p in &before {
            assert!(world.has_platform_at(p.lane, p.row));
        }
        assert_eq!(world.guaranteed_lane(4), None);
        assert!(world.guaranteed_lane(5).is_some());

        let changes = world.drain_changes();
        assert_eq!(changes.len(), removed);
        assert!(changes.iter().all(|c| matches!(c, WorldChange::Removed(p) if !p.active && p.row < 5)));
    }

    #[test]
    fn test_cull_near_start_is_noop() {
        let (mut world, _, _) = world(2);
        let count = world.len();
        assert_eq!(world.cull(3, 5), 0);
        assert_eq!(world.len(), count);
    }

    #[test]
    fn test_insert_platform_replaces_cell() {
        let mut world = WorldStrip::new();
        world.insert_platform(Platform::new(Lane::Left, 4));
        world.insert_platform(Platform::new(Lane::Left, 4));
        assert_eq!(world.len(), 1);
        assert_eq!(world.furthest_row(), Some(4));
        let changes = world.drain_changes();
        assert_eq!(changes.len(), 3);
        assert!(matches!(changes[1], WorldChange::Removed(_)));
    }

    proptest! {
        #[test]
        fn cull_keeps_everything_at_or_ahead(seed in any::<u64>(), actor_row in 0u32..40, margin in 0u32..10) {
            let (mut world, mut rng, tuning) = world(seed);
            world.extend(19, 20, &tuning, &mut rng);
            let threshold = actor_row.saturating_sub(margin);
            let expected: Vec<Platform> = world.platforms().filter(|p| p.row >= threshold).cloned().collect();

            world.cull(actor_row, margin);

            let remaining: Vec<Platform> = world.platforms().cloned().collect();
            prop_assert_eq!(remaining, expected);
        }

        #[test]
        fn generated_rows_are_populated(seed in any::<u64>()) {
            let (world, _, _) = world(seed);
            for row in 3..20 {
                prop_assert!(Lane::ALL.iter().any(|&lane| world.has_platform_at(lane, row)));
            }
        }
    }
}
