//! Lily Hop - a three-lane lily pad hopper
//!
//! Core modules:
//! - `sim`: Deterministic simulation (row generation, jumps, landings, game state)
//! - `renderer`: Renderer-facing snapshots of the simulation (instances, camera)
//! - `settings`: Data-driven tuning

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fully populated rows at the start of a run
    pub const SAFE_START_ROWS: u32 = 3;
    /// Rows generated by a fresh world (rows 0..INITIAL_ROWS)
    pub const INITIAL_ROWS: u32 = 20;

    /// Rows generated per extension
    pub const EXTEND_COUNT: u32 = 5;
    /// Extension fires whenever the score is a positive multiple of this
    pub const EXTEND_EVERY: u32 = 5;
    /// Rows kept behind the actor before culling
    pub const CULL_MARGIN: u32 = 5;

    /// Spacing between lanes and between rows (world units)
    pub const LANE_WIDTH: f32 = 1.5;
    /// Jump duration in seconds (landing instant)
    pub const JUMP_DURATION: f64 = 0.3;
    /// Peak jump height (world units)
    pub const JUMP_HEIGHT: f32 = 1.5;
    /// Lily pad edge length
    pub const PLATFORM_SIZE: f32 = 1.2;

    /// Lowest point of the sinking animation after death
    pub const SINK_FLOOR: f32 = -2.0;
    /// Sinking speed (world units per second)
    pub const SINK_SPEED: f32 = 3.0;
}

/// X coordinate of a lane index (center lane sits on x = 0)
#[inline]
pub fn lane_to_x(lane: usize, lane_width: f32) -> f32 {
    (lane as f32 - 1.0) * lane_width
}

/// Z coordinate of a row (rows advance toward -Z)
#[inline]
pub fn row_to_z(row: u32, lane_width: f32) -> f32 {
    -(row as f32) * lane_width
}

/// Ground-level world position of a (lane, row) cell
#[inline]
pub fn grid_to_world(lane: usize, row: u32, lane_width: f32) -> Vec3 {
    Vec3::new(lane_to_x(lane, lane_width), 0.0, row_to_z(row, lane_width))
}
