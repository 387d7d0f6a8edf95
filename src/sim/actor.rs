//! The hopping actor and its jump state machine
//!
//! Gameplay only cares about (lane, row) and the landing instant. The
//! interpolated position, arc height and flip are cosmetic and never feed
//! back into landing detection.

use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::lane::Lane;
use crate::grid_to_world;

/// Jump state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum JumpState {
    /// Standing on a pad (or about to sink)
    Idle,
    /// In the air between two cells
    Jumping {
        /// Clock time (seconds) at takeoff
        start_time: f64,
        /// Rendered position at takeoff
        start_pos: Vec3,
        /// Ground position of the destination cell
        target_pos: Vec3,
    },
}

/// A jump that just reached its landing instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landing {
    pub lane: Lane,
    pub row: u32,
}

/// The player-controlled hopper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub lane: Lane,
    pub row: u32,
    pub jump: JumpState,
    /// Rendered position
    pub position: Vec3,
    /// Rendered forward flip (radians around X)
    pub rotation_x: f32,
}

impl Actor {
    /// Actor standing on the center lane of row 0
    pub fn new(lane_width: f32) -> Self {
        let lane = Lane::Center;
        Self {
            lane,
            row: 0,
            jump: JumpState::Idle,
            position: grid_to_world(lane.index(), 0, lane_width),
            rotation_x: 0.0,
        }
    }

    #[inline]
    pub fn is_jumping(&self) -> bool {
        matches!(self.jump, JumpState::Jumping { .. })
    }

    /// Ground position of the current cell
    pub fn cell_position(&self, lane_width: f32) -> Vec3 {
        grid_to_world(self.lane.index(), self.row, lane_width)
    }

    /// Start a jump one row forward with a lateral offset.
    ///
    /// Returns false (and changes nothing) while airborne, when the offset
    /// is more than one lane, or when it would cross a lane wall.
    pub fn begin_jump(&mut self, lateral_offset: i8, now: f64, lane_width: f32) -> bool {
        if self.is_jumping() || !(-1..=1).contains(&lateral_offset) {
            return false;
        }
        let Some(lane) = self.lane.offset(lateral_offset) else {
            return false;
        };

        self.lane = lane;
        self.row += 1;
        self.jump = JumpState::Jumping {
            start_time: now,
            start_pos: self.position,
            target_pos: self.cell_position(lane_width),
        };
        true
    }

    /// Fraction of the current jump completed, if airborne
    pub fn progress(&self, now: f64, jump_duration: f64) -> Option<f32> {
        match self.jump {
            JumpState::Jumping { start_time, .. } => {
                Some(((now - start_time) / jump_duration).clamp(0.0, 1.0) as f32)
            }
            JumpState::Idle => None,
        }
    }

    /// Update the rendered transform for this frame
    pub fn animate(&mut self, now: f64, jump_duration: f64, jump_height: f32) {
        match self.jump {
            JumpState::Jumping {
                start_pos,
                target_pos,
                ..
            } => {
                let progress = self.progress(now, jump_duration).unwrap_or(1.0);
                let mut pos = start_pos.lerp(target_pos, progress);
                // Parabola: zero at both ends, peak jump_height at the midpoint
                pos.y = 4.0 * jump_height * progress * (1.0 - progress);
                self.position = pos;
                self.rotation_x = -progress * PI;
            }
            JumpState::Idle => {
                self.position.y = 0.0;
                self.rotation_x = 0.0;
            }
        }
    }

    /// Detect the landing instant.
    ///
    /// The jump flag is cleared before anything else, so a given jump
    /// reports its landing exactly once no matter how frames are spaced.
    pub fn poll_landing(&mut self, now: f64, jump_duration: f64) -> Option<Landing> {
        let JumpState::Jumping {
            start_time,
            target_pos,
            ..
        } = self.jump
        else {
            return None;
        };
        if now - start_time < jump_duration {
            return None;
        }

        self.jump = JumpState::Idle;
        self.position = target_pos;
        self.rotation_x = 0.0;
        Some(Landing {
            lane: self.lane,
            row: self.row,
        })
    }

    /// Sink toward `floor` at `speed` units per second
    pub fn sink(&mut self, dt: f32, speed: f32, floor: f32) {
        if self.position.y > floor {
            self.position.y = (self.position.y - speed * dt).max(floor);
        }
    }
}
