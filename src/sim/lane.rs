//! Lanes and directional intents
//!
//! The river is three lanes wide. Lane edges are walls: a lateral step past
//! them is refused rather than fatal.

use serde::{Deserialize, Serialize};

/// One of the three parallel lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Lane {
    Left,
    Center,
    Right,
}

impl Lane {
    /// All lanes, left to right
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];

    /// Lane index in {0, 1, 2}
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Lane::Left => 0,
            Lane::Center => 1,
            Lane::Right => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Lane reached by a lateral offset, or `None` if it would cross a wall
    pub fn offset(self, offset: i8) -> Option<Self> {
        let target = self.index() as i64 + offset as i64;
        if target < 0 {
            return None;
        }
        Self::from_index(target as usize)
    }

    /// Lateral distance between two lanes
    #[inline]
    pub fn distance(self, other: Lane) -> usize {
        self.index().abs_diff(other.index())
    }
}

/// A normalized directional intent from any input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Left,
    Right,
    Forward,
}

impl Intent {
    /// Lateral offset applied by the jump (every jump also advances one row)
    pub fn lane_offset(self) -> i8 {
        match self {
            Intent::Left => -1,
            Intent::Right => 1,
            Intent::Forward => 0,
        }
    }

    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Intent::Left),
            "ArrowRight" => Some(Intent::Right),
            "ArrowUp" => Some(Intent::Forward),
            _ => None,
        }
    }

    /// Map a tap/click x position: left third, right third, or the middle
    pub fn from_tap(x: f32, width: f32) -> Self {
        if x < width * 0.33 {
            Intent::Left
        } else if x > width * 0.66 {
            Intent::Right
        } else {
            Intent::Forward
        }
    }
}
