//! Per-instance records for the pad and hopper meshes
//!
//! Laid out as plain `f32` runs so a page renderer can upload them straight
//! into an instanced buffer.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::settings::Tuning;
use crate::sim::{Actor, Platform};
use crate::{lane_to_x, row_to_z};

/// One lily pad
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct PadInstance {
    /// Center of the pad's top face
    pub position: [f32; 3],
    /// Edge length
    pub size: f32,
    pub color: [f32; 4],
    /// 1.0 when the pad carries a flower
    pub flower: f32,
    pub _padding: [f32; 3],
}

impl PadInstance {
    /// Floats per instance
    pub const FLOATS: usize = std::mem::size_of::<PadInstance>() / std::mem::size_of::<f32>();

    pub fn from_platform(platform: &Platform, tuning: &Tuning) -> Self {
        Self {
            position: [
                lane_to_x(platform.lane.index(), tuning.lane_width),
                0.0,
                row_to_z(platform.row, tuning.lane_width),
            ],
            size: tuning.platform_size,
            color: lighten(colors::PAD, platform.tint),
            flower: if platform.flower { 1.0 } else { 0.0 },
            _padding: [0.0; 3],
        }
    }
}

/// The hopper
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct ActorInstance {
    pub position: [f32; 3],
    /// Forward flip around X (radians)
    pub rotation_x: f32,
    pub color: [f32; 4],
}

impl From<&Actor> for ActorInstance {
    fn from(actor: &Actor) -> Self {
        Self {
            position: actor.position.to_array(),
            rotation_x: actor.rotation_x,
            color: colors::FROG,
        }
    }
}

/// Shift lightness by `amount`, keeping alpha
fn lighten(color: [f32; 4], amount: f32) -> [f32; 4] {
    [
        (color[0] + amount).clamp(0.0, 1.0),
        (color[1] + amount).clamp(0.0, 1.0),
        (color[2] + amount).clamp(0.0, 1.0),
        color[3],
    ]
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.53, 0.81, 0.92, 1.0];
    pub const WATER: [f32; 4] = [0.31, 0.76, 0.97, 1.0];
    pub const PAD: [f32; 4] = [0.4, 0.73, 0.42, 1.0];
    pub const FLOWER: [f32; 4] = [1.0, 0.75, 0.8, 1.0];
    pub const FROG: [f32; 4] = [0.3, 0.69, 0.31, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Lane;

    #[test]
    fn test_pad_instance_layout() {
        assert_eq!(PadInstance::FLOATS, 12);
        let tuning = Tuning::default();
        let mut platform = Platform::new(Lane::Left, 2);
        platform.flower = true;
        platform.tint = 0.05;

        let pad = PadInstance::from_platform(&platform, &tuning);
        assert_eq!(pad.position, [-1.5, 0.0, -3.0]);
        assert_eq!(pad.flower, 1.0);
        assert!((pad.color[0] - 0.45).abs() < 1e-6);

        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&pad));
        assert_eq!(floats.len(), PadInstance::FLOATS);
        assert_eq!(floats[..3], [-1.5, 0.0, -3.0]);
    }

    #[test]
    fn test_lighten_clamps() {
        assert_eq!(lighten([0.98, 0.5, 0.0, 0.7], 0.05)[0], 1.0);
        assert_eq!(lighten([0.98, 0.5, 0.0, 0.7], -0.05)[2], 0.0);
        assert_eq!(lighten([0.98, 0.5, 0.0, 0.7], 0.05)[3], 0.7);
    }
}
