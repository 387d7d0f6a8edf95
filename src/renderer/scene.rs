//! Frame snapshots for the page renderer
//!
//! The renderer owns meshes, materials and lights; it only needs the
//! transforms below plus the pad add/remove events to stay in sync.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::instance::{ActorInstance, PadInstance, colors};
use crate::settings::Tuning;
use crate::sim::{CameraRig, GamePhase, GameState};

/// Near/far planes of the orthographic camera
const NEAR: f32 = 1.0;
const FAR: f32 = 1000.0;

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub actor: ActorInstance,
    /// Column-major view-projection matrix
    pub view_proj: [f32; 16],
    pub background: [f32; 4],
    pub water: [f32; 4],
    pub flower: [f32; 4],
    /// Live pads, handed over separately as a float buffer
    #[serde(skip)]
    pub pads: Vec<PadInstance>,
}

impl SceneSnapshot {
    /// Capture the current state for a viewport of the given aspect ratio
    pub fn capture(state: &GameState, aspect: f32) -> Self {
        let pads = state
            .world
            .platforms()
            .map(|p| PadInstance::from_platform(p, &state.tuning))
            .collect();

        Self {
            phase: state.phase,
            score: state.score,
            actor: ActorInstance::from(&state.actor),
            view_proj: view_projection(&state.camera, &state.tuning, aspect).to_cols_array(),
            background: colors::SKY,
            water: colors::WATER,
            flower: colors::FLOWER,
            pads,
        }
    }

    /// Pad instances as a flat float run
    pub fn pad_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.pads)
    }
}

/// Isometric view: fixed viewing direction, position trailing the actor
pub fn view_matrix(camera: &CameraRig, tuning: &Tuning) -> Mat4 {
    let eye = camera.position;
    let target = eye - Vec3::from_array(tuning.camera_offset);
    Mat4::look_at_rh(eye, target, Vec3::Y)
}

/// Orthographic projection sized by the view's half height
pub fn projection_matrix(tuning: &Tuning, aspect: f32) -> Mat4 {
    let d = tuning.camera_half_height;
    let aspect = if aspect > 0.0 { aspect } else { 1.0 };
    Mat4::orthographic_rh(-d * aspect, d * aspect, -d, d, NEAR, FAR)
}

pub fn view_projection(camera: &CameraRig, tuning: &Tuning, aspect: f32) -> Mat4 {
    projection_matrix(tuning, aspect) * view_matrix(camera, tuning)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_matches_world() {
        let state = GameState::new(12345);
        let snapshot = SceneSnapshot::capture(&state, 16.0 / 9.0);
        assert_eq!(snapshot.pads.len(), state.world.len());
        assert_eq!(snapshot.pad_floats().len(), state.world.len() * PadInstance::FLOATS);
        assert_eq!(snapshot.phase, GamePhase::NotStarted);
        assert_eq!(snapshot.actor.position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_followed_point_is_centered() {
        let tuning = Tuning::default();
        let mut camera = CameraRig::new(tuning.camera_offset);
        camera.position.z -= 6.0;

        // The point the camera follows projects to the middle of the screen
        let followed = Vec3::new(0.0, 0.0, -6.0);
        let clip = view_projection(&camera, &tuning, 1.5).project_point3(followed);
        assert!(clip.x.abs() < 1e-4);
        assert!(clip.y.abs() < 1e-4);
    }

    #[test]
    fn test_snapshot_json_skips_pads() {
        let state = GameState::new(3);
        let json = serde_json::to_string(&SceneSnapshot::capture(&state, 1.0)).unwrap();
        assert!(json.contains("\"view_proj\""));
        assert!(!json.contains("\"pads\""));
    }
}
