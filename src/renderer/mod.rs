//! Renderer-facing view of the simulation
//!
//! No GPU code lives here: the page renderer consumes `SceneSnapshot`s and
//! the pad events drained from `GameState`.

pub mod instance;
pub mod scene;

pub use instance::{ActorInstance, PadInstance};
pub use scene::{SceneSnapshot, projection_matrix, view_matrix, view_projection};
