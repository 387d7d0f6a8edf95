//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time only through the clock advanced by `tick`
//! - Stable iteration order (pads ordered by row, then lane)
//! - No rendering or platform dependencies

pub mod actor;
pub mod collision;
pub mod lane;
pub mod row_gen;
pub mod state;
pub mod tick;
pub mod world;

pub use actor::{Actor, JumpState, Landing};
pub use collision::{LandingOutcome, resolve_landing};
pub use lane::{Intent, Lane};
pub use row_gen::{GeneratedRow, full_row, generate_row};
pub use state::{CameraRig, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use world::{Platform, WorldChange, WorldStrip};
