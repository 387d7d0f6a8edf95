//! Landing resolution
//!
//! Runs exactly once per jump, at the landing instant reported by
//! [`Actor::poll_landing`](super::actor::Actor::poll_landing).

use super::actor::Landing;
use super::world::WorldStrip;

/// Result of a landing check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingOutcome {
    /// Landed on a pad
    Safe,
    /// Landed in the water
    Splash,
}

impl LandingOutcome {
    #[inline]
    pub fn is_fatal(self) -> bool {
        self == LandingOutcome::Splash
    }
}

/// Check the destination cell of a landing against the live pads
pub fn resolve_landing(world: &WorldStrip, landing: Landing) -> LandingOutcome {
    if world.has_platform_at(landing.lane, landing.row) {
        LandingOutcome::Safe
    } else {
        LandingOutcome::Splash
    }
}
