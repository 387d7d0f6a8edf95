//! Game state and session lifecycle
//!
//! `GameState` is the whole session: world strip, actor, score, phase,
//! seeded RNG and the simulation clock. Hosts mutate it only through the
//! methods here and [`tick`](super::tick::tick).

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::collision::{LandingOutcome, resolve_landing};
use super::lane::{Intent, Lane};
use super::world::{Platform, WorldChange, WorldStrip};
use crate::settings::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting on the start screen
    NotStarted,
    /// Accepting input
    Playing,
    /// Missed a landing; sinking
    Dead,
}

/// Notifications for the renderer and UI, in the order they happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    ScoreChanged(u32),
    Jumped { lane: Lane, row: u32 },
    Landed { lane: Lane, row: u32 },
    Died { lane: Lane, row: u32, score: u32 },
    /// The death animation has played long enough to show the overlay
    GameOverReady { score: u32 },
    PlatformAdded(Platform),
    PlatformRemoved(Platform),
    WorldCleared,
}

impl From<WorldChange> for GameEvent {
    fn from(change: WorldChange) -> Self {
        match change {
            WorldChange::Added(p) => GameEvent::PlatformAdded(p),
            WorldChange::Removed(p) => GameEvent::PlatformRemoved(p),
            WorldChange::Cleared => GameEvent::WorldCleared,
        }
    }
}

/// Trailing camera that follows the actor forward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    pub position: Vec3,
}

impl CameraRig {
    pub fn new(offset: [f32; 3]) -> Self {
        Self {
            position: Vec3::from_array(offset),
        }
    }

    /// Ease toward `offset` shifted to the followed z coordinate
    pub fn follow(&mut self, target_z: f32, offset: [f32; 3], lerp: f32) {
        let ideal = Vec3::new(offset[0], offset[1], offset[2] + target_z);
        self.position = self.position.lerp(ideal, lerp);
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub world: WorldStrip,
    pub actor: Actor,
    pub score: u32,
    pub phase: GamePhase,
    pub camera: CameraRig,
    /// Simulation clock (seconds since the session was created)
    pub clock: f64,
    rng: Pcg32,
    death_time: Option<f64>,
    game_over_announced: bool,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new session waiting on the start screen
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let mut state = Self {
            seed,
            actor: Actor::new(tuning.lane_width),
            camera: CameraRig::new(tuning.camera_offset),
            tuning,
            world: WorldStrip::new(),
            score: 0,
            phase: GamePhase::NotStarted,
            clock: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            death_time: None,
            game_over_announced: false,
            events: Vec::new(),
        };
        state.world.initialize(&state.tuning, &mut state.rng);
        state.collect_world_changes();
        log::info!("Session created with seed {}", seed);
        state
    }

    /// Leave the start screen. Returns false if not on it.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted {
            return false;
        }
        self.set_phase(GamePhase::Playing);
        true
    }

    /// Rebuild the world, actor, score and phase for a new run
    pub fn reset(&mut self, seed: u64, autostart: bool) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.world.initialize(&self.tuning, &mut self.rng);
        self.collect_world_changes();

        self.actor = Actor::new(self.tuning.lane_width);
        self.camera = CameraRig::new(self.tuning.camera_offset);
        self.score = 0;
        self.death_time = None;
        self.game_over_announced = false;
        self.events.push(GameEvent::ScoreChanged(0));

        let phase = if autostart {
            GamePhase::Playing
        } else {
            GamePhase::NotStarted
        };
        if phase != self.phase {
            self.set_phase(phase);
        }
        log::info!("Session reset with seed {}", seed);
    }

    /// Whether directional input is being accepted
    #[inline]
    pub fn accepts_input(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Apply a directional intent
    pub fn handle_intent(&mut self, intent: Intent) -> bool {
        self.begin_jump(intent.lane_offset())
    }

    /// Start a jump. Rejected (no state change, no events) unless playing,
    /// grounded, and the lateral move is at most one lane and stays inside
    /// the river.
    pub fn begin_jump(&mut self, lateral_offset: i8) -> bool {
        if !self.accepts_input() {
            return false;
        }
        if !self
            .actor
            .begin_jump(lateral_offset, self.clock, self.tuning.lane_width)
        {
            return false;
        }

        // The jump counts now, before its landing is known
        self.score += 1;
        self.events.push(GameEvent::Jumped {
            lane: self.actor.lane,
            row: self.actor.row,
        });
        self.events.push(GameEvent::ScoreChanged(self.score));
        log::debug!(
            "Jump to {:?} row {} (score {})",
            self.actor.lane,
            self.actor.row,
            self.score
        );

        if self.score % self.tuning.extend_every == 0 {
            self.extend_world();
        }
        true
    }

    /// Generate the next batch of rows and drop the ones left behind
    pub fn extend_world(&mut self) {
        let from = self.world.furthest_row().unwrap_or(self.actor.row);
        let rows = self
            .world
            .extend(from, self.tuning.extend_count, &self.tuning, &mut self.rng);
        let culled = self.world.cull(self.actor.row, self.tuning.cull_margin);
        self.collect_world_changes();
        log::info!(
            "Extended to row {} ({} pads culled)",
            rows.end(),
            culled
        );
    }

    /// Check for the landing instant and resolve it. Returns the outcome
    /// when a landing happened on this call.
    pub fn resolve_landing(&mut self) -> Option<LandingOutcome> {
        let landing = self
            .actor
            .poll_landing(self.clock, self.tuning.jump_duration)?;

        let outcome = resolve_landing(&self.world, landing);
        match outcome {
            LandingOutcome::Safe => self.events.push(GameEvent::Landed {
                lane: landing.lane,
                row: landing.row,
            }),
            LandingOutcome::Splash => self.die(),
        }
        Some(outcome)
    }

    /// A grounded move that stays on a pad, preferring the guaranteed path
    pub fn safe_intent(&self) -> Option<Intent> {
        let next_row = self.actor.row + 1;
        let reachable = [Intent::Forward, Intent::Left, Intent::Right]
            .into_iter()
            .filter_map(|intent| {
                let lane = self.actor.lane.offset(intent.lane_offset())?;
                self.world
                    .has_platform_at(lane, next_row)
                    .then_some((intent, lane))
            });

        let mut fallback = None;
        for (intent, lane) in reachable {
            if self.world.guaranteed_lane(next_row) == Some(lane) {
                return Some(intent);
            }
            fallback.get_or_insert(intent);
        }
        fallback
    }

    /// Seconds since the run ended, if it has
    pub fn time_since_death(&self) -> Option<f64> {
        self.death_time.map(|t| self.clock - t)
    }

    /// Fire `GameOverReady` once the death animation has had its time
    pub(crate) fn announce_game_over(&mut self) {
        if self.game_over_announced {
            return;
        }
        if self
            .time_since_death()
            .is_some_and(|t| t >= self.tuning.game_over_delay)
        {
            self.game_over_announced = true;
            self.events.push(GameEvent::GameOverReady { score: self.score });
        }
    }

    /// Take pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn die(&mut self) {
        self.death_time = Some(self.clock);
        self.events.push(GameEvent::Died {
            lane: self.actor.lane,
            row: self.actor.row,
            score: self.score,
        });
        log::info!(
            "Splash at {:?} row {} - final score {}",
            self.actor.lane,
            self.actor.row,
            self.score
        );
        self.set_phase(GamePhase::Dead);
    }

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        self.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
        log::info!("Phase {:?} -> {:?}", from, to);
    }

    fn collect_world_changes(&mut self) {
        let changes = self.world.drain_changes();
        self.events.extend(changes.into_iter().map(GameEvent::from));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let mut state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.actor.lane, Lane::Center);
        assert_eq!(state.actor.row, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.world.furthest_row(), Some(19));

        let events = state.drain_events();
        let added = events
            .iter()
            .filter(|e| matches!(e, GameEvent::PlatformAdded(_)))
            .count();
        assert_eq!(added, state.world.len());
    }

    #[test]
    fn test_input_ignored_before_start() {
        let mut state = GameState::new(1);
        assert!(!state.handle_intent(Intent::Forward));
        assert_eq!(state.score, 0);
        assert!(state.start());
        assert!(!state.start());
        assert!(state.handle_intent(Intent::Forward));
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_jump_acceptance_at_wall() {
        let mut state = GameState::new(2);
        state.start();
        state.actor.lane = Lane::Right;
        state.drain_events();

        assert!(!state.begin_jump(1));
        assert_eq!(state.actor.lane, Lane::Right);
        assert_eq!(state.actor.row, 0);
        assert_eq!(state.score, 0);
        assert!(state.drain_events().is_empty());

        state.actor.lane = Lane::Center;
        assert!(state.begin_jump(1));
        assert_eq!(state.actor.lane, Lane::Right);
        assert_eq!(state.actor.row, 1);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_two_lane_jump_rejected() {
        let mut state = GameState::new(6);
        state.start();
        state.actor.lane = Lane::Left;
        state.drain_events();

        assert!(!state.begin_jump(2));
        assert_eq!(state.actor.lane, Lane::Left);
        assert_eq!(state.actor.row, 0);
        assert_eq!(state.score, 0);
        assert!(state.drain_events().is_empty());

        state.actor.lane = Lane::Right;
        assert!(!state.begin_jump(-2));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_extension_every_five() {
        let mut state = GameState::new(3);
        state.start();
        for jump in 1..=5 {
            let intent = state.safe_intent().expect("path is always reachable");
            assert!(state.handle_intent(intent));
            state.clock += 1.0;
            assert_eq!(state.resolve_landing(), Some(LandingOutcome::Safe));
            let expected = if jump < 5 { 19 } else { 24 };
            assert_eq!(state.world.furthest_row(), Some(expected));
        }
        for row in 20..=24 {
            assert!(Lane::ALL.iter().any(|&l| state.world.has_platform_at(l, row)));
        }
    }

    #[test]
    fn test_reset() {
        let mut state = GameState::new(4);
        state.start();
        state.handle_intent(Intent::Forward);
        state.drain_events();

        state.reset(99, true);
        assert_eq!(state.seed, 99);
        assert_eq!(state.score, 0);
        assert_eq!(state.actor.row, 0);
        assert!(!state.actor.is_jumping());
        assert_eq!(state.phase, GamePhase::Playing);
        let events = state.drain_events();
        assert_eq!(events.first(), Some(&GameEvent::WorldCleared));

        state.reset(100, false);
        assert_eq!(state.phase, GamePhase::NotStarted);
    }

    #[test]
    fn test_camera_follows_forward() {
        let mut camera = CameraRig::new([20.0, 20.0, 20.0]);
        for _ in 0..200 {
            camera.follow(-15.0, [20.0, 20.0, 20.0], 0.1);
        }
        assert!((camera.position.z - 5.0).abs() < 1e-3);
        assert!((camera.position.x - 20.0).abs() < 1e-6);
    }
}
