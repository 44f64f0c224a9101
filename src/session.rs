//! Session lifecycle
//!
//! Owns the match state and RNG, sizes the arena from the viewport, runs one
//! tick per frame and restarts a fresh match a short delay after a win or
//! loss.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::RESTART_DELAY_MS;
use crate::sim::{Arena, GameEvent, GamePhase, GameState, TickInput, tick};

/// What happened during a frame, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Normal tick (or frozen while waiting to restart)
    Running,
    /// The match just ended; show this message to the player
    Ended(&'static str),
    /// A fresh match started this frame
    Restarted,
}

/// A running game: current match plus restart bookkeeping
pub struct Session {
    state: GameState,
    rng: Pcg32,
    viewport: (f32, f32),
    /// Wall-clock time at which the next match starts
    restart_at_ms: Option<f64>,
    matches_played: u32,
}

impl Session {
    /// Start the first match for a `viewport_w` × `viewport_h` host surface
    pub fn new(viewport_w: f32, viewport_h: f32, now_ms: f64, seed: u64) -> Self {
        let arena = Arena::from_viewport(viewport_w, viewport_h);
        log::info!(
            "Session starting: arena {}x{}, seed {}",
            arena.width,
            arena.height,
            seed
        );
        Self {
            state: GameState::new(arena, now_ms),
            rng: Pcg32::seed_from_u64(seed),
            viewport: (viewport_w, viewport_h),
            restart_at_ms: None,
            matches_played: 1,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn arena(&self) -> Arena {
        self.state.arena
    }

    pub fn matches_played(&self) -> u32 {
        self.matches_played
    }

    pub fn is_restart_pending(&self) -> bool {
        self.restart_at_ms.is_some()
    }

    /// Host surface changed size. The arena follows and the player is
    /// re-centered; everything else keeps its position.
    pub fn resize(&mut self, viewport_w: f32, viewport_h: f32) {
        self.viewport = (viewport_w, viewport_h);
        let arena = Arena::from_viewport(viewport_w, viewport_h);
        log::debug!("Arena resized to {}x{}", arena.width, arena.height);
        self.state.resize(arena);
    }

    /// Throw away the current match and start a new one at `now_ms`
    pub fn restart(&mut self, now_ms: f64) {
        let arena = Arena::from_viewport(self.viewport.0, self.viewport.1);
        self.state = GameState::new(arena, now_ms);
        self.restart_at_ms = None;
        self.matches_played += 1;
        log::info!("Match {} started", self.matches_played);
    }

    /// Run one frame: a tick while playing, the restart once its delay has
    /// passed, nothing otherwise.
    pub fn frame(&mut self, input: &TickInput) -> FrameOutcome {
        if let Some(restart_at) = self.restart_at_ms {
            if input.now_ms >= restart_at {
                self.restart(input.now_ms);
                return FrameOutcome::Restarted;
            }
            return FrameOutcome::Running;
        }

        tick(&mut self.state, input, &mut self.rng);
        self.log_events();

        match self.state.phase.result_message() {
            Some(message) => {
                self.restart_at_ms = Some(input.now_ms + RESTART_DELAY_MS);
                FrameOutcome::Ended(message)
            }
            None => FrameOutcome::Running,
        }
    }

    fn log_events(&self) {
        for event in &self.state.events {
            match event {
                GameEvent::PlayerHit { damage, health } => {
                    log::debug!("Player hit for {} ({} left)", damage, health)
                }
                GameEvent::OrbCollected { value } => log::debug!("Collected {} exp", value),
                GameEvent::Won | GameEvent::Lost => {
                    let outcome = if self.state.phase == GamePhase::Won {
                        "won"
                    } else {
                        "lost"
                    };
                    log::info!(
                        "Match {} {}: level {}, {} enemies on field",
                        self.matches_played,
                        outcome,
                        self.state.player.level,
                        self.state.enemies.len()
                    );
                }
                _ => {}
            }
        }
    }
}
