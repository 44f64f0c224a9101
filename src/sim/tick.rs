//! Per-frame simulation tick
//!
//! One call advances the world by exactly one tick. The match timer and the
//! player's fire cooldown run on wall-clock time passed in through
//! [`TickInput::now_ms`]; invulnerability, enemy shooting and spawning count
//! ticks, so their real duration follows the host frame rate.

use rand::Rng;

use super::state::{Bullet, BulletOwner, GameEvent, GamePhase, GameState};
use super::{combat, progression, spawn};
use crate::consts::*;

/// Directional keys held this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Snapshot of held movement keys
    pub keys: MoveKeys,
    /// Wall-clock time of this tick (ms)
    pub now_ms: f64,
}

/// Advance the game state by one tick
pub fn tick<R: Rng + ?Sized>(state: &mut GameState, input: &TickInput, rng: &mut R) {
    if state.phase.is_terminal() {
        return;
    }

    state.events.clear();
    state.time_ticks += 1;

    state.remaining_secs = state.remaining_secs_at(input.now_ms);
    if state.remaining_secs == 0 {
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::Won);
        log::info!("Survived the full match at level {}", state.player.level);
        return;
    }

    update_player(state, input);
    update_bullets(state);

    combat::update_enemies(state);
    if state.phase == GamePhase::Lost {
        log::info!(
            "Player died after {} ticks at level {}",
            state.time_ticks,
            state.player.level
        );
        return;
    }

    progression::update_orbs(state);

    state.spawn_counter += 1;
    if state.spawn_counter >= SPAWN_INTERVAL_TICKS {
        spawn::spawn_enemy(state, rng);
        state.spawn_counter = 0;
    }
}

/// Movement, bounds clamping, invulnerability countdown and auto-attack
pub fn update_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    let keys = input.keys;

    // Axes are independent: diagonals move at full speed on both
    if keys.left {
        player.pos.x -= player.speed;
    }
    if keys.right {
        player.pos.x += player.speed;
    }
    if keys.up {
        player.pos.y -= player.speed;
    }
    if keys.down {
        player.pos.y += player.speed;
    }
    player.clamp_to(&state.arena);

    player.invulnerable_ticks = player.invulnerable_ticks.saturating_sub(1);

    let cooled_down = state
        .last_shot_ms
        .is_none_or(|last| input.now_ms - last >= FIRE_COOLDOWN_MS);
    if !cooled_down {
        return;
    }

    if let Some(target) = state.nearest_enemy().map(|e| e.pos) {
        let from = state.player.pos;
        state.bullets.push(Bullet::aimed(
            from,
            target,
            PLAYER_BULLET_SPEED,
            BulletOwner::Player,
        ));
        state.last_shot_ms = Some(input.now_ms);
    }
}

/// Move every bullet and drop the ones that left the arena
pub fn update_bullets(state: &mut GameState) {
    let arena = state.arena;
    state.bullets.retain_mut(|bullet| {
        bullet.pos += bullet.vel;
        arena.contains(bullet.pos)
    });
}
