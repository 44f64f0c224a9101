//! Enemy spawning at the arena edges

use glam::Vec2;
use rand::Rng;

use super::state::{Arena, Enemy, EnemyKind, GameEvent, GameState};

/// Arena edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Point on this edge at fraction `t` in [0, 1) along it
    pub fn point(self, arena: &Arena, t: f32) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(t * arena.width, 0.0),
            Edge::Right => Vec2::new(arena.width, t * arena.height),
            Edge::Bottom => Vec2::new(t * arena.width, arena.height),
            Edge::Left => Vec2::new(0.0, t * arena.height),
        }
    }
}

/// Uniformly random point on a uniformly random edge
pub fn spawn_position<R: Rng + ?Sized>(arena: &Arena, rng: &mut R) -> Vec2 {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    edge.point(arena, rng.random::<f32>())
}

/// Archetype from a single uniform draw
pub fn choose_kind<R: Rng + ?Sized>(rng: &mut R) -> EnemyKind {
    EnemyKind::from_roll(rng.random::<f32>())
}

/// Add `enemy` unless it overlaps an existing one. Returns true if placed.
pub fn place_enemy(state: &mut GameState, enemy: Enemy) -> bool {
    if state.enemies.iter().any(|other| enemy.overlaps_at(enemy.pos, other)) {
        log::debug!("Spawn of {:?} at {} rejected (overlap)", enemy.kind, enemy.pos);
        return false;
    }

    log::debug!("Spawned {:?} at {}", enemy.kind, enemy.pos);
    state.events.push(GameEvent::EnemySpawned {
        kind: enemy.kind,
        pos: enemy.pos,
    });
    state.enemies.push(enemy);
    true
}

/// One spawn attempt: random edge point, random archetype, overlap rejection
pub fn spawn_enemy<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> bool {
    let pos = spawn_position(&state.arena, rng);
    let kind = choose_kind(rng);
    place_enemy(state, Enemy::new(kind, pos))
}
