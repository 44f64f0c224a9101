//! Game state and core simulation types
//!
//! `GameState` is the explicit session context: every update function takes
//! it by `&mut` and nothing lives in globals.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{direction_to, distance, exp_to_next};

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Survived the full match duration
    Won,
    /// Player health reached zero
    Lost,
}

impl GamePhase {
    /// Won or Lost: no further ticks are processed
    pub fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::Playing)
    }

    /// Human-readable result for the notification collaborator
    pub fn result_message(self) -> Option<&'static str> {
        match self {
            GamePhase::Playing => None,
            GamePhase::Won => Some("You Win!"),
            GamePhase::Lost => Some("Game Over!"),
        }
    }
}

/// Square (or rectangular) play area, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Arena derived from the host viewport: a square sized to fit both axes
    pub fn from_viewport(viewport_w: f32, viewport_h: f32) -> Self {
        let side = (viewport_w * ARENA_VIEWPORT_FRACTION).min(viewport_h * ARENA_VIEWPORT_FRACTION);
        Self::new(side, side)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Inclusive bounds test: [0, width] × [0, height]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Per-axis movement per tick
    pub speed: f32,
    /// Can go negative on the killing blow; anything <= 0 is dead
    pub health: i32,
    /// Ticks remaining during which hits are ignored
    pub invulnerable_ticks: u32,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next: u32,
}

impl Player {
    /// Fresh player at the arena center, speed scaled with arena width
    pub fn new(arena: &Arena) -> Self {
        Self {
            pos: arena.center(),
            radius: PLAYER_RADIUS,
            speed: (arena.width * PLAYER_SPEED_PER_WIDTH).max(PLAYER_MIN_SPEED),
            health: PLAYER_MAX_HEALTH,
            invulnerable_ticks: 0,
            level: 1,
            experience: 0,
            experience_to_next: exp_to_next(1),
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Apply damage and open the invulnerability window
    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
        self.invulnerable_ticks = INVULNERABILITY_TICKS;
    }

    /// Keep the whole circle inside the arena
    pub fn clamp_to(&mut self, arena: &Arena) {
        self.pos.x = self.pos.x.min(arena.width - self.radius).max(self.radius);
        self.pos.y = self.pos.y.min(arena.height - self.radius).max(self.radius);
    }

    /// Health for display and gameplay decisions, never below zero
    pub fn display_health(&self) -> i32 {
        self.health.max(0)
    }
}

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// A bullet entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub owner: BulletOwner,
}

impl Bullet {
    /// Bullet leaving `from` toward `target` at `speed` units per tick
    pub fn aimed(from: Vec2, target: Vec2, speed: f32, owner: BulletOwner) -> Self {
        Self {
            pos: from,
            vel: direction_to(from, target) * speed,
            owner,
        }
    }
}

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Fast melee, dies in one hit
    Basic,
    /// Ranged, dies in one hit
    Shooter,
    /// Slow, big health pool, hits hardest
    Tank,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Basic, EnemyKind::Shooter, EnemyKind::Tank];

    /// Map a uniform draw in [0, 1) to an archetype (40% / 30% / 30%)
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.4 {
            EnemyKind::Basic
        } else if roll < 0.7 {
            EnemyKind::Shooter
        } else {
            EnemyKind::Tank
        }
    }

    pub fn radius(self) -> f32 {
        match self {
            EnemyKind::Basic | EnemyKind::Shooter => 15.0,
            EnemyKind::Tank => 25.0,
        }
    }

    pub fn speed(self) -> f32 {
        match self {
            EnemyKind::Basic => 2.0,
            EnemyKind::Shooter => 1.5,
            EnemyKind::Tank => 1.0,
        }
    }

    /// Contact damage dealt to the player
    pub fn damage(self) -> i32 {
        match self {
            EnemyKind::Basic => 25,
            EnemyKind::Shooter => 20,
            EnemyKind::Tank => 40,
        }
    }

    /// Hit points; `None` means any hit kills
    pub fn max_health(self) -> Option<u32> {
        match self {
            EnemyKind::Tank => Some(5),
            _ => None,
        }
    }

    /// Ticks between shots for ranged archetypes
    pub fn shoot_rate(self) -> Option<u32> {
        match self {
            EnemyKind::Shooter => Some(120),
            _ => None,
        }
    }

    /// Experience dropped on death
    pub fn exp_value(self) -> u32 {
        match self {
            EnemyKind::Basic => 20,
            EnemyKind::Shooter => 30,
            EnemyKind::Tank => 50,
        }
    }
}

/// Ranged attack state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub shoot_rate: u32,
    pub shoot_counter: u32,
}

impl Weapon {
    /// Advance the cooldown by one tick; true when a shot fires
    pub fn ready(&mut self) -> bool {
        self.shoot_counter += 1;
        if self.shoot_counter >= self.shoot_rate {
            self.shoot_counter = 0;
            true
        } else {
            false
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub damage: i32,
    pub health: Option<u32>,
    pub max_health: Option<u32>,
    pub weapon: Option<Weapon>,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            radius: kind.radius(),
            speed: kind.speed(),
            damage: kind.damage(),
            health: kind.max_health(),
            max_health: kind.max_health(),
            weapon: kind.shoot_rate().map(|shoot_rate| Weapon {
                shoot_rate,
                shoot_counter: 0,
            }),
        }
    }

    /// Register one bullet hit. Returns true if the enemy died.
    pub fn take_hit(&mut self) -> bool {
        match self.health.as_mut() {
            Some(hp) => {
                *hp = hp.saturating_sub(1);
                *hp == 0
            }
            None => true,
        }
    }

    /// Fraction of health left (1.0 for one-hit enemies)
    pub fn health_fraction(&self) -> f32 {
        match (self.health, self.max_health) {
            (Some(hp), Some(max)) if max > 0 => hp as f32 / max as f32,
            _ => 1.0,
        }
    }

    /// True if this enemy's circle at `pos` would overlap `other`
    pub fn overlaps_at(&self, pos: Vec2, other: &Enemy) -> bool {
        distance(pos, other.pos) < self.radius + other.radius
    }
}

/// An experience orb dropped by a dead enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpOrb {
    pub pos: Vec2,
    pub value: u32,
    pub radius: f32,
    /// Once set, the orb homes on the player for the rest of its life
    pub moving_to_player: bool,
}

impl ExpOrb {
    pub fn new(pos: Vec2, value: u32) -> Self {
        Self {
            pos,
            value,
            radius: ORB_RADIUS,
            moving_to_player: false,
        }
    }
}

/// Things that happened during a tick (not persisted)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    EnemySpawned { kind: EnemyKind, pos: Vec2 },
    EnemyKilled { kind: EnemyKind, pos: Vec2 },
    PlayerHit { damage: i32, health: i32 },
    OrbCollected { value: u32 },
    LevelUp { level: u32 },
    Won,
    Lost,
}

/// Complete match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub arena: Arena,
    pub player: Player,
    /// Unordered; membership changes every tick
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub orbs: Vec<ExpOrb>,
    /// Ticks since the last spawn attempt
    pub spawn_counter: u32,
    /// Wall-clock match start (ms)
    pub start_ms: f64,
    /// Wall-clock time of the last player shot (ms), `None` before the first
    pub last_shot_ms: Option<f64>,
    /// Whole seconds left, refreshed every tick
    pub remaining_secs: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a new match in `arena` at wall-clock time `now_ms`
    pub fn new(arena: Arena, now_ms: f64) -> Self {
        Self {
            arena,
            player: Player::new(&arena),
            bullets: Vec::new(),
            enemies: Vec::new(),
            orbs: Vec::new(),
            spawn_counter: 0,
            start_ms: now_ms,
            last_shot_ms: None,
            remaining_secs: MATCH_DURATION_SECS,
            time_ticks: 0,
            phase: GamePhase::Playing,
            events: Vec::new(),
        }
    }

    /// Whole seconds elapsed since the match started
    pub fn elapsed_secs(&self, now_ms: f64) -> u64 {
        ((now_ms - self.start_ms).max(0.0) / 1000.0).floor() as u64
    }

    /// Whole seconds left in the match, saturating at zero
    pub fn remaining_secs_at(&self, now_ms: f64) -> u64 {
        MATCH_DURATION_SECS.saturating_sub(self.elapsed_secs(now_ms))
    }

    /// Surface resized mid-match: new bounds, player back to center.
    /// Other entities keep their absolute positions.
    pub fn resize(&mut self, arena: Arena) {
        self.arena = arena;
        if !self.phase.is_terminal() {
            self.player.pos = arena.center();
        }
    }

    /// Nearest enemy to the player; ties go to the earliest in the list
    pub fn nearest_enemy(&self) -> Option<&Enemy> {
        let mut best: Option<(&Enemy, f32)> = None;
        for enemy in &self.enemies {
            let d = distance(enemy.pos, self.player.pos);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((enemy, d));
            }
        }
        best.map(|(enemy, _)| enemy)
    }
}
