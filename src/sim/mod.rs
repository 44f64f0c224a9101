//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Wall-clock time comes in through `TickInput`
//! - Randomness comes in as an `Rng` argument
//! - All state lives in `GameState`

pub mod combat;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;

pub use combat::{circles_overlap, update_enemies};
pub use progression::{gain_experience, update_orbs};
pub use spawn::{Edge, choose_kind, spawn_enemy, spawn_position};
pub use state::{
    Arena, Bullet, BulletOwner, Enemy, EnemyKind, ExpOrb, GameEvent, GamePhase, GameState,
    Player, Weapon,
};
pub use tick::{MoveKeys, TickInput, tick, update_bullets, update_player};
