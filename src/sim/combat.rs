//! Enemy movement and combat resolution
//!
//! Enemies are processed in list order. Deaths are marked during the pass
//! and compacted afterwards so indices stay stable while iterating; spent
//! bullets are handled the same way.

use glam::Vec2;

use super::state::{Bullet, BulletOwner, ExpOrb, GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::{direction_to, distance};

/// Strict circle overlap: touching circles do not collide
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    distance(a, b) < radius_a + radius_b
}

/// Move, shoot and resolve hits for every enemy, then check enemy bullets
/// against the player. Sets the phase to `Lost` and stops early if the
/// player dies.
pub fn update_enemies(state: &mut GameState) {
    resolve_enemies(state);
    if state.phase == GamePhase::Lost {
        return;
    }
    resolve_enemy_bullets(state);
}

fn resolve_enemies(state: &mut GameState) {
    let player_pos = state.player.pos;
    let mut dead = vec![false; state.enemies.len()];
    let mut spent = vec![false; state.bullets.len()];
    let mut fired: Vec<Bullet> = Vec::new();

    for i in 0..state.enemies.len() {
        // Contact uses the distance before this tick's step
        let contact_distance = distance(state.enemies[i].pos, player_pos);

        // 1. Step toward the player unless the step lands on another live enemy
        let enemy = &state.enemies[i];
        let candidate = enemy.pos + direction_to(enemy.pos, player_pos) * enemy.speed;
        let blocked = state
            .enemies
            .iter()
            .enumerate()
            .any(|(j, other)| j != i && !dead[j] && enemy.overlaps_at(candidate, other));

        let enemy = &mut state.enemies[i];
        if !blocked {
            enemy.pos = candidate;
        }

        // 2. Ranged attack
        let shoots = enemy.weapon.as_mut().is_some_and(|weapon| weapon.ready());
        if shoots {
            fired.push(Bullet::aimed(
                enemy.pos,
                player_pos,
                ENEMY_BULLET_SPEED,
                BulletOwner::Enemy,
            ));
        }

        // 3. At most one player bullet per enemy per tick, newest first
        let hit = state
            .bullets
            .iter()
            .enumerate()
            .rev()
            .find(|(j, b)| {
                !spent[*j]
                    && b.owner == BulletOwner::Player
                    && circles_overlap(b.pos, BULLET_RADIUS, enemy.pos, enemy.radius)
            })
            .map(|(j, _)| j);

        if let Some(j) = hit {
            spent[j] = true;
            if enemy.take_hit() {
                dead[i] = true;
                state.orbs.push(ExpOrb::new(enemy.pos, enemy.kind.exp_value()));
                state.events.push(GameEvent::EnemyKilled {
                    kind: enemy.kind,
                    pos: enemy.pos,
                });
                log::debug!("{:?} killed at {}", enemy.kind, enemy.pos);
                continue;
            }
        }

        // 4. Contact damage
        let player = &mut state.player;
        if !player.is_invulnerable() && contact_distance < player.radius + enemy.radius {
            player.take_damage(enemy.damage);
            state.events.push(GameEvent::PlayerHit {
                damage: enemy.damage,
                health: player.health,
            });
            if player.is_dead() {
                state.phase = GamePhase::Lost;
                state.events.push(GameEvent::Lost);
                break;
            }
        }
    }

    let mut index = 0;
    state.enemies.retain(|_| {
        let keep = !dead[index];
        index += 1;
        keep
    });

    let mut index = 0;
    state.bullets.retain(|_| {
        let keep = !spent[index];
        index += 1;
        keep
    });
    state.bullets.extend(fired);
}

fn resolve_enemy_bullets(state: &mut GameState) {
    let player = &mut state.player;
    let events = &mut state.events;
    let mut lost = false;

    state.bullets.retain(|bullet| {
        if lost
            || bullet.owner != BulletOwner::Enemy
            || player.is_invulnerable()
            || !circles_overlap(bullet.pos, BULLET_RADIUS, player.pos, player.radius)
        {
            return true;
        }

        player.take_damage(ENEMY_BULLET_DAMAGE);
        events.push(GameEvent::PlayerHit {
            damage: ENEMY_BULLET_DAMAGE,
            health: player.health,
        });
        if player.is_dead() {
            lost = true;
        }
        false
    });

    if lost {
        state.phase = GamePhase::Lost;
        state.events.push(GameEvent::Lost);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Arena, Enemy, EnemyKind};

    fn arena_state() -> GameState {
        GameState::new(Arena::new(800.0, 800.0), 0.0)
    }

    fn player_bullet(pos: Vec2) -> Bullet {
        Bullet {
            pos,
            vel: Vec2::ZERO,
            owner: BulletOwner::Player,
        }
    }

    fn enemy_bullet(pos: Vec2) -> Bullet {
        Bullet {
            pos,
            vel: Vec2::ZERO,
            owner: BulletOwner::Enemy,
        }
    }

    #[test]
    fn test_circles_overlap_is_strict() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.9, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
    }

    #[test]
    fn test_enemy_steps_toward_player() {
        let mut state = arena_state();
        state.enemies.push(Enemy::new(EnemyKind::Basic, Vec2::new(400.0, 0.0)));
        update_enemies(&mut state);
        assert_eq!(state.enemies[0].pos, Vec2::new(400.0, 2.0));
    }

    #[test]
    fn test_enemy_blocked_by_neighbour_holds_position() {
        let mut state = arena_state();
        // Second enemy sits directly in the first one's path
        state.enemies.push(Enemy::new(EnemyKind::Basic, Vec2::new(400.0, 100.0)));
        state.enemies.push(Enemy::new(EnemyKind::Tank, Vec2::new(400.0, 141.0)));
        update_enemies(&mut state);
        assert_eq!(state.enemies[0].pos, Vec2::new(400.0, 100.0));
        assert_eq!(state.enemies[1].pos, Vec2::new(400.0, 142.0));
    }

    #[test]
    fn test_coincident_enemy_and_player_stays_finite() {
        let mut state = arena_state();
        state.enemies.push(Enemy::new(EnemyKind::Basic, state.player.pos));
        update_enemies(&mut state);
        assert!(state.enemies[0].pos.is_finite());
        assert_eq!(state.player.health, 75);
    }

    #[test]
    fn test_basic_contact_damage_scenario() {
        let mut state = arena_state();
        state.enemies.push(Enemy::new(EnemyKind::Basic, Vec2::new(400.0, 0.0)));

        // Close the gap until the pre-step distance is inside 35
        let mut ticks = 0;
        while state.player.health == 100 {
            update_enemies(&mut state);
            ticks += 1;
            assert!(ticks < 500, "enemy never reached the player");
        }
        assert_eq!(state.player.health, 75);
        assert_eq!(state.player.invulnerable_ticks, 60);
        assert!(distance(state.enemies[0].pos, state.player.pos) < 37.0);
        assert_eq!(
            state.events.last(),
            Some(&GameEvent::PlayerHit {
                damage: 25,
                health: 75
            })
        );
    }

    #[test]
    fn test_invulnerable_player_takes_no_contact_damage() {
        let mut state = arena_state();
        state.player.invulnerable_ticks = 10;
        state.enemies.push(Enemy::new(EnemyKind::Tank, Vec2::new(410.0, 400.0)));
        update_enemies(&mut state);
        assert_eq!(state.player.health, 100);
        assert_eq!(state.player.invulnerable_ticks, 10);
    }

    #[test]
    fn test_player_bullet_kills_basic_and_drops_orb() {
        let mut state = arena_state();
        state.enemies.push(Enemy::new(EnemyKind::Basic, Vec2::new(100.0, 100.0)));
        state.bullets.push(player_bullet(Vec2::new(105.0, 105.0)));
        update_enemies(&mut state);
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.orbs.len(), 1);
        assert_eq!(state.orbs[0].value, 20);
    }

    #[test]
    fn test_enemy_killed_this_tick_deals_no_contact_damage() {
        let mut state = arena_state();
        let pos = state.player.pos + Vec2::new(10.0, 0.0);
        state.enemies.push(Enemy::new(EnemyKind::Basic, pos));
        state.bullets.push(player_bullet(pos));
        update_enemies(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.orbs.len(), 1);
        assert_eq!(state.player.health, 100);
        assert_eq!(state.player.invulnerable_ticks, 0);
        assert!(!state.events.iter().any(|e| matches!(e, GameEvent::PlayerHit { .. })));
    }

    #[test]
    fn test_tank_survives_until_health_pool_is_empty() {
        let mut state = arena_state();
        state.enemies.push(Enemy::new(EnemyKind::Tank, Vec2::new(100.0, 100.0)));
        for expected in (1..5).rev() {
            let pos = state.enemies[0].pos;
            state.bullets.push(player_bullet(pos));
            update_enemies(&mut state);
            assert_eq!(state.enemies.len(), 1);
            assert_eq!(state.enemies[0].health, Some(expected));
            assert!(state.bullets.is_empty());
        }
        let pos = state.enemies[0].pos;
        state.bullets.push(player_bullet(pos));
        update_enemies(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.orbs[0].value, 50);
    }

    #[test]
    fn test_one_bullet_consumed_per_enemy_per_tick() {
        let mut state = arena_state();
        state.enemies.push(Enemy::new(EnemyKind::Tank, Vec2::new(100.0, 100.0)));
        let pos = Vec2::new(100.0, 100.0);
        state.bullets.push(player_bullet(pos));
        state.bullets.push(player_bullet(pos));
        update_enemies(&mut state);
        assert_eq!(state.enemies[0].health, Some(4));
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_enemy_bullets_ignored_by_enemies() {
        let mut state = arena_state();
        state.enemies.push(Enemy::new(EnemyKind::Basic, Vec2::new(100.0, 100.0)));
        state.bullets.push(enemy_bullet(Vec2::new(100.0, 100.0)));
        update_enemies(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_removal_does_not_skip_next_enemy() {
        let mut state = arena_state();
        state.enemies.push(Enemy::new(EnemyKind::Basic, Vec2::new(100.0, 100.0)));
        state.enemies.push(Enemy::new(EnemyKind::Basic, Vec2::new(700.0, 100.0)));
        state.bullets.push(player_bullet(Vec2::new(100.0, 100.0)));
        update_enemies(&mut state);
        assert_eq!(state.enemies.len(), 1);
        // The survivor still took its step this tick
        let survivor = &state.enemies[0];
        assert!(survivor.pos.x < 700.0 && survivor.pos.y > 100.0);
    }

    #[test]
    fn test_shooter_fires_at_player() {
        let mut state = arena_state();
        state.enemies.push(Enemy::new(EnemyKind::Shooter, Vec2::new(400.0, 0.0)));
        for _ in 0..119 {
            update_enemies(&mut state);
        }
        assert!(state.bullets.is_empty());
        update_enemies(&mut state);
        assert_eq!(state.bullets.len(), 1);
        let bullet = &state.bullets[0];
        assert_eq!(bullet.owner, BulletOwner::Enemy);
        assert!((bullet.vel.length() - ENEMY_BULLET_SPEED).abs() < 1e-4);
        assert!(bullet.vel.y > 0.0);
    }

    #[test]
    fn test_enemy_bullet_hits_player() {
        let mut state = arena_state();
        state.bullets.push(enemy_bullet(state.player.pos + Vec2::new(10.0, 0.0)));
        state.bullets.push(enemy_bullet(state.player.pos - Vec2::new(10.0, 0.0)));
        update_enemies(&mut state);
        // Second bullet arrives during the invulnerability window and survives
        assert_eq!(state.player.health, 90);
        assert_eq!(state.player.invulnerable_ticks, 60);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_enemy_bullet_killing_blow_is_loss() {
        let mut state = arena_state();
        state.player.health = 10;
        state.bullets.push(enemy_bullet(state.player.pos));
        update_enemies(&mut state);
        assert_eq!(state.phase, GamePhase::Lost);
        assert_eq!(state.events.last(), Some(&GameEvent::Lost));
    }

    #[test]
    fn test_contact_killing_blow_stops_processing() {
        let mut state = arena_state();
        state.player.health = 30;
        state.enemies.push(Enemy::new(EnemyKind::Tank, state.player.pos + Vec2::new(30.0, 0.0)));
        state.enemies.push(Enemy::new(EnemyKind::Basic, Vec2::new(400.0, 0.0)));
        update_enemies(&mut state);
        assert_eq!(state.phase, GamePhase::Lost);
        assert_eq!(state.player.health, -10);
        // Second enemy was never processed
        assert_eq!(state.enemies[1].pos, Vec2::new(400.0, 0.0));
    }
}
