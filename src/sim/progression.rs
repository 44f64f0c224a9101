//! Experience orbs and levelling
//!
//! Orbs within the attraction radius start homing on the player and never
//! stop. Collection is checked before and after the homing step, and the
//! step is capped at the remaining distance so an orb cannot pass through
//! the player without being collected.

use super::state::{GameEvent, GameState, Player};
use crate::consts::*;
use crate::{direction_to, distance, exp_to_next};

/// Add experience and apply every level-up it pays for.
///
/// Returns the number of levels gained. Afterwards
/// `experience < experience_to_next` always holds.
pub fn gain_experience(player: &mut Player, amount: u32) -> u32 {
    player.experience += amount;
    let mut levels = 0;
    while player.experience >= player.experience_to_next {
        player.experience -= player.experience_to_next;
        player.level += 1;
        player.experience_to_next = exp_to_next(player.level);
        levels += 1;
    }
    levels
}

/// Attract, move and collect orbs
pub fn update_orbs(state: &mut GameState) {
    let player = &mut state.player;
    let events = &mut state.events;

    state.orbs.retain_mut(|orb| {
        let reach = player.radius + orb.radius;
        let dist = distance(orb.pos, player.pos);

        if dist <= ORB_ATTRACTION_RADIUS {
            orb.moving_to_player = true;
        }

        let collected = if dist <= reach {
            true
        } else if orb.moving_to_player {
            let step = ORB_SPEED.min(dist);
            orb.pos += direction_to(orb.pos, player.pos) * step;
            distance(orb.pos, player.pos) <= reach
        } else {
            false
        };

        if collected {
            events.push(GameEvent::OrbCollected { value: orb.value });
            let levels = gain_experience(player, orb.value);
            if levels > 0 {
                log::info!("Level up! Now level {}", player.level);
                events.push(GameEvent::LevelUp {
                    level: player.level,
                });
            }
        }
        !collected
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Arena, ExpOrb};
    use glam::Vec2;
    use proptest::prelude::*;

    fn arena_state() -> GameState {
        GameState::new(Arena::new(800.0, 800.0), 0.0)
    }

    #[test]
    fn test_level_up_scenario() {
        let mut state = arena_state();
        state.player.experience = 90;
        state.orbs.push(ExpOrb::new(state.player.pos, 50));
        update_orbs(&mut state);

        assert!(state.orbs.is_empty());
        assert_eq!(state.player.experience, 40);
        assert_eq!(state.player.level, 2);
        assert_eq!(state.player.experience_to_next, 150);
        assert_eq!(
            state.events,
            vec![
                GameEvent::OrbCollected { value: 50 },
                GameEvent::LevelUp { level: 2 }
            ]
        );
    }

    #[test]
    fn test_multiple_level_ups_from_one_gain() {
        let mut player = Player::new(&Arena::new(800.0, 800.0));
        // 100 + 150 + 225 = 475
        let levels = gain_experience(&mut player, 480);
        assert_eq!(levels, 3);
        assert_eq!(player.level, 4);
        assert_eq!(player.experience, 5);
        assert_eq!(player.experience_to_next, 337);
    }

    #[test]
    fn test_orb_outside_attraction_radius_stays_put() {
        let mut state = arena_state();
        let pos = state.player.pos + Vec2::new(200.0, 0.0);
        state.orbs.push(ExpOrb::new(pos, 20));
        update_orbs(&mut state);
        assert_eq!(state.orbs[0].pos, pos);
        assert!(!state.orbs[0].moving_to_player);
    }

    #[test]
    fn test_orb_keeps_homing_after_player_leaves() {
        let mut state = arena_state();
        let start = state.player.pos + Vec2::new(150.0, 0.0);
        state.orbs.push(ExpOrb::new(start, 20));
        update_orbs(&mut state);
        assert!(state.orbs[0].moving_to_player);
        assert_eq!(state.orbs[0].pos, start - Vec2::new(ORB_SPEED, 0.0));

        state.player.pos.x -= 300.0;
        let before = state.orbs[0].pos;
        update_orbs(&mut state);
        assert!(state.orbs[0].moving_to_player);
        assert!((before.x - state.orbs[0].pos.x - ORB_SPEED).abs() < 1e-4);
    }

    #[test]
    fn test_orb_collected_after_homing_step() {
        let mut state = arena_state();
        // 31 away: outside reach (28) before the step, inside after it
        state.orbs.push(ExpOrb::new(state.player.pos + Vec2::new(31.0, 0.0), 30));
        update_orbs(&mut state);
        assert!(state.orbs.is_empty());
        assert_eq!(state.player.experience, 30);
    }

    #[test]
    fn test_orb_homes_in_and_is_collected_once() {
        let mut state = arena_state();
        state.orbs.push(ExpOrb::new(state.player.pos + Vec2::new(100.0, 80.0), 20));
        for _ in 0..100 {
            update_orbs(&mut state);
        }
        assert!(state.orbs.is_empty());
        assert_eq!(state.player.experience, 20);
        let collected = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::OrbCollected { .. }))
            .count();
        assert!(collected <= 1);
    }

    proptest! {
        #[test]
        fn prop_level_invariant_holds(gains in proptest::collection::vec(0u32..2_000, 1..30)) {
            let mut player = Player::new(&Arena::new(800.0, 800.0));
            for gain in gains {
                let before = player.level;
                let levels = gain_experience(&mut player, gain);
                prop_assert_eq!(player.level, before + levels);
                prop_assert!(player.experience < player.experience_to_next);
                prop_assert_eq!(player.experience_to_next, exp_to_next(player.level));
            }
        }
    }
}
