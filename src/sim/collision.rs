//! Basket-vs-item collision and scoring
//!
//! Runs once per tick after all positions have been updated, so hits are
//! resolved against this tick's geometry. Items are removed while the
//! collection is being walked, so iteration goes in reverse index order.

use glam::Vec2;

use super::state::{FallingItem, GamePhase, GameState, ItemKind, Player};
use super::tick::GameEvent;
use crate::consts::*;

/// Distance check between the basket anchor and an item's visual center.
///
/// The glyph draws around its baseline, so the item's center sits above
/// its nominal position by `COLLISION_Y_OFFSET`.
pub fn item_hits_basket(player: &Player, item: &FallingItem) -> bool {
    let anchor = Vec2::new(player.x, player.y);
    let center = Vec2::new(item.pos.x, item.pos.y - COLLISION_Y_OFFSET);
    anchor.distance(center) < COLLISION_RADIUS
}

/// Resolve every live item against the basket, mutate the score, spawn
/// impact bursts, and flip the phase to `Won` when the target is reached.
///
/// Items that were neither caught nor still visible are discarded without
/// scoring. `Won` fires at most once even if several hits land this tick.
pub fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for i in (0..state.items.len()).rev() {
        if item_hits_basket(&state.player, &state.items[i]) {
            let item = state.items.remove(i);
            match item.kind {
                ItemKind::Good => {
                    state.score += 1;
                    state.spawn_burst(item.pos.x, item.pos.y, BURST_GOOD_GLYPH, BURST_COUNT);
                }
                ItemKind::Bad => {
                    state.score = state.score.saturating_sub(1);
                    state.spawn_burst(item.pos.x, item.pos.y, BAD_GLYPH, BURST_COUNT);
                }
            }
            events.push(GameEvent::ScoreChanged(state.score));

            if state.score >= TARGET_SCORE && state.phase == GamePhase::Running {
                state.phase = GamePhase::Won;
                state.won_ticks = 0;
                state.spawn_confetti();
                events.push(GameEvent::Won);
                log::info!("target score {} reached after {} ticks", TARGET_SCORE, state.time_ticks);
            }
        } else if state.items[i].pos.y > state.field.height {
            state.items.remove(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_at(x: f32, y: f32, kind: ItemKind) -> FallingItem {
        FallingItem {
            pos: Vec2::new(x, y),
            speed: 3.0,
            kind,
            glyph: match kind {
                ItemKind::Good => GOOD_GLYPHS[0],
                ItemKind::Bad => BAD_GLYPH,
            },
            size: 30,
        }
    }

    fn running_state() -> GameState {
        let mut state = GameState::new(1);
        state.resize(400.0, 400.0);
        // Re-center the basket on the resized field
        state.player = Player::new(&state.field);
        state.begin_run();
        state
    }

    #[test]
    fn test_hit_inside_radius() {
        let state = running_state();
        // Player anchor at (200, 320); item center correction is -20
        let item = item_at(200.0, 330.0, ItemKind::Good);
        assert!(item_hits_basket(&state.player, &item));

        let far = item_at(200.0, 100.0, ItemKind::Good);
        assert!(!item_hits_basket(&state.player, &far));
    }

    #[test]
    fn test_hit_boundary_is_exclusive() {
        let state = running_state();
        // Center exactly COLLISION_RADIUS away: 320 + 20 - 45 = 295 above
        let grazing = item_at(200.0, 295.0, ItemKind::Good);
        assert!(!item_hits_basket(&state.player, &grazing));

        let inside = item_at(200.0, 296.0, ItemKind::Good);
        assert!(item_hits_basket(&state.player, &inside));
    }

    #[test]
    fn test_good_hit_scores_and_bursts() {
        let mut state = running_state();
        state.items.push(item_at(200.0, 330.0, ItemKind::Good));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert_eq!(state.score, 1);
        assert!(state.items.is_empty());
        assert_eq!(state.particles.len(), BURST_COUNT);
        assert_eq!(events, vec![GameEvent::ScoreChanged(1)]);
    }

    #[test]
    fn test_bad_hit_floors_at_zero() {
        let mut state = running_state();
        state.items.push(item_at(200.0, 330.0, ItemKind::Bad));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert_eq!(state.score, 0);
        assert_eq!(events, vec![GameEvent::ScoreChanged(0)]);
        assert_eq!(state.particles.len(), BURST_COUNT);

        state.score = 3;
        state.items.push(item_at(200.0, 330.0, ItemKind::Bad));
        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_two_hits_same_tick_both_resolve() {
        // Removal during iteration must not skip the neighboring item
        let mut state = running_state();
        state.items.push(item_at(195.0, 330.0, ItemKind::Good));
        state.items.push(item_at(205.0, 330.0, ItemKind::Good));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert_eq!(state.score, 2);
        assert!(state.items.is_empty());
        assert_eq!(
            events,
            vec![GameEvent::ScoreChanged(1), GameEvent::ScoreChanged(2)]
        );
    }

    #[test]
    fn test_offscreen_items_discarded_without_scoring() {
        let mut state = running_state();
        state.items.push(item_at(100.0, 401.0, ItemKind::Good));
        state.items.push(item_at(100.0, 200.0, ItemKind::Good));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert_eq!(state.score, 0);
        assert!(events.is_empty());
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].pos.y, 200.0);
    }

    #[test]
    fn test_win_fires_once_on_overshoot() {
        let mut state = running_state();
        state.score = TARGET_SCORE - 1;
        state.items.push(item_at(195.0, 330.0, ItemKind::Good));
        state.items.push(item_at(205.0, 330.0, ItemKind::Good));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert_eq!(state.score, TARGET_SCORE + 1);
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::Won).count(),
            1
        );
    }
}
