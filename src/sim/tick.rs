//! Per-frame simulation tick
//!
//! Drives the game state machine. While playing, every ordered pair of
//! entities (level entities plus the player) is tested once per frame, so cost
//! grows with the square of the entity count. Fine for hand-made levels with a
//! few dozen entities.

use glam::Vec2;

use super::collision::{overlaps, resolve, touch};
use super::entity::{Entity, EntityTag};
use super::state::{DeathCause, GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Jump (held)
    pub jump: bool,
    /// Restart from the death/win screens (pressed this frame)
    pub restart: bool,
    /// Swap the player between circle and square (pressed this frame)
    pub swap_shape: bool,
}

impl TickInput {
    fn any_held(&self) -> bool {
        self.left || self.right || self.jump
    }
}

/// Gameplay response to two entities touching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairRule {
    /// No interaction
    Ignore,
    /// Mover stands on a platform that never gets pushed
    Land { bypass_cooldown: bool },
    /// Player lands on the win platform; any overlap wins
    LandAndWin,
    /// Enemy overlaps player; neither body is pushed
    Kill,
}

/// Rule for an unordered pair of entity tags
pub fn pair_rule(a: EntityTag, b: EntityTag) -> PairRule {
    use EntityTag::*;

    match (a, b) {
        (Player, Platform) | (Platform, Player) => PairRule::Land {
            bypass_cooldown: true,
        },
        (Player, WinPlatform) | (WinPlatform, Player) => PairRule::LandAndWin,
        (Enemy, Platform | WinPlatform) | (Platform | WinPlatform, Enemy) => PairRule::Land {
            bypass_cooldown: false,
        },
        (Enemy, Player) | (Player, Enemy) => PairRule::Kill,
        (Player | Enemy | Platform | WinPlatform, _) => PairRule::Ignore,
    }
}

/// What a single pair dispatch produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairOutcome {
    None,
    Landed { first_contact: bool },
    Won,
    Killed,
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();
    state.time += dt as f64;

    match state.phase {
        GamePhase::Ready => {}
        GamePhase::Playing => tick_playing(state, input, dt),
        GamePhase::Dead | GamePhase::Win => {
            if input.restart {
                state.start_game();
            }
        }
    }
}

fn tick_playing(state: &mut GameState, input: &TickInput, dt: f32) {
    // Fresh collision history for every shape
    for entity in state.level.entities_mut() {
        entity.shape.on_new_frame();
    }
    state.player.shape.on_new_frame();

    sweep_collisions(state);

    // Fell below the visible area
    let fall_limit = state.settings.screen_height / 2.0 + state.level.camera.offset.y;
    if state.player.shape.pos.y > fall_limit {
        state.kill_player(DeathCause::Fell);
    }

    let move_speed = state.settings.move_speed;
    if input.left {
        state.player.shape.vel.x = -move_speed;
    }
    if input.right {
        state.player.shape.vel.x = move_speed;
    }
    if input.jump {
        let jumped = state.player.jump(
            state.time,
            state.settings.jump_cooldown,
            state.settings.jump_speed,
        );
        if jumped {
            state.events.push(GameEvent::Jumped);
        }
    }
    if input.swap_shape {
        state.swap_player_shape();
    }
    if !input.any_held() {
        state.player.shape.vel.x = 0.0;
    }

    state.level.camera.target.x = state.player.shape.pos.x;

    let step = state.settings.step_config();
    for entity in state.level.entities_mut() {
        entity.update(dt, &step);
    }
    state.player.update(dt, &step);
}

/// Test every ordered pair once; index `entities.len()` stands for the player
fn sweep_collisions(state: &mut GameState) {
    let count = state.level.entities().len() + 1;

    for i in 0..count {
        for j in 0..count {
            if i == j {
                continue;
            }
            let (a, b) = entity_pair(state.level.entities_mut(), &mut state.player, i, j);
            match apply_pair_rule(a, b) {
                PairOutcome::None => {}
                PairOutcome::Landed { first_contact } => {
                    if first_contact {
                        state.events.push(GameEvent::Landed);
                    }
                }
                PairOutcome::Won => state.win(),
                PairOutcome::Killed => state.kill_player(DeathCause::Enemy),
            }
        }
    }
}

/// Two distinct entities by sweep index
fn entity_pair<'a>(
    entities: &'a mut [Entity],
    player: &'a mut Entity,
    i: usize,
    j: usize,
) -> (&'a mut Entity, &'a mut Entity) {
    let player_index = entities.len();
    if i == player_index {
        (player, &mut entities[j])
    } else if j == player_index {
        (&mut entities[i], player)
    } else if i < j {
        let (head, tail) = entities.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = entities.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

fn apply_pair_rule(a: &mut Entity, b: &mut Entity) -> PairOutcome {
    match pair_rule(a.tag(), b.tag()) {
        PairRule::Ignore => PairOutcome::None,
        PairRule::Kill => {
            if touch(&mut a.shape, &mut b.shape) {
                PairOutcome::Killed
            } else {
                PairOutcome::None
            }
        }
        PairRule::Land { bypass_cooldown } => {
            let (mover, support) = order_mover_first(a, b);
            match land(mover, support, bypass_cooldown) {
                Some(first_contact) => PairOutcome::Landed { first_contact },
                None => PairOutcome::None,
            }
        }
        PairRule::LandAndWin => {
            // Checked before landing pushes the shapes apart
            let touching = overlaps(&a.shape, &b.shape);
            let (mover, support) = order_mover_first(a, b);
            land(mover, support, true);
            if touching { PairOutcome::Won } else { PairOutcome::None }
        }
    }
}

fn order_mover_first<'a>(a: &'a mut Entity, b: &'a mut Entity) -> (&'a mut Entity, &'a mut Entity) {
    if a.tag().is_support() { (b, a) } else { (a, b) }
}

/// Resolve a mover against a platform that must not move.
///
/// On contact the platform is pinned back in place, the mover stops falling
/// but keeps its horizontal speed. Returns `Some(first_contact)` on contact,
/// where `first_contact` means a player's landing bypass was newly armed.
fn land(mover: &mut Entity, support: &mut Entity, bypass_cooldown: bool) -> Option<bool> {
    let support_pos = support.shape.pos;
    let mover_vel_x = mover.shape.vel.x;

    if !resolve(&mut mover.shape, &mut support.shape) {
        return None;
    }

    support.shape.vel = Vec2::ZERO;
    support.shape.pos = support_pos;
    mover.shape.vel.y = 0.0;
    mover.shape.vel.x = mover_vel_x;

    let mut first_contact = false;
    if bypass_cooldown {
        if let Some(player) = mover.player_state_mut() {
            first_contact = !player.bypass_cooldown;
            player.bypass_cooldown = true;
        }
    }
    Some(first_contact)
}
