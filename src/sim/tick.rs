//! Fixed timestep simulation tick
//!
//! One call advances the session by exactly one 1/60 s frame. The in-round
//! pipeline runs in a fixed order: rotate, thrust or drag, death countdown,
//! ship, bullets (with bullet hits), asteroids (with ship hits), debris,
//! zoom text, level check.

use super::collision::{bullet_hits_asteroid, crowds_spawn, ship_hits_asteroid};
use super::pool::{Handle, Slot};
use super::state::{GamePhase, GameSession, RoundPhase};
use crate::audio::Sound;
use crate::consts::*;
use crate::input::Intent;

/// Advance the session by one frame using this frame's intents
pub fn tick(session: &mut GameSession, intents: &[Intent]) {
    if intents.contains(&Intent::Quit) {
        session.quit_requested = true;
    }

    match session.phase {
        GamePhase::Title { suspended } => title_frame(session, suspended, intents),
        GamePhase::GameOver => {
            session.phase = GamePhase::Title { suspended: None };
        }
        GamePhase::Playing(round) => round_frame(session, round, intents),
    }
}

fn title_frame(session: &mut GameSession, suspended: Option<RoundPhase>, intents: &[Intent]) {
    for intent in intents {
        match intent {
            Intent::Start => {
                session.start_new_game();
                return;
            }
            Intent::Fire => {
                match suspended {
                    Some(round) => {
                        session.enter_round(round);
                        log::info!("Continuing game at level {}", session.level);
                    }
                    None => session.start_new_game(),
                }
                return;
            }
            Intent::Back => {
                session.quit_requested = true;
            }
            _ => {}
        }
    }
}

fn round_frame(session: &mut GameSession, mut round: RoundPhase, intents: &[Intent]) {
    session.frame = session.frame.wrapping_add(1);
    let mut alive = round == RoundPhase::Flying;

    let mut leave = false;
    for &intent in intents {
        if session.controls.apply(intent) {
            continue;
        }
        match intent {
            Intent::Fire if alive => {
                session.add_bullet();
            }
            Intent::Back => leave = true,
            _ => {}
        }
    }

    // Rotation works alive or dead
    let delta = session.controls.rotation(ROTATE_STEP);
    session.ship.rotate(delta);

    if session.controls.thrust && alive {
        session.ship.thrust();
        session.set_thrust_sound(true);
    } else {
        if session.frame % DRAG_INTERVAL == 0 {
            session.ship.apply_drag();
        }
        session.set_thrust_sound(false);
    }

    let mut game_over = false;
    round = match round {
        RoundPhase::Flying => RoundPhase::Flying,
        RoundPhase::Respawning { timer } if timer > 1 => RoundPhase::Respawning { timer: timer - 1 },
        RoundPhase::Ending { timer } if timer > 1 => RoundPhase::Ending { timer: timer - 1 },
        RoundPhase::Respawning { .. } | RoundPhase::Ending { .. } => {
            if session.lives > 0 {
                try_respawn(session)
            } else {
                game_over = true;
                RoundPhase::Ending { timer: 0 }
            }
        }
    };
    if round == RoundPhase::Flying {
        alive = true;
    }
    session.phase = GamePhase::Playing(round);

    session.ship.advance();

    step_bullets(session);

    let remaining = step_asteroids(session, &mut alive, &mut round);
    session.phase = GamePhase::Playing(round);

    session.bits.for_each_active(|_, bit| bit.advance());

    if session.zoom.timer > 0 && session.frame % 2 == 0 {
        session.zoom.timer -= 1;
    }

    if remaining == 0 {
        session.level += 1;
        session.reset_level();
    }

    if game_over {
        session.record_high_score();
        session.set_thrust_sound(false);
        session.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {} at level {} (high {})",
            session.score,
            session.level,
            session.high_score
        );
    } else if leave {
        session.record_high_score();
        session.set_thrust_sound(false);
        session.phase = GamePhase::Title {
            suspended: Some(round),
        };
        log::info!("Round suspended at level {}", session.level);
    }
}

/// Death timer ran out with lives left: put the ship back at the centre
/// unless the player holds it back or a rock sits in the safety box
fn try_respawn(session: &mut GameSession) -> RoundPhase {
    session.ship.reset();

    if session.controls.respawn_hold {
        return RoundPhase::Respawning { timer: 0 };
    }

    let spawn = session.ship.pixel_pos();
    let crowded = session
        .asteroids
        .iter_active()
        .any(|(_, asteroid)| crowds_spawn(spawn, asteroid));
    if crowded {
        return RoundPhase::Respawning { timer: 0 };
    }

    log::info!("Ship respawned, {} lives left", session.lives);
    RoundPhase::Flying
}

fn step_bullets(session: &mut GameSession) {
    for index in 0..NUM_BULLETS {
        let handle = Handle(index);
        let Some(bullet) = session.bullets.get_mut(handle) else {
            continue;
        };
        if !bullet.is_active() {
            continue;
        }

        bullet.advance();
        let bullet = *bullet;
        if !bullet.is_active() {
            continue;
        }

        let target = session
            .asteroids
            .iter_active()
            .find(|(_, asteroid)| bullet_hits_asteroid(&bullet, asteroid))
            .map(|(h, asteroid)| (h, asteroid.size));

        if let Some((asteroid, size)) = target {
            session.bullets.release(handle);
            session.hurt_asteroid(asteroid, bullet.vel, size * 3);
        }
    }
}

/// Move and spin every live rock, test it against the ship, and return how
/// many were alive when the pass reached them
fn step_asteroids(session: &mut GameSession, alive: &mut bool, round: &mut RoundPhase) -> usize {
    let drift = session.frame % ASTEROID_MOVE_INTERVAL == 0;
    let mut remaining = 0;

    // Index loop: children spawned into later slots are visited this frame
    for index in 0..NUM_ASTEROIDS {
        let handle = Handle(index);
        let Some(asteroid) = session.asteroids.get_mut(handle) else {
            continue;
        };
        if !asteroid.alive {
            continue;
        }

        remaining += 1;
        asteroid.advance(drift);
        let asteroid = *asteroid;

        if *alive && ship_hits_asteroid(session.ship.pixel_pos(), &asteroid) {
            let ship_vel = session.ship.pixel_vel();
            session.hurt_asteroid(handle, ship_vel, NUM_BITS as i32);

            *alive = false;
            session.lives = session.lives.saturating_sub(1);
            session.play(Sound::Explode);
            session.set_thrust_sound(false);

            *round = if session.lives == 0 {
                session.play(Sound::GameOver);
                RoundPhase::Ending {
                    timer: LAST_DEATH_TIMER,
                }
            } else {
                RoundPhase::Respawning { timer: DEATH_TIMER }
            };
            log::info!("Ship destroyed, {} lives left", session.lives);
        }
    }

    remaining
}
