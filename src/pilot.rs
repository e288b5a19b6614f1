//! Input sources: scripted replays and the demo autopilot

use std::collections::VecDeque;

use glam::IVec2;

use crate::consts::*;
use crate::input::{InputEvent, Key};
use crate::sim::{GamePhase, Snapshot};

/// Produces this frame's raw input events
pub trait InputSource {
    fn poll(&mut self, snapshot: &Snapshot) -> Vec<InputEvent>;
}

/// Replays a fixed list of per-frame events, then goes quiet
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new(frames: Vec<Vec<InputEvent>>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    /// Frames of script left
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _snapshot: &Snapshot) -> Vec<InputEvent> {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// Frames the title screen is shown before the pilot starts a game
const TITLE_WAIT: u32 = 90;
/// Fire at most once every this many frames
const FIRE_INTERVAL: u32 = 8;
/// Heading error (degrees) below which the pilot stops turning
const AIM_TOLERANCE: i32 = ROTATE_STEP;
/// Thrust towards targets farther than this (pixels)
const CHASE_DISTANCE: i32 = 110;
/// Back off when a rock is this close
const PANIC_DISTANCE: i32 = 40;

/// Attract-mode autopilot
///
/// Turns towards the nearest rock, fires when roughly lined up, and thrusts
/// when the target is far. Emits key edges only when its held state changes,
/// like a player's keyboard would.
#[derive(Debug, Clone, Default)]
pub struct DemoPilot {
    title_frames: u32,
    fire_cooldown: u32,
    turning: Option<Key>,
    thrusting: bool,
}

impl DemoPilot {
    pub fn new() -> Self {
        Self::default()
    }

    fn release_all(&mut self, events: &mut Vec<InputEvent>) {
        if let Some(key) = self.turning.take() {
            events.push(InputEvent::KeyUp(key));
        }
        if self.thrusting {
            self.thrusting = false;
            events.push(InputEvent::KeyUp(Key::Up));
        }
    }

    fn turn(&mut self, key: Option<Key>, events: &mut Vec<InputEvent>) {
        if key == self.turning {
            return;
        }
        if let Some(old) = self.turning {
            events.push(InputEvent::KeyUp(old));
        }
        if let Some(new) = key {
            events.push(InputEvent::KeyDown(new));
        }
        self.turning = key;
    }

    fn thrust(&mut self, on: bool, events: &mut Vec<InputEvent>) {
        if on != self.thrusting {
            self.thrusting = on;
            events.push(if on {
                InputEvent::KeyDown(Key::Up)
            } else {
                InputEvent::KeyUp(Key::Up)
            });
        }
    }
}

/// Shortest displacement from `from` to `to` on the wrapping playfield
fn torus_delta(from: IVec2, to: IVec2) -> IVec2 {
    let wrap = |d: i32, extent: i32| (d + extent / 2).rem_euclid(extent) - extent / 2;
    let d = to - from;
    IVec2::new(wrap(d.x, WIDTH), wrap(d.y, HEIGHT))
}

/// Screen-space heading in degrees, 90 = up
fn heading(delta: IVec2) -> i32 {
    let degrees = (-(delta.y as f32)).atan2(delta.x as f32).to_degrees().round() as i32;
    degrees.rem_euclid(360)
}

/// Signed turn from `from` to `to` in (-180, 180]
fn turn_between(from: i32, to: i32) -> i32 {
    let diff = (to - from).rem_euclid(360);
    if diff > 180 { diff - 360 } else { diff }
}

impl InputSource for DemoPilot {
    fn poll(&mut self, snap: &Snapshot) -> Vec<InputEvent> {
        let mut events = Vec::new();

        match snap.phase {
            GamePhase::Title { .. } => {
                self.title_frames += 1;
                if self.title_frames >= TITLE_WAIT {
                    self.title_frames = 0;
                    events.push(InputEvent::KeyDown(Key::Enter));
                }
                return events;
            }
            GamePhase::GameOver => {
                self.release_all(&mut events);
                return events;
            }
            GamePhase::Playing(_) => {}
        }

        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
        if !snap.ship.alive {
            self.release_all(&mut events);
            return events;
        }

        let ship = snap.ship.pos;
        let target = snap
            .asteroids
            .iter()
            .map(|a| torus_delta(ship, a.pos))
            .min_by_key(|d| d.x * d.x + d.y * d.y);

        let Some(delta) = target else {
            self.release_all(&mut events);
            return events;
        };

        let error = turn_between(snap.ship.angle, heading(delta));
        let key = if error > AIM_TOLERANCE {
            Some(Key::Left)
        } else if error < -AIM_TOLERANCE {
            Some(Key::Right)
        } else {
            None
        };
        self.turn(key, &mut events);

        let distance_sq = delta.x * delta.x + delta.y * delta.y;
        let far = distance_sq > CHASE_DISTANCE * CHASE_DISTANCE;
        let close = distance_sq < PANIC_DISTANCE * PANIC_DISTANCE;
        self.thrust(far && error.abs() <= 2 * AIM_TOLERANCE && !close, &mut events);

        if error.abs() <= 2 * AIM_TOLERANCE && self.fire_cooldown == 0 {
            self.fire_cooldown = FIRE_INTERVAL;
            events.push(InputEvent::KeyDown(Key::Space));
        }

        events
    }
}
