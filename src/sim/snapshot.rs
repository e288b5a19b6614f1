//! Read-only view of a session for renderers, autopilots and dumps

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameSession, ShapeVertex, Zoom};
use crate::consts::AST_SIDES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipView {
    /// Pixel position
    pub pos: IVec2,
    /// Pixel velocity
    pub vel: IVec2,
    pub angle: i32,
    pub alive: bool,
    /// Alive with thrust held (draws the flame)
    pub thrusting: bool,
}

/// Bullet or debris bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: IVec2,
    pub vel: IVec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsteroidView {
    pub pos: IVec2,
    pub vel: IVec2,
    pub size: i32,
    pub angle: i32,
    pub shape: [ShapeVertex; AST_SIDES],
}

/// Everything visible in one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub frame: u32,
    pub ship: ShipView,
    pub bullets: Vec<Particle>,
    pub asteroids: Vec<AsteroidView>,
    pub bits: Vec<Particle>,
    pub score: u32,
    pub high_score: u32,
    pub lives: u32,
    pub level: u32,
    /// Frames left on the death countdown, 0 while flying
    pub death_timer: i32,
    pub zoom: Zoom,
    pub game_pending: bool,
}

impl Snapshot {
    /// Last ship lost and its countdown still running
    pub fn showing_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::Playing(_)) && !self.ship.alive && self.lives == 0
    }
}

impl GameSession {
    pub fn snapshot(&self) -> Snapshot {
        let alive = self.ship_alive();

        Snapshot {
            phase: self.phase,
            frame: self.frame,
            ship: ShipView {
                pos: self.ship.pixel_pos(),
                vel: self.ship.pixel_vel(),
                angle: self.ship.angle,
                alive,
                thrusting: alive && self.controls.thrust,
            },
            bullets: self
                .bullets
                .iter_active()
                .map(|(_, b)| Particle {
                    pos: b.pos,
                    vel: b.vel,
                })
                .collect(),
            asteroids: self
                .asteroids
                .iter_active()
                .map(|(_, a)| AsteroidView {
                    pos: a.pos,
                    vel: a.vel,
                    size: a.size,
                    angle: a.angle,
                    shape: a.shape,
                })
                .collect(),
            bits: self
                .bits
                .iter_active()
                .map(|(_, b)| Particle {
                    pos: b.pos,
                    vel: b.vel,
                })
                .collect(),
            score: self.score,
            high_score: self.high_score,
            lives: self.lives,
            level: self.level,
            death_timer: self.round().map_or(0, |round| round.death_timer()),
            zoom: self.zoom.clone(),
            game_pending: self.game_pending(),
        }
    }
}
