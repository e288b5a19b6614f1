//! Collision tests, asteroid damage and scoring
//!
//! All hit tests are axis-aligned boxes in screen space. They ignore the
//! wraparound seam, so a rock straddling an edge can only be hit on the side
//! its centre is on.

use glam::IVec2;

use super::pool::Handle;
use super::state::{Asteroid, Bullet, GameSession};
use crate::audio::Sound;
use crate::consts::*;

/// Whether two centres are within `half` of each other on both axes
#[inline]
pub fn boxes_overlap(a: IVec2, b: IVec2, half: IVec2) -> bool {
    let d = (a - b).abs();
    d.x <= half.x && d.y <= half.y
}

/// Bullet box (±5) against asteroid box (±size * AST_RADIUS)
#[inline]
pub fn bullet_hits_asteroid(bullet: &Bullet, asteroid: &Asteroid) -> bool {
    let half = asteroid.half_extent() + BULLET_RADIUS;
    boxes_overlap(bullet.pos, asteroid.pos, IVec2::splat(half))
}

/// Asteroid centre inside the ship's ±SHIP_RADIUS box
#[inline]
pub fn ship_hits_asteroid(ship_px: IVec2, asteroid: &Asteroid) -> bool {
    boxes_overlap(asteroid.pos, ship_px, IVec2::splat(SHIP_RADIUS))
}

/// Half-extent of the box around the respawn point that must be clear
pub const SAFETY_BOX: IVec2 = IVec2::new(WIDTH / 5, HEIGHT / 5);

/// Asteroid centre inside the respawn safety box around `spawn_px`
#[inline]
pub fn crowds_spawn(spawn_px: IVec2, asteroid: &Asteroid) -> bool {
    boxes_overlap(asteroid.pos, spawn_px, SAFETY_BOX)
}

/// Points for destroying an asteroid of `size` (pre-split)
#[inline]
pub fn asteroid_points(size: i32) -> u32 {
    (100 / (size + 1)) as u32
}

impl GameSession {
    /// Add to the score, granting a life on each 10000-point boundary crossed
    pub fn add_score(&mut self, amount: u32) {
        if self.score / ONEUP_SCORE < (self.score + amount) / ONEUP_SCORE {
            self.lives += 1;
            self.announce("EXTRA LIFE".to_string());
            self.play(Sound::ExtraLife);
            log::info!("Extra life at {} points", self.score + amount);
        }

        self.score += amount;
    }

    /// Destroy an asteroid: score it, split it, and throw debris
    ///
    /// `hit_vel` is the velocity of whatever hit it and is mixed into the
    /// children and the debris. `explosion` is the number of bits to spawn.
    /// Returns how many children were created (fewer than two if the pool
    /// was full).
    pub fn hurt_asteroid(&mut self, handle: Handle, hit_vel: IVec2, explosion: i32) -> usize {
        let Some(asteroid) = self.asteroids.get(handle).copied() else {
            return 0;
        };
        if !asteroid.alive {
            return 0;
        }

        let size = asteroid.size;
        self.add_score(asteroid_points(size));

        let mut children = 0;
        if size > 1 {
            let vel = asteroid.vel + hit_vel;
            let first = IVec2::new(vel.x / 2, vel.y);
            let second = IVec2::new(vel.x, vel.y / 2);
            for child_vel in [first, second] {
                if self.add_asteroid(asteroid.pos, child_vel, size - 1).is_some() {
                    children += 1;
                }
            }
        }

        self.asteroids.release(handle);
        self.play(Sound::AsteroidHit(size as u8));
        log::debug!(
            "Asteroid size {} destroyed at ({}, {}), {} children",
            size,
            asteroid.pos.x,
            asteroid.pos.y,
            children
        );

        let spread = size * AST_RADIUS;
        let drift = (hit_vel + asteroid.vel) / 3;
        for _ in 0..explosion {
            let pos = IVec2::new(
                asteroid.pos.x - spread + self.roll(AST_RADIUS * 2),
                asteroid.pos.y - spread + self.roll(AST_RADIUS * 2),
            );
            let vel = IVec2::new(
                self.roll(size * 3) - size + drift.x,
                self.roll(size * 3) - size + drift.y,
            );
            self.add_bit(pos, vel);
        }

        children
    }
}
