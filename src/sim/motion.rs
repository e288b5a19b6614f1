//! Per-entity motion: thrust, drag, integration and toroidal wrap

use glam::IVec2;

use super::state::{Asteroid, Bit, Bullet, Ship};
use super::trig::{fast_cos, fast_sin};
use crate::consts::*;
use crate::{normalize_degrees, wrap_coord};

/// Move `pos` by `vel` and wrap into `[0, extent)` on both axes
#[inline]
pub fn integrate(pos: IVec2, vel: IVec2, extent: IVec2) -> IVec2 {
    let next = pos + vel;
    IVec2::new(wrap_coord(next.x, extent.x), wrap_coord(next.y, extent.y))
}

/// Playfield extent in pixels
pub const SCREEN: IVec2 = IVec2::new(WIDTH, HEIGHT);

/// Playfield extent in ship fixed-point units
pub const SCREEN_FIXED: IVec2 = IVec2::new(WIDTH << FIXED_SHIFT, HEIGHT << FIXED_SHIFT);

impl Ship {
    /// Accelerate along the facing direction
    pub fn thrust(&mut self) {
        let step = self.angle >> 3;
        self.vel.x += (fast_cos(step) * THRUST_MAG) >> 10;
        self.vel.y -= (fast_sin(step) * THRUST_MAG) >> 10;
    }

    /// Coasting drag: lose an eighth of the velocity. Integer division
    /// truncates toward zero, so small speeds stall instead of reaching zero
    /// smoothly.
    pub fn apply_drag(&mut self) {
        self.vel.x = self.vel.x * 7 / 8;
        self.vel.y = self.vel.y * 7 / 8;
    }

    pub fn advance(&mut self) {
        self.pos = integrate(self.pos, self.vel, SCREEN_FIXED);
    }
}

impl Bullet {
    /// Age one frame and move
    pub fn advance(&mut self) {
        self.timer -= 1;
        self.pos = integrate(self.pos, self.vel, SCREEN);
    }
}

impl Bit {
    /// Age one frame and move
    pub fn advance(&mut self) {
        self.timer -= 1;
        self.pos = integrate(self.pos, self.vel, SCREEN);
    }
}

impl Asteroid {
    /// Spin every frame; drift only on frames where `drift` is set
    pub fn advance(&mut self, drift: bool) {
        let vel = if drift { self.vel } else { IVec2::ZERO };
        self.pos = integrate(self.pos, vel, SCREEN);
        self.angle = normalize_degrees(self.angle + self.spin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ship_wraps_in_fixed_point() {
        let mut ship = Ship {
            pos: IVec2::new((WIDTH << FIXED_SHIFT) - 1, 0),
            vel: IVec2::new(2, -1),
            angle: 0,
        };
        ship.advance();
        assert_eq!(ship.pos, IVec2::new(1, (HEIGHT << FIXED_SHIFT) - 1));
    }

    #[test]
    fn test_thrust_right_and_up() {
        let mut ship = Ship::default();
        ship.angle = 0;
        ship.thrust();
        assert_eq!(ship.vel, IVec2::new(3, 0));

        ship.vel = IVec2::ZERO;
        ship.angle = 90;
        ship.thrust();
        assert_eq!(ship.vel, IVec2::new(0, -3));
    }

    #[test]
    fn test_drag_never_floors_negative_speeds() {
        let mut ship = Ship::default();
        ship.vel = IVec2::new(-9, 9);
        ship.apply_drag();
        // -63/8 and 63/8 truncate toward zero
        assert_eq!(ship.vel, IVec2::new(-7, 7));
        ship.vel = IVec2::new(1, -1);
        ship.apply_drag();
        assert_eq!(ship.vel, IVec2::ZERO);
    }

    #[test]
    fn test_bullet_ages_and_wraps() {
        let mut bullet = Bullet {
            timer: 2,
            pos: IVec2::new(1, HEIGHT - 1),
            vel: IVec2::new(-3, 4),
        };
        bullet.advance();
        assert_eq!(bullet.timer, 1);
        assert_eq!(bullet.pos, IVec2::new(WIDTH - 2, 3));
    }

    #[test]
    fn test_asteroid_spins_without_drift() {
        let mut asteroid = Asteroid {
            alive: true,
            size: 2,
            pos: IVec2::new(10, 10),
            vel: IVec2::new(3, 3),
            angle: 1,
            spin: -3,
            ..Default::default()
        };
        asteroid.advance(false);
        assert_eq!(asteroid.pos, IVec2::new(10, 10));
        assert_eq!(asteroid.angle, 358);
        asteroid.advance(true);
        assert_eq!(asteroid.pos, IVec2::new(13, 13));
    }

    proptest! {
        #[test]
        fn prop_integrate_stays_on_screen(
            x in 0i32..WIDTH, y in 0i32..HEIGHT,
            vx in -40i32..40, vy in -40i32..40,
        ) {
            let p = integrate(IVec2::new(x, y), IVec2::new(vx, vy), SCREEN);
            prop_assert!(p.x >= 0 && p.x < WIDTH);
            prop_assert!(p.y >= 0 && p.y < HEIGHT);
        }

        #[test]
        fn prop_ship_stays_in_fixed_point_field(
            steps in proptest::collection::vec((any::<bool>(), 0i32..360), 1..200)
        ) {
            let mut ship = Ship::default();
            for (thrusting, angle) in steps {
                ship.angle = angle;
                if thrusting { ship.thrust(); } else { ship.apply_drag(); }
                ship.advance();
                prop_assert!(ship.pos.x >= 0 && ship.pos.x < WIDTH << FIXED_SHIFT);
                prop_assert!(ship.pos.y >= 0 && ship.pos.y < HEIGHT << FIXED_SHIFT);
            }
        }
    }
}
