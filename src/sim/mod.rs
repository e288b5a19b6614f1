//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to [`tick`] is one 1/60 s frame)
//! - Seeded RNG only
//! - Stable iteration order (pool index order)
//! - No rendering, audio device or platform dependencies

pub mod collision;
pub mod motion;
pub mod pool;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod trig;

pub use collision::{asteroid_points, boxes_overlap, bullet_hits_asteroid, crowds_spawn, ship_hits_asteroid};
pub use pool::{Handle, Pool, Slot};
pub use snapshot::{AsteroidView, Particle, ShipView, Snapshot};
pub use state::{
    Asteroid, AsteroidPool, Bit, BitPool, Bullet, BulletPool, GamePhase, GameSession, RoundPhase,
    ShapeVertex, Ship, Zoom,
};
pub use tick::tick;
pub use trig::{fast_cos, fast_sin, polar_offset};
