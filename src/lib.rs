//! Vectoroids - A vector-style asteroids arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pools, motion, collisions, game state)
//! - `input`: Raw input events to ship control intents
//! - `scheduler`: Fixed 60 Hz frame pacing
//! - `renderer`: Snapshot to abstract vector draw list
//! - `audio`: Fire-and-forget sound sink
//! - `pilot`: Demo autopilot input source
//! - `settings`: Startup configuration

pub mod audio;
pub mod error;
pub mod input;
pub mod pilot;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use error::StartupError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Frames per second the scheduler paces to
    pub const FPS: u32 = 60;

    /// Playfield dimensions (pixels)
    pub const WIDTH: i32 = 320;
    pub const HEIGHT: i32 = 240;

    /// Fractional bits of the ship's fixed-point position/velocity
    pub const FIXED_SHIFT: i32 = 4;

    /// Pool capacities
    pub const NUM_BULLETS: usize = 2;
    pub const NUM_ASTEROIDS: usize = 15;
    pub const NUM_BITS: usize = 25;

    /// Asteroid outline vertex count
    pub const AST_SIDES: usize = 6;
    /// Asteroid radius per size tier
    pub const AST_RADIUS: i32 = 5;
    /// Ship collision half-extent
    pub const SHIP_RADIUS: i32 = 10;
    /// Bullet collision half-extent
    pub const BULLET_RADIUS: i32 = 5;

    /// Ship handling
    pub const SHIP_START_ANGLE: i32 = 90;
    pub const ROTATE_STEP: i32 = 8;
    pub const THRUST_MAG: i32 = 3;
    /// Velocity decays by 7/8 every this many frames when coasting
    pub const DRAG_INTERVAL: u32 = 20;

    /// Bullets
    pub const BULLET_SPEED: i32 = 5;
    pub const BULLET_LIFETIME: i32 = 50;

    /// Debris bits
    pub const BIT_LIFETIME: i32 = 16;

    /// Asteroids move only every this many frames
    pub const ASTEROID_MOVE_INTERVAL: u32 = 4;
    /// Upper bound on asteroids spawned for a level
    pub const MAX_LEVEL_ASTEROIDS: u32 = 10;

    /// Lives and death timers (frames)
    pub const STARTING_LIVES: u32 = 3;
    pub const DEATH_TIMER: i32 = 30;
    pub const LAST_DEATH_TIMER: i32 = 100;

    /// Score needed per extra life
    pub const ONEUP_SCORE: u32 = 10_000;

    /// Initial size of the zooming level/extra-life text
    pub const ZOOM_START: i32 = 40;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: i32) -> i32 {
    angle.rem_euclid(360)
}

/// Wrap a coordinate onto a torus of the given extent, result in [0, extent)
#[inline]
pub fn wrap_coord(v: i32, extent: i32) -> i32 {
    v.rem_euclid(extent)
}
