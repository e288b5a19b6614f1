//! Game session and entity types
//!
//! Everything the frame loop mutates lives in [`GameSession`]: the ship, the
//! three entity pools, score/lives/level, the phase machine and the seeded RNG.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pool::{Handle, Pool, Slot};
use crate::audio::Sound;
use crate::consts::*;
use crate::input::Controls;
use crate::normalize_degrees;

/// Where the current round stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Ship is alive and controllable
    Flying,
    /// Ship destroyed with lives left; respawns once the timer runs out and
    /// the area around the centre is clear
    Respawning { timer: i32 },
    /// Last ship destroyed; the timer drives the game-over animation
    Ending { timer: i32 },
}

impl RoundPhase {
    /// Frames left on the death countdown (0 while flying)
    pub fn death_timer(&self) -> i32 {
        match *self {
            RoundPhase::Flying => 0,
            RoundPhase::Respawning { timer } | RoundPhase::Ending { timer } => timer,
        }
    }
}

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen. `suspended` holds the round left via escape, which
    /// CONTINUE resumes.
    Title { suspended: Option<RoundPhase> },
    /// A round is running
    Playing(RoundPhase),
    /// The last death timer expired; returns to the title next frame
    GameOver,
}

/// The player's ship. Position and velocity carry 4 fractional bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub pos: IVec2,
    pub vel: IVec2,
    /// Facing in degrees, [0, 360), 90 points up
    pub angle: i32,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            pos: IVec2::new((WIDTH / 2) << FIXED_SHIFT, (HEIGHT / 2) << FIXED_SHIFT),
            vel: IVec2::ZERO,
            angle: SHIP_START_ANGLE,
        }
    }
}

impl Ship {
    /// Position in whole pixels
    #[inline]
    pub fn pixel_pos(&self) -> IVec2 {
        IVec2::new(self.pos.x >> FIXED_SHIFT, self.pos.y >> FIXED_SHIFT)
    }

    /// Velocity in whole pixels per frame (arithmetic shift, rounds down)
    #[inline]
    pub fn pixel_vel(&self) -> IVec2 {
        IVec2::new(self.vel.x >> FIXED_SHIFT, self.vel.y >> FIXED_SHIFT)
    }

    /// Back to the centre, pointing up, at rest
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn rotate(&mut self, delta: i32) {
        self.angle = normalize_degrees(self.angle + delta);
    }
}

/// A ship projectile; the slot is free once `timer <= 0`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bullet {
    pub timer: i32,
    pub pos: IVec2,
    pub vel: IVec2,
}

impl Slot for Bullet {
    fn is_active(&self) -> bool {
        self.timer > 0
    }

    fn release(&mut self) {
        self.timer = 0;
    }
}

/// One outline vertex of an asteroid: radius inset and angular position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeVertex {
    /// Subtracted from `AST_RADIUS` before scaling by size
    pub radius: i32,
    /// Degrees around the centre before the asteroid's own rotation
    pub angle: i32,
}

/// A drifting rock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asteroid {
    pub alive: bool,
    /// Size tier, >= 1 while alive
    pub size: i32,
    pub pos: IVec2,
    pub vel: IVec2,
    /// Rotation in degrees, [0, 360)
    pub angle: i32,
    /// Degrees per frame
    pub spin: i32,
    pub shape: [ShapeVertex; AST_SIDES],
}

impl Slot for Asteroid {
    fn is_active(&self) -> bool {
        self.alive
    }

    fn release(&mut self) {
        self.alive = false;
    }
}

impl Asteroid {
    /// Half-extent of the collision box
    #[inline]
    pub fn half_extent(&self) -> i32 {
        self.size * AST_RADIUS
    }
}

/// Explosion debris, decoration only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bit {
    pub timer: i32,
    pub pos: IVec2,
    pub vel: IVec2,
}

impl Slot for Bit {
    fn is_active(&self) -> bool {
        self.timer > 0
    }

    fn release(&mut self) {
        self.timer = 0;
    }
}

/// Zooming centre-screen announcement ("LEVEL 3", "EXTRA LIFE")
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zoom {
    pub text: String,
    /// Text size; shrinks by one every other frame, hidden at 0
    pub timer: i32,
}

pub type BulletPool = Pool<Bullet, NUM_BULLETS>;
pub type AsteroidPool = Pool<Asteroid, NUM_ASTEROIDS>;
pub type BitPool = Pool<Bit, NUM_BITS>;

/// Complete game session, owned by the frame loop
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub lives: u32,
    pub score: u32,
    /// Best finished or abandoned score this run (memory only)
    pub high_score: u32,
    pub level: u32,
    /// Frames since the round was (re)entered
    pub frame: u32,
    pub ship: Ship,
    pub bullets: BulletPool,
    pub asteroids: AsteroidPool,
    pub bits: BitPool,
    pub zoom: Zoom,
    /// Held intents carried across frames
    pub controls: Controls,
    /// Set once a quit intent was seen
    pub quit_requested: bool,
    thrust_sounding: bool,
    sounds: Vec<Sound>,
}

impl GameSession {
    /// Create a session sitting on the title screen
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Title { suspended: None },
            lives: STARTING_LIVES,
            score: 0,
            high_score: 0,
            level: 1,
            frame: 0,
            ship: Ship::default(),
            bullets: Pool::new(),
            asteroids: Pool::new(),
            bits: Pool::new(),
            zoom: Zoom::default(),
            controls: Controls::default(),
            quit_requested: false,
            thrust_sounding: false,
            sounds: Vec::new(),
        }
    }

    /// Uniform integer in `0..n`
    pub(crate) fn roll(&mut self, n: i32) -> i32 {
        self.rng.random_range(0..n)
    }

    /// Whether the ship is currently alive
    pub fn ship_alive(&self) -> bool {
        matches!(self.phase, GamePhase::Playing(RoundPhase::Flying))
    }

    /// Current round phase, if a round is running
    pub fn round(&self) -> Option<RoundPhase> {
        match self.phase {
            GamePhase::Playing(round) => Some(round),
            _ => None,
        }
    }

    /// A round exists that CONTINUE would resume
    pub fn game_pending(&self) -> bool {
        matches!(
            self.phase,
            GamePhase::Playing(_) | GamePhase::Title { suspended: Some(_) }
        )
    }

    /// Begin a fresh game at level 1
    pub fn start_new_game(&mut self) {
        self.lives = STARTING_LIVES;
        self.score = 0;
        self.ship.reset();
        self.level = 1;
        self.reset_level();
        self.enter_round(RoundPhase::Flying);
        log::info!("New game started (seed {})", self.seed);
    }

    /// Enter (or re-enter) a round; held controls and the frame counter reset
    pub(crate) fn enter_round(&mut self, round: RoundPhase) {
        self.controls = Controls::default();
        self.frame = 0;
        self.phase = GamePhase::Playing(round);
    }

    /// Clear all pools and spawn this level's asteroids near the side edges
    pub fn reset_level(&mut self) {
        self.bullets.clear();
        self.asteroids.clear();
        self.bits.clear();

        let count = (self.level + 1).min(MAX_LEVEL_ASTEROIDS);
        for _ in 0..count {
            let x = self.roll(40) + (WIDTH - 40) * self.roll(2);
            let y = self.roll(HEIGHT);
            let xm = self.roll(9) - 4;
            let ym = (self.roll(9) - 4) * 4;
            let size = self.roll(3) + 2;
            self.add_asteroid(IVec2::new(x, y), IVec2::new(xm, ym), size);
        }

        self.announce(format!("LEVEL {}", self.level));
        log::info!("Level {}: {} asteroids", self.level, count);
    }

    /// Start the zooming announcement text
    pub fn announce(&mut self, text: String) {
        self.zoom = Zoom {
            text,
            timer: ZOOM_START,
        };
    }

    /// Fire from the ship's nose; dropped when both bullet slots are busy
    pub fn add_bullet(&mut self) -> Option<Handle> {
        let step = self.ship.angle >> 3;
        let ship_vel = self.ship.pixel_vel();
        let bullet = Bullet {
            timer: BULLET_LIFETIME,
            pos: self.ship.pixel_pos(),
            vel: IVec2::new(
                ((super::fast_cos(step) * BULLET_SPEED) >> 10) + ship_vel.x,
                -((super::fast_sin(step) * BULLET_SPEED) >> 10) + ship_vel.y,
            ),
        };

        let handle = self.bullets.insert(bullet)?;
        self.play(Sound::Bullet);
        Some(handle)
    }

    /// Spawn an asteroid with a fresh random outline and spin
    ///
    /// A zero horizontal velocity is resampled until nonzero so no rock ever
    /// sits still; this draws from the RNG even when the pool is full.
    pub fn add_asteroid(&mut self, pos: IVec2, vel: IVec2, size: i32) -> Option<Handle> {
        let handle = self.asteroids.allocate();

        let mut xm = vel.x;
        while xm == 0 {
            xm = self.roll(3) - 1;
        }

        let handle = handle?;
        let angle = self.roll(360);
        let spin = self.roll(6) - 3;
        let mut shape = [ShapeVertex::default(); AST_SIDES];
        for (i, vertex) in shape.iter_mut().enumerate() {
            vertex.radius = self.roll(3);
            vertex.angle = i as i32 * 60 + self.roll(40);
        }

        let slot = self.asteroids.get_mut(handle)?;
        *slot = Asteroid {
            alive: true,
            size,
            pos,
            vel: IVec2::new(xm, vel.y),
            angle,
            spin,
            shape,
        };
        Some(handle)
    }

    /// Spawn one debris bit
    pub fn add_bit(&mut self, pos: IVec2, vel: IVec2) -> Option<Handle> {
        self.bits.insert(Bit {
            timer: BIT_LIFETIME,
            pos,
            vel,
        })
    }

    /// Queue a sound for the audio sink
    pub fn play(&mut self, sound: Sound) {
        self.sounds.push(sound);
    }

    /// Take the sounds queued since the last call
    pub fn drain_sounds(&mut self) -> Vec<Sound> {
        std::mem::take(&mut self.sounds)
    }

    /// Start or stop the thrust loop on state changes only
    pub(crate) fn set_thrust_sound(&mut self, on: bool) {
        if on != self.thrust_sounding {
            self.thrust_sounding = on;
            self.play(if on { Sound::ThrustStart } else { Sound::ThrustStop });
        }
    }

    /// Record the score as the high score if it is at least as good
    pub(crate) fn record_high_score(&mut self) {
        if self.score >= self.high_score {
            self.high_score = self.score;
        }
    }
}
