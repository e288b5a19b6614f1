//! Vector rendering module
//!
//! The core never rasterizes. A [`RenderSink`] receives one [`Snapshot`] per
//! frame; [`VectorRenderer`] turns it into a [`DrawList`] of line and text
//! commands for a platform backend.

pub mod draw;
pub mod shapes;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

pub use draw::{Color, DrawCommand, DrawList};

use crate::sim::{GamePhase, Snapshot};

/// Receives the finished frame
pub trait RenderSink {
    fn present(&mut self, snapshot: &Snapshot);
}

/// Builds a draw list per frame
///
/// Flicker effects (bullet sparkle, flame length, GAME OVER colours) use the
/// renderer's own RNG so drawing never disturbs the simulation's sequence.
#[derive(Debug, Clone)]
pub struct VectorRenderer {
    rng: Pcg32,
    frames: u64,
    list: DrawList,
}

impl VectorRenderer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            frames: 0,
            list: DrawList::new(),
        }
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The most recently built frame
    pub fn last_frame(&self) -> &DrawList {
        &self.list
    }

    /// Build the draw list for `snap` in painter's order
    pub fn build(&mut self, snap: &Snapshot) -> DrawList {
        let mut list = DrawList::new();

        match snap.phase {
            GamePhase::Title { .. } => {
                shapes::title(&mut list, snap, self.frames);
            }
            GamePhase::Playing(_) | GamePhase::GameOver => {
                if snap.ship.alive {
                    shapes::ship(&mut list, &snap.ship);
                    if snap.ship.thrusting {
                        let length = self.rng.random_range(0..20);
                        shapes::flame(&mut list, &snap.ship, length);
                    }
                }
                for bullet in &snap.bullets {
                    shapes::bullet(&mut list, bullet, &mut self.rng);
                }
                for asteroid in &snap.asteroids {
                    shapes::asteroid(&mut list, asteroid);
                }
                for bit in &snap.bits {
                    shapes::bit(&mut list, bit);
                }
                shapes::hud(&mut list, snap);
                shapes::zoom_text(&mut list, &snap.zoom);
                if snap.showing_game_over() {
                    shapes::game_over(&mut list, snap.death_timer, &mut self.rng);
                }
            }
        }

        list
    }
}

impl RenderSink for VectorRenderer {
    fn present(&mut self, snapshot: &Snapshot) {
        self.list = self.build(snapshot);
        self.frames += 1;
        log::trace!("Frame {}: {} draw commands", self.frames, self.list.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Intent;
    use crate::sim::{GameSession, RoundPhase, tick};

    #[test]
    fn test_title_menu_shows_continue_when_pending() {
        let mut session = GameSession::new(4);
        let mut renderer = VectorRenderer::new(4);

        renderer.present(&session.snapshot());
        let texts: Vec<String> = renderer.last_frame().texts().map(str::to_string).collect();
        assert!(texts.contains(&"START".to_string()));
        assert!(!texts.contains(&"CONTINUE".to_string()));

        tick(&mut session, &[Intent::Start]);
        session.score = 120;
        tick(&mut session, &[Intent::Back]);
        renderer.present(&session.snapshot());
        let texts: Vec<&str> = renderer.last_frame().texts().collect();
        assert!(texts.contains(&"CONTINUE"));
        assert!(texts.contains(&"HIGH 000120"));
        assert_eq!(renderer.frames(), 2);
    }

    #[test]
    fn test_playfield_contents() {
        let mut session = GameSession::new(4);
        session.start_new_game();
        let mut renderer = VectorRenderer::new(4);
        let list = renderer.build(&session.snapshot());

        // ship outline, two asteroids, three life icons
        assert_eq!(list.line_count(), 4 + 2 * 6 + 3 * 4);
        let texts: Vec<&str> = list.texts().collect();
        assert_eq!(texts, vec!["000000", "000000", "1", "1", "LEVEL 1"]);
    }

    #[test]
    fn test_dying_ship_hidden_and_game_over_text() {
        let mut session = GameSession::new(4);
        session.start_new_game();
        session.lives = 0;
        session.phase = GamePhase::Playing(RoundPhase::Ending { timer: 50 });
        session.zoom.timer = 0;

        let list = VectorRenderer::new(1).build(&session.snapshot());
        assert!(list.texts().any(|t| t == "GAME OVER"));
        // two asteroids and the shrinking icon, no ship
        assert_eq!(list.line_count(), 2 * 6 + 4);
    }
}
