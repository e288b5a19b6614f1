//! Frame pacing and the main loop
//!
//! One simulation tick per frame. After the frame's work the scheduler
//! sleeps whatever is left of the period; a slow frame is simply late, with
//! no catch-up ticks and no skipped frames.

use std::thread;
use std::time::{Duration, Instant};

use crate::audio::AudioSink;
use crate::input::{Intent, map_event};
use crate::pilot::InputSource;
use crate::renderer::RenderSink;
use crate::sim::{GameSession, Snapshot, tick};

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&self) -> u64;
    fn sleep_ms(&mut self, ms: u64);
}

/// Wall clock backed by `Instant` and `thread::sleep`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn sleep_ms(&mut self, ms: u64) {
        thread::sleep(Duration::from_millis(ms));
    }
}

/// Paces frames to a fixed period
#[derive(Debug)]
pub struct FrameScheduler<C: Clock> {
    clock: C,
    period_ms: u64,
    frame_start: u64,
    frames: u64,
    late_frames: u64,
}

impl<C: Clock> FrameScheduler<C> {
    pub fn new(clock: C, period_ms: u64) -> Self {
        let frame_start = clock.now_ms();
        Self {
            clock,
            period_ms,
            frame_start,
            frames: 0,
            late_frames: 0,
        }
    }

    /// Mark the start of a frame
    pub fn begin_frame(&mut self) {
        self.frame_start = self.clock.now_ms();
    }

    /// Sleep out the rest of the period; returns the milliseconds slept
    pub fn end_frame(&mut self) -> u64 {
        self.frames += 1;
        let deadline = self.frame_start + self.period_ms;
        let now = self.clock.now_ms();

        if now < deadline {
            let wait = deadline - now;
            self.clock.sleep_ms(wait);
            wait
        } else {
            self.late_frames += 1;
            if now > deadline {
                log::trace!("Frame {} ran {} ms over", self.frames, now - deadline);
            }
            0
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames that used their whole period or more
    pub fn late_frames(&self) -> u64 {
        self.late_frames
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

/// One frame: poll input, tick, hand sounds and the new snapshot to the sinks
///
/// `last` is the snapshot the input source sees (the previous frame); it is
/// replaced with this frame's snapshot.
pub fn step_frame(
    session: &mut GameSession,
    last: &mut Snapshot,
    input: &mut dyn InputSource,
    renderer: &mut dyn RenderSink,
    audio: &mut dyn AudioSink,
) {
    let intents: Vec<Intent> = input.poll(last).iter().filter_map(map_event).collect();
    tick(session, &intents);

    audio.play_all(&session.drain_sounds());

    *last = session.snapshot();
    renderer.present(last);
}

/// Run until the session asks to quit or `frame_limit` frames have run;
/// returns the number of frames run
pub fn run<C: Clock>(
    session: &mut GameSession,
    scheduler: &mut FrameScheduler<C>,
    input: &mut dyn InputSource,
    renderer: &mut dyn RenderSink,
    audio: &mut dyn AudioSink,
    frame_limit: Option<u64>,
) -> u64 {
    let mut last = session.snapshot();
    let mut frames = 0;

    while !session.quit_requested && frame_limit.is_none_or(|limit| frames < limit) {
        scheduler.begin_frame();
        step_frame(session, &mut last, input, renderer, audio);
        scheduler.end_frame();
        frames += 1;
    }

    log::info!(
        "Stopped after {} frames ({} late), score {}, high {}",
        frames,
        scheduler.late_frames(),
        session.score,
        session.high_score
    );
    frames
}
