//! Vectoroids headless runner
//!
//! Runs the simulation at 60 Hz with the vector renderer and a logging audio
//! sink. Input comes from a recorded script or the demo autopilot; a
//! platform front end supplies windowed input and rasterization.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use vectoroids::Settings;
use vectoroids::audio::{AudioSink, LogAudio, MutedAudio};
use vectoroids::input::InputEvent;
use vectoroids::pilot::{DemoPilot, InputSource, ScriptedInput};
use vectoroids::renderer::VectorRenderer;
use vectoroids::scheduler::{FrameScheduler, SystemClock, run};
use vectoroids::sim::GameSession;

#[derive(Parser, Debug)]
#[command(name = "vectoroids", version)]
#[command(about = "Vector-style asteroids arcade game")]
struct Cli {
    /// Request a fullscreen window
    #[arg(short, long)]
    fullscreen: bool,

    /// Disable sound
    #[arg(short = 'q', long)]
    nosound: bool,

    /// RNG seed (default: time-based)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Settings JSON file
    #[arg(long, default_value = "vectoroids.json")]
    settings: PathBuf,

    /// Let the autopilot play
    #[arg(long)]
    demo: bool,

    /// JSON file with one list of input events per frame
    #[arg(long, conflicts_with = "demo")]
    script: Option<PathBuf>,

    /// Write the final frame's snapshot as JSON to this file
    #[arg(long)]
    dump: Option<PathBuf>,
}

impl Cli {
    /// Flags override the settings file
    fn apply(&self, settings: &mut Settings) {
        if self.fullscreen {
            settings.fullscreen = true;
        }
        if self.nosound {
            settings.sound_enabled = false;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if self.frames.is_some() {
            settings.frame_limit = self.frames;
        }
        if self.demo {
            settings.demo = true;
        }
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn load_script(path: &Path) -> Result<ScriptedInput> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading input script {}", path.display()))?;
    let frames: Vec<Vec<InputEvent>> = serde_json::from_str(&json)
        .with_context(|| format!("parsing input script {}", path.display()))?;
    log::info!("Replaying {} frames from {}", frames.len(), path.display());
    Ok(ScriptedInput::new(frames))
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Vectoroids (native) starting...");

    let cli = Cli::parse();
    let mut settings = Settings::load_or_default(&cli.settings)?;
    cli.apply(&mut settings);
    settings.validate()?;

    if settings.fullscreen {
        log::info!("Fullscreen requested; the headless runner has no window");
    }

    let seed = settings.seed.unwrap_or_else(time_seed);
    let mut session = GameSession::new(seed);
    log::info!("Game initialized with seed: {}", seed);

    let mut input: Box<dyn InputSource> = match &cli.script {
        Some(path) => Box::new(load_script(path)?),
        None => {
            if !settings.demo {
                log::info!("No input script given, the autopilot is playing");
            }
            Box::new(DemoPilot::new())
        }
    };

    let mut audio: Box<dyn AudioSink> = if settings.sound_enabled {
        Box::new(LogAudio::new())
    } else {
        Box::new(MutedAudio)
    };

    let mut renderer = VectorRenderer::new(seed);
    let mut scheduler = FrameScheduler::new(SystemClock::default(), settings.frame_period_ms());

    run(
        &mut session,
        &mut scheduler,
        input.as_mut(),
        &mut renderer,
        audio.as_mut(),
        settings.frame_limit,
    );

    if let Some(path) = &cli.dump {
        let json = serde_json::to_string_pretty(&session.snapshot())
            .context("serializing final snapshot")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Final snapshot written to {}", path.display());
    }

    println!("Score: {}  High: {}  Level: {}", session.score, session.high_score, session.level);
    Ok(())
}
