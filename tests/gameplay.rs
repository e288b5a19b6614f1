//! End-to-end gameplay scenarios driven through raw input events

use glam::IVec2;

use vectoroids::audio::{LogAudio, Sound};
use vectoroids::consts::*;
use vectoroids::input::{InputEvent, Key};
use vectoroids::pilot::ScriptedInput;
use vectoroids::renderer::VectorRenderer;
use vectoroids::scheduler::step_frame;
use vectoroids::sim::{Bullet, GamePhase, GameSession, RoundPhase, Snapshot, tick};

/// Session in level 1 with the spawned rocks removed
fn cleared_level(seed: u64) -> GameSession {
    let mut session = GameSession::new(seed);
    session.start_new_game();
    session.asteroids.clear();
    session.drain_sounds();
    session
}

fn run_script(session: &mut GameSession, frames: Vec<Vec<InputEvent>>) -> (LogAudio, Snapshot) {
    let count = frames.len();
    let mut input = ScriptedInput::new(frames);
    let mut renderer = VectorRenderer::new(0);
    let mut audio = LogAudio::new();
    let mut last = session.snapshot();
    for _ in 0..count {
        step_frame(session, &mut last, &mut input, &mut renderer, &mut audio);
    }
    (audio, last)
}

#[test]
fn bullet_splits_medium_rock() {
    let mut session = cleared_level(100);
    let rock = session
        .add_asteroid(IVec2::new(60, 60), IVec2::new(2, 0), 3)
        .expect("slot");
    session
        .add_asteroid(IVec2::new(300, 220), IVec2::new(1, 0), 3)
        .expect("slot");
    session.bullets.insert(Bullet {
        timer: 20,
        pos: IVec2::new(60, 80),
        vel: IVec2::new(0, -2),
    });

    tick(&mut session, &[]);

    assert!(!session.asteroids.get(rock).expect("slot").alive);
    let sizes: Vec<i32> = session.asteroids.iter_active().map(|(_, a)| a.size).collect();
    assert_eq!(sizes.iter().filter(|&&s| s == 2).count(), 2);
    assert_eq!(sizes.iter().filter(|&&s| s == 3).count(), 1);
    assert_eq!(session.bits.active_count(), 9);
    assert_eq!(session.score, 25);
}

#[test]
fn last_ship_lost_then_game_over_then_title() {
    let mut session = cleared_level(7);
    session.lives = 1;
    session.score = 4_000;
    session.add_asteroid(IVec2::new(WIDTH / 2, HEIGHT / 2), IVec2::new(-1, 0), 2);

    tick(&mut session, &[]);
    assert_eq!(session.snapshot().death_timer, LAST_DEATH_TIMER);
    assert!(session.snapshot().showing_game_over());

    let mut frames = 1;
    while session.phase != GamePhase::GameOver {
        tick(&mut session, &[]);
        frames += 1;
        assert!(frames <= LAST_DEATH_TIMER + 1, "game over never reached");
    }
    assert_eq!(frames, LAST_DEATH_TIMER + 1);
    assert_eq!(session.high_score, 4_033);

    tick(&mut session, &[]);
    assert_eq!(session.phase, GamePhase::Title { suspended: None });
}

#[test]
fn clearing_rocks_advances_level() {
    let mut session = cleared_level(3);
    session.level = 4;
    tick(&mut session, &[]);
    assert_eq!(session.level, 5);
    assert_eq!(session.asteroids.active_count(), 6);
    assert_eq!(session.zoom.text, "LEVEL 5");
    assert_eq!(session.zoom.timer, ZOOM_START);
}

#[test]
fn respawn_deferred_until_centre_clear() {
    let mut session = cleared_level(5);
    session.lives = 2;
    session.phase = GamePhase::Playing(RoundPhase::Respawning { timer: 3 });
    let blocker = session
        .add_asteroid(IVec2::new(WIDTH / 2 - 40, HEIGHT / 2 + 20), IVec2::new(-1, 0), 1)
        .expect("slot");
    session.add_asteroid(IVec2::new(2, 2), IVec2::new(1, 0), 4);

    for _ in 0..10 {
        tick(&mut session, &[]);
        assert!(!session.ship_alive());
    }

    session.asteroids.release(blocker);
    tick(&mut session, &[]);
    assert!(session.ship_alive());
    assert_eq!(session.lives, 2);
}

#[test]
fn keyboard_script_fires_and_rotates() {
    let mut session = GameSession::new(42);
    let script = vec![
        vec![InputEvent::KeyDown(Key::Enter)],
        vec![InputEvent::KeyDown(Key::Left)],
        vec![],
        vec![InputEvent::KeyUp(Key::Left), InputEvent::KeyDown(Key::Space)],
        vec![InputEvent::KeyUp(Key::Space)],
    ];

    let (audio, snap) = run_script(&mut session, script);

    // held for two frames; the release lands before the fourth frame's turn
    assert_eq!(snap.ship.angle, SHIP_START_ANGLE + 2 * ROTATE_STEP);
    assert_eq!(snap.bullets.len(), 1);
    assert_eq!(audio.played(), 1);
}

#[test]
fn escape_suspends_and_space_continues() {
    let mut session = GameSession::new(42);
    let script = vec![
        vec![InputEvent::KeyDown(Key::Enter)],
        vec![InputEvent::KeyDown(Key::Up)],
        vec![InputEvent::KeyDown(Key::Escape)],
    ];
    let (audio, snap) = run_script(&mut session, script);

    assert!(matches!(
        snap.phase,
        GamePhase::Title {
            suspended: Some(RoundPhase::Flying)
        }
    ));
    assert!(snap.game_pending);
    assert!(!audio.thrusting());

    let (_, snap) = run_script(&mut session, vec![vec![InputEvent::KeyDown(Key::Space)]]);
    assert_eq!(snap.phase, GamePhase::Playing(RoundPhase::Flying));
    // held keys were dropped on resume
    assert!(!snap.ship.thrusting);
}

#[test]
fn joystick_drives_ship() {
    let mut session = GameSession::new(9);
    let script = vec![
        vec![InputEvent::JoyButtonDown(1)],
        vec![InputEvent::JoyAxis { axis: 0, value: 20_000 }],
        vec![InputEvent::JoyAxis { axis: 0, value: 100 }],
        vec![InputEvent::JoyButtonDown(0)],
    ];
    let (_, snap) = run_script(&mut session, script);

    assert_eq!(snap.ship.angle, SHIP_START_ANGLE - ROTATE_STEP);
    assert!(snap.ship.thrusting);
}

#[test]
fn extra_life_sound_reaches_sink() {
    let mut session = cleared_level(1);
    session.score = 9_990;
    let rock = session
        .add_asteroid(IVec2::new(40, 40), IVec2::new(1, 0), 1)
        .expect("slot");
    session.add_asteroid(IVec2::new(300, 200), IVec2::new(1, 0), 1);
    session.hurt_asteroid(rock, IVec2::ZERO, 0);

    let sounds = session.drain_sounds();
    assert_eq!(sounds, vec![Sound::ExtraLife, Sound::AsteroidHit(1)]);
    assert_eq!(session.lives, STARTING_LIVES + 1);
}
