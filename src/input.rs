//! Input events to ship control intents
//!
//! [`map_event`] is a pure per-event translation. The session owns a
//! [`Controls`] value that folds the held intents (rotate, thrust, respawn
//! hold) across frames; fire, start and back are one-shot.

use serde::{Deserialize, Serialize};

/// Joystick axis values inside this band count as centred
pub const JOY_DEAD_ZONE: i16 = 256;

/// Horizontal stick axis
pub const JOY_AXIS_X: u8 = 0;
/// Thrust button
pub const JOY_BUTTON_A: u8 = 0;
/// Fire button
pub const JOY_BUTTON_B: u8 = 1;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Space,
    Shift,
    Enter,
    Escape,
    Other,
}

/// A raw input event from the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    JoyButtonDown(u8),
    JoyButtonUp(u8),
    JoyAxis { axis: u8, value: i16 },
    /// Window closed
    Quit,
}

/// What the player wants, one event at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Press (true) or release (false) of rotate-left
    RotateLeft(bool),
    /// Press (true) or release (false) of rotate-right
    RotateRight(bool),
    /// Stick back in the dead zone: clear both rotations
    RotateStop,
    Thrust(bool),
    /// Fire once (also CONTINUE on the title screen)
    Fire,
    /// Hold to keep the ship from respawning
    RespawnHold(bool),
    /// New game from the title screen
    Start,
    /// Leave the round for the title screen (or quit from the title)
    Back,
    Quit,
}

/// Translate one raw event. Unhandled keys, buttons and axes yield `None`.
pub fn map_event(event: &InputEvent) -> Option<Intent> {
    match *event {
        InputEvent::KeyDown(key) => match key {
            Key::Left => Some(Intent::RotateLeft(true)),
            Key::Right => Some(Intent::RotateRight(true)),
            Key::Up => Some(Intent::Thrust(true)),
            Key::Space => Some(Intent::Fire),
            Key::Shift => Some(Intent::RespawnHold(true)),
            Key::Enter => Some(Intent::Start),
            Key::Escape => Some(Intent::Back),
            Key::Other => None,
        },
        InputEvent::KeyUp(key) => match key {
            Key::Left => Some(Intent::RotateLeft(false)),
            Key::Right => Some(Intent::RotateRight(false)),
            Key::Up => Some(Intent::Thrust(false)),
            Key::Shift => Some(Intent::RespawnHold(false)),
            _ => None,
        },
        InputEvent::JoyButtonDown(button) => match button {
            JOY_BUTTON_B => Some(Intent::Fire),
            JOY_BUTTON_A => Some(Intent::Thrust(true)),
            _ => Some(Intent::RespawnHold(true)),
        },
        InputEvent::JoyButtonUp(button) => match button {
            JOY_BUTTON_B => None,
            JOY_BUTTON_A => Some(Intent::Thrust(false)),
            _ => Some(Intent::RespawnHold(false)),
        },
        InputEvent::JoyAxis { axis, value } if axis == JOY_AXIS_X => {
            if value < -JOY_DEAD_ZONE {
                Some(Intent::RotateLeft(true))
            } else if value > JOY_DEAD_ZONE {
                Some(Intent::RotateRight(true))
            } else {
                Some(Intent::RotateStop)
            }
        }
        InputEvent::JoyAxis { .. } => None,
        InputEvent::Quit => Some(Intent::Quit),
    }
}

/// Held control state carried across frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub respawn_hold: bool,
}

impl Controls {
    /// Fold a held intent in; one-shot intents leave the controls unchanged
    /// and return false
    pub fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::RotateLeft(true) => {
                self.rotate_left = true;
                self.rotate_right = false;
            }
            Intent::RotateLeft(false) => self.rotate_left = false,
            Intent::RotateRight(true) => {
                self.rotate_right = true;
                self.rotate_left = false;
            }
            Intent::RotateRight(false) => self.rotate_right = false,
            Intent::RotateStop => {
                self.rotate_left = false;
                self.rotate_right = false;
            }
            Intent::Thrust(on) => self.thrust = on,
            Intent::RespawnHold(on) => self.respawn_hold = on,
            Intent::Fire | Intent::Start | Intent::Back | Intent::Quit => return false,
        }
        true
    }

    /// Rotation for this frame in degrees (counter-clockwise positive)
    pub fn rotation(&self, step: i32) -> i32 {
        if self.rotate_right {
            -step
        } else if self.rotate_left {
            step
        } else {
            0
        }
    }
}
