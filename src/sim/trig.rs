//! Table-based integer trig
//!
//! Angles are in 8-degree units (degrees >> 3, 45 steps per turn) and results
//! are scaled by 1024. The stepped output feeds ship thrust, bullet velocity
//! and outline geometry, so it must stay bit-exact.

/// Cosine of 0..=88 degrees in 8-degree steps, scaled by 1024
pub const TRIG: [i32; 12] = [1024, 1014, 984, 935, 868, 784, 685, 572, 448, 316, 117, 0];

/// Steps per full turn
pub const TRIG_STEPS: i32 = 45;

/// Approximate cosine of `angle` (8-degree units), scaled by 1024
pub fn fast_cos(angle: i32) -> i32 {
    let angle = angle.rem_euclid(TRIG_STEPS);

    if angle < 12 {
        TRIG[angle as usize]
    } else if angle < 23 {
        -TRIG[(10 - (angle - 12)) as usize]
    } else if angle < 34 {
        -TRIG[(angle - 22) as usize]
    } else {
        TRIG[(TRIG_STEPS - angle) as usize]
    }
}

/// Approximate sine of `angle` (8-degree units), scaled by 1024
#[inline]
pub fn fast_sin(angle: i32) -> i32 {
    -fast_cos((angle + 11).rem_euclid(TRIG_STEPS))
}

/// Offset of a point `radius` away at `degrees`, screen-space (y grows down)
#[inline]
pub fn polar_offset(radius: i32, degrees: i32) -> (i32, i32) {
    let step = degrees >> 3;
    ((fast_cos(step) * radius) >> 10, -((fast_sin(step) * radius) >> 10))
}
