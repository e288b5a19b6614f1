//! Draw-list builders for each kind of thing on screen

use glam::IVec2;
use rand::Rng;

use super::draw::{Color, DrawList};
use crate::consts::*;
use crate::sim::state::Zoom;
use crate::sim::{AsteroidView, Particle, ShipView, Snapshot};

const SHIP_NOSE: Color = Color::rgb(128, 128, 255);
const SHIP_WING: Color = Color::rgb(0, 0, 192);
const SHIP_TAIL: Color = Color::rgb(64, 64, 230);
const FLAME_TIP: Color = Color::rgb(255, 0, 0);

/// Ship outline: nose, two wing tips and the notch at the centre
pub fn ship(list: &mut DrawList, ship: &ShipView) {
    let nose = (SHIP_RADIUS, 0);
    let left = (SHIP_RADIUS / 2, 135);
    let right = (SHIP_RADIUS / 2, 225);
    let tail = (0, 0);

    list.segment(nose, SHIP_NOSE, left, SHIP_WING, ship.pos, ship.angle);
    list.segment(left, SHIP_WING, tail, SHIP_TAIL, ship.pos, ship.angle);
    list.segment(tail, SHIP_TAIL, right, SHIP_WING, ship.pos, ship.angle);
    list.segment(right, SHIP_WING, nose, SHIP_NOSE, ship.pos, ship.angle);
}

/// Exhaust line pointing backwards, `length` pixels long
pub fn flame(list: &mut DrawList, ship: &ShipView, length: i32) {
    list.segment((0, 0), Color::WHITE, (length, 180), FLAME_TIP, ship.pos, ship.angle);
}

/// Bullet flicker channel: 0, 128 or 255 (plus `base` on the thick strokes)
fn flicker(rng: &mut impl Rng, base: i32) -> Color {
    let mut channel = || (rng.random_range(0..3) * 128 + base).min(255) as u8;
    Color::rgb(channel(), channel(), channel())
}

/// Sparkling cross drawn a little behind the bullet
pub fn bullet(list: &mut DrawList, bullet: &Particle, rng: &mut impl Rng) {
    let trail = bullet.pos - bullet.vel * 2;
    let mut jitter = |n: i32| rng.random_range(0..n);

    let (a, b, c, d) = (jitter(3), jitter(3), jitter(3), jitter(3));
    let from = IVec2::new(trail.x - a, trail.y - b);
    let to = IVec2::new(trail.x + c, trail.y + d);
    let (c1, c2) = (flicker(rng, 0), flicker(rng, 0));
    list.line(from, c1, to, c2);

    let mut jitter = |n: i32| rng.random_range(0..n);
    let (a, b, c, d) = (jitter(3), jitter(3), jitter(3), jitter(3));
    let from = IVec2::new(trail.x + a, trail.y - b);
    let to = IVec2::new(trail.x - c, trail.y + d);
    let (c1, c2) = (flicker(rng, 0), flicker(rng, 0));
    list.line(from, c1, to, c2);

    for flip in [1, -1] {
        let mut jitter = |n: i32| rng.random_range(0..n);
        let (a, b, c, d) = (jitter(5), jitter(5), jitter(5), jitter(5));
        let from = IVec2::new(bullet.pos.x - flip * a, bullet.pos.y - b);
        let to = IVec2::new(bullet.pos.x + flip * c, bullet.pos.y + d);
        let (c1, c2) = (flicker(rng, 64), flicker(rng, 64));
        list.thick_line(from, c1, to, c2);
    }
}

/// Shade of one outline vertex: brighter as it turns towards 180 degrees
fn vertex_shade(vertex_angle: i32, rotation: i32) -> Color {
    Color::gray(((vertex_angle + rotation) % 180) * 255 / 240)
}

/// Closed six-sided outline with per-vertex shading
pub fn asteroid(list: &mut DrawList, asteroid: &AsteroidView) {
    let shape = &asteroid.shape;
    for i in 0..AST_SIDES {
        let a = shape[i];
        let b = shape[(i + 1) % AST_SIDES];
        list.segment(
            (asteroid.size * (AST_RADIUS - a.radius), a.angle),
            vertex_shade(a.angle, asteroid.angle),
            (asteroid.size * (AST_RADIUS - b.radius), b.angle),
            vertex_shade(b.angle, asteroid.angle),
            asteroid.pos,
            asteroid.angle,
        );
    }
}

/// Debris streak along its velocity
pub fn bit(list: &mut DrawList, bit: &Particle) {
    list.line(bit.pos, Color::WHITE, bit.pos + bit.vel, Color::WHITE);
}

/// Spare-ship icon in the top-right row; `scale` out of 30 shrinks it
pub fn life_icon(list: &mut DrawList, slot: i32, scale: i32) {
    let centre = IVec2::new(WIDTH - 10 - slot * 10, 20);
    let nose = (16 * scale / 30, 0);
    let left = (8 * scale / 30, 135);
    let right = (8 * scale / 30, 225);
    let tail = (0, 0);
    // the icon's wing on the nose side is drawn shorter
    let nose_wing = (4 * scale / 30, 135);

    list.segment(nose, Color::WHITE, nose_wing, Color::WHITE, centre, 90);
    list.segment(left, Color::WHITE, tail, Color::WHITE, centre, 90);
    list.segment(tail, Color::WHITE, right, Color::WHITE, centre, 90);
    list.segment(right, Color::WHITE, nose, Color::WHITE, centre, 90);
}

/// Score, level number, spare lives and the shrinking icon while dying
pub fn hud(list: &mut DrawList, snap: &Snapshot) {
    let score = format!("{:06}", snap.score);
    list.text(score.clone(), IVec2::new(3, 3), 14, Color::WHITE);
    list.text(score, IVec2::new(4, 4), 14, Color::WHITE);

    let level = snap.level.to_string();
    list.text(level.clone(), IVec2::new((WIDTH - 14) / 2, 3), 14, Color::WHITE);
    list.text(level, IVec2::new((WIDTH - 14) / 2 + 1, 4), 14, Color::WHITE);

    let lives = snap.lives as i32;
    for slot in 0..lives {
        life_icon(list, slot, 30);
    }
    if snap.death_timer > 0 {
        life_icon(list, lives, snap.death_timer.min(30));
    }
}

/// Centre-screen announcement, shrinking and darkening as it counts down
pub fn zoom_text(list: &mut DrawList, zoom: &Zoom) {
    let size = zoom.timer;
    if size <= 0 {
        return;
    }

    let width = zoom.text.len() as i32 * size;
    let red = (size * (256 / ZOOM_START)).min(255) as u8;
    list.text(
        zoom.text.clone(),
        IVec2::new((WIDTH - width) / 2, (HEIGHT - size) / 2),
        size,
        Color::rgb(red, 0, 0),
    );
}

/// GAME OVER, large and flashing while the final timer is high
pub fn game_over(list: &mut DrawList, timer: i32, rng: &mut impl Rng) {
    const TEXT: &str = "GAME OVER";
    let len = TEXT.len() as i32;

    if timer > 14 {
        let mut channel = || rng.random_range(0..255) as u8;
        let color = Color::rgb(channel(), channel(), channel());
        list.text(
            TEXT,
            IVec2::new((WIDTH - len * timer) / 2, (HEIGHT - timer) / 2),
            timer,
            color,
        );
    } else {
        list.text(
            TEXT,
            IVec2::new((WIDTH - len * 14) / 2, (HEIGHT - 14) / 2),
            14,
            Color::WHITE,
        );
    }
}

/// Title screen: name, high score, last score and the menu
///
/// `blink` is a free-running frame count; a score equal to the high score
/// blinks with a 20-frame period.
pub fn title(list: &mut DrawList, snap: &Snapshot, blink: u64) {
    list.centered_text("VECTOROIDS", 80, 10, Color::rgb(255, 255, 255));

    let high = format!("HIGH {:06}", snap.high_score);
    list.text(high.clone(), IVec2::new((WIDTH - 110) / 2, 5), 5, Color::rgb(128, 255, 255));
    list.text(high, IVec2::new((WIDTH - 110) / 2 + 1, 6), 5, Color::rgb(128, 255, 255));

    if snap.score != 0 && (snap.score != snap.high_score || blink % 20 < 10) {
        let label = if snap.game_pending { "SCR " } else { "LAST" };
        let line = format!("{} {:06}", label, snap.score);
        let color = Color::rgb(128, 128, 255);
        list.text(line.clone(), IVec2::new((WIDTH - 110) / 2, 25), 5, color);
        list.text(line, IVec2::new((WIDTH - 110) / 2 + 1, 26), 5, color);
    }

    let menu = Color::rgb(0, 255, 0);
    list.text("START", IVec2::new((WIDTH - 50) / 2, 180), 5, menu);
    if snap.game_pending {
        list.text("CONTINUE", IVec2::new((WIDTH - 80) / 2, 200), 5, menu);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawCommand;
    use crate::sim::ShapeVertex;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_ship_outline_is_closed() {
        let mut list = DrawList::new();
        let view = ShipView {
            pos: IVec2::new(100, 100),
            vel: IVec2::ZERO,
            angle: 90,
            alive: true,
            thrusting: false,
        };
        ship(&mut list, &view);
        assert_eq!(list.line_count(), 4);

        let ends: Vec<(IVec2, IVec2)> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, .. } => Some((*from, *to)),
                DrawCommand::Text { .. } => None,
            })
            .collect();
        for pair in ends.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
        assert_eq!(ends[0].0, IVec2::new(100, 90));
        assert_eq!(ends[3].1, ends[0].0);
    }

    #[test]
    fn test_asteroid_has_six_edges() {
        let mut list = DrawList::new();
        let view = AsteroidView {
            pos: IVec2::new(50, 50),
            vel: IVec2::new(1, 1),
            size: 2,
            angle: 0,
            shape: std::array::from_fn(|i| ShapeVertex {
                radius: 0,
                angle: i as i32 * 60,
            }),
        };
        asteroid(&mut list, &view);
        assert_eq!(list.line_count(), AST_SIDES);
    }

    #[test]
    fn test_bullet_draws_four_strokes() {
        let mut list = DrawList::new();
        let mut rng = Pcg32::seed_from_u64(1);
        let p = Particle {
            pos: IVec2::new(10, 10),
            vel: IVec2::new(0, -5),
        };
        bullet(&mut list, &p, &mut rng);
        let thick = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { thick: true, .. }))
            .count();
        assert_eq!(list.line_count(), 4);
        assert_eq!(thick, 2);
    }

    #[test]
    fn test_zoom_hidden_at_zero() {
        let mut list = DrawList::new();
        zoom_text(
            &mut list,
            &Zoom {
                text: "LEVEL 2".to_string(),
                timer: 0,
            },
        );
        assert!(list.is_empty());

        zoom_text(
            &mut list,
            &Zoom {
                text: "LEVEL 2".to_string(),
                timer: ZOOM_START,
            },
        );
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["LEVEL 2"]);
    }

    #[test]
    fn test_game_over_settles_at_fourteen() {
        let mut list = DrawList::new();
        let mut rng = Pcg32::seed_from_u64(3);
        game_over(&mut list, 10, &mut rng);
        assert_eq!(
            list.commands()[0],
            DrawCommand::Text {
                text: "GAME OVER".to_string(),
                pos: IVec2::new((WIDTH - 126) / 2, (HEIGHT - 14) / 2),
                size: 14,
                color: Color::WHITE,
            }
        );
    }
}
