#![allow(dead_code)]

use arrow_chase::{ColorImage, Rgb};

/// Direction the ray of a drawn arrow travels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
    Up,
    Down,
}

/// Arrow geometry shared by every scene.
pub const SHAFT_LEN: usize = 14;
pub const SHAFT_WIDTH: usize = 5;
pub const HEAD_BASE: usize = 21;
pub const HEAD_LEN: usize = 6;

/// Draw a filled arrow: a `SHAFT_WIDTH` wide shaft and a triangular head.
///
/// `s0` is the first coordinate along the arrow's axis and `c` the centre
/// line across it. The head sits at the end opposite to `facing`, so the
/// farthest on-axis pixel from the centroid is the shaft end and rays travel
/// towards `facing`.
pub fn draw_arrow(img: &mut ColorImage, s0: usize, c: usize, color: Rgb, facing: Facing) {
    let backwards = matches!(facing, Facing::Left | Facing::Up);
    let half_shaft = (SHAFT_WIDTH / 2) as i64;
    let mut pts: Vec<(usize, i64)> = Vec::new();
    for i in 0..SHAFT_LEN {
        let u = if backwards { i } else { HEAD_LEN + i };
        for v in -half_shaft..(-half_shaft + SHAFT_WIDTH as i64) {
            pts.push((u, v));
        }
    }
    for i in 0..HEAD_LEN {
        let half = ((HEAD_BASE / 2) * (HEAD_LEN - i) / HEAD_LEN) as i64;
        let u = if backwards {
            SHAFT_LEN + i
        } else {
            HEAD_LEN - 1 - i
        };
        for v in -half..=half {
            pts.push((u, v));
        }
    }
    for (u, v) in pts {
        let across = (c as i64 + v) as usize;
        match facing {
            Facing::Left | Facing::Right => img.set(s0 + u, across, color),
            Facing::Up | Facing::Down => img.set(across, s0 + u, color),
        };
    }
}

pub fn fill_rect(img: &mut ColorImage, x0: usize, y0: usize, w: usize, h: usize, color: Rgb) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            img.set(x, y, color);
        }
    }
}

/// Arrow pointing right with the red start marker inside its shaft.
pub fn seed_arrow(img: &mut ColorImage) {
    draw_arrow(img, 4, 18, Rgb::WHITE, Facing::Right);
    fill_rect(img, 14, 17, 3, 3, Rgb::RED);
}

/// Right arrow into a down arrow into a 12x8 box.
pub fn chain_scene() -> ColorImage {
    let mut img = ColorImage::new(80, 52, Rgb::BLACK);
    seed_arrow(&mut img);
    draw_arrow(&mut img, 8, 43, Rgb::WHITE, Facing::Down);
    fill_rect(&mut img, 37, 38, 12, 8, Rgb::WHITE);
    img
}

/// A single arrow whose ray runs off the right edge.
pub fn dead_end_scene() -> ColorImage {
    let mut img = ColorImage::new(64, 40, Rgb::BLACK);
    seed_arrow(&mut img);
    img
}

/// Two arrows pointing at each other.
pub fn cycle_scene() -> ColorImage {
    let mut img = ColorImage::new(80, 40, Rgb::BLACK);
    seed_arrow(&mut img);
    draw_arrow(&mut img, 40, 18, Rgb::WHITE, Facing::Left);
    img
}

/// An arrow pointing at an 11x11 square.
pub fn square_target_scene() -> ColorImage {
    let mut img = ColorImage::new(64, 40, Rgb::BLACK);
    seed_arrow(&mut img);
    fill_rect(&mut img, 40, 13, 11, 11, Rgb::WHITE);
    img
}

pub fn magenta_pixels(img: &ColorImage) -> Vec<(usize, usize)> {
    img.pixels()
        .filter(|&(_, _, p)| p == Rgb::MAGENTA)
        .map(|(x, y, _)| (x, y))
        .collect()
}
