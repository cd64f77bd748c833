use std::fmt;

use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle, written as `x y width height`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest rectangle covering the inclusive pixel range `[min, max]`.
    pub fn from_inclusive(min_x: usize, min_y: usize, max_x: usize, max_y: usize) -> Self {
        let clamp = |v: usize| u32::try_from(v).unwrap_or(u32::MAX);
        Self {
            x: clamp(min_x),
            y: clamp(min_y),
            width: clamp(max_x.saturating_sub(min_x) + 1),
            height: clamp(max_y.saturating_sub(min_y) + 1),
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inclusive_bounds_cover_both_ends() {
        let r = Rect::from_inclusive(2, 3, 5, 3);
        assert_eq!(r, Rect::new(2, 3, 4, 1));
        assert_eq!(r.to_string(), "2 3 4 1");
    }

    #[test]
    fn serializes_with_named_fields() {
        let json = serde_json::to_string(&Rect::new(1, 2, 3, 4)).unwrap();
        assert_eq!(json, r#"{"x":1,"y":2,"width":3,"height":4}"#);
    }
}
