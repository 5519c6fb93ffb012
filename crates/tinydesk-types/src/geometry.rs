//! Screen-space geometry.

use serde::{Deserialize, Serialize};

/// A position on the host surface, in pixels. Either coordinate may be
/// negative: windows can be dragged past the edges of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by a relative offset.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Width and height of a window, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_moves_both_axes() {
        assert_eq!(Point::new(50, 70).offset(30, 30), Point::new(80, 100));
    }

    #[test]
    fn offset_allows_negative_positions() {
        assert_eq!(Point::new(10, 10).offset(-40, -25), Point::new(-30, -15));
    }

    #[test]
    fn offset_saturates() {
        assert_eq!(Point::new(i32::MAX, 0).offset(1, 0).x, i32::MAX);
    }

    #[test]
    fn display_formats() {
        assert_eq!(Point::new(3, -4).to_string(), "(3, -4)");
        assert_eq!(Size::new(450, 300).to_string(), "450x300");
    }

    #[test]
    fn point_deserializes_from_toml() {
        let p: Point = toml::from_str("x = 50\ny = 70").unwrap();
        assert_eq!(p, Point::new(50, 70));
    }
}
