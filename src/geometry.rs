//! Shape adapter over the `embedded-graphics` primitives.
//!
//! The simulation only ever asks two questions of a shape: where is its
//! bounding box when centred on a point, and does it cover a given pixel.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, ContainsPoint, Rectangle};

/// Inclusive axis-aligned box.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub top_left: Point,
    pub bot_right: Point,
}

impl Region {
    pub const fn new(top_left: Point, bot_right: Point) -> Self {
        Self { top_left, bot_right }
    }

    pub const fn point(p: Point) -> Self {
        Self { top_left: p, bot_right: p }
    }

    pub fn width(&self) -> u32 {
        (self.bot_right.x - self.top_left.x + 1).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bot_right.y - self.top_left.y + 1).max(0) as u32
    }

    pub fn area(&self) -> u32 {
        self.width() * self.height()
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.top_left.x
            && p.x <= self.bot_right.x
            && p.y >= self.top_left.y
            && p.y <= self.bot_right.y
    }

    /// Smallest region covering both.
    pub fn union(&self, other: &Region) -> Region {
        Region {
            top_left: self.top_left.component_min(other.top_left),
            bot_right: self.bot_right.component_max(other.bot_right),
        }
    }

    pub fn intersection(&self, other: &Region) -> Option<Region> {
        let top_left = self.top_left.component_max(other.top_left);
        let bot_right = self.bot_right.component_min(other.bot_right);
        if top_left.x > bot_right.x || top_left.y > bot_right.y {
            return None;
        }
        Some(Region { top_left, bot_right })
    }

    /// Horizontal extents share at least one column.
    pub fn overlaps_columns(&self, other: &Region) -> bool {
        self.top_left.x <= other.bot_right.x && self.bot_right.x >= other.top_left.x
    }

    /// Row-major walk over every pixel of the region.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let (x0, x1) = (self.top_left.x, self.bot_right.x);
        (self.top_left.y..=self.bot_right.y)
            .flat_map(move |y| (x0..=x1).map(move |x| Point::new(x, y)))
    }
}

impl From<Rectangle> for Region {
    fn from(rect: Rectangle) -> Self {
        let bot_right = rect.bottom_right().unwrap_or(rect.top_left);
        Region::new(rect.top_left, bot_right)
    }
}

impl From<Region> for Rectangle {
    fn from(region: Region) -> Self {
        Rectangle::with_corners(region.top_left, region.bot_right)
    }
}

/// Immutable shape descriptor, positioned by its centre.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Filled rectangle, `half` pixels either side of the centre.
    Rect { half: Size },
    /// One pixel wide rectangular border with the same extents as `Rect`.
    RectOutline { half: Size },
    Circle { radius: u32 },
}

impl Shape {
    pub const fn rect(half_width: u32, half_height: u32) -> Self {
        Shape::Rect { half: Size::new(half_width, half_height) }
    }

    pub const fn outline(half_width: u32, half_height: u32) -> Self {
        Shape::RectOutline { half: Size::new(half_width, half_height) }
    }

    pub const fn circle(radius: u32) -> Self {
        Shape::Circle { radius }
    }

    pub fn bounds_at(&self, center: Point) -> Region {
        match *self {
            Shape::Rect { half } | Shape::RectOutline { half } => {
                Region::from(centered_rect(center, half))
            }
            Shape::Circle { radius } => Region::from(centered_circle(center, radius).bounding_box()),
        }
    }

    pub fn contains_at(&self, center: Point, p: Point) -> bool {
        match *self {
            Shape::Rect { half } => centered_rect(center, half).contains(p),
            Shape::RectOutline { half } => {
                let outer = centered_rect(center, half);
                if !outer.contains(p) {
                    return false;
                }
                if half.width == 0 || half.height == 0 {
                    return true;
                }
                let inner = centered_rect(center, half - Size::new(1, 1));
                !inner.contains(p)
            }
            Shape::Circle { radius } => centered_circle(center, radius).contains(p),
        }
    }
}

fn centered_rect(center: Point, half: Size) -> Rectangle {
    Rectangle::with_center(center, half * 2 + Size::new(1, 1))
}

fn centered_circle(center: Point, radius: u32) -> Circle {
    Circle::with_center(center, radius * 2 + 1)
}

/// Vector addition that pins at the integer limits instead of wrapping.
pub fn advance(position: Point, velocity: Point) -> Point {
    Point::new(
        position.x.saturating_add(velocity.x),
        position.y.saturating_add(velocity.y),
    )
}
