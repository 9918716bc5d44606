//! Entities of the playing field.
//!
//! Every game object is a [`Layer`] living in a fixed arena inside [`Scene`].
//! The paint order and the motion order are separate index lists: the field
//! outline is painted but never moves, and physics does not care about
//! paint priority.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Point;

use crate::config::*;
use crate::geometry::{Region, Shape};
use crate::input_device::PaddleVelocities;

pub const LAYER_COUNT: usize = 4;
pub const MOTION_COUNT: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LayerId(pub usize);

impl LayerId {
    pub const BALL: LayerId = LayerId(0);
    pub const LEFT_PADDLE: LayerId = LayerId(1);
    pub const RIGHT_PADDLE: LayerId = LayerId(2);
    pub const FIELD: LayerId = LayerId(3);
}

/// Index into the motion list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TransformId(pub usize);

impl TransformId {
    pub const BALL: TransformId = TransformId(0);
    pub const LEFT_PADDLE: TransformId = TransformId(1);
    pub const RIGHT_PADDLE: TransformId = TransformId(2);

    /// Motion list order.
    pub const ALL: [TransformId; MOTION_COUNT] =
        [TransformId::BALL, TransformId::LEFT_PADDLE, TransformId::RIGHT_PADDLE];
}

#[derive(Copy, Clone, Debug)]
pub struct Layer {
    pub shape: Shape,
    pub color: Rgb565,
    /// Position shown on screen.
    pub pos: Point,
    /// Position shown before the last commit.
    pub last: Point,
    /// Pending position, becomes `pos` at the next commit.
    pub next: Point,
}

impl Layer {
    pub const fn new(shape: Shape, pos: Point, color: Rgb565) -> Self {
        Self { shape, color, pos, last: pos, next: pos }
    }

    pub fn bounds(&self) -> Region {
        self.shape.bounds_at(self.pos)
    }

    /// Pixels that may have changed since the previous commit: the old and
    /// the new silhouette together.
    pub fn footprint(&self) -> Region {
        self.shape.bounds_at(self.pos).union(&self.shape.bounds_at(self.last))
    }

    /// Move the position history one slot forward.
    #[inline]
    pub fn shift(&mut self) {
        self.last = self.pos;
        self.pos = self.next;
    }

    pub fn covers(&self, p: Point) -> bool {
        self.shape.contains_at(self.pos, p)
    }
}

/// Which end of the field a paddle guards.
///
/// `Left` defends the top edge, `Right` the bottom edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PaddleSide {
    Left,
    Right,
}

impl PaddleSide {
    /// Is the ball, travelling with `velocity`, pushing its leading edge into
    /// the paddle's rows?
    ///
    /// The left paddle compares the ball's top edge with the paddle's bottom
    /// edge, the right paddle the ball's bottom edge with the paddle's top.
    pub fn vertically_overlaps(self, ball: &Region, velocity: Point, paddle: &Region) -> bool {
        match self {
            PaddleSide::Left => {
                velocity.y < 0
                    && ball.top_left.y <= paddle.bot_right.y
                    && ball.bot_right.y >= paddle.top_left.y
            }
            PaddleSide::Right => {
                velocity.y > 0
                    && ball.bot_right.y >= paddle.top_left.y
                    && ball.top_left.y <= paddle.bot_right.y
            }
        }
    }

    /// The player who gets the point when the ball leaves past this paddle.
    pub fn opponent(self) -> PaddleSide {
        match self {
            PaddleSide::Left => PaddleSide::Right,
            PaddleSide::Right => PaddleSide::Left,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Transform {
    pub layer: LayerId,
    pub velocity: Point,
    /// Present on paddles only.
    pub guard: Option<PaddleSide>,
}

impl Transform {
    pub const fn new(layer: LayerId, velocity: Point, guard: Option<PaddleSide>) -> Self {
        Self { layer, velocity, guard }
    }
}

/// All layers and transforms of one game, constructed once at start-up.
pub struct Scene {
    layers: [Layer; LAYER_COUNT],
    render_order: [LayerId; LAYER_COUNT],
    motion: [Transform; MOTION_COUNT],
}

impl Scene {
    pub fn new() -> Self {
        let center = Point::new(FIELD_CENTER_X, FIELD_CENTER_Y);
        let paddle = Shape::rect(PADDLE_HALF_WIDTH, PADDLE_HALF_HEIGHT);
        let bottom = SCREEN_HEIGHT as Coord - PADDLE_INSET;

        let layers = [
            Layer::new(Shape::circle(BALL_RADIUS), center, BALL_COLOR),
            Layer::new(paddle, Point::new(FIELD_CENTER_X, PADDLE_INSET), FG_COLOR),
            Layer::new(paddle, Point::new(FIELD_CENTER_X, bottom), FG_COLOR),
            Layer::new(
                Shape::outline(FIELD_HALF_WIDTH, FIELD_HALF_HEIGHT),
                center,
                FG_COLOR,
            ),
        ];

        let (vx, vy) = INITIAL_BALL_VELOCITY;
        let motion = [
            Transform::new(LayerId::BALL, Point::new(vx, vy), None),
            Transform::new(LayerId::LEFT_PADDLE, Point::zero(), Some(PaddleSide::Left)),
            Transform::new(LayerId::RIGHT_PADDLE, Point::zero(), Some(PaddleSide::Right)),
        ];

        Self {
            layers,
            // topmost first
            render_order: [
                LayerId::BALL,
                LayerId::LEFT_PADDLE,
                LayerId::RIGHT_PADDLE,
                LayerId::FIELD,
            ],
            motion,
        }
    }

    pub fn layer(&self, id: LayerId) -> &Layer {
        &self.layers[id.0]
    }

    pub fn layer_mut(&mut self, id: LayerId) -> &mut Layer {
        &mut self.layers[id.0]
    }

    pub fn transform(&self, id: TransformId) -> &Transform {
        &self.motion[id.0]
    }

    pub fn transform_mut(&mut self, id: TransformId) -> &mut Transform {
        &mut self.motion[id.0]
    }

    pub fn motion(&self) -> &[Transform] {
        &self.motion
    }

    /// Layer owned by a transform.
    pub fn body(&self, id: TransformId) -> &Layer {
        self.layer(self.motion[id.0].layer)
    }

    pub fn body_mut(&mut self, id: TransformId) -> &mut Layer {
        let layer = self.motion[id.0].layer;
        self.layer_mut(layer)
    }

    /// Colour of the first layer, in paint order, covering `p`.
    pub fn color_at(&self, p: Point) -> Rgb565 {
        self.render_order
            .iter()
            .map(|id| &self.layers[id.0])
            .find(|layer| layer.covers(p))
            .map_or(BG_COLOR, |layer| layer.color)
    }

    /// Paddles take the velocities sampled by the timer interrupt.
    pub fn steer(&mut self, paddles: PaddleVelocities) {
        self.motion[TransformId::LEFT_PADDLE.0].velocity = Point::new(paddles.left, 0);
        self.motion[TransformId::RIGHT_PADDLE.0].velocity = Point::new(paddles.right, 0);
    }

    /// Field fence: bounds of the outline layer.
    pub fn fence(&self) -> Region {
        self.layer(LayerId::FIELD).bounds()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::RgbColor;

    #[test]
    fn ball_paints_over_field() {
        let mut scene = Scene::new();
        // park the ball on the left border
        let border = Point::new(1, FIELD_CENTER_Y);
        let ball = scene.layer_mut(LayerId::BALL);
        ball.pos = border;
        assert_eq!(scene.color_at(border), BALL_COLOR);
        assert_eq!(scene.color_at(Point::new(1, 40)), FG_COLOR);
        assert_eq!(scene.color_at(Point::new(60, 60)), BG_COLOR);
        assert_eq!(BG_COLOR, Rgb565::BLACK);
    }

    #[test]
    fn shift_moves_history_forward() {
        let mut layer = Layer::new(Shape::circle(1), Point::new(5, 5), FG_COLOR);
        layer.next = Point::new(6, 3);
        layer.shift();
        assert_eq!(layer.last, Point::new(5, 5));
        assert_eq!(layer.pos, Point::new(6, 3));
        assert_eq!(layer.footprint(), Region::new(Point::new(4, 2), Point::new(7, 6)));
    }

    #[test]
    fn left_predicate_needs_upward_travel() {
        let paddle = Region::new(Point::new(100, 12), Point::new(140, 16));
        let ball = Region::new(Point::new(110, 14), Point::new(116, 20));
        assert!(PaddleSide::Left.vertically_overlaps(&ball, Point::new(0, -3), &paddle));
        assert!(!PaddleSide::Left.vertically_overlaps(&ball, Point::new(0, 3), &paddle));
        assert!(!PaddleSide::Right.vertically_overlaps(&ball, Point::new(0, -3), &paddle));
    }

    #[test]
    fn right_predicate_mirrors_left() {
        let paddle = Region::new(Point::new(100, 304), Point::new(140, 308));
        let touching = Region::new(Point::new(110, 298), Point::new(116, 304));
        let short = Region::new(Point::new(110, 296), Point::new(116, 303));
        assert!(PaddleSide::Right.vertically_overlaps(&touching, Point::new(0, 3), &paddle));
        assert!(!PaddleSide::Right.vertically_overlaps(&short, Point::new(0, 3), &paddle));
    }

    #[test]
    fn steer_only_touches_paddles() {
        let mut scene = Scene::new();
        let ball_velocity = scene.transform(TransformId::BALL).velocity;
        scene.steer(PaddleVelocities { left: -PADDLE_SPEED, right: PADDLE_SPEED });
        assert_eq!(scene.transform(TransformId::LEFT_PADDLE).velocity, Point::new(-4, 0));
        assert_eq!(scene.transform(TransformId::RIGHT_PADDLE).velocity, Point::new(4, 0));
        assert_eq!(scene.transform(TransformId::BALL).velocity, ball_velocity);
    }
}
