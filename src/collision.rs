//! Collision detection and response against the candidate positions of a
//! tick.
//!
//! Order matters and is fixed: paddles, then side walls, then goals. Every
//! response only flips the sign of one velocity component and moves the
//! candidate along that same axis, so a paddle hit and a wall hit in the
//! same tick never fight each other.
//!
//! Both the paddle and the wall response move the candidate by twice the
//! flipped velocity, which mirrors the overshoot back to the near side of the
//! surface that was crossed.

use embedded_graphics::prelude::Point;
use log::debug;

use crate::audio::Cue;
use crate::config::{FIELD_CENTER_X, FIELD_CENTER_Y, SERVE_SPEED};
use crate::geometry::Region;
use crate::layer::{PaddleSide, Scene, TransformId};
use crate::physics::Candidates;

/// What the ball (or a paddle) ran into during one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Contacts {
    pub paddle: bool,
    pub wall: bool,
    /// Player who scored.
    pub goal: Option<PaddleSide>,
}

impl Contacts {
    /// The single cue to sound for this tick; goals drown out bounces.
    pub fn cue(&self) -> Option<Cue> {
        if self.goal.is_some() {
            Some(Cue::Goal)
        } else if self.paddle {
            Some(Cue::Paddle)
        } else if self.wall {
            Some(Cue::Wall)
        } else {
            None
        }
    }
}

pub fn resolve(scene: &mut Scene, candidates: &mut Candidates, fence: &Region) -> Contacts {
    let mut contacts = Contacts::default();

    for paddle in [TransformId::LEFT_PADDLE, TransformId::RIGHT_PADDLE] {
        contacts.paddle |= paddle_collision(scene, candidates, TransformId::BALL, paddle);
    }
    for id in TransformId::ALL {
        contacts.wall |= wall_collision(scene, candidates, id, fence);
    }
    contacts.goal = goal_collision(scene, candidates, fence);

    contacts
}

/// Bounce `ball` off `paddle` when the paddle's own side predicate fires and
/// the two share a column.
pub fn paddle_collision(
    scene: &mut Scene,
    candidates: &mut Candidates,
    ball: TransformId,
    paddle: TransformId,
) -> bool {
    let Some(side) = scene.transform(paddle).guard else {
        return false;
    };
    let ball_box = candidates.bounds(scene, ball);
    let paddle_box = scene.body(paddle).bounds();
    let velocity = scene.transform(ball).velocity;

    if !side.vertically_overlaps(&ball_box, velocity, &paddle_box)
        || !ball_box.overlaps_columns(&paddle_box)
    {
        return false;
    }

    let v = &mut scene.transform_mut(ball).velocity;
    v.y = -v.y;
    let vy = v.y;
    candidates.nudge(ball, Point::new(0, 2 * vy));
    debug!("paddle hit {:?}, vy now {}", side, vy);
    true
}

/// Reflect any transform whose candidate would leave the fence sideways.
pub fn wall_collision(
    scene: &mut Scene,
    candidates: &mut Candidates,
    id: TransformId,
    fence: &Region,
) -> bool {
    let bounds = candidates.bounds(scene, id);
    if bounds.top_left.x >= fence.top_left.x && bounds.bot_right.x <= fence.bot_right.x {
        return false;
    }

    let v = &mut scene.transform_mut(id).velocity;
    v.x = -v.x;
    let vx = v.x;
    candidates.nudge(id, Point::new(2 * vx, 0));
    true
}

/// Award a point when the ball leaves through the top or bottom edge and
/// serve it again from the centre.
///
/// The top edge is checked first; a ball that somehow spans both edges in
/// one tick counts as a top exit.
pub fn goal_collision(
    scene: &mut Scene,
    candidates: &mut Candidates,
    fence: &Region,
) -> Option<PaddleSide> {
    let ball = TransformId::BALL;
    let bounds = candidates.bounds(scene, ball);

    let (scorer, serve) = if bounds.top_left.y < fence.top_left.y {
        (PaddleSide::Left.opponent(), SERVE_SPEED)
    } else if bounds.bot_right.y > fence.bot_right.y {
        (PaddleSide::Right.opponent(), -SERVE_SPEED)
    } else {
        return None;
    };

    scene.transform_mut(ball).velocity.y = serve;
    candidates.set(ball, Point::new(FIELD_CENTER_X, FIELD_CENTER_Y));
    Some(scorer)
}
