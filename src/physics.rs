//! Fixed-step integrator.
//!
//! A tick first predicts where every moving layer wants to go, lets the
//! collision engine veto or bend those predictions, and only then stores
//! them as the layers' pending positions.

use embedded_graphics::prelude::Point;

use crate::config::MAX_SPEED;
use crate::geometry::{advance, Region};
use crate::layer::{Scene, TransformId, MOTION_COUNT};

/// Candidate next positions, indexed like the motion list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Candidates([Point; MOTION_COUNT]);

impl Candidates {
    pub fn get(&self, id: TransformId) -> Point {
        self.0[id.0]
    }

    pub fn set(&mut self, id: TransformId, p: Point) {
        self.0[id.0] = p;
    }

    pub fn nudge(&mut self, id: TransformId, offset: Point) {
        self.0[id.0] = advance(self.0[id.0], offset);
    }

    /// Bounding box of a transform's shape at its candidate position.
    pub fn bounds(&self, scene: &Scene, id: TransformId) -> Region {
        scene.body(id).shape.bounds_at(self.get(id))
    }
}

/// Pending position plus velocity, for every transform.
pub fn predict(scene: &Scene) -> Candidates {
    let mut next = [Point::zero(); MOTION_COUNT];
    for (slot, transform) in next.iter_mut().zip(scene.motion()) {
        let v = transform.velocity;
        debug_assert!(v.x.abs() <= MAX_SPEED && v.y.abs() <= MAX_SPEED);
        *slot = advance(scene.layer(transform.layer).next, v);
    }
    Candidates(next)
}

/// Store the surviving candidates as pending positions.
pub fn integrate(scene: &mut Scene, candidates: &Candidates) {
    for id in TransformId::ALL {
        scene.body_mut(id).next = candidates.get(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::LayerId;

    #[test]
    fn predict_adds_velocity_to_pending_position() {
        let mut scene = Scene::new();
        scene.layer_mut(LayerId::BALL).next = Point::new(100, 100);
        scene.transform_mut(TransformId::BALL).velocity = Point::new(1, -3);
        let candidates = predict(&scene);
        assert_eq!(candidates.get(TransformId::BALL), Point::new(101, 97));
        // paddles start still
        assert_eq!(
            candidates.get(TransformId::LEFT_PADDLE),
            scene.layer(LayerId::LEFT_PADDLE).next
        );
    }

    #[test]
    fn integrate_writes_pending_only() {
        let mut scene = Scene::new();
        let before = scene.layer(LayerId::BALL).pos;
        let mut candidates = predict(&scene);
        candidates.nudge(TransformId::BALL, Point::new(2, 2));
        integrate(&mut scene, &candidates);
        let ball = scene.layer(LayerId::BALL);
        assert_eq!(ball.pos, before);
        assert_eq!(ball.next, candidates.get(TransformId::BALL));
    }
}
