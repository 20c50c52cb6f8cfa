use crate::foundation::core::{Point, Vec2};

/// Point mass with a spin, advanced one frame at a time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Current position.
    pub position: Point,
    /// Displacement per frame.
    pub velocity: Vec2,
    /// Current rotation in radians.
    pub rotation: f64,
    /// Rotation added per frame.
    pub spin: f64,
    /// Set once the body touched the floor; a landed body never moves again.
    pub landed: bool,
}

impl Body {
    /// Body at rest at `position`, about to move with `velocity`.
    pub fn launch(position: Point, velocity: Vec2, rotation: f64, spin: f64) -> Self {
        Self {
            position,
            velocity,
            rotation,
            spin,
            landed: false,
        }
    }

    /// One frame of flight: position advances by the current velocity, then gravity is added to
    /// the vertical velocity.
    pub fn step(&mut self, gravity: f64) {
        if self.landed {
            return;
        }
        self.position += self.velocity;
        self.velocity.y += gravity;
        self.rotation += self.spin;
    }

    /// [`Body::step`], then clamp to `floor_y` and freeze on contact.
    ///
    /// Returns `true` while the body has landed.
    pub fn step_above_floor(&mut self, gravity: f64, floor_y: f64) -> bool {
        self.step(gravity);
        if !self.landed && self.position.y >= floor_y {
            self.position.y = floor_y;
            self.velocity = Vec2::ZERO;
            self.spin = 0.0;
            self.landed = true;
        }
        self.landed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/synth/physics.rs"]
mod tests;
