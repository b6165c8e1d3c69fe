use crate::config;
use crate::vecmath::Vector;

/// A passive particle that shrinks a little every tick until something eats it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Food {
    pub pos: Vector,
    pub radius: f64,
}

impl Food {
    pub fn new(pos: Vector) -> Self {
        Self {
            pos,
            radius: config::FOOD_RADIUS,
        }
    }

    /// Shrinks by the fixed per-tick decay.
    /// Returns whether the particle is still big enough to keep around.
    pub fn decay(&mut self) -> bool {
        self.radius -= config::FOOD_DECAY;
        self.radius > config::FOOD_MIN_RADIUS
    }
}
