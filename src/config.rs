use crate::vecmath::Vector;

pub const WINDOW_WIDTH: f64 = 1600.;
pub const WINDOW_HEIGHT: f64 = 900.;

/// simulation step, the update rate is fixed at 60hz
pub const STEP_SIZE: f64 = 1. / 60.;
pub const RENDER_FPS: u64 = 120;

// worm
pub const BASE_SIZE: f64 = 10.;
/// adjacent segments may overlap by this fraction of their summed radii
pub const NODE_OVERLAP: f64 = 0.5;
pub const ENGINE_POWER: f64 = 0.6;
pub const DRAG: f64 = 0.9;
pub const VISION_RANGE: f64 = 300.;
/// chance per tick to wander in a random direction when no food is visible
pub const WANDER_CHANCE: f64 = 0.05;
/// fraction of the engine output lost as heat, drained from energy
pub const MOVE_INEFFICIENCY: f64 = 0.15;
pub const INITIAL_ENERGY: f64 = 1.0;
pub const FOOD_ENERGY: f64 = 0.25;

// body profile, see worm::segment_scales
pub const SCALE_EPSILON: f64 = 0.1;
pub const SCALE_MULTIPLIER: f64 = 12.;
pub const THICKNESS: f64 = 0.;
pub const SCALE_CUTOFF: f64 = 0.5;
pub const INDEX_OFFSET: f64 = 0.1;

// food
pub const FOOD_CHANCE: f64 = 0.02;
pub const FOOD_RADIUS: f64 = 10.;
pub const FOOD_DECAY: f64 = 0.02;
pub const FOOD_MIN_RADIUS: f64 = 0.1;

// virus
pub const VIRUS_CHANCE: f64 = 0.005;
pub const VIRUS_RADIUS: f64 = 12.;
pub const VIRUS_DECAY: f64 = 0.015;
pub const VIRUS_MIN_RADIUS: f64 = 2.;
/// seconds a freshly spawned virus sits dormant
pub const VIRUS_INACTIVITY: f64 = 3.;
pub const VIRUS_VISION: f64 = 400.;
pub const VIRUS_POWER: f64 = 0.35;
pub const VIRUS_DRAG: f64 = 0.9;
pub const VIRUS_ENERGY_DRAIN: f64 = 0.5;

/// The field rectangle. Handed to the simulation at construction and passed
/// on to whatever needs to know where the world ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn center(&self) -> Vector {
        [self.width / 2., self.height / 2.]
    }

    pub fn clamp(&self, pos: Vector) -> Vector {
        [pos[0].clamp(0., self.width), pos[1].clamp(0., self.height)]
    }
}
