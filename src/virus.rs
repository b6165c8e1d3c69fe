use crate::config;
use crate::vecmath;
use crate::vecmath::Vector;

/// Predator particle.
///
/// Spawns dormant and sits still until its inactivity timer runs out, then
/// turns active for good: it homes toward the worm head whenever the head is
/// inside its vision range, shrinks a little every tick, and despawns once
/// it has shrunk below the size threshold. An active virus that touches the
/// head is consumed on impact and costs the worm a fixed chunk of energy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Virus {
    pub pos: Vector,
    pub vel: Vector,
    pub acc: Vector,
    pub radius: f64,
    pub age: f64,
    pub active: bool,
}

impl Virus {
    pub fn new(pos: Vector) -> Self {
        Self {
            pos,
            vel: [0.; 2],
            acc: [0.; 2],
            radius: config::VIRUS_RADIUS,
            age: 0.,
            active: false,
        }
    }

    /// One fixed step. Returns whether the virus should stay in the world.
    pub fn update(&mut self, dt: f64, head: Vector) -> bool {
        self.age += dt;
        if !self.active {
            if self.age >= config::VIRUS_INACTIVITY {
                self.active = true;
            }
            return true;
        }

        let dist = vecmath::dist(self.pos, head);
        self.acc = if dist > 0. && dist < config::VIRUS_VISION {
            vecmath::scale(vecmath::sub(head, self.pos), 1. / dist)
        } else {
            [0.; 2]
        };
        self.vel = vecmath::add(
            vecmath::scale(self.vel, config::VIRUS_DRAG),
            vecmath::scale(self.acc, config::VIRUS_POWER),
        );
        self.pos = vecmath::add(self.pos, self.vel);

        self.radius -= config::VIRUS_DECAY;
        self.radius > config::VIRUS_MIN_RADIUS
    }

    /// Contact check against the worm head. Dormant viruses are harmless.
    pub fn touches(&self, pos: Vector, radius: f64) -> bool {
        self.active && vecmath::dist(self.pos, pos) < self.radius + radius
    }
}
