use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg as DetRng;

use crate::config;
use crate::config::Bounds;
use crate::food::Food;
use crate::vecmath;
use crate::vecmath::Vector;
use crate::virus::Virus;
use crate::worm::Worm;

/// Snapshot of the held direction keys, sampled once per update.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    /// Direction the player is steering, unit length on diagonals.
    pub fn direction(&self) -> Vector {
        let mut dir = [0.; 2];
        if self.up {
            dir[1] -= 1.;
        }
        if self.down {
            dir[1] += 1.;
        }
        if self.left {
            dir[0] -= 1.;
        }
        if self.right {
            dir[0] += 1.;
        }
        if dir[0] != 0. && dir[1] != 0. {
            dir = vecmath::scale(dir, std::f64::consts::FRAC_1_SQRT_2);
        }
        dir
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Automatic,
    Manual,
}

/// The simulation container. Owns every entity and steps the whole world
/// forward in fixed increments, all single-threaded.
#[derive(Debug)]
pub struct App {
    worm: Worm,
    foods: Vec<Food>,
    viruses: Vec<Virus>,
    bounds: Bounds,
    control: Control,
    rng: DetRng,
    time: u64,
}

impl App {
    pub fn new(bounds: Bounds, seed: u64) -> Self {
        App {
            worm: Worm::new(bounds.center()),
            foods: Vec::new(),
            viruses: Vec::new(),
            bounds,
            control: Control::Automatic,
            rng: DetRng::seed_from_u64(seed),
            time: 0,
        }
    }

    pub fn worm(&self) -> &Worm {
        &self.worm
    }
    pub fn foods(&self) -> &[Food] {
        &self.foods
    }
    pub fn viruses(&self) -> &[Virus] {
        &self.viruses
    }
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }
    pub fn control(&self) -> Control {
        self.control
    }
    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn toggle_control(&mut self) -> Control {
        self.control = match self.control {
            Control::Automatic => Control::Manual,
            Control::Manual => Control::Automatic,
        };
        self.control
    }

    /// One fixed simulation step.
    pub fn update(&mut self, input: &InputState) {
        self.time += 1;
        let dt = config::STEP_SIZE;

        match self.control {
            Control::Manual => self.worm.steer(input.direction()),
            Control::Automatic => self.worm.act(&mut self.rng, &self.foods),
        }
        if !self.worm.advance(dt, &self.bounds) {
            #[cfg(feature = "debug")]
            log::debug!("worm starved at tick {}, respawning", self.time);
            self.worm = Worm::new(self.bounds.center());
        }

        // food: bernoulli spawn, decay, consumption
        if self.rng.random_bool(config::FOOD_CHANCE) {
            let pos = self.random_pos();
            self.foods.push(Food::new(pos));
        }
        let head = *self.worm.head();
        let mut eaten = 0_u32;
        self.foods.retain_mut(|food| {
            if vecmath::dist(head.pos, food.pos) < head.radius + food.radius {
                eaten += 1;
                return false;
            }
            food.decay()
        });
        for _ in 0..eaten {
            self.worm.eat(config::FOOD_ENERGY);
        }

        // viruses: same spawn/decay/consume pattern, plus contact drain
        if self.rng.random_bool(config::VIRUS_CHANCE) {
            let pos = self.random_pos();
            self.viruses.push(Virus::new(pos));
        }
        let head = *self.worm.head();
        let mut hits = 0_u32;
        self.viruses.retain_mut(|virus| {
            if virus.touches(head.pos, head.radius) {
                hits += 1;
                return false;
            }
            virus.update(dt, head.pos)
        });
        for _ in 0..hits {
            #[cfg(feature = "debug")]
            log::debug!("virus hit at tick {}", self.time);
            self.worm.burn(config::VIRUS_ENERGY_DRAIN);
        }
    }

    fn random_pos(&mut self) -> Vector {
        [
            self.rng.random_range(0.0..self.bounds.width),
            self.rng.random_range(0.0..self.bounds.height),
        ]
    }

    pub fn report(&self) {
        println!("report for    : {}", self.time);
        println!("control       : {:?}", self.control);
        println!("energy        : {:.3}", self.worm.energy);
        println!("segments      : {}", self.worm.segments.len());
        println!("food          : {}", self.foods.len());
        println!("viruses       : {}", self.viruses.len());
        println!();
    }
}

impl PartialEq for App {
    fn eq(&self, other: &Self) -> bool {
        self.worm == other.worm
            && self.foods == other.foods
            && self.viruses == other.viruses
            && self.control == other.control
            && self.time == other.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds {
        width: 1600.,
        height: 900.,
    };

    #[test]
    fn determinism() {
        let mut app1 = App::new(BOUNDS, 1234);
        let mut app2 = App::new(BOUNDS, 1234);
        let input = InputState::default();
        for _ in 0..5_000 {
            app1.update(&input);
            app2.update(&input);
        }
        assert_eq!(app1, app2);
    }

    #[test]
    fn head_never_leaves_the_field() {
        let mut app = App::new(BOUNDS, 7);
        app.toggle_control();
        assert_eq!(app.control(), Control::Manual);
        let input = InputState {
            up: true,
            right: true,
            ..Default::default()
        };
        for _ in 0..2_000 {
            app.update(&input);
            let head = app.worm().head().pos;
            assert!(head[0] >= 0. && head[0] <= BOUNDS.width);
            assert!(head[1] >= 0. && head[1] <= BOUNDS.height);
        }
    }

    #[test]
    fn food_on_the_head_is_consumed() {
        let mut app = App::new(BOUNDS, 7);
        let head = app.worm().head().pos;
        let energy = app.worm().energy;
        app.foods.push(Food::new(head));
        app.update(&InputState::default());
        assert!((app.worm().energy - (energy + config::FOOD_ENERGY)).abs() < 1e-9);
        assert!(!app.foods.iter().any(|f| f.pos == head));
    }

    #[test]
    fn active_virus_contact_drains_energy() {
        let mut app = App::new(BOUNDS, 7);
        let head = app.worm().head().pos;
        let segments = app.worm().segments.len();
        let mut virus = Virus::new(head);
        virus.active = true;
        app.viruses.push(virus);

        app.update(&InputState::default());
        let expected = config::INITIAL_ENERGY - config::VIRUS_ENERGY_DRAIN;
        assert!((app.worm().energy - expected).abs() < 1e-9);
        assert!(app.worm().segments.len() < segments);
        assert!(app.viruses.is_empty());
    }

    #[test]
    fn dormant_virus_contact_is_harmless() {
        let mut app = App::new(BOUNDS, 7);
        let head = app.worm().head().pos;
        app.viruses.push(Virus::new(head));
        app.update(&InputState::default());
        assert_eq!(app.worm().energy, config::INITIAL_ENERGY);
        assert_eq!(app.viruses.len(), 1);
    }

    #[test]
    fn starved_worm_respawns_in_the_center() {
        let mut app = App::new(BOUNDS, 7);
        app.toggle_control();
        let input = InputState {
            left: true,
            ..Default::default()
        };
        // drain the whole tank, then one more tick to die and respawn
        app.worm.burn(app.worm.energy);
        app.update(&input);
        app.update(&InputState::default());
        assert_eq!(app.worm().energy, config::INITIAL_ENERGY);
        let head = app.worm().head().pos;
        // head has moved at most one respawn-tick away from the center
        assert!(vecmath::dist(head, BOUNDS.center()) < config::BASE_SIZE);
    }

    #[test]
    fn diagonal_input_is_unit_length() {
        let input = InputState {
            up: true,
            left: true,
            ..Default::default()
        };
        assert!((vecmath::len(input.direction()) - 1.).abs() < 1e-12);
        let single = InputState {
            right: true,
            ..Default::default()
        };
        assert_eq!(single.direction(), [1., 0.]);
    }
}
