use rand::Rng;

use crate::config;
use crate::config::Bounds;
use crate::food::Food;
use crate::vecmath;
use crate::vecmath::Vector;

/// One circular body unit of the worm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub pos: Vector,
    pub radius: f64,
}

/// The creature itself: an ordered chain of segments, head first.
///
/// Energy is the single resource driving everything. Eating raises it,
/// accelerating drains it, and the segment radii (and even the segment
/// count) are re-derived from it after every change, see [`segment_scales`].
#[derive(Clone, Debug, PartialEq)]
pub struct Worm {
    /// index 0 is the head
    pub segments: Vec<Segment>,
    pub vel: Vector,
    pub acc: Vector,
    pub energy: f64,
}

/// Radius scale of each segment, head first, derived from the current energy.
///
/// `s(i) = i^(THICKNESS - i / scale)` with `scale = (energy + eps) * mult`,
/// evaluated at `i = 1 + offset, 2 + offset, ..` until the first value drops
/// below `SCALE_CUTOFF`. The head entry is always emitted and never scales
/// below 1, so even a starving worm keeps a full-size head.
///
/// More energy flattens the decay, so the sequence only ever gets longer as
/// energy rises. It stays finite for every energy since the exponent falls
/// linearly in `i`.
pub fn segment_scales(energy: f64) -> Vec<f64> {
    let scale = (energy + config::SCALE_EPSILON) * config::SCALE_MULTIPLIER;
    let mut index = 1. + config::INDEX_OFFSET;
    let head = index.powf(config::THICKNESS - index / scale).max(1.);
    let mut scales = vec![head];
    loop {
        index += 1.;
        let s = index.powf(config::THICKNESS - index / scale);
        if s < config::SCALE_CUTOFF {
            break;
        }
        scales.push(s);
    }
    scales
}

/// Single head-to-tail relaxation pass over the chain.
///
/// A follower that trails further behind its predecessor than the allowed
/// slack (`(1 - NODE_OVERLAP) * (r_prev + r_next)`) is pulled straight
/// toward it by the exact overshoot, landing on the slack distance. Pairs
/// already inside the slack are untouched. One pass only, so the body
/// visibly lags on sharp turns.
pub fn relax_chain(segments: &mut [Segment]) {
    for i in 1..segments.len() {
        let prev = segments[i - 1];
        let next = &mut segments[i];
        let dist = vecmath::dist(prev.pos, next.pos);
        let slack = (1. - config::NODE_OVERLAP) * (prev.radius + next.radius);
        let clip = dist - slack;
        if clip > 0. {
            let pull = vecmath::scale(vecmath::sub(prev.pos, next.pos), clip / dist);
            next.pos = vecmath::add(next.pos, pull);
        }
    }
}

impl Worm {
    pub fn new(pos: Vector) -> Self {
        let mut worm = Worm {
            segments: vec![Segment {
                pos,
                radius: config::BASE_SIZE,
            }],
            vel: [0.; 2],
            acc: [0.; 2],
            energy: config::INITIAL_ENERGY,
        };
        worm.resize(false);
        worm
    }

    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    /// Re-derives every segment radius from the current energy.
    ///
    /// When the profile got longer, new segments spawn on the former tail.
    /// Only a shrink (burning energy) may truncate the tail; growing never
    /// removes segments.
    fn resize(&mut self, shrink: bool) {
        let scales = segment_scales(self.energy);
        if shrink && self.segments.len() > scales.len() {
            self.segments.truncate(scales.len());
        }
        let tail = self.segments.last().expect("worm always has a head").pos;
        for (idx, scale) in scales.iter().enumerate() {
            let radius = scale * config::BASE_SIZE;
            match self.segments.get_mut(idx) {
                Some(segment) => segment.radius = radius,
                None => self.segments.push(Segment { pos: tail, radius }),
            }
        }
    }

    pub fn eat(&mut self, amount: f64) {
        self.energy += amount;
        self.resize(false);
    }

    /// Drains energy, floored at zero. The body is rebuilt to the shorter
    /// profile right away; dying is the caller's business (see [`Self::advance`]).
    pub fn burn(&mut self, amount: f64) {
        self.energy = (self.energy - amount).max(0.);
        self.resize(true);
    }

    /// Automatic steering: accelerate toward the nearest visible food.
    /// With nothing in sight the worm occasionally wanders off randomly,
    /// otherwise it just coasts.
    pub fn act<R: Rng>(&mut self, mut rng: R, foods: &[Food]) {
        let head = self.head().pos;
        let mut closest: Option<(f64, Vector)> = None;
        for food in foods {
            let dist = vecmath::dist(head, food.pos);
            if dist < config::VISION_RANGE && closest.is_none_or(|(best, _)| dist < best) {
                closest = Some((dist, food.pos));
            }
        }
        self.acc = match closest {
            Some((dist, target)) if dist > 0. => {
                vecmath::scale(vecmath::sub(target, head), 1. / dist)
            }
            Some(_) => [0.; 2],
            None if rng.random_bool(config::WANDER_CHANCE) => {
                let angle = rng.random_range(0.0..std::f64::consts::TAU);
                [angle.cos(), angle.sin()]
            }
            None => [0.; 2],
        };
    }

    /// Manual steering from the held direction keys.
    pub fn steer(&mut self, dir: Vector) {
        self.acc = dir;
    }

    /// Moves the head by one fixed step and drags the body behind it.
    ///
    /// Accelerating costs energy. If the drain exceeds what is left, energy
    /// is floored at zero and the move still happens; the return value is
    /// `false` exactly when the worm ran dry while trying to move, which the
    /// simulation answers with a respawn.
    pub fn advance(&mut self, dt: f64, bounds: &Bounds) -> bool {
        let drain = vecmath::len(self.acc) * config::MOVE_INEFFICIENCY * config::ENGINE_POWER * dt;
        if drain > 0. {
            self.burn(drain);
        }

        self.vel = vecmath::scale(self.vel, config::DRAG);
        self.vel = vecmath::add(self.vel, vecmath::scale(self.acc, config::ENGINE_POWER));

        let head = &mut self.segments[0];
        head.pos = bounds.clamp(vecmath::add(head.pos, self.vel));
        relax_chain(&mut self.segments);

        !(drain > 0. && self.energy <= 0.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    const BOUNDS: Bounds = Bounds {
        width: 1600.,
        height: 900.,
    };

    #[test]
    fn scales_are_finite_and_non_increasing() {
        for energy in [0.01, 0.1, 0.5, 1., 2., 5., 20., 100., 1000.] {
            let scales = segment_scales(energy);
            assert!(!scales.is_empty());
            assert!(scales[0] >= 1.);
            for pair in scales.windows(2) {
                assert!(
                    pair[1] <= pair[0] + 1e-12,
                    "profile not non-increasing at energy {energy}: {pair:?}"
                );
            }
            for s in &scales {
                assert!(s.is_finite());
                assert!(*s >= config::SCALE_CUTOFF);
            }
        }
    }

    #[test]
    fn scale_profile_at_unit_energy() {
        // fixed profile for energy 1.0 with the shipped tuning constants
        let expected = [
            1.,
            0.888664516318,
            0.766662905482,
            0.645157306761,
            0.532869194068,
        ];
        let scales = segment_scales(1.);
        assert_eq!(scales.len(), expected.len());
        for (got, want) in scales.iter().zip(&expected) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }

        let worm = Worm::new(BOUNDS.center());
        assert_eq!(worm.segments.len(), expected.len());
        for (segment, want) in worm.segments.iter().zip(&expected) {
            assert!((segment.radius - want * config::BASE_SIZE).abs() < 1e-9);
        }
    }

    #[test]
    fn longer_sequences_for_more_energy() {
        let mut previous = 0;
        for energy in [0., 0.25, 0.5, 1., 2., 5., 20.] {
            let count = segment_scales(energy).len();
            assert!(count >= previous);
            previous = count;
        }
    }

    #[test]
    fn relax_pulls_stragglers_onto_the_slack_distance() {
        let mut chain = vec![
            Segment {
                pos: [0., 0.],
                radius: 10.,
            },
            Segment {
                pos: [40., 0.],
                radius: 8.,
            },
            Segment {
                pos: [40., 30.],
                radius: 6.,
            },
        ];
        relax_chain(&mut chain);
        for pair in chain.windows(2) {
            let slack = (1. - config::NODE_OVERLAP) * (pair[0].radius + pair[1].radius);
            let dist = vecmath::dist(pair[0].pos, pair[1].pos);
            assert!(dist <= slack + 1e-9, "dist {dist} exceeds slack {slack}");
        }
    }

    #[test]
    fn relax_leaves_close_pairs_alone() {
        let mut chain = vec![
            Segment {
                pos: [0., 0.],
                radius: 10.,
            },
            Segment {
                pos: [3., 0.],
                radius: 10.,
            },
        ];
        let before = chain.clone();
        relax_chain(&mut chain);
        assert_eq!(chain, before);
    }

    #[test]
    fn eat_then_burn_restores_energy() {
        let mut worm = Worm::new(BOUNDS.center());
        let energy = worm.energy;
        let count = worm.segments.len();

        worm.eat(0.5);
        assert!(worm.energy > energy);
        assert!(worm.segments.len() >= count);

        worm.burn(0.5);
        assert!((worm.energy - energy).abs() < 1e-9);
        assert!(worm.segments.len() <= count);
    }

    #[test]
    fn growth_appends_on_the_tail_and_never_removes() {
        let mut worm = Worm::new(BOUNDS.center());
        let tail = worm.segments.last().unwrap().pos;
        let count = worm.segments.len();
        worm.eat(4.);
        assert!(worm.segments.len() > count);
        for segment in &worm.segments[count..] {
            assert_eq!(segment.pos, tail);
        }
    }

    #[test]
    fn burn_floors_at_zero_and_truncates() {
        let mut worm = Worm::new(BOUNDS.center());
        worm.burn(worm.energy + 10.);
        assert_eq!(worm.energy, 0.);
        assert_eq!(worm.segments.len(), segment_scales(0.).len());
    }

    #[test]
    fn head_stays_inside_the_field() {
        let mut worm = Worm::new([10., 10.]);
        worm.steer([-1., -1.]);
        for _ in 0..300 {
            worm.advance(config::STEP_SIZE, &BOUNDS);
            let head = worm.head().pos;
            assert!(head[0] >= 0. && head[0] <= BOUNDS.width);
            assert!(head[1] >= 0. && head[1] <= BOUNDS.height);
        }
    }

    #[test]
    fn dies_when_running_dry_while_moving() {
        let mut worm = Worm::new(BOUNDS.center());
        worm.steer([1., 0.]);
        let mut survived = 0_u64;
        while worm.advance(config::STEP_SIZE, &BOUNDS) {
            survived += 1;
            assert!(survived < 1_000_000, "worm never starved");
        }
        assert_eq!(worm.energy, 0.);

        // coasting without acceleration costs nothing, no death
        let mut idle = Worm::new(BOUNDS.center());
        idle.burn(idle.energy);
        idle.steer([0., 0.]);
        for _ in 0..100 {
            assert!(idle.advance(config::STEP_SIZE, &BOUNDS));
        }
    }

    #[test]
    fn act_targets_the_nearest_visible_food() {
        let mut worm = Worm::new([100., 100.]);
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let foods = [
            Food::new([200., 100.]),
            Food::new([400., 100.]),
            // out of vision range
            Food::new([100., 800.]),
        ];
        worm.act(&mut rng, &foods);
        assert!((worm.acc[0] - 1.).abs() < 1e-12);
        assert!(worm.acc[1].abs() < 1e-12);

        // only the far one left: nothing visible, mostly coasting
        let far = [Food::new([100., 800.])];
        let mut wandered = 0;
        for _ in 0..1_000 {
            worm.act(&mut rng, &far);
            if worm.acc != [0.; 2] {
                wandered += 1;
                assert!((vecmath::len(worm.acc) - 1.).abs() < 1e-9);
            }
        }
        // 5% per tick, loosely checked
        assert!(wandered > 10 && wandered < 150, "wandered {wandered} times");
    }
}
