//! Vertical sag applied to strand midpoints.
//!
//! The drape draws from whatever RNG it is handed and never seeds it; callers
//! decide where the reseed checkpoints are.

use rand::Rng;

use crate::params::WebParams;
use crate::strand::Strand;

/// Length divisor used by the length solver.
const LENGTH_SOLVER_DIVISOR: f64 = 5.0;

/// Drape configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drape {
    pub min: f64,
    pub max: f64,
    pub length_solver: bool,
}

impl Drape {
    pub fn from_params(params: &WebParams) -> Self {
        Self {
            min: params.drape_min,
            max: params.drape_max,
            length_solver: params.length_solver,
        }
    }

    /// Uniform draw between the bounds as given, in either order.
    pub fn sample_amount<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.gen();
        self.min + (self.max - self.min) * u
    }

    fn scale(&self, strand: &Strand) -> f64 {
        if self.length_solver {
            strand.span() / LENGTH_SOLVER_DIVISOR
        } else {
            1.0
        }
    }

    /// Offset `mid.z` by one drape draw. Consumes exactly one draw.
    pub fn apply<R: Rng + ?Sized>(&self, mut strand: Strand, rng: &mut R) -> Strand {
        let drape = self.sample_amount(rng);
        strand.mid.z += drape * self.scale(&strand);
        strand
    }

    /// Drape every strand in order.
    pub fn apply_all<R: Rng + ?Sized>(&self, strands: &mut [Strand], rng: &mut R) {
        for s in strands.iter_mut() {
            *s = self.apply(*s, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strand::Vec3;
    use rand::{rngs::StdRng, SeedableRng};

    fn strand(len: f64) -> Strand {
        Strand::between(Vec3::new(0.0, 0.0, 1.0), Vec3::new(len, 0.0, 1.0))
    }

    #[test]
    fn zero_bounds_leave_mid_untouched() {
        let mut rng = StdRng::seed_from_u64(5);
        for length_solver in [true, false] {
            let d = Drape {
                min: 0.0,
                max: 0.0,
                length_solver,
            };
            let s = strand(10.0);
            assert_eq!(d.apply(s, &mut rng), s);
        }
    }

    #[test]
    fn only_the_vertical_component_moves() {
        let mut rng = StdRng::seed_from_u64(11);
        let d = Drape {
            min: -1.0,
            max: 0.0,
            length_solver: true,
        };
        let s = strand(5.0);
        let draped = d.apply(s, &mut rng);
        assert_eq!(draped.start, s.start);
        assert_eq!(draped.end, s.end);
        assert_eq!(draped.mid.xy(), s.mid.xy());
        // length 5 -> scale 1, drape in [-1, 0]
        let dz = draped.mid.z - s.mid.z;
        assert!((-1.0..=0.0).contains(&dz));
    }

    #[test]
    fn length_solver_scales_with_span() {
        let d_fixed = Drape {
            min: -1.0,
            max: -1.0,
            length_solver: false,
        };
        let d_len = Drape {
            length_solver: true,
            ..d_fixed
        };
        let mut rng = StdRng::seed_from_u64(0);
        let s = strand(20.0);
        assert!((d_fixed.apply(s, &mut rng).mid.z - 0.0).abs() < 1e-12);
        assert!((d_len.apply(s, &mut rng).mid.z - (1.0 - 4.0)).abs() < 1e-12);
    }

    #[test]
    fn reversed_bounds_draw_between_them() {
        let d = Drape {
            min: 1.0,
            max: -1.0,
            length_solver: false,
        };
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let a = d.sample_amount(&mut rng);
            assert!((-1.0..=1.0).contains(&a));
        }
    }
}
