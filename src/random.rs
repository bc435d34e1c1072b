//! Deterministic pseudo-random generators.
//!
//! `MTGenerator` is a from-scratch MT19937 (Mersenne Twister)
//! implementation seeded by a 32-bit integer; `NormalGenerator` layers
//! Box-Muller Gaussian sampling on top of one. Both are deterministic
//! for a fixed seed on any platform, unlike `rand`'s `StdRng`, whose
//! algorithm is an implementation detail that can change between
//! crate versions and would silently break bit-for-bit reproducibility
//! of a docking run.

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// A uniform generator producing `[0, 1)` reals and inclusive integer
/// ranges. Implemented by [`MTGenerator`].
pub trait UniformGenerator {
    fn next_float(&mut self) -> f64;
    fn randint(&mut self, lo: i64, hi: i64) -> i64;
}

#[derive(Clone)]
pub struct MTGenerator {
    state: [u32; N],
    index: usize,
}

impl MTGenerator {
    pub fn new(seed: u64) -> Self {
        let mut state = [0u32; N];
        state[0] = seed as u32;
        for i in 1..N {
            state[i] = (1_812_433_253u32
                .wrapping_mul(state[i - 1] ^ (state[i - 1] >> 30)))
            .wrapping_add(i as u32);
        }
        MTGenerator { state, index: N }
    }

    fn generate(&mut self) {
        for i in 0..N {
            let y = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % N] & LOWER_MASK);
            let mut next = self.state[(i + M) % N] ^ (y >> 1);
            if y & 1 != 0 {
                next ^= MATRIX_A;
            }
            self.state[i] = next;
        }
        self.index = 0;
    }

    fn next_u32(&mut self) -> u32 {
        if self.index >= N {
            self.generate();
        }
        let mut y = self.state[self.index];
        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^= y >> 18;
        self.index += 1;
        y
    }
}

impl UniformGenerator for MTGenerator {
    fn next_float(&mut self) -> f64 {
        (self.next_u32() as f64) / (u32::MAX as f64 + 1.0)
    }

    fn randint(&mut self, lo: i64, hi: i64) -> i64 {
        debug_assert!(hi >= lo);
        let span = (hi - lo + 1) as f64;
        lo + (self.next_float() * span) as i64
    }
}

/// I.i.d. Gaussian sampler built on top of an `MTGenerator` substream,
/// used to draw ANM extent amplitudes.
pub struct NormalGenerator {
    rng: MTGenerator,
    mu: f64,
    sigma: f64,
    spare: Option<f64>,
}

impl NormalGenerator {
    pub fn new(seed: u64, mu: f64, sigma: f64) -> Self {
        NormalGenerator {
            rng: MTGenerator::new(seed),
            mu,
            sigma,
            spare: None,
        }
    }

    /// Draws one Gaussian sample via the Box-Muller transform.
    pub fn sample(&mut self) -> f64 {
        if let Some(value) = self.spare.take() {
            return self.mu + self.sigma * value;
        }
        let mut u1 = self.rng.next_float();
        if u1 < 1e-12 {
            u1 = 1e-12;
        }
        let u2 = self.rng.next_float();
        let radius = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * std::f64::consts::PI * u2;
        self.spare = Some(radius * theta.sin());
        self.mu + self.sigma * (radius * theta.cos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducible_for_fixed_seed() {
        let mut a = MTGenerator::new(324_324);
        let mut b = MTGenerator::new(324_324);
        for _ in 0..100 {
            assert_eq!(a.next_float(), b.next_float());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = MTGenerator::new(1);
        let mut b = MTGenerator::new(2);
        assert_ne!(a.next_float(), b.next_float());
    }

    #[test]
    fn test_uniform_range() {
        let mut rng = MTGenerator::new(42);
        for _ in 0..1000 {
            let v = rng.next_float();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_randint_inclusive_bounds() {
        let mut rng = MTGenerator::new(7);
        for _ in 0..1000 {
            let v = rng.randint(3, 5);
            assert!((3..=5).contains(&v));
        }
    }

    #[test]
    fn test_normal_generator_reproducible() {
        let mut a = NormalGenerator::new(1, 0.0, 0.3);
        let mut b = NormalGenerator::new(1, 0.0, 0.3);
        for _ in 0..50 {
            assert_eq!(a.sample(), b.sample());
        }
    }
}
