//! Scalar sample generators.
//!
//! A shader owns its samplers and mutates them in place while shading, so a
//! sampler is `Send` (it can move to a worker lane) but is never shared
//! between lanes: each lane builds its own.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Largest `f32` strictly below one.
const ONE_MINUS_EPSILON: f32 = 1.0 - f32::EPSILON / 2.0;

/// Generator of values in `[0, 1)`.
pub trait Sampler: Send {
    /// Returns the next value in `[0, 1)`.
    fn sample(&mut self) -> f32;

    /// Restarts the sequence from its beginning. Calling it twice is the same
    /// as calling it once.
    fn reset(&mut self);
}

/// Seeded pseudo-random sampler.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    seed: u64,
    rng: StdRng,
}

impl RandomSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Sampler for RandomSampler {
    fn sample(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    fn reset(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }
}

// Based on Physically Based Rendering 3rd ed.
// https://www.pbr-book.org/3ed-2018/Sampling_and_Reconstruction/The_Halton_Sampler

const PRIMES: [u32; 8] = [2, 3, 5, 7, 11, 13, 17, 19];

/// Halton low-discrepancy sequence in a single prime base.
#[derive(Debug, Clone)]
pub struct HaltonSampler {
    base: u32,
    index: u64,
}

impl HaltonSampler {
    /// Sampler for the given sequence dimension. Dimensions past the prime
    /// table wrap around.
    pub fn new(dimension: usize) -> Self {
        Self {
            base: PRIMES[dimension % PRIMES.len()],
            index: 0,
        }
    }

    pub fn base(&self) -> u32 {
        self.base
    }
}

impl Sampler for HaltonSampler {
    fn sample(&mut self) -> f32 {
        let value = radical_inverse(self.base, self.index);
        self.index += 1;
        value
    }

    fn reset(&mut self) {
        self.index = 0;
    }
}

/// Mirror the base-`base` digits of `index` around the radix point.
fn radical_inverse(base: u32, mut index: u64) -> f32 {
    let base = u64::from(base);
    let inv_base = 1.0 / base as f64;
    let mut reversed = 0u64;
    let mut inv_base_n = 1.0f64;

    while index > 0 {
        let next = index / base;
        let digit = index - next * base;
        reversed = reversed * base + digit;
        inv_base_n *= inv_base;
        index = next;
    }

    ((reversed as f64 * inv_base_n) as f32).min(ONE_MINUS_EPSILON)
}

/// Always returns the same value.
#[derive(Debug, Clone, Copy)]
pub struct ConstantSampler {
    value: f32,
}

impl ConstantSampler {
    /// The value is clamped into `[0, 1)`.
    pub fn new(value: f32) -> Self {
        Self {
            value: value.clamp(0.0, ONE_MINUS_EPSILON),
        }
    }
}

impl Sampler for ConstantSampler {
    fn sample(&mut self) -> f32 {
        self.value
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn take(sampler: &mut impl Sampler, count: usize) -> Vec<f32> {
        (0..count).map(|_| sampler.sample()).collect()
    }

    #[test]
    fn test_random_sampler_range() {
        let mut sampler = RandomSampler::new(1);
        assert!(take(&mut sampler, 10_000)
            .iter()
            .all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_random_sampler_reset_restarts_sequence() {
        let mut sampler = RandomSampler::new(42);
        let first = take(&mut sampler, 16);

        sampler.reset();
        assert_eq!(take(&mut sampler, 16), first);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut once = RandomSampler::new(9);
        let mut twice = RandomSampler::new(9);
        take(&mut once, 5);
        take(&mut twice, 11);

        once.reset();
        twice.reset();
        twice.reset();
        assert_eq!(take(&mut once, 32), take(&mut twice, 32));

        let mut halton = HaltonSampler::new(1);
        take(&mut halton, 3);
        halton.reset();
        halton.reset();
        assert_eq!(take(&mut halton, 3), vec![0.0, 1.0 / 3.0, 2.0 / 3.0]);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = take(&mut RandomSampler::new(1), 8);
        let b = take(&mut RandomSampler::new(2), 8);
        assert_ne!(a, b);
    }

    #[test]
    fn test_halton_base_two() {
        let mut sampler = HaltonSampler::new(0);
        assert_eq!(sampler.base(), 2);
        assert_eq!(take(&mut sampler, 6), vec![0.0, 0.5, 0.25, 0.75, 0.125, 0.625]);
    }

    #[test]
    fn test_halton_dimension_wraps() {
        assert_eq!(HaltonSampler::new(PRIMES.len()).base(), 2);
        assert_eq!(HaltonSampler::new(2).base(), 5);
    }

    #[test]
    fn test_halton_stays_below_one() {
        let mut sampler = HaltonSampler::new(3);
        assert!(take(&mut sampler, 5_000)
            .iter()
            .all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_constant_sampler_clamps() {
        let mut high = ConstantSampler::new(1.0);
        assert!(high.sample() < 1.0);

        let mut low = ConstantSampler::new(-3.0);
        assert_eq!(low.sample(), 0.0);

        let mut mid = ConstantSampler::new(0.75);
        mid.reset();
        assert_eq!(take(&mut mid, 3), vec![0.75; 3]);
    }
}
