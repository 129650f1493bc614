use rand::distributions::Distribution;
use rand::Rng;

use crate::catalog::Weights;

/// Draws one position out of a categorical distribution
pub trait CategoricalSampler {
    /// Returns an index in `0..weights.len()`. Positions with a weight of zero must never be
    /// returned.
    fn sample_index(&mut self, weights: &Weights) -> usize;
}

/// Weighted sampling with replacement backed by any [`rand::Rng`]
#[derive(Debug, Clone)]
pub struct RngSampler<R> {
    rng: R,
}

impl<R: Rng> RngSampler<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        RngSampler { rng }
    }
}

impl<R: Rng> CategoricalSampler for RngSampler<R> {
    fn sample_index(&mut self, weights: &Weights) -> usize {
        weights.distribution().sample(&mut self.rng)
    }
}

impl<S: CategoricalSampler + ?Sized> CategoricalSampler for &mut S {
    fn sample_index(&mut self, weights: &Weights) -> usize {
        (**self).sample_index(weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_weight_never_drawn() {
        let weights = Weights::try_from(vec![0.0, 1.0, 0.0]).unwrap();
        let mut sampler = RngSampler::new(StdRng::seed_from_u64(1));
        for _ in 0..1_000 {
            assert_eq!(sampler.sample_index(&weights), 1);
        }
    }

    #[test]
    fn test_draws_follow_weights() {
        let weights = Weights::try_from(vec![0.8, 0.2]).unwrap();
        let mut sampler = RngSampler::new(StdRng::seed_from_u64(42));
        let mut counts = [0_u32; 2];
        for _ in 0..10_000 {
            counts[sampler.sample_index(&weights)] += 1;
        }
        // Expected 8000 / 2000, the bound is many standard deviations wide
        assert!((7_500..8_500).contains(&counts[0]), "{:?}", counts);
        assert!((1_500..2_500).contains(&counts[1]), "{:?}", counts);
    }

    #[test]
    fn test_same_seed_same_draws() {
        let weights = Weights::try_from(vec![0.25, 0.25, 0.5]).unwrap();
        let mut first = RngSampler::new(StdRng::seed_from_u64(7));
        let mut second = RngSampler::new(StdRng::seed_from_u64(7));
        let a: Vec<usize> = (0..100).map(|_| first.sample_index(&weights)).collect();
        let b: Vec<usize> = (0..100).map(|_| second.sample_index(&weights)).collect();
        assert_eq!(a, b);
    }
}
