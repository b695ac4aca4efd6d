use super::traits::Sampler;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// A sampler that visits dataset indices in random order.
///
/// Without replacement every index appears at most once per epoch. The
/// generator lives in the sampler, so a seeded sampler produces a different
/// permutation each epoch but the same sequence of permutations on every run.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    replacement: bool,
    num_samples: Option<usize>,
    rng: StdRng,
}

impl RandomSampler {
    /// Creates a new `RandomSampler` seeded from system entropy.
    ///
    /// # Arguments
    ///
    /// * `replacement`: If `true`, an index can be selected multiple times.
    /// * `num_samples`: The number of indices per epoch. Defaults to the dataset size.
    pub fn new(replacement: bool, num_samples: Option<usize>) -> Self {
        RandomSampler {
            replacement,
            num_samples,
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a sampler drawing from `StdRng::seed_from_u64(seed)`.
    pub fn seeded(replacement: bool, num_samples: Option<usize>, seed: u64) -> Self {
        RandomSampler {
            replacement,
            num_samples,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Sampler for RandomSampler {
    fn iter(&mut self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        if dataset_len == 0 {
            return Box::new(std::iter::empty());
        }
        let num_samples = self.num_samples.unwrap_or(dataset_len);

        if self.replacement {
            let indices: Vec<usize> = (0..num_samples)
                .map(|_| self.rng.gen_range(0..dataset_len))
                .collect();
            return Box::new(indices.into_iter());
        }

        if num_samples > dataset_len {
            log::warn!(
                "RandomSampler: num_samples ({}) > dataset_len ({}) without replacement, yielding nothing",
                num_samples,
                dataset_len
            );
            return Box::new(std::iter::empty());
        }
        let mut indices: Vec<usize> = (0..dataset_len).collect();
        indices.shuffle(&mut self.rng);
        indices.truncate(num_samples);
        Box::new(indices.into_iter())
    }

    fn len(&self, dataset_len: usize) -> usize {
        if dataset_len == 0 {
            return 0;
        }
        let num_samples = self.num_samples.unwrap_or(dataset_len);
        if !self.replacement && num_samples > dataset_len {
            return 0;
        }
        num_samples
    }
}

#[cfg(test)]
#[path = "random_sampler_test.rs"]
mod tests;
