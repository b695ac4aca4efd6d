//! Deterministic labelled image-like data for examples and tests.

use crate::datasets::{Sample, VecDataset};
use descent_core::{DescentError, Element};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Generator for a fixed-seed classification set of `height × width` images.
///
/// Each class gets a random binary prototype (about 30% of pixels lit).
/// Sample `i` has label `i % num_classes` and pixels
/// `clamp(prototype + noise · N(0, 1), 0, 1)`, flattened row-major. The same
/// settings always produce the same dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticImages {
    pub num_samples: usize,
    pub height: usize,
    pub width: usize,
    pub num_classes: usize,
    /// Standard deviation of the pixel noise.
    pub noise: f64,
    pub seed: u64,
}

impl Default for SyntheticImages {
    fn default() -> Self {
        SyntheticImages {
            num_samples: 64,
            height: 28,
            width: 28,
            num_classes: 10,
            noise: 0.2,
            seed: 0,
        }
    }
}

impl SyntheticImages {
    /// 28×28 images in 10 classes.
    pub fn new(num_samples: usize, seed: u64) -> Self {
        SyntheticImages {
            num_samples,
            seed,
            ..Default::default()
        }
    }

    pub fn with_image_size(mut self, height: usize, width: usize) -> Self {
        self.height = height;
        self.width = width;
        self
    }

    pub fn with_classes(mut self, num_classes: usize) -> Self {
        self.num_classes = num_classes;
        self
    }

    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    /// Length of each flattened image.
    pub fn num_features(&self) -> usize {
        self.height * self.width
    }

    fn validate(&self) -> Result<(), DescentError> {
        let invalid = |name: &str, reason: &str| DescentError::InvalidHyperparameter {
            name: name.to_string(),
            reason: reason.to_string(),
        };
        if self.num_features() == 0 {
            return Err(invalid("image size", "height and width must be non-zero"));
        }
        if self.num_classes == 0 {
            return Err(invalid("num_classes", "must be at least 1"));
        }
        if !self.noise.is_finite() || self.noise < 0.0 {
            return Err(invalid("noise", "must be finite and non-negative"));
        }
        Ok(())
    }

    /// Builds the dataset.
    ///
    /// # Errors
    /// Returns `DescentError::InvalidHyperparameter` for an empty image size,
    /// zero classes or a negative noise level.
    pub fn generate<T: Element>(&self) -> Result<VecDataset<Sample<T>>, DescentError> {
        self.validate()?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let features = self.num_features();

        let prototypes: Vec<Vec<f64>> = (0..self.num_classes)
            .map(|_| {
                (0..features)
                    .map(|_| if rng.gen_bool(0.3) { 1.0 } else { 0.0 })
                    .collect()
            })
            .collect();

        let samples = (0..self.num_samples)
            .map(|i| {
                let label = i % self.num_classes;
                let pixels: Vec<T> = prototypes[label]
                    .iter()
                    .map(|&p| {
                        let n: f64 = StandardNormal.sample(&mut rng);
                        T::from_f64_lossy((p + self.noise * n).clamp(0.0, 1.0))
                    })
                    .collect();
                (pixels, label)
            })
            .collect();
        log::debug!(
            "Generated {} synthetic {}x{} images in {} classes",
            self.num_samples,
            self.height,
            self.width,
            self.num_classes
        );
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::Dataset;

    #[test]
    fn test_synthetic_images_shape_and_labels() {
        let dataset = SyntheticImages::new(25, 1).generate::<f32>().unwrap();
        assert_eq!(dataset.len(), 25);
        for i in 0..dataset.len() {
            let (pixels, label) = dataset.get(i).unwrap();
            assert_eq!(pixels.len(), 784);
            assert_eq!(label, i % 10);
            assert!(pixels.iter().all(|&p| (0.0..=1.0).contains(&p)));
        }
    }

    #[test]
    fn test_synthetic_images_are_reproducible() {
        let config = SyntheticImages::new(8, 9).with_image_size(4, 4).with_classes(3);
        let a = config.generate::<f64>().unwrap();
        let b = config.generate::<f64>().unwrap();
        assert_eq!(a.items(), b.items());

        let c = SyntheticImages { seed: 10, ..config }.generate::<f64>().unwrap();
        assert_ne!(a.items(), c.items());
    }

    #[test]
    fn test_noiseless_samples_match_their_class_prototype() {
        let dataset = SyntheticImages::new(6, 2)
            .with_image_size(5, 5)
            .with_classes(3)
            .with_noise(0.0)
            .generate::<f32>()
            .unwrap();
        let items = dataset.items();
        assert_eq!(items[0].0, items[3].0);
        assert_eq!(items[1].0, items[4].0);
        assert!(items[0].0.iter().all(|&p| p == 0.0 || p == 1.0));
    }

    #[test]
    fn test_synthetic_images_validation() {
        assert!(SyntheticImages::new(4, 0).with_classes(0).generate::<f32>().is_err());
        assert!(SyntheticImages::new(4, 0).with_image_size(0, 28).generate::<f32>().is_err());
        assert!(SyntheticImages::new(4, 0).with_noise(-1.0).generate::<f32>().is_err());
    }
}
