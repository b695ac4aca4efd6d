//! # DataLoader
//!
//! Groups the items of a [`Dataset`] into mini-batches, in the order chosen
//! by a [`Sampler`]. Each call to [`DataLoader::iter`] (or
//! [`BatchSource::batches`]) starts a new epoch.
//!
//! ```rust
//! use descent_core::train::BatchSource;
//! use descent_data::dataloader::DataLoader;
//! use descent_data::datasets::VecDataset;
//! use descent_data::samplers::SequentialSampler;
//!
//! let dataset = VecDataset::new(vec![
//!     (vec![0.0_f32, 1.0], 1),
//!     (vec![1.0, 0.0], 0),
//!     (vec![0.5, 0.5], 1),
//! ]);
//! let mut loader = DataLoader::new(dataset, 2, SequentialSampler::new(), false).unwrap();
//! for batch in loader.batches() {
//!     let batch = batch.unwrap();
//!     println!("inputs {:?}, targets {:?}", batch.inputs.shape(), batch.targets);
//! }
//! ```

use crate::datasets::{Dataset, Sample};
use crate::samplers::Sampler;
use descent_core::train::{Batch, BatchSource};
use descent_core::{DescentError, Element, ShapeError, Tensor};

/// Batches a dataset for training.
///
/// # Type parameters
/// - `D`: the dataset, implementing [`Dataset`].
/// - `S`: the sampler producing the visiting order, implementing [`Sampler`].
#[derive(Debug)]
pub struct DataLoader<D: Dataset, S: Sampler> {
    dataset: D,
    batch_size: usize,
    sampler: S,
    drop_last: bool,
}

impl<D: Dataset, S: Sampler> DataLoader<D, S> {
    /// Creates a new DataLoader.
    ///
    /// # Arguments
    /// - `dataset`: the items to batch.
    /// - `batch_size`: the number of items per batch.
    /// - `sampler`: the index order for each epoch.
    /// - `drop_last`: if `true`, a final batch smaller than `batch_size` is skipped.
    ///
    /// # Errors
    /// Returns `DescentError::InvalidHyperparameter` if `batch_size` is zero.
    pub fn new(dataset: D, batch_size: usize, sampler: S, drop_last: bool) -> Result<Self, DescentError> {
        if batch_size == 0 {
            return Err(DescentError::InvalidHyperparameter {
                name: "batch_size".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(Self {
            dataset,
            batch_size,
            sampler,
            drop_last,
        })
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn drop_last(&self) -> bool {
        self.drop_last
    }

    /// Number of batches one epoch yields.
    pub fn num_batches(&self) -> usize {
        let samples = self.sampler.len(self.dataset.len());
        if self.drop_last {
            samples / self.batch_size
        } else {
            (samples + self.batch_size - 1) / self.batch_size
        }
    }

    /// Starts a new epoch, yielding the raw items of each batch.
    pub fn iter(&mut self) -> Batches<'_, D> {
        let indices = self.sampler.iter(self.dataset.len());
        Batches {
            dataset: &self.dataset,
            indices,
            batch_size: self.batch_size,
            drop_last: self.drop_last,
        }
    }
}

/// One epoch of raw batches, created by [`DataLoader::iter`].
pub struct Batches<'a, D: Dataset> {
    dataset: &'a D,
    indices: Box<dyn Iterator<Item = usize> + Send + Sync>,
    batch_size: usize,
    drop_last: bool,
}

impl<'a, D: Dataset> Iterator for Batches<'a, D> {
    type Item = Result<Vec<D::Item>, DescentError>;

    /// Returns the items of the next batch, or the first error raised while
    /// fetching them.
    fn next(&mut self) -> Option<Self::Item> {
        let mut batch = Vec::with_capacity(self.batch_size);
        for idx in self.indices.by_ref().take(self.batch_size) {
            match self.dataset.get(idx) {
                Ok(item) => batch.push(item),
                Err(e) => return Some(Err(e)),
            }
        }
        if batch.is_empty() || (self.drop_last && batch.len() < self.batch_size) {
            return None;
        }
        Some(Ok(batch))
    }
}

/// Stacks samples into an `(n, features)` input tensor and a target vector.
///
/// # Errors
/// * `ShapeError::EmptyBatch` if `samples` is empty.
/// * `ShapeError::Mismatch` if the samples do not all have the same number of features.
pub fn collate<T: Element>(samples: Vec<Sample<T>>) -> Result<Batch<T>, DescentError> {
    let num_features = match samples.first() {
        Some((features, _)) => features.len(),
        None => {
            return Err(ShapeError::EmptyBatch {
                operation: "collate".to_string(),
            }
            .into())
        }
    };
    let mut inputs = Vec::with_capacity(samples.len() * num_features);
    let mut targets = Vec::with_capacity(samples.len());
    for (features, label) in samples {
        if features.len() != num_features {
            return Err(ShapeError::Mismatch {
                expected: vec![num_features],
                actual: vec![features.len()],
                operation: "collate".to_string(),
            }
            .into());
        }
        inputs.extend(features);
        targets.push(label);
    }
    let rows = targets.len();
    Batch::new(Tensor::new(inputs, vec![rows, num_features])?, targets)
}

impl<T, D, S> BatchSource<T> for DataLoader<D, S>
where
    T: Element,
    D: Dataset<Item = Sample<T>>,
    S: Sampler,
{
    fn batches(&mut self) -> Box<dyn Iterator<Item = Result<Batch<T>, DescentError>> + '_> {
        Box::new(self.iter().map(|samples| samples.and_then(collate)))
    }
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
