// descent-data/src/samplers/traits.rs

use std::fmt::Debug;

/// Decides the order in which a `DataLoader` visits dataset indices.
///
/// `iter` is called once per epoch; stateful samplers (e.g. a seeded
/// [`super::RandomSampler`]) advance their state on every call.
pub trait Sampler: Debug + Send {
    /// Returns the indices to visit for one pass over a dataset of `dataset_len` items.
    fn iter(&mut self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync>;

    /// Returns the number of indices `iter` yields for a dataset of `dataset_len` items.
    fn len(&self, dataset_len: usize) -> usize;
}
