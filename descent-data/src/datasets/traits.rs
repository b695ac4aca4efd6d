// descent-data/src/datasets/traits.rs

use descent_core::DescentError;

/// One labelled example: a flat feature vector and its class index.
pub type Sample<T> = (Vec<T>, usize);

/// An indexable collection of samples.
///
/// [`crate::DataLoader`] batches any dataset whose `Item` is a [`Sample`].
pub trait Dataset {
    /// The type of a single item returned by the dataset.
    type Item: Send + 'static;

    /// Returns the item at the given index.
    ///
    /// # Errors
    ///
    /// Returns `DescentError::IndexOutOfBounds` if `index >= self.len()`.
    fn get(&self, index: usize) -> Result<Self::Item, DescentError>;

    /// Returns the total number of items in the dataset.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
