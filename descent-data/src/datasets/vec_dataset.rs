use super::traits::Dataset;
use descent_core::DescentError;

/// A dataset backed by a `Vec` of items, each cloned on access.
#[derive(Debug, Clone)]
pub struct VecDataset<I: Clone + Send + 'static> {
    data: Vec<I>,
}

impl<I: Clone + Send + 'static> VecDataset<I> {
    pub fn new(data: Vec<I>) -> Self {
        Self { data }
    }

    /// Returns the stored items in order.
    pub fn items(&self) -> &[I] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<I> {
        self.data
    }
}

impl<I: Clone + Send + 'static> Dataset for VecDataset<I> {
    type Item = I;

    fn get(&self, index: usize) -> Result<Self::Item, DescentError> {
        self.data
            .get(index)
            .cloned()
            .ok_or(DescentError::IndexOutOfBounds {
                index,
                len: self.data.len(),
            })
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

impl<I: Clone + Send + 'static> FromIterator<I> for VecDataset<I> {
    fn from_iter<It: IntoIterator<Item = I>>(iter: It) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
#[path = "vec_dataset_test.rs"]
mod tests;
