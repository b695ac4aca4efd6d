use num_traits::{Float, NumAssignOps};
use std::fmt::Debug;
use std::iter::Sum;

/// A trait representing the floating-point element types a `Tensor` can hold.
///
/// All kernels in `ops` are generic over this trait, so every operation works
/// for both `f32` (training) and `f64` (gradient checking).
pub trait Element:
    Float // Num + Copy + NumCast + PartialOrd + exp/ln/max/...
    + NumAssignOps
    + Sum
    + Debug
    + Send
    + Sync
    + 'static
{
    /// Converts an `f64` constant into this element type.
    fn from_f64_lossy(value: f64) -> Self;

    /// Widens this element to `f64`, used for reporting and finite differences.
    fn to_f64_lossy(self) -> f64;

    /// Converts a count (batch size, number of elements) into this element type.
    fn from_count(count: usize) -> Self {
        Self::from_f64_lossy(count as f64)
    }
}

impl Element for f32 {
    fn from_f64_lossy(value: f64) -> Self {
        value as f32
    }

    fn to_f64_lossy(self) -> f64 {
        self as f64
    }
}

impl Element for f64 {
    fn from_f64_lossy(value: f64) -> Self {
        value
    }

    fn to_f64_lossy(self) -> f64 {
        self
    }
}
