//! Parameter initialisation.
//!
//! Every initialiser takes the random number generator explicitly so that
//! models can be built reproducibly from a seeded `StdRng`.

use crate::error::DescentError;
use crate::ops::traits::Element;
use crate::tensor::{rand_uniform, Tensor};
use rand::Rng;

/// Kaiming (He) uniform initialisation for layers followed by ReLU.
///
/// Draws from `U(-b, b)` with `b = sqrt(6 / fan_in)`.
pub fn kaiming_uniform<T: Element, R: Rng + ?Sized>(
    shape: &[usize],
    fan_in: usize,
    rng: &mut R,
) -> Result<Tensor<T>, DescentError> {
    if fan_in == 0 {
        return Err(DescentError::InvalidHyperparameter {
            name: "fan_in".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    let bound = (6.0 / fan_in as f64).sqrt();
    rand_uniform(shape, -bound, bound, rng)
}

/// Uniform initialisation on `U(-bound, bound)`.
pub fn uniform<T: Element, R: Rng + ?Sized>(
    shape: &[usize],
    bound: f64,
    rng: &mut R,
) -> Result<Tensor<T>, DescentError> {
    rand_uniform(shape, -bound, bound, rng)
}
