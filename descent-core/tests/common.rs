use descent_core::model::Sequential;
use descent_core::nn::{Linear, ReLU};
use descent_core::Tensor;
use rand::rngs::StdRng;
use rand::SeedableRng;

// Shared between several test crates; not every helper is used by each.
#[allow(dead_code)]
pub fn seeded_mlp(sizes: &[usize], seed: u64) -> Sequential<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut model = Sequential::new();
    for (i, pair) in sizes.windows(2).enumerate() {
        model = model.push(Linear::with_rng(pair[0], pair[1], true, &mut rng).unwrap());
        if i + 2 < sizes.len() {
            model = model.push(ReLU::new());
        }
    }
    model
}

#[allow(dead_code)]
pub fn assert_all_close(actual: &Tensor<f64>, expected: &[f64], tol: f64) {
    let values = actual.to_vec();
    assert_eq!(values.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in values.iter().zip(expected).enumerate() {
        assert!((a - e).abs() <= tol, "index {}: {} vs {}", i, a, e);
    }
}
