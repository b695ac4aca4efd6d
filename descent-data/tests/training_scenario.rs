use descent_core::model::Sequential;
use descent_core::nn::{Linear, LogSoftmax, Module, NllLoss, ReLU};
use descent_core::optim::Sgd;
use descent_core::train::{Trainer, TrainerConfig};
use descent_data::{DataLoader, SequentialSampler, SyntheticImages};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn mlp(seed: u64) -> Sequential<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    Sequential::new()
        .push(Linear::with_rng(784, 128, true, &mut rng).unwrap())
        .push(ReLU::new())
        .push(Linear::with_rng(128, 64, true, &mut rng).unwrap())
        .push(ReLU::new())
        .push(Linear::with_rng(64, 10, true, &mut rng).unwrap())
        .push(LogSoftmax::new())
}

fn run(seed: u64) -> Vec<f64> {
    let dataset = SyntheticImages::new(64, 2024).generate::<f32>().unwrap();
    let mut loader = DataLoader::new(dataset, 16, SequentialSampler::new(), false).unwrap();
    let model = mlp(seed);
    let mut optimizer = Sgd::new(model.parameters(), 0.01).unwrap();
    let mut trainer = Trainer::new(TrainerConfig::new(5)).unwrap();
    let report = trainer
        .fit(&model, &NllLoss::new(), &mut optimizer, &mut loader)
        .unwrap();
    assert!(!report.cancelled);
    assert!(report.epochs.iter().all(|e| e.batches == 4 && e.samples == 64));
    report.losses()
}

#[test]
fn test_mlp_loss_decreases_over_epochs() {
    let losses = run(0);
    assert_eq!(losses.len(), 5);
    assert!(losses.iter().all(|l| l.is_finite()));
    for pair in losses.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-2, "epoch losses went up: {:?}", losses);
    }
    assert!(losses[4] < losses[0], "no progress: {:?}", losses);
}

#[test]
fn test_training_is_reproducible() {
    assert_eq!(run(5), run(5));
}
