//! # Training an MLP on synthetic images
//!
//! Trains a 784 → 128 → 64 → 10 ReLU network with log-softmax and NLL loss on
//! seeded synthetic 28×28 images, printing the mean loss of every epoch and
//! the final accuracy.
//!
//! `cargo run --example train_mlp`

use descent_core::model::Sequential;
use descent_core::nn::{Linear, LogSoftmax, Module, NllLoss, ReLU};
use descent_core::optim::Sgd;
use descent_core::train::{Trainer, TrainerConfig};
use descent_core::DescentError;
use descent_data::{DataLoader, RandomSampler, SequentialSampler, SyntheticImages};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn build_model(rng: &mut StdRng) -> Result<Sequential<f32>, DescentError> {
    Ok(Sequential::new()
        .push(Linear::with_rng(784, 128, true, rng)?)
        .push(ReLU::new())
        .push(Linear::with_rng(128, 64, true, rng)?)
        .push(ReLU::new())
        .push(Linear::with_rng(64, 10, true, rng)?)
        .push(LogSoftmax::new()))
}

fn main() -> Result<(), DescentError> {
    let images = SyntheticImages::new(512, 42);
    let train_set = images.generate::<f32>()?;
    let test_set = SyntheticImages { seed: 43, num_samples: 128, ..images }.generate::<f32>()?;

    let mut rng = StdRng::seed_from_u64(7);
    let model = build_model(&mut rng)?;
    println!("Model parameters:");
    for (name, param) in model.named_parameters() {
        println!("  {:<10} {:?}", name, param.shape());
    }

    let mut train_loader = DataLoader::new(train_set, 64, RandomSampler::seeded(false, None, 1), false)?;
    let mut optimizer = Sgd::new(model.parameters(), 0.01)?.with_momentum(0.9)?;
    let loss_fn = NllLoss::new();

    let mut trainer = Trainer::new(TrainerConfig::new(5))?.with_reporter(|report| {
        println!(
            "Epoch {} - Training loss: {:.4} ({} batches)",
            report.epoch + 1,
            report.mean_loss,
            report.batches
        );
    });
    let report = trainer.fit(&model, &loss_fn, &mut optimizer, &mut train_loader)?;

    let mut test_loader = DataLoader::new(test_set, 128, SequentialSampler::new(), false)?;
    let eval = Trainer::evaluate(&model, &loss_fn, &mut test_loader)?;
    println!(
        "Final training loss: {:.4}, test loss: {:.4}, test accuracy: {:.1}%",
        report.final_loss().unwrap_or(f64::NAN),
        eval.mean_loss,
        eval.accuracy * 100.0
    );
    Ok(())
}
