use super::*;
use crate::nn::{CrossEntropyLoss, Linear};
use crate::optim::Sgd;
use crate::tensor::Tensor;
use crate::train::batch::Batch;
use approx::assert_relative_eq;

fn zero_linear() -> Linear<f64> {
    let weight = Tensor::new(vec![0.0; 4], vec![2, 2]).unwrap();
    let bias = Tensor::new(vec![0.0; 2], vec![2]).unwrap();
    Linear::from_tensors(weight, Some(bias)).unwrap()
}

// Two well separated classes in the plane.
fn separable_batches() -> Vec<Batch<f64>> {
    vec![
        Batch::new(
            Tensor::new(vec![1.0, 0.0, 0.0, 1.0], vec![2, 2]).unwrap(),
            vec![0, 1],
        )
        .unwrap(),
        Batch::new(
            Tensor::new(vec![0.9, 0.1, 0.1, 0.9], vec![2, 2]).unwrap(),
            vec![0, 1],
        )
        .unwrap(),
    ]
}

#[test]
fn test_fit_reduces_loss() {
    let model = zero_linear();
    let mut optimizer = Sgd::new(model.parameters(), 0.5).unwrap();
    let mut source = separable_batches();
    let mut trainer = Trainer::new(TrainerConfig::new(5)).unwrap();

    let report = trainer
        .fit(&model, &CrossEntropyLoss::new(), &mut optimizer, &mut source)
        .unwrap();

    assert!(!report.cancelled);
    assert_eq!(report.epochs.len(), 5);
    let losses = report.losses();
    // The first batch is scored before any update.
    assert!(losses[0] < 2.0_f64.ln());
    for pair in losses.windows(2) {
        assert!(pair[1] < pair[0], "loss went up: {:?}", losses);
    }
    assert_eq!(report.final_loss(), losses.last().copied());
    assert_eq!(report.epochs[0].batches, 2);
    assert_eq!(report.epochs[0].samples, 4);
    assert_eq!(model.weight().version(), 10);
}

#[test]
fn test_fit_calls_reporter_per_epoch() {
    let model = zero_linear();
    let mut optimizer = Sgd::new(model.parameters(), 0.1).unwrap();
    let mut source = separable_batches();
    let mut seen = Vec::new();
    {
        let mut trainer = Trainer::new(TrainerConfig::new(3).with_log_interval(1))
            .unwrap()
            .with_reporter(|r: &EpochReport| seen.push(r.epoch));
        trainer
            .fit(&model, &CrossEntropyLoss::new(), &mut optimizer, &mut source)
            .unwrap();
    }
    assert_eq!(seen, vec![0, 1, 2]);
}

#[test]
fn test_fit_stops_when_cancelled() {
    let model = zero_linear();
    let mut optimizer = Sgd::new(model.parameters(), 0.1).unwrap();
    let mut source = separable_batches();
    let token = CancellationToken::new();
    let from_reporter = token.clone();

    let mut trainer = Trainer::new(TrainerConfig::new(10))
        .unwrap()
        .with_cancellation(token.clone())
        .with_reporter(move |_| from_reporter.cancel());
    let report = trainer
        .fit(&model, &CrossEntropyLoss::new(), &mut optimizer, &mut source)
        .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.epochs.len(), 1);
    assert_eq!(model.weight().version(), 2);

    // Already cancelled: nothing runs.
    let report = trainer
        .fit(&model, &CrossEntropyLoss::new(), &mut optimizer, &mut source)
        .unwrap();
    assert!(report.cancelled);
    assert!(report.epochs.is_empty());
    assert_eq!(model.weight().version(), 2);
}

#[test]
fn test_fit_aborts_on_first_error() {
    let model = zero_linear();
    let mut optimizer = Sgd::new(model.parameters(), 0.1).unwrap();
    let mut source = vec![Batch::new(
        Tensor::new(vec![1.0, 0.0], vec![1, 2]).unwrap(),
        vec![5],
    )
    .unwrap()];
    let mut trainer = Trainer::new(TrainerConfig::new(2)).unwrap();

    let err = trainer
        .fit(&model, &CrossEntropyLoss::new(), &mut optimizer, &mut source)
        .unwrap_err();
    assert!(matches!(
        err,
        DescentError::Shape(ShapeError::TargetOutOfRange { target: 5, .. })
    ));
    assert_eq!(model.weight().version(), 0);
}

#[test]
fn test_fit_rejects_empty_source() {
    let model = zero_linear();
    let mut optimizer = Sgd::new(model.parameters(), 0.1).unwrap();
    let mut source: Vec<Batch<f64>> = Vec::new();
    let mut trainer = Trainer::new(TrainerConfig::new(1)).unwrap();
    assert!(matches!(
        trainer.fit(&model, &CrossEntropyLoss::new(), &mut optimizer, &mut source),
        Err(DescentError::Data(_))
    ));
}

#[test]
fn test_trainer_rejects_invalid_config() {
    assert!(Trainer::new(TrainerConfig::new(0)).is_err());
    assert!(Trainer::new(TrainerConfig::new(1).with_log_interval(0)).is_err());
}

#[test]
fn test_evaluate_accuracy_and_weighted_loss() {
    let weight = Tensor::new(vec![1.0, 0.0, 0.0, 1.0], vec![2, 2]).unwrap();
    let model = Linear::from_tensors(weight, None).unwrap();
    let mut source = vec![
        Batch::new(
            Tensor::new(vec![2.0, 0.0, 0.0, 2.0], vec![2, 2]).unwrap(),
            vec![0, 1],
        )
        .unwrap(),
        Batch::new(Tensor::new(vec![2.0, 0.0], vec![1, 2]).unwrap(), vec![1]).unwrap(),
    ];

    let eval = Trainer::evaluate(&model, &CrossEntropyLoss::new(), &mut source).unwrap();

    assert_eq!(eval.samples, 3);
    assert_relative_eq!(eval.accuracy, 2.0 / 3.0, epsilon = 1e-12);
    let easy = (1.0 + (-2.0_f64).exp()).ln();
    assert_relative_eq!(eval.mean_loss, (3.0 * easy + 2.0) / 3.0, epsilon = 1e-12);
    assert_eq!(model.weight().grad().unwrap().to_vec(), vec![0.0; 4]);
}

#[test]
fn test_argmax_prefers_first_maximum() {
    assert_eq!(argmax(&[0.5_f32, 2.0, 2.0]), Some(1));
    assert_eq!(argmax::<f64>(&[]), None);
}
