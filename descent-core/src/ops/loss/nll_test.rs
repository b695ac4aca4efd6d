use super::*;
use crate::autograd::grad_check::check_grad;
use crate::ops::activation::log_softmax::log_softmax_op;
use approx::assert_relative_eq;

#[test]
fn test_nll_forward() {
    let logp = Tensor::new(vec![-0.1_f64, -2.0, -3.0, -1.5, -0.5, -2.5], vec![2, 3]).unwrap();
    let loss = nll_loss_op(&logp, &[0, 2]).unwrap();
    assert_eq!(loss.shape(), Vec::<usize>::new());
    assert_relative_eq!(loss.item().unwrap(), (0.1 + 2.5) / 2.0, epsilon = 1e-12);
}

#[test]
fn test_nll_backward_values() {
    let logp = Tensor::new_with_grad(vec![-0.1_f32, -2.0, -3.0, -1.5, -0.5, -2.5], vec![2, 3]).unwrap();
    let loss = nll_loss_op(&logp, &[0, 2]).unwrap();
    assert_eq!(loss.grad_fn().unwrap().kind(), OpKind::NllLoss);
    loss.backward().unwrap();
    assert_eq!(
        logp.grad().unwrap().to_vec(),
        vec![-0.5, 0.0, 0.0, 0.0, 0.0, -0.5]
    );
}

#[test]
fn test_nll_backward_scales_with_seed() {
    let logp = Tensor::new_with_grad(vec![-1.0_f64, -1.0, -1.0, -1.0], vec![4, 1]).unwrap();
    let loss = nll_loss_op(&logp, &[0, 0, 0, 0]).unwrap();
    loss.backward_with_grad(&Tensor::scalar(2.0)).unwrap();
    assert_eq!(logp.grad().unwrap().to_vec(), vec![-0.5; 4]);
}

#[test]
fn test_nll_target_out_of_range() {
    let logp = Tensor::new(vec![-1.0_f32; 6], vec![2, 3]).unwrap();
    match nll_loss_op(&logp, &[1, 3]).unwrap_err() {
        DescentError::Shape(ShapeError::TargetOutOfRange {
            index,
            target,
            num_classes,
        }) => {
            assert_eq!((index, target, num_classes), (1, 3, 3));
        }
        other => panic!("Expected TargetOutOfRange, got {:?}", other),
    }
}

#[test]
fn test_nll_target_length_mismatch() {
    let logp = Tensor::new(vec![-1.0_f32; 6], vec![2, 3]).unwrap();
    assert!(nll_loss_op(&logp, &[1]).unwrap_err().is_shape_error());
}

#[test]
fn test_nll_empty_batch() {
    let logp = Tensor::<f32>::new(vec![], vec![0, 3]).unwrap();
    assert!(matches!(
        nll_loss_op(&logp, &[]).unwrap_err(),
        DescentError::Shape(ShapeError::EmptyBatch { .. })
    ));
}

#[test]
fn test_nll_grad_check_through_log_softmax() {
    let logits = Tensor::new_with_grad(vec![0.5_f64, 1.5, -0.3, 0.9, -2.0, 0.1], vec![3, 2]).unwrap();
    let seed = Tensor::scalar(1.0);
    check_grad(
        |inputs| nll_loss_op(&log_softmax_op(&inputs[0])?, &[1, 0, 1]),
        &[logits],
        &seed,
        1e-6,
        1e-6,
        1e-5,
    )
    .unwrap();
}
