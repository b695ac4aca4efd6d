use super::*;
use crate::autograd::grad_check::check_grad;
use crate::ops::reduction::sum::sum_op;

#[test]
fn test_add_tensors_ok() {
    let t1 = Tensor::new(vec![1.0_f32, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let t2 = Tensor::new(vec![5.0_f32, 6.0, 7.0, 8.0], vec![2, 2]).unwrap();
    let result = add_op(&t1, &t2).unwrap();
    assert_eq!(result.to_vec(), vec![6.0, 8.0, 10.0, 12.0]);
    assert_eq!(result.shape(), vec![2, 2]);
    assert!(!result.requires_grad());
}

#[test]
fn test_add_shape_mismatch() {
    let t1 = Tensor::new(vec![1.0_f32, 2.0], vec![2]).unwrap();
    let t2 = Tensor::new(vec![1.0_f32, 2.0], vec![1, 2]).unwrap();
    match add_op(&t1, &t2).unwrap_err() {
        DescentError::Shape(ShapeError::IncompatibleShapes { shape1, shape2, .. }) => {
            assert_eq!(shape1, vec![2]);
            assert_eq!(shape2, vec![1, 2]);
        }
        other => panic!("Expected IncompatibleShapes, got {:?}", other),
    }
}

#[test]
fn test_add_backward_only_to_grad_inputs() {
    let a = Tensor::new_with_grad(vec![1.0_f64, 2.0], vec![2]).unwrap();
    let b = Tensor::new(vec![3.0_f64, 4.0], vec![2]).unwrap();
    let y = add_op(&a, &b).unwrap();
    assert_eq!(y.grad_fn().unwrap().kind(), OpKind::Add);
    sum_op(&y).unwrap().backward().unwrap();
    assert_eq!(a.grad().unwrap().to_vec(), vec![1.0, 1.0]);
    assert!(b.grad().is_none());
}

#[test]
fn test_add_grad_check() {
    let a = Tensor::new_with_grad(vec![0.1_f64, -0.2, 0.3], vec![3]).unwrap();
    let b = Tensor::new_with_grad(vec![1.0_f64, 2.0, -3.0], vec![3]).unwrap();
    let seed = Tensor::new(vec![1.0, -1.0, 0.5], vec![3]).unwrap();
    check_grad(
        |inputs| add_op(&inputs[0], &inputs[1]),
        &[a, b],
        &seed,
        1e-6,
        1e-6,
        1e-5,
    )
    .unwrap();
}
