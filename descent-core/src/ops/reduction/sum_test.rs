use super::*;
use crate::autograd::grad_check::check_grad;

#[test]
fn test_sum_all() {
    let t = Tensor::new(vec![1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    let s = sum_op(&t).unwrap();
    assert_eq!(s.shape(), Vec::<usize>::new());
    assert_eq!(s.item().unwrap(), 21.0);
}

#[test]
fn test_sum_backward() {
    let t = Tensor::new_with_grad(vec![1.0_f32, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let s = sum_op(&t).unwrap();
    assert_eq!(s.grad_fn().unwrap().kind(), OpKind::Sum);
    s.backward_with_grad(&Tensor::scalar(3.0)).unwrap();
    assert_eq!(t.grad().unwrap().to_vec(), vec![3.0; 4]);
}

#[test]
fn test_mean_and_backward() {
    let t = Tensor::new_with_grad(vec![1.0_f64, 2.0, 3.0, 6.0], vec![4]).unwrap();
    let m = mean_op(&t).unwrap();
    assert_eq!(m.item().unwrap(), 3.0);
    m.backward().unwrap();
    assert_eq!(t.grad().unwrap().to_vec(), vec![0.25; 4]);
}

#[test]
fn test_mean_empty() {
    let t = Tensor::<f32>::new(vec![], vec![0]).unwrap();
    assert!(mean_op(&t).unwrap_err().is_shape_error());
    assert_eq!(sum_op(&t).unwrap().item().unwrap(), 0.0);
}

#[test]
fn test_mean_grad_check() {
    let t = Tensor::new_with_grad(vec![0.4_f64, -1.0, 2.5], vec![3]).unwrap();
    check_grad(|inputs| mean_op(&inputs[0]), &[t], &Tensor::scalar(1.0), 1e-6, 1e-6, 1e-5).unwrap();
}
