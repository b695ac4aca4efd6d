// Unit tests for the node model in tensor/mod.rs

use super::*;
use crate::error::{DescentError, ShapeError};
use approx::assert_relative_eq;

#[test]
fn test_tensor_creation() {
    let t = Tensor::new(vec![1.0_f32, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    assert_eq!(t.shape(), vec![2, 2]);
    assert_eq!(t.numel(), 4);
    assert_eq!(t.rank(), 2);
    assert_eq!(t.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
    assert!(t.is_leaf());
    assert!(!t.requires_grad());
    assert!(t.grad().is_none());
    assert_eq!(t.version(), 0);
}

#[test]
fn test_tensor_creation_error() {
    let result = Tensor::<f32>::new(vec![1.0, 2.0, 3.0], vec![2, 2]);
    match result.err().unwrap() {
        DescentError::Shape(ShapeError::TensorCreation { data_len, shape }) => {
            assert_eq!(data_len, 3);
            assert_eq!(shape, vec![2, 2]);
        }
        other => panic!("Expected TensorCreation, got {:?}", other),
    }
}

#[test]
fn test_scalar_and_item() {
    let s = Tensor::scalar(2.5f64);
    assert_eq!(s.shape(), Vec::<usize>::new());
    assert_eq!(s.numel(), 1);
    assert_relative_eq!(s.item().unwrap(), 2.5);

    let v = Tensor::new(vec![1.0f64, 2.0], vec![2]).unwrap();
    assert!(v.item().unwrap_err().is_shape_error());
}

#[test]
fn test_new_with_grad_allocates_zero_grad() {
    let t = Tensor::new_with_grad(vec![1.0f32, -1.0, 3.0], vec![3]).unwrap();
    assert!(t.requires_grad());
    let grad = t.grad().expect("leaf requiring grad has a buffer");
    assert_eq!(grad.shape(), vec![3]);
    assert_eq!(grad.to_vec(), vec![0.0; 3]);
}

#[test]
fn test_clone_shares_node() {
    let t1 = Tensor::new(vec![1.0f32, 2.0], vec![2]).unwrap();
    let t2 = t1.clone();
    assert!(t1.same_node(&t2));
    assert_eq!(t1.node_id(), t2.node_id());

    let t3 = Tensor::new(vec![1.0f32, 2.0], vec![2]).unwrap();
    assert!(!t1.same_node(&t3));
    assert_eq!(t1, t3);
}

#[test]
fn test_debug_format_mentions_shape() {
    let t = Tensor::new_with_grad(vec![0.0f32; 6], vec![2, 3]).unwrap();
    let s = format!("{:?}", t);
    assert!(s.contains("shape=[2, 3]"));
    assert!(s.contains("requires_grad=true"));
}
