use super::*;

fn sample_dataset() -> TensorDataset<f32> {
    let features = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2]).unwrap();
    TensorDataset::new(features, vec![0, 1, 0]).unwrap()
}

#[test]
fn test_tensor_dataset_rows() {
    let dataset = sample_dataset();
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.num_features(), 2);
    assert_eq!(dataset.get(0).unwrap(), (vec![1.0, 2.0], 0));
    assert_eq!(dataset.get(2).unwrap(), (vec![5.0, 6.0], 0));
    assert_eq!(dataset.labels(), &[0, 1, 0]);
}

#[test]
fn test_tensor_dataset_out_of_bounds() {
    let dataset = sample_dataset();
    assert!(matches!(
        dataset.get(3),
        Err(DescentError::IndexOutOfBounds { index: 3, len: 3 })
    ));
}

#[test]
fn test_tensor_dataset_rejects_bad_shapes() {
    let flat = Tensor::new(vec![1.0_f32, 2.0], vec![2]).unwrap();
    assert!(matches!(
        TensorDataset::new(flat, vec![0, 1]),
        Err(DescentError::Shape(ShapeError::RankMismatch { expected: 2, actual: 1, .. }))
    ));

    let features = Tensor::new(vec![1.0_f32; 4], vec![2, 2]).unwrap();
    assert!(TensorDataset::new(features, vec![0]).unwrap_err().is_shape_error());
}

#[test]
fn test_tensor_dataset_copies_features() {
    let features = Tensor::new_with_grad(vec![1.0_f64; 4], vec![2, 2]).unwrap();
    let dataset = TensorDataset::new(features.clone(), vec![1, 1]).unwrap();
    // Mutating the source afterwards does not change the dataset.
    features.fill_(0.0).unwrap();
    assert_eq!(dataset.get(1).unwrap().0, vec![1.0, 1.0]);
}
