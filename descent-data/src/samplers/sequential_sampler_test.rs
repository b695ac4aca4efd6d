use super::*;

#[test]
fn test_sequential_sampler_len() {
    let sampler = SequentialSampler::new();
    assert_eq!(sampler.len(0), 0);
    assert_eq!(sampler.len(5), 5);
}

#[test]
fn test_sequential_sampler_iter_empty() {
    let mut sampler = SequentialSampler::new();
    assert_eq!(sampler.iter(0).next(), None);
}

#[test]
fn test_sequential_sampler_same_order_every_epoch() {
    let mut sampler = SequentialSampler::new();
    let first: Vec<usize> = sampler.iter(5).collect();
    let second: Vec<usize> = sampler.iter(5).collect();
    assert_eq!(first, vec![0, 1, 2, 3, 4]);
    assert_eq!(first, second);
}
