use crate::ops::traits::Element;
use crate::tensor::Tensor;
use std::collections::HashSet;

/// Orders every node reachable backward from `root` so that each node comes
/// after all of its inputs (post-order DFS). Reversing the result gives the
/// processing order of the backward pass: a node is only visited once every
/// consumer of it has contributed its gradient.
///
/// Inputs that do not require gradients are pruned: nothing upstream of them
/// can receive a gradient through them.
///
/// The traversal is iterative so deep graphs do not exhaust the call stack.
pub(crate) fn topological_sort<T: Element>(root: &Tensor<T>) -> Vec<Tensor<T>> {
    let mut visited: HashSet<usize> = HashSet::new();
    let mut sorted: Vec<Tensor<T>> = Vec::new();
    // (node, inputs already expanded)
    let mut stack: Vec<(Tensor<T>, bool)> = vec![(root.clone(), false)];

    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            sorted.push(node);
            continue;
        }
        if !visited.insert(node.node_id()) {
            continue;
        }
        let grad_fn = node.grad_fn();
        stack.push((node, true));
        if let Some(op) = grad_fn {
            for input in op.inputs().iter().rev() {
                if input.requires_grad() && !visited.contains(&input.node_id()) {
                    stack.push((input.clone(), false));
                }
            }
        }
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::arithmetic::add::add_op;
    use crate::ops::activation::relu::relu_op;
    use crate::ops::reduction::sum::sum_op;

    fn position<T: Element>(order: &[Tensor<T>], node: &Tensor<T>) -> usize {
        order
            .iter()
            .position(|t| t.same_node(node))
            .expect("node missing from topological order")
    }

    #[test]
    fn test_leaf_only_graph() {
        let x = Tensor::new_with_grad(vec![1.0f64], vec![1]).unwrap();
        let order = topological_sort(&x);
        assert_eq!(order.len(), 1);
        assert!(order[0].same_node(&x));
    }

    #[test]
    fn test_inputs_come_before_outputs() {
        let x = Tensor::new_with_grad(vec![1.0f64, -2.0], vec![2]).unwrap();
        let r = relu_op(&x).unwrap();
        let s = add_op(&r, &x).unwrap();
        let loss = sum_op(&s).unwrap();

        let order = topological_sort(&loss);
        assert_eq!(order.len(), 4);
        assert!(position(&order, &x) < position(&order, &r));
        assert!(position(&order, &r) < position(&order, &s));
        assert!(position(&order, &s) < position(&order, &loss));
    }

    #[test]
    fn test_shared_node_visited_once() {
        let x = Tensor::new_with_grad(vec![1.0f64, 2.0], vec![2]).unwrap();
        let y = add_op(&x, &x).unwrap();
        let loss = sum_op(&y).unwrap();
        let order = topological_sort(&loss);
        assert_eq!(order.len(), 3);
    }

    #[test]
    fn test_non_grad_inputs_are_pruned() {
        let x = Tensor::new_with_grad(vec![1.0f64, 2.0], vec![2]).unwrap();
        let c = Tensor::new(vec![3.0f64, 4.0], vec![2]).unwrap();
        let y = add_op(&x, &c).unwrap();
        let order = topological_sort(&y);
        assert_eq!(order.len(), 2);
        assert!(order.iter().all(|t| !t.same_node(&c)));
    }
}
