use crate::error::DescentError;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::ops::traits::Element;
use crate::tensor::Tensor;

/// Chains modules so that each one's output is the next one's input.
///
/// Parameter names are prefixed with the child's name, e.g. `"0.weight"` for
/// the weight of the first child added with [`Sequential::push`].
#[derive(Debug)]
pub struct Sequential<T: Element> {
    modules: Vec<(String, Box<dyn Module<T>>)>,
}

impl<T: Element> Default for Sequential<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Sequential<T> {
    pub fn new() -> Self {
        Sequential {
            modules: Vec::new(),
        }
    }

    /// Appends a named child module.
    ///
    /// # Errors
    /// Returns `DescentError::InvalidHyperparameter` if the name is already taken.
    pub fn add_module(&mut self, name: &str, module: Box<dyn Module<T>>) -> Result<(), DescentError> {
        if self.modules.iter().any(|(existing, _)| existing == name) {
            return Err(DescentError::InvalidHyperparameter {
                name: "module name".to_string(),
                reason: format!("'{}' is already used in this Sequential", name),
            });
        }
        self.modules.push((name.to_string(), module));
        Ok(())
    }

    /// Appends a child module named after its position.
    pub fn push<M: Module<T> + 'static>(mut self, module: M) -> Self {
        let name = self.modules.len().to_string();
        self.modules.push((name, Box::new(module)));
        self
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Direct children with their names, in execution order.
    pub fn named_children(&self) -> impl Iterator<Item = (&str, &dyn Module<T>)> {
        self.modules.iter().map(|(name, m)| (name.as_str(), m.as_ref()))
    }
}

impl<T: Element> Module<T> for Sequential<T> {
    fn forward(&self, input: &Tensor<T>) -> Result<Tensor<T>, DescentError> {
        let mut current_input = input.clone();
        for (_, module) in &self.modules {
            current_input = module.forward(&current_input)?;
        }
        Ok(current_input)
    }

    fn parameters(&self) -> Vec<&Parameter<T>> {
        self.modules
            .iter()
            .flat_map(|(_, module)| module.parameters())
            .collect()
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter<T>)> {
        let mut params = Vec::new();
        for (name, module) in &self.modules {
            for (param_name, param) in module.named_parameters() {
                params.push((format!("{}.{}", name, param_name), param));
            }
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nn::{Linear, LogSoftmax, ReLU, StateDict};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mlp(seed: u64) -> Sequential<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        Sequential::new()
            .push(Linear::with_rng(4, 8, true, &mut rng).unwrap())
            .push(ReLU::new())
            .push(Linear::with_rng(8, 3, true, &mut rng).unwrap())
            .push(LogSoftmax::new())
    }

    #[test]
    fn test_sequential_forward_shape_and_rows() {
        let model = mlp(1);
        let x = Tensor::new((0..8).map(|v| v as f64 * 0.1).collect(), vec![2, 4]).unwrap();
        let out = model.forward(&x).unwrap();
        assert_eq!(out.shape(), vec![2, 3]);
        for row in out.to_vec().chunks(3) {
            let total: f64 = row.iter().map(|v| v.exp()).sum();
            assert_relative_eq!(total, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sequential_named_parameters() {
        let model = mlp(1);
        let names: Vec<String> = model.named_parameters().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["0.weight", "0.bias", "2.weight", "2.bias"]);
        assert_eq!(model.parameters().len(), 4);
        assert_eq!(model.len(), 4);
    }

    #[test]
    fn test_sequential_state_dict_transfer() {
        let source = mlp(1);
        let target = mlp(2);
        assert_ne!(source.state_dict(), target.state_dict());
        target.load_state_dict(&source.state_dict()).unwrap();
        assert_eq!(source.state_dict(), target.state_dict());
    }

    #[test]
    fn test_load_state_dict_writes_nothing_while_last_param_in_use() {
        let model = mlp(1);
        let before = model.state_dict();
        let last_bias = model.parameters()[3].tensor().clone();
        let live = crate::ops::activation::relu_op(&last_bias).unwrap();

        let target: StateDict<f64> = before
            .iter()
            .map(|(name, values)| (name.clone(), vec![42.0; values.len()]))
            .collect();
        let err = model.load_state_dict(&target).unwrap_err();
        assert!(err.is_gradient_state_error());
        assert_eq!(model.state_dict(), before);
        assert!(model.parameters().iter().all(|p| p.version() == 0));

        drop(live);
        model.load_state_dict(&target).unwrap();
        assert_eq!(model.state_dict(), target);
    }

    #[test]
    fn test_add_module_rejects_duplicate_names() {
        let mut model = Sequential::<f32>::new();
        model.add_module("act", Box::new(ReLU::new())).unwrap();
        assert!(model.add_module("act", Box::new(ReLU::new())).is_err());
        let names: Vec<&str> = model.named_children().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["act"]);
    }
}
