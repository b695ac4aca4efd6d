use crate::error::{DescentError, ShapeError};
use crate::nn::Parameter;
use crate::ops::traits::Element;
use crate::tensor::Tensor;
use std::collections::BTreeMap;

/// Parameter values keyed by hierarchical name (e.g. `"0.weight"`).
pub type StateDict<T> = BTreeMap<String, Vec<T>>;

/// The base trait for all neural network modules (layers, containers, etc.).
///
/// This trait defines the fundamental operations that any neural network module
/// should support, such as performing a forward pass and accessing its parameters.
pub trait Module<T: Element>: std::fmt::Debug + Send + Sync {
    /// Performs a forward pass of the module.
    fn forward(&self, input: &Tensor<T>) -> Result<Tensor<T>, DescentError>;

    /// Returns all learnable parameters of the module, including those of sub-modules.
    fn parameters(&self) -> Vec<&Parameter<T>>;

    /// Returns all learnable parameters along with their names.
    /// Names are unique within the module and hierarchical for nested modules
    /// (e.g., "0.weight", "0.bias").
    fn named_parameters(&self) -> Vec<(String, &Parameter<T>)>;

    /// Resets the gradient of every parameter to zeros.
    fn zero_grad(&self) {
        for param in self.parameters() {
            param.zero_grad();
        }
    }

    /// Copies every parameter's data, keyed by its name.
    fn state_dict(&self) -> StateDict<T> {
        self.named_parameters()
            .into_iter()
            .map(|(name, param)| (name, param.to_vec()))
            .collect()
    }

    /// Overwrites parameter data from `state`.
    ///
    /// Every parameter of the module must be present; extra entries are ignored.
    /// Nothing is written unless every entry validates.
    ///
    /// # Errors
    /// * `DescentError::MissingParameter` if a parameter name is absent.
    /// * `ShapeError::Mismatch` if an entry has the wrong number of elements.
    /// * `GradientStateError::InplaceOnTrackedTensor` if a parameter is still
    ///   referenced by a live graph.
    fn load_state_dict(&self, state: &StateDict<T>) -> Result<(), DescentError> {
        let named = self.named_parameters();
        for (name, param) in &named {
            let values = state.get(name).ok_or_else(|| DescentError::MissingParameter {
                name: name.clone(),
            })?;
            if values.len() != param.numel() {
                return Err(ShapeError::Mismatch {
                    expected: param.shape(),
                    actual: vec![values.len()],
                    operation: format!("load_state_dict ({})", name),
                }
                .into());
            }
            param.ensure_mutable(&format!("load_state_dict ({})", name))?;
        }
        for (name, param) in named {
            if let Some(values) = state.get(&name) {
                param.set_data(values.clone())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::{ones, zeros};

    #[derive(Debug)]
    struct MockModule {
        param: Parameter<f32>,
    }

    impl MockModule {
        fn new() -> Result<Self, DescentError> {
            Ok(Self {
                param: Parameter::new_unnamed(zeros(&[2])?)?,
            })
        }
    }

    impl Module<f32> for MockModule {
        fn forward(&self, input: &Tensor<f32>) -> Result<Tensor<f32>, DescentError> {
            Ok(input.clone())
        }

        fn parameters(&self) -> Vec<&Parameter<f32>> {
            vec![&self.param]
        }

        fn named_parameters(&self) -> Vec<(String, &Parameter<f32>)> {
            let name = self.param.name().unwrap_or("param").to_string();
            vec![(name, &self.param)]
        }
    }

    #[test]
    fn test_module_parameters_retrieval() -> Result<(), DescentError> {
        let module = MockModule::new()?;
        let input = ones(&[2, 2])?;
        let out = module.forward(&input)?;
        assert!(out.same_node(&input));
        let params = module.parameters();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].shape(), vec![2]);
        Ok(())
    }

    #[test]
    fn test_module_zero_grad() -> Result<(), DescentError> {
        let module = MockModule::new()?;
        module.param.acc_grad(&ones(&[2])?)?;
        module.zero_grad();
        assert_eq!(module.param.grad().unwrap().to_vec(), vec![0.0, 0.0]);
        Ok(())
    }

    #[test]
    fn test_state_dict_round_trip() -> Result<(), DescentError> {
        let module = MockModule::new()?;
        let mut state = module.state_dict();
        assert_eq!(state.get("param"), Some(&vec![0.0, 0.0]));

        state.insert("param".to_string(), vec![1.5, -2.0]);
        state.insert("unused".to_string(), vec![9.0]);
        module.load_state_dict(&state)?;
        assert_eq!(module.param.to_vec(), vec![1.5, -2.0]);
        Ok(())
    }

    #[test]
    fn test_load_state_dict_errors() -> Result<(), DescentError> {
        let module = MockModule::new()?;
        let empty = StateDict::new();
        assert_eq!(
            module.load_state_dict(&empty).unwrap_err(),
            DescentError::MissingParameter {
                name: "param".to_string()
            }
        );

        let mut wrong = StateDict::new();
        wrong.insert("param".to_string(), vec![1.0]);
        assert!(module.load_state_dict(&wrong).unwrap_err().is_shape_error());
        assert_eq!(module.param.to_vec(), vec![0.0, 0.0]);
        Ok(())
    }
}
