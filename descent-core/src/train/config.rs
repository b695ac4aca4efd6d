use crate::error::DescentError;

/// Settings for [`crate::train::Trainer`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerConfig {
    /// Number of passes over the batch source.
    pub epochs: usize,
    /// Emit a `log::debug!` line every `log_interval` batches; `None` disables it.
    pub log_interval: Option<usize>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            epochs: 5,
            log_interval: None,
        }
    }
}

impl TrainerConfig {
    pub fn new(epochs: usize) -> Self {
        TrainerConfig {
            epochs,
            ..Default::default()
        }
    }

    pub fn with_log_interval(mut self, every: usize) -> Self {
        self.log_interval = Some(every);
        self
    }

    /// # Errors
    /// Returns `DescentError::InvalidHyperparameter` if `epochs` or `log_interval` is zero.
    pub fn validate(&self) -> Result<(), DescentError> {
        if self.epochs == 0 {
            return Err(DescentError::InvalidHyperparameter {
                name: "epochs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.log_interval == Some(0) {
            return Err(DescentError::InvalidHyperparameter {
                name: "log_interval".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
