use crate::autograd::no_grad;
use crate::error::{DescentError, ShapeError};
use crate::nn::{Loss, Module};
use crate::ops::traits::Element;
use crate::optim::Optimizer;
use crate::train::batch::BatchSource;
use crate::train::cancel::CancellationToken;
use crate::train::config::TrainerConfig;

/// Summary of one completed epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochReport {
    /// Zero-based epoch index.
    pub epoch: usize,
    /// Average of the per-batch mean losses.
    pub mean_loss: f64,
    pub batches: usize,
    pub samples: usize,
}

/// Result of [`Trainer::fit`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrainingReport {
    /// One entry per completed epoch, in order.
    pub epochs: Vec<EpochReport>,
    /// `true` if the run stopped early because its token was cancelled.
    pub cancelled: bool,
}

impl TrainingReport {
    /// Mean loss of every completed epoch, in order.
    pub fn losses(&self) -> Vec<f64> {
        self.epochs.iter().map(|e| e.mean_loss).collect()
    }

    pub fn final_loss(&self) -> Option<f64> {
        self.epochs.last().map(|e| e.mean_loss)
    }
}

/// Result of [`Trainer::evaluate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Per-example mean loss over the whole source.
    pub mean_loss: f64,
    /// Fraction of examples whose highest score is at the target class.
    pub accuracy: f64,
    pub samples: usize,
}

/// Drives epochs of mini-batch gradient descent.
pub struct Trainer<'r> {
    config: TrainerConfig,
    cancellation: Option<CancellationToken>,
    reporter: Option<Box<dyn FnMut(&EpochReport) + 'r>>,
}

impl<'r> Trainer<'r> {
    /// # Errors
    /// Returns `DescentError::InvalidHyperparameter` if `config` does not validate.
    pub fn new(config: TrainerConfig) -> Result<Self, DescentError> {
        config.validate()?;
        Ok(Trainer {
            config,
            cancellation: None,
            reporter: None,
        })
    }

    /// Checks `token` before every batch and stops the run once it is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Calls `reporter` with the report of every completed epoch.
    pub fn with_reporter<F>(mut self, reporter: F) -> Self
    where
        F: FnMut(&EpochReport) + 'r,
    {
        self.reporter = Some(Box::new(reporter));
        self
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .map(|t| t.is_cancelled())
            .unwrap_or(false)
    }

    /// Trains `model` for the configured number of epochs.
    ///
    /// Each batch runs forward → loss → `zero_grad` → backward → `step`. The
    /// first error aborts the run and is returned as is; no batch is skipped.
    /// A cancelled run returns the epochs completed so far with
    /// `cancelled = true`.
    ///
    /// # Errors
    /// * Any error raised by the source, the model, the loss or the optimizer.
    /// * `DescentError::Data` if the source yields no batch for an epoch.
    pub fn fit<T: Element>(
        &mut self,
        model: &dyn Module<T>,
        loss_fn: &dyn Loss<T>,
        optimizer: &mut dyn Optimizer,
        source: &mut dyn BatchSource<T>,
    ) -> Result<TrainingReport, DescentError> {
        let mut report = TrainingReport::default();
        log::info!(
            "Training for {} epochs, lr = {}",
            self.config.epochs,
            optimizer.learning_rate()
        );

        'epochs: for epoch in 0..self.config.epochs {
            let mut loss_sum = 0.0;
            let mut batches = 0;
            let mut samples = 0;

            for batch in source.batches() {
                if self.is_cancelled() {
                    report.cancelled = true;
                    break 'epochs;
                }
                let batch = batch?;

                let output = model.forward(&batch.inputs)?;
                let loss = loss_fn.forward(&output, &batch.targets)?;
                let value = loss.item()?.to_f64_lossy();
                optimizer.zero_grad();
                loss.backward()?;
                optimizer.step()?;

                loss_sum += value;
                batches += 1;
                samples += batch.len();
                if let Some(every) = self.config.log_interval {
                    if batches % every == 0 {
                        log::debug!("epoch {} batch {}: loss {:.6}", epoch + 1, batches, value);
                    }
                }
            }

            if batches == 0 {
                return Err(DescentError::Data(format!(
                    "batch source produced no batches in epoch {}",
                    epoch + 1
                )));
            }

            let epoch_report = EpochReport {
                epoch,
                mean_loss: loss_sum / batches as f64,
                batches,
                samples,
            };
            log::info!(
                "Epoch {}/{} - Training loss: {:.6}",
                epoch + 1,
                self.config.epochs,
                epoch_report.mean_loss
            );
            if let Some(reporter) = self.reporter.as_mut() {
                reporter(&epoch_report);
            }
            report.epochs.push(epoch_report);
        }

        if report.cancelled {
            log::info!("Training cancelled after {} epochs", report.epochs.len());
        }
        Ok(report)
    }

    /// Computes the loss and accuracy of `model` over one pass of `source`
    /// without recording any graph.
    ///
    /// # Errors
    /// * Any error raised by the source, the model or the loss.
    /// * `ShapeError::EmptyBatch` if the source yields no examples.
    pub fn evaluate<T: Element>(
        model: &dyn Module<T>,
        loss_fn: &dyn Loss<T>,
        source: &mut dyn BatchSource<T>,
    ) -> Result<Evaluation, DescentError> {
        let _guard = no_grad();
        let mut weighted_loss = 0.0;
        let mut correct = 0;
        let mut samples = 0;

        for batch in source.batches() {
            let batch = batch?;
            let output = model.forward(&batch.inputs)?;
            let loss = loss_fn.forward(&output, &batch.targets)?.item()?.to_f64_lossy();
            weighted_loss += loss * batch.len() as f64;

            let scores = output.to_vec();
            let classes = if batch.is_empty() { 0 } else { scores.len() / batch.len() };
            for (row, &target) in scores.chunks(classes.max(1)).zip(batch.targets.iter()) {
                if argmax(row) == Some(target) {
                    correct += 1;
                }
            }
            samples += batch.len();
        }

        if samples == 0 {
            return Err(ShapeError::EmptyBatch {
                operation: "evaluate".to_string(),
            }
            .into());
        }
        Ok(Evaluation {
            mean_loss: weighted_loss / samples as f64,
            accuracy: correct as f64 / samples as f64,
            samples,
        })
    }
}

fn argmax<T: Element>(row: &[T]) -> Option<usize> {
    row.iter()
        .enumerate()
        .fold(None, |best: Option<(usize, T)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
#[path = "trainer_test.rs"]
mod tests;
