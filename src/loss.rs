use std::fmt;
use std::str::FromStr;

use burn::prelude::*;
use burn::tensor::activation;

use crate::error::XorError;

/// Selects both the output transform of the forward graph and the numeric
/// encoding of the boolean labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LossMode {
    /// Sigmoid output scored with binary log-loss; true/false encoded as 1/0.
    Logistic,
    /// Raw linear output scored with squared distance; true/false encoded as 1/-1.
    #[default]
    Squared,
}

impl LossMode {
    /// Numeric encoding of a boolean under this mode.
    pub fn encode(&self, value: bool) -> f32 {
        match (self, value) {
            (_, true) => 1.0,
            (Self::Logistic, false) => 0.0,
            (Self::Squared, false) => -1.0,
        }
    }

    /// Applies the mode's output transform to the raw affine prediction.
    pub fn transform<B: Backend, const D: usize>(&self, prediction: Tensor<B, D>) -> Tensor<B, D> {
        match self {
            Self::Logistic => activation::sigmoid(prediction),
            Self::Squared => prediction,
        }
    }

    /// Scalar loss of a transformed prediction against an encoded target.
    pub fn loss<B: Backend, const D: usize>(
        &self,
        prediction: Tensor<B, D>,
        target: Tensor<B, D>,
    ) -> Tensor<B, 1> {
        match self {
            Self::Logistic => BinaryLogLoss::new().forward(prediction, target),
            Self::Squared => SquaredDistance::new().forward(prediction, target),
        }
    }
}

impl FromStr for LossMode {
    type Err = XorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "logistic" => Ok(Self::Logistic),
            "squared" => Ok(Self::Squared),
            _ => Err(XorError::InvalidArgs(format!(
                "`{s}` is not a loss mode (expected `logistic` or `squared`)"
            ))),
        }
    }
}

impl fmt::Display for LossMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logistic => write!(f, "logistic"),
            Self::Squared => write!(f, "squared"),
        }
    }
}

/// Calculate the binary log-loss from probabilities and targets.
#[derive(Module, Clone, Debug, Default)]
pub struct BinaryLogLoss;

impl BinaryLogLoss {
    /// Create the criterion.
    pub fn new() -> Self {
        Self
    }

    /// Compute the criterion on the input tensor.
    ///
    /// # Shapes
    ///
    /// - probabilities: `[batch_size, 1]`, each in `(0, 1)`
    /// - targets: `[batch_size, 1]`
    pub fn forward<const D: usize, B: Backend>(
        &self,
        probabilities: Tensor<B, D>,
        targets: Tensor<B, D>,
    ) -> Tensor<B, 1> {
        // - (target * log(p) + (1 - target) * log(1 - p)), clamped to avoid log(0)
        let loss = (targets.clone() - 1) * probabilities.clone().neg().log1p().clamp_min(-100.0)
            - targets * probabilities.log().clamp_min(-100.0);
        loss.mean()
    }
}

/// Calculate the squared distance between predictions and targets.
#[derive(Module, Clone, Debug, Default)]
pub struct SquaredDistance;

impl SquaredDistance {
    /// Create the criterion.
    pub fn new() -> Self {
        Self
    }

    /// Compute the criterion on the input tensor.
    ///
    /// # Shapes
    ///
    /// - predictions: `[batch_size, 1]`
    /// - targets: `[batch_size, 1]`
    pub fn forward<const D: usize, B: Backend>(
        &self,
        predictions: Tensor<B, D>,
        targets: Tensor<B, D>,
    ) -> Tensor<B, 1> {
        let diff = predictions.sub(targets);
        (diff.clone() * diff).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodings_follow_the_mode() {
        assert_eq!(LossMode::Logistic.encode(true), 1.0);
        assert_eq!(LossMode::Logistic.encode(false), 0.0);
        assert_eq!(LossMode::Squared.encode(true), 1.0);
        assert_eq!(LossMode::Squared.encode(false), -1.0);
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("logistic".parse::<LossMode>().unwrap(), LossMode::Logistic);
        assert_eq!("Squared".parse::<LossMode>().unwrap(), LossMode::Squared);
        assert!("mse".parse::<LossMode>().is_err());
    }
}
