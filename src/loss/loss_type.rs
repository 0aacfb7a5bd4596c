use serde::{Serialize, Deserialize};

use crate::loss::{CrossEntropyLoss, HuberLoss, MaeLoss, MseLoss};

/// Selects which loss function the training loop uses.
///
/// - `CrossEntropy` — Categorical cross-entropy; pair with Softmax output.
/// - `Mse`          — Mean-squared error.
/// - `Mae`          — Mean absolute error.
/// - `Huber`        — Huber loss (δ=1.0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    CrossEntropy,
    Mse,
    Mae,
    Huber,
}

impl LossType {
    /// Scalar loss for one sample.
    pub fn loss(self, predicted: &[f64], expected: &[f64]) -> f64 {
        match self {
            LossType::CrossEntropy => CrossEntropyLoss::loss(predicted, expected),
            LossType::Mse          => MseLoss::loss(predicted, expected),
            LossType::Mae          => MaeLoss::loss(predicted, expected),
            LossType::Huber        => HuberLoss::loss(predicted, expected),
        }
    }

    /// ∂L/∂predicted for one sample.
    pub fn derivative(self, predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        match self {
            LossType::CrossEntropy => CrossEntropyLoss::derivative(predicted, expected),
            LossType::Mse          => MseLoss::derivative(predicted, expected),
            LossType::Mae          => MaeLoss::derivative(predicted, expected),
            LossType::Huber        => HuberLoss::derivative(predicted, expected),
        }
    }

    pub fn from_name(name: &str) -> Option<LossType> {
        match name.trim().to_ascii_lowercase().as_str() {
            "categorical_crossentropy" | "cross_entropy" | "crossentropy" => Some(LossType::CrossEntropy),
            "mse" | "mean_squared_error"  => Some(LossType::Mse),
            "mae" | "mean_absolute_error" => Some(LossType::Mae),
            "huber"                       => Some(LossType::Huber),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LossType::CrossEntropy => "categorical_crossentropy",
            LossType::Mse          => "mse",
            LossType::Mae          => "mae",
            LossType::Huber        => "huber",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for lt in [LossType::CrossEntropy, LossType::Mse, LossType::Mae, LossType::Huber] {
            assert_eq!(LossType::from_name(lt.name()), Some(lt));
        }
    }

    #[test]
    fn regression_losses_agree_on_small_errors() {
        let p = [0.6, 0.4];
        let y = [1.0, 0.0];
        assert!((LossType::Mse.loss(&p, &y) - 0.16).abs() < 1e-12);
        assert!((LossType::Huber.loss(&p, &y) - 0.08).abs() < 1e-12);
        assert!((LossType::Mae.loss(&p, &y) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn derivatives_dispatch_per_loss() {
        let p = [0.5, 0.5];
        let y = [1.0, 0.5];
        assert_eq!(LossType::Mae.derivative(&p, &y), vec![-0.5, 0.0]);
        assert_eq!(LossType::Huber.derivative(&p, &y), vec![-0.25, 0.0]);
        assert_eq!(LossType::Mse.derivative(&p, &y), vec![-0.5, 0.0]);
        assert_eq!(LossType::CrossEntropy.derivative(&p, &y), vec![-2.0, -1.0]);
    }
}
