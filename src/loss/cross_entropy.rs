/// Categorical cross-entropy loss for use with a Softmax output layer.
pub struct CrossEntropyLoss;

/// Predictions are clipped to [EPS, 1 − EPS] before the log.
const EPS: f64 = 1e-7;

impl CrossEntropyLoss {
    /// Computes the scalar cross-entropy loss:
    ///   L = -sum(expected[i] * log(clip(predicted[i])))
    ///
    /// `predicted` — softmax probabilities, shape [n_classes]
    /// `expected`  — one-hot (or soft) target distribution, shape [n_classes]
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(p, e)| -e * p.clamp(EPS, 1.0 - EPS).ln())
            .sum()
    }

    /// ∂L/∂predicted[i] = -expected[i] / clip(predicted[i]), clipped the
    /// same way as `loss`.
    ///
    /// Passed through `ActivationFunction::Softmax::backprop()` this becomes
    /// the familiar `predicted - expected` with respect to the logits.
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected.iter())
            .map(|(p, e)| -e / p.clamp(EPS, 1.0 - EPS))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confident_correct_prediction_has_small_loss() {
        assert!(CrossEntropyLoss::loss(&[0.01, 0.99], &[0.0, 1.0]) < 0.011);
        assert!(CrossEntropyLoss::loss(&[0.99, 0.01], &[0.0, 1.0]) > 4.6);
    }

    #[test]
    fn zero_probability_stays_finite() {
        let l = CrossEntropyLoss::loss(&[1.0, 0.0], &[0.0, 1.0]);
        assert!(l.is_finite());
        assert!(CrossEntropyLoss::derivative(&[1.0, 0.0], &[0.0, 1.0])[1].is_finite());
    }

    #[test]
    fn derivative_uses_the_loss_clip_range() {
        let saturated = CrossEntropyLoss::derivative(&[1.0, 0.0], &[1.0, 0.0]);
        let edge = CrossEntropyLoss::derivative(&[1.0 - EPS, EPS], &[1.0, 0.0]);
        assert_eq!(saturated, edge);
        assert_eq!(
            CrossEntropyLoss::loss(&[1.0, 0.0], &[1.0, 0.0]),
            CrossEntropyLoss::loss(&[1.0 - EPS, EPS], &[1.0, 0.0])
        );
        assert_eq!(CrossEntropyLoss::derivative(&[0.0, 1.0], &[1.0, 0.0])[0], -1.0 / EPS);
    }
}
