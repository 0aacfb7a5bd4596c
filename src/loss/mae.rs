/// Mean absolute error, averaged over the outputs of one sample.
pub struct MaeLoss;

impl MaeLoss {
    /// `mean(|p − y|)`.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted.iter().zip(expected)
            .map(|(p, y)| (p - y).abs())
            .sum::<f64>() / n
    }

    /// `sign(p − y) / n`. Where the prediction is exact the subgradient
    /// is 0, so an already-correct output is left alone.
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        let n = predicted.len() as f64;
        predicted.iter().zip(expected)
            .map(|(p, y)| sign(p - y) / n)
            .collect()
    }
}

fn sign(x: f64) -> f64 {
    if x == 0.0 { 0.0 } else { x.signum() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_is_scaled_sign_of_the_error() {
        let g = MaeLoss::derivative(&[0.9, 0.1, 0.5, 0.2], &[1.0, 0.0, 0.5, 0.2]);
        assert_eq!(g, vec![-0.25, 0.25, 0.0, 0.0]);
    }

    #[test]
    fn loss_ignores_error_direction() {
        assert!((MaeLoss::loss(&[0.2, 0.8], &[0.0, 1.0]) - 0.2).abs() < 1e-12);
        assert_eq!(MaeLoss::loss(&[3.0], &[3.0]), 0.0);
    }
}
