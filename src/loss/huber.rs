pub struct HuberLoss;

const DELTA: f64 = 1.0;

impl HuberLoss {
    /// Scalar Huber: mean(h(predicted − expected))
    /// where h(x) = 0.5·x²  if |x| ≤ δ
    ///              δ·(|x| − 0.5·δ)  otherwise
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(p, y)| {
                let x = p - y;
                if x.abs() <= DELTA {
                    0.5 * x * x
                } else {
                    DELTA * (x.abs() - 0.5 * DELTA)
                }
            })
            .sum::<f64>() / n
    }

    /// Per-output gradient: x / n  if |x| ≤ δ,  else δ·sign(x) / n
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        let n = predicted.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(p, y)| {
                let x = p - y;
                let g = if x.abs() <= DELTA { x } else { DELTA * x.signum() };
                g / n
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_is_linear_inside_delta_and_capped_outside() {
        let g = HuberLoss::derivative(&[0.5, 3.0, -4.0, 1.0], &[0.0, 0.0, 0.0, 1.0]);
        assert_eq!(g, vec![0.125, 0.25, -0.25, 0.0]);
    }

    #[test]
    fn loss_switches_to_linear_beyond_delta() {
        assert!((HuberLoss::loss(&[3.0], &[0.0]) - 2.5).abs() < 1e-12);
        assert!((HuberLoss::loss(&[0.5], &[0.0]) - 0.125).abs() < 1e-12);
    }
}
