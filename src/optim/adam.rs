use crate::{math::matrix::Matrix, layers::dense::Layer, optim::optimizer::Optimizer};

/// First and second moment estimates for one parameter matrix.
#[derive(Debug, Clone)]
struct Moments {
    m: Matrix,
    v: Matrix,
}

impl Moments {
    fn zeros_like(p: &Matrix) -> Moments {
        Moments { m: Matrix::zeros(p.rows, p.cols), v: Matrix::zeros(p.rows, p.cols) }
    }
}

/// Adam with bias-corrected moment estimates.
pub struct Adam {
    pub learning_rate: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
    /// Per layer: (weights moments, biases moments, step count).
    state: Vec<Option<(Moments, Moments, i32)>>,
}

impl Adam {
    pub fn new(learning_rate: f64, beta1: f64, beta2: f64, epsilon: f64) -> Adam {
        Adam { learning_rate, beta1, beta2, epsilon, state: Vec::new() }
    }

    fn update(&self, param: &mut Matrix, grad: &Matrix, moments: &mut Moments, t: i32) {
        let (b1, b2) = (self.beta1, self.beta2);
        let correction1 = 1.0 - b1.powi(t);
        let correction2 = 1.0 - b2.powi(t);
        for i in 0..param.rows {
            for j in 0..param.cols {
                let g = grad.data[i][j];
                let m = b1 * moments.m.data[i][j] + (1.0 - b1) * g;
                let v = b2 * moments.v.data[i][j] + (1.0 - b2) * g * g;
                moments.m.data[i][j] = m;
                moments.v.data[i][j] = v;
                let m_hat = m / correction1;
                let v_hat = v / correction2;
                param.data[i][j] -= self.learning_rate * m_hat / (v_hat.sqrt() + self.epsilon);
            }
        }
    }
}

impl Default for Adam {
    fn default() -> Self {
        Adam::new(0.001, 0.9, 0.999, 1e-7)
    }
}

impl Optimizer for Adam {
    fn step(&mut self, layer_index: usize, layer: &mut Layer, weights_grad: Matrix, biases_grad: Matrix) {
        if self.state.len() <= layer_index {
            self.state.resize(layer_index + 1, None);
        }
        let (mut w_mom, mut b_mom, t) = self.state[layer_index].take().unwrap_or_else(|| {
            (Moments::zeros_like(&layer.weights), Moments::zeros_like(&layer.biases), 0)
        });
        let t = t + 1;

        self.update(&mut layer.weights, &weights_grad, &mut w_mom, t);
        self.update(&mut layer.biases, &biases_grad, &mut b_mom, t);

        self.state[layer_index] = Some((w_mom, b_mom, t));
    }

    fn name(&self) -> &'static str {
        "adam"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{activation::activation::ActivationFunction, layers::dense::Initializer};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn first_step_moves_each_parameter_by_learning_rate() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut layer = Layer::new(2, 1, ActivationFunction::Identity, &Initializer::Zeros, &mut rng);
        let mut adam = Adam::default();

        adam.step(0, &mut layer, Matrix::from_data(vec![vec![0.5, -3.0]]), Matrix::row(vec![1e-3, 0.0]));

        // Bias correction makes the first update ≈ lr · sign(g).
        assert!((layer.weights.data[0][0] + 0.001).abs() < 1e-6);
        assert!((layer.weights.data[0][1] - 0.001).abs() < 1e-6);
        assert_eq!(layer.biases.data[0][1], 0.0);
    }

    #[test]
    fn keeps_separate_state_per_layer() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut a = Layer::new(1, 1, ActivationFunction::Identity, &Initializer::Zeros, &mut rng);
        let mut b = Layer::new(3, 2, ActivationFunction::Identity, &Initializer::Zeros, &mut rng);
        let mut adam = Adam::default();

        adam.step(1, &mut b, Matrix::zeros(2, 3), Matrix::zeros(1, 3));
        adam.step(0, &mut a, Matrix::row(vec![1.0]), Matrix::row(vec![1.0]));
        adam.step(1, &mut b, Matrix::zeros(2, 3), Matrix::zeros(1, 3));

        assert!(a.weights.data[0][0] < 0.0);
        assert!(b.weights.data.iter().flatten().all(|&w| w == 0.0));
    }
}
