use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// How a layer's weights and biases are drawn at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Initializer {
    /// U(low, high) for both weights and biases.
    Uniform { low: f64, high: f64 },
    /// He-normal weights, zero biases. Pairs with ReLU.
    He,
    /// Xavier-normal weights, zero biases. Pairs with Sigmoid/Tanh.
    Xavier,
    Zeros,
}

impl Default for Initializer {
    fn default() -> Self {
        Initializer::Uniform { low: -0.05, high: 0.05 }
    }
}

#[derive(Debug, Clone)]
pub struct Layer {
    pub size: usize,
    pub neurons: Matrix,
    pre_neurons: Matrix,  // pre-activation values (z = xW + b) needed for correct derivative
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction,
}

impl Layer {
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        initializer: &Initializer,
        rng: &mut R,
    ) -> Layer {
        let (weights, biases) = match *initializer {
            Initializer::Uniform { low, high } => (
                Matrix::uniform(input_size, size, low, high, rng),
                Matrix::uniform(1, size, low, high, rng),
            ),
            Initializer::He     => (Matrix::he(input_size, size, rng), Matrix::zeros(1, size)),
            Initializer::Xavier => (Matrix::xavier(input_size, size, rng), Matrix::zeros(1, size)),
            Initializer::Zeros  => (Matrix::zeros(input_size, size), Matrix::zeros(1, size)),
        };

        Layer {
            size,
            neurons: Matrix::zeros(1, size),
            pre_neurons: Matrix::zeros(1, size),
            weights,
            biases,
            activator: activation,
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    pub fn parameter_count(&self) -> usize {
        self.weights.len() + self.biases.len()
    }

    /// Forward pass for one sample; caches z and a for backprop.
    pub fn feed_from(&mut self, input: Vec<f64>) -> Vec<f64> {
        let z = self.linear(input);
        let a = self.activator.apply(&z.data[0]);
        self.pre_neurons = z;
        self.neurons = Matrix::row(a.clone());
        a
    }

    /// Forward pass without touching the cached activations.
    pub fn infer(&self, input: Vec<f64>) -> Vec<f64> {
        let z = self.linear(input);
        self.activator.apply(&z.data[0])
    }

    fn linear(&self, input: Vec<f64>) -> Matrix {
        &Matrix::row(input) * &self.weights + self.biases.clone()
    }

    /// Computes gradient adjustments. Returns (weights_grad, biases_grad).
    /// `next_layer_delta` is ∂L/∂a for this layer (error in activation space);
    /// the returned biases gradient equals ∂L/∂z.
    pub fn compute_gradients(
        &self,
        next_layer_delta: Matrix,
        inputs: &Matrix,
    ) -> (Matrix, Matrix) {
        let layer_delta = Matrix::row(self.activator.backprop(
            &self.pre_neurons.data[0],
            &self.neurons.data[0],
            &next_layer_delta.data[0],
        ));

        let weights_adjustment = &inputs.transpose() * &layer_delta;
        let biases_adjustment = layer_delta;

        (weights_adjustment, biases_adjustment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn uniform_initializer_fills_weights_and_biases() {
        let mut rng = StdRng::seed_from_u64(70);
        let layer = Layer::new(16, 30, ActivationFunction::ReLU, &Initializer::default(), &mut rng);
        assert_eq!((layer.weights.rows, layer.weights.cols), (30, 16));
        assert_eq!((layer.biases.rows, layer.biases.cols), (1, 16));
        assert_eq!(layer.parameter_count(), 30 * 16 + 16);
        assert!(layer.biases.data[0].iter().any(|&b| b != 0.0));
    }

    #[test]
    fn gradients_match_finite_differences() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut layer = Layer::new(2, 3, ActivationFunction::Tanh, &Initializer::Xavier, &mut rng);
        let x = vec![0.5, -1.0, 2.0];

        // L = sum(a), so dL/da = 1.
        let _ = layer.feed_from(x.clone());
        let (w_grad, _) = layer.compute_gradients(Matrix::row(vec![1.0, 1.0]), &Matrix::row(x.clone()));

        let h = 1e-6;
        let mut bumped = layer.clone();
        bumped.weights.data[1][0] += h;
        let plus: f64 = bumped.infer(x.clone()).iter().sum();
        bumped.weights.data[1][0] -= 2.0 * h;
        let minus: f64 = bumped.infer(x).iter().sum();
        let numeric = (plus - minus) / (2.0 * h);

        assert!((w_grad.data[1][0] - numeric).abs() < 1e-6);
    }

    #[test]
    fn infer_matches_feed_from() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut layer = Layer::new(2, 2, ActivationFunction::Softmax, &Initializer::He, &mut rng);
        let a = layer.infer(vec![1.0, 2.0]);
        assert_eq!(a, layer.feed_from(vec![1.0, 2.0]));
    }
}
