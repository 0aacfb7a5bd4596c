use crate::{math::matrix::Matrix, layers::dense::Layer, optim::optimizer::Optimizer};

pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }
}

impl Optimizer for Sgd {
    /// Applies one SGD weight update to a layer given its pre-computed gradients.
    fn step(&mut self, _layer_index: usize, layer: &mut Layer, weights_grad: Matrix, biases_grad: Matrix) {
        let lr = self.learning_rate;
        layer.weights = layer.weights.clone() - weights_grad.map(|x| x * lr);
        layer.biases = layer.biases.clone() - biases_grad.map(|x| x * lr);
    }

    fn name(&self) -> &'static str {
        "sgd"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{activation::activation::ActivationFunction, layers::dense::Initializer};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn step_subtracts_scaled_gradient() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut layer = Layer::new(2, 1, ActivationFunction::Identity, &Initializer::Zeros, &mut rng);
        let mut sgd = Sgd::new(0.5);

        sgd.step(0, &mut layer, Matrix::row(vec![1.0, -2.0]), Matrix::row(vec![4.0, 0.0]));
        assert_eq!(layer.weights.data, vec![vec![-0.5, 1.0]]);
        assert_eq!(layer.biases.data, vec![vec![-2.0, 0.0]]);

        // Stateless: the same gradient moves the same distance again.
        sgd.step(0, &mut layer, Matrix::row(vec![1.0, -2.0]), Matrix::row(vec![4.0, 0.0]));
        assert_eq!(layer.weights.data, vec![vec![-1.0, 2.0]]);
    }
}
