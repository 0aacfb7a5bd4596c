use crate::{math::matrix::Matrix, layers::dense::Layer};

/// Updates a layer's parameters from its averaged mini-batch gradients.
///
/// `layer_index` identifies the layer across calls so stateful optimizers
/// can keep per-layer moments.
pub trait Optimizer {
    fn step(&mut self, layer_index: usize, layer: &mut Layer, weights_grad: Matrix, biases_grad: Matrix);

    fn name(&self) -> &'static str;
}
