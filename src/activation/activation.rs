use serde::{Serialize, Deserialize};
use std::f64::consts::E;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Sigmoid,
    ReLU,
    Identity,
    /// Softmax is a vector-valued activation; use `apply()` and `backprop()`.
    /// The element-wise `function()` and `derivative()` must not see it.
    Softmax,
    Tanh,
    LeakyReLU { alpha: f64 },
}

impl ActivationFunction {
    /// Element-wise activation.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Identity => x,
            ActivationFunction::Softmax => {
                panic!("ActivationFunction::Softmax::function() must not be called directly; \
                        use ActivationFunction::apply() on the full vector.")
            }
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
        }
    }

    /// Element-wise derivative f'(z), evaluated at the pre-activation `z`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Identity => 1.0,
            ActivationFunction::Softmax => {
                panic!("ActivationFunction::Softmax::derivative() is not element-wise; \
                        use ActivationFunction::backprop().")
            }
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { 1.0 } else { *alpha },
        }
    }

    /// Applies the activation to a whole pre-activation vector.
    pub fn apply(&self, z: &[f64]) -> Vec<f64> {
        match self {
            ActivationFunction::Softmax => softmax(z),
            _ => z.iter().map(|&x| self.function(x)).collect(),
        }
    }

    /// Maps ∂L/∂a to ∂L/∂z.
    ///
    /// `z` is the cached pre-activation and `a` the cached activation.
    /// For Softmax this is the Jacobian-vector product
    /// `a_i · (g_i − Σ_j g_j · a_j)`; paired with cross-entropy it reduces to
    /// `predicted − expected`.
    pub fn backprop(&self, z: &[f64], a: &[f64], grad_a: &[f64]) -> Vec<f64> {
        match self {
            ActivationFunction::Softmax => {
                let dot: f64 = grad_a.iter().zip(a.iter()).map(|(g, s)| g * s).sum();
                a.iter().zip(grad_a.iter()).map(|(s, g)| s * (g - dot)).collect()
            }
            _ => z.iter().zip(grad_a.iter())
                .map(|(&zi, g)| g * self.derivative(zi))
                .collect(),
        }
    }

    /// Parses the short names accepted on the command line.
    pub fn from_name(name: &str) -> Option<ActivationFunction> {
        match name.trim().to_ascii_lowercase().as_str() {
            "relu"                     => Some(ActivationFunction::ReLU),
            "sigmoid"                  => Some(ActivationFunction::Sigmoid),
            "tanh"                     => Some(ActivationFunction::Tanh),
            "linear" | "identity"      => Some(ActivationFunction::Identity),
            "softmax"                  => Some(ActivationFunction::Softmax),
            "leaky_relu" | "leakyrelu" => Some(ActivationFunction::LeakyReLU { alpha: 0.01 }),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActivationFunction::Sigmoid          => "sigmoid",
            ActivationFunction::ReLU             => "relu",
            ActivationFunction::Identity         => "linear",
            ActivationFunction::Softmax          => "softmax",
            ActivationFunction::Tanh             => "tanh",
            ActivationFunction::LeakyReLU { .. } => "leaky_relu",
        }
    }
}

/// Numerically stable softmax (max-subtracted).
pub fn softmax(z: &[f64]) -> Vec<f64> {
    let max = z.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = z.iter().map(|&x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|x| x / sum).collect()
}
