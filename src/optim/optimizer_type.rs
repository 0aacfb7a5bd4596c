use serde::{Serialize, Deserialize};

use crate::optim::{adam::Adam, optimizer::Optimizer, sgd::Sgd};

/// Serializable optimizer choice with its hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OptimizerType {
    Sgd { learning_rate: f64 },
    Adam { learning_rate: f64, beta1: f64, beta2: f64, epsilon: f64 },
}

impl Default for OptimizerType {
    fn default() -> Self {
        OptimizerType::Adam { learning_rate: 0.001, beta1: 0.9, beta2: 0.999, epsilon: 1e-7 }
    }
}

impl OptimizerType {
    /// Builds a fresh optimizer (no accumulated state).
    pub fn build(&self) -> Box<dyn Optimizer> {
        match *self {
            OptimizerType::Sgd { learning_rate } => Box::new(Sgd::new(learning_rate)),
            OptimizerType::Adam { learning_rate, beta1, beta2, epsilon } => {
                Box::new(Adam::new(learning_rate, beta1, beta2, epsilon))
            }
        }
    }

    /// Default hyperparameters for a named optimizer.
    pub fn from_name(name: &str) -> Option<OptimizerType> {
        match name.trim().to_ascii_lowercase().as_str() {
            "adam" => Some(OptimizerType::default()),
            "sgd"  => Some(OptimizerType::Sgd { learning_rate: 0.01 }),
            _ => None,
        }
    }

    pub fn learning_rate(&self) -> f64 {
        match *self {
            OptimizerType::Sgd { learning_rate } | OptimizerType::Adam { learning_rate, .. } => learning_rate,
        }
    }

    pub fn with_learning_rate(mut self, lr: f64) -> OptimizerType {
        match &mut self {
            OptimizerType::Sgd { learning_rate } | OptimizerType::Adam { learning_rate, .. } => *learning_rate = lr,
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{activation::activation::ActivationFunction, layers::dense::{Initializer, Layer}, math::matrix::Matrix};
    use rand::{rngs::StdRng, SeedableRng};

    fn stepped(optimizer: &OptimizerType, grad: f64) -> (f64, &'static str) {
        let mut rng = StdRng::seed_from_u64(0);
        let mut layer = Layer::new(1, 1, ActivationFunction::Identity, &Initializer::Zeros, &mut rng);
        let mut built = optimizer.build();
        built.step(0, &mut layer, Matrix::row(vec![grad]), Matrix::row(vec![0.0]));
        (layer.weights.data[0][0], built.name())
    }

    #[test]
    fn build_carries_hyperparameters() {
        // SGD moves by lr · g, Adam's first step by ≈ lr regardless of |g|.
        let (w, name) = stepped(&OptimizerType::Sgd { learning_rate: 0.1 }, 4.0);
        assert_eq!(name, "sgd");
        assert!((w + 0.4).abs() < 1e-12);

        let adam = OptimizerType::default().with_learning_rate(0.01);
        let (w, name) = stepped(&adam, 4.0);
        assert_eq!(name, "adam");
        assert!((w + 0.01).abs() < 1e-6);
    }

    #[test]
    fn named_defaults() {
        assert_eq!(OptimizerType::from_name("SGD"), Some(OptimizerType::Sgd { learning_rate: 0.01 }));
        let adam = OptimizerType::from_name("adam").unwrap();
        assert_eq!(adam.learning_rate(), 0.001);
        assert_eq!(OptimizerType::from_name("rmsprop"), None);
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_string(&OptimizerType::Sgd { learning_rate: 0.05 }).unwrap();
        assert_eq!(json, r#"{"type":"sgd","learning_rate":0.05}"#);
    }
}
