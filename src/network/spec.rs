use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::layers::dense::{Initializer, Layer};
use crate::loss::loss_type::LossType;
use crate::network::network::Network;

/// Describes one layer in a network specification.
///
/// Fields:
/// - `size`       — number of neurons in this layer
/// - `input_size` — number of neurons feeding into this layer (i.e. the output
///                  size of the previous layer, or the raw input dimension for
///                  the first layer)
/// - `activation` — activation function applied after the linear transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub input_size: usize,
    pub activation: ActivationFunction,
}

/// A fully serializable description of a network architecture plus its
/// training loss type and weight initializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub name: String,
    /// Ordered list of layer descriptions (input → output).
    pub layers: Vec<LayerSpec>,
    pub loss: LossType,
    #[serde(default)]
    pub initializer: Initializer,
}

/// Number of diagnostic features per sample.
pub const BREAST_CANCER_FEATURES: usize = 30;

impl NetworkSpec {
    /// The classifier used for the diagnosis task:
    /// `input_dim → 16 ReLU → 16 ReLU → 2 Softmax`, categorical
    /// cross-entropy, U(−0.05, 0.05) weights and biases.
    pub fn breast_cancer(input_dim: usize) -> NetworkSpec {
        NetworkSpec::dense_classifier(
            "breast_cancer",
            input_dim,
            &[16, 16],
            ActivationFunction::ReLU,
            2,
        )
    }

    /// A stack of equally-activated hidden layers topped by a Softmax layer
    /// with `n_classes` units.
    pub fn dense_classifier(
        name: &str,
        input_dim: usize,
        hidden: &[usize],
        activation: ActivationFunction,
        n_classes: usize,
    ) -> NetworkSpec {
        let mut layers = Vec::with_capacity(hidden.len() + 1);
        let mut fan_in = input_dim;
        for &size in hidden {
            layers.push(LayerSpec { size, input_size: fan_in, activation: activation.clone() });
            fan_in = size;
        }
        layers.push(LayerSpec { size: n_classes, input_size: fan_in, activation: ActivationFunction::Softmax });

        NetworkSpec {
            name: name.to_owned(),
            layers,
            loss: LossType::CrossEntropy,
            initializer: Initializer::default(),
        }
    }

    /// Sizes of every layer except the output layer.
    pub fn hidden_sizes(&self) -> Vec<usize> {
        let n = self.layers.len().saturating_sub(1);
        self.layers[..n].iter().map(|l| l.size).collect()
    }

    /// Activation of the first hidden layer, if there is one.
    pub fn hidden_activation(&self) -> Option<&ActivationFunction> {
        let n = self.layers.len().saturating_sub(1);
        self.layers[..n].first().map(|l| &l.activation)
    }

    /// Rebuilds the hidden stack with new sizes and activation, keeping the
    /// input width, output layer, loss and initializer. Zero-sized entries
    /// are dropped, so `[16, 0]` removes the second hidden layer.
    pub fn with_hidden_layers(&self, hidden: &[usize], activation: ActivationFunction) -> NetworkSpec {
        let sizes: Vec<usize> = hidden.iter().copied().filter(|&s| s > 0).collect();
        let output = self.layers.last().map(|l| l.activation.clone()).unwrap_or(ActivationFunction::Softmax);
        let mut spec = NetworkSpec::dense_classifier(&self.name, self.input_size(), &sizes, activation, self.output_size());
        if let Some(last) = spec.layers.last_mut() {
            last.activation = output;
        }
        spec.loss = self.loss;
        spec.initializer = self.initializer.clone();
        spec
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map(|l| l.input_size).unwrap_or(0)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map(|l| l.size).unwrap_or(0)
    }

    /// Checks that the layer chain is well formed.
    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(Error::Config("network has no layers".into()));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.size == 0 || layer.input_size == 0 {
                return Err(Error::Config(format!("layer {}: sizes must be positive", i + 1)));
            }
            if i > 0 && layer.input_size != self.layers[i - 1].size {
                return Err(Error::Config(format!(
                    "layer {}: input_size {} does not match previous layer size {}",
                    i + 1, layer.input_size, self.layers[i - 1].size
                )));
            }
            if layer.activation == ActivationFunction::Softmax && i + 1 != self.layers.len() {
                return Err(Error::Config(format!(
                    "layer {}: softmax is only allowed on the output layer", i + 1
                )));
            }
        }
        Ok(())
    }

    /// Validates the spec and instantiates freshly initialized layers.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Network> {
        self.validate()?;
        let layers = self.layers.iter()
            .map(|l| Layer::new(l.size, l.input_size, l.activation.clone(), &self.initializer, rng))
            .collect();
        Ok(Network { layers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn breast_cancer_architecture() {
        let spec = NetworkSpec::breast_cancer(BREAST_CANCER_FEATURES);
        let shape: Vec<(usize, usize)> = spec.layers.iter().map(|l| (l.input_size, l.size)).collect();
        assert_eq!(shape, vec![(30, 16), (16, 16), (16, 2)]);
        assert_eq!(spec.layers[2].activation, ActivationFunction::Softmax);
        assert_eq!(spec.loss, LossType::CrossEntropy);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn rejects_broken_chain() {
        let mut spec = NetworkSpec::breast_cancer(30);
        spec.layers[1].input_size = 8;
        assert!(matches!(spec.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_hidden_softmax() {
        let spec = NetworkSpec::dense_classifier("x", 4, &[3], ActivationFunction::Softmax, 2);
        assert!(spec.validate().is_err());
    }

    #[test]
    fn build_is_deterministic_for_a_seed() {
        let spec = NetworkSpec::breast_cancer(30);
        let a = spec.build(&mut StdRng::seed_from_u64(70)).unwrap();
        let b = spec.build(&mut StdRng::seed_from_u64(70)).unwrap();
        assert_eq!(a.layers[0].weights, b.layers[0].weights);
        assert_eq!(a.parameter_count(), 30 * 16 + 16 + 16 * 16 + 16 + 16 * 2 + 2);
    }

    #[test]
    fn hidden_layers_can_be_resized_and_removed() {
        let base = NetworkSpec::breast_cancer(30);
        assert_eq!(base.hidden_sizes(), vec![16, 16]);

        let wide = base.with_hidden_layers(&[32, 8], ActivationFunction::Tanh);
        let shape: Vec<(usize, usize)> = wide.layers.iter().map(|l| (l.input_size, l.size)).collect();
        assert_eq!(shape, vec![(30, 32), (32, 8), (8, 2)]);
        assert_eq!(wide.hidden_activation(), Some(&ActivationFunction::Tanh));
        assert_eq!(wide.layers[2].activation, ActivationFunction::Softmax);

        let shallow = base.with_hidden_layers(&[16, 0], ActivationFunction::ReLU);
        assert_eq!(shallow.hidden_sizes(), vec![16]);
        assert!(shallow.validate().is_ok());
    }

    #[test]
    fn spec_serializes_to_json() {
        let spec = NetworkSpec::breast_cancer(30);
        let json = serde_json::to_string(&spec).unwrap();
        let back: NetworkSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, back);
    }
}
