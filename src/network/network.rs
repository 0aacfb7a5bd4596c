use std::fmt::Write as _;

use crate::layers::dense::Layer;

#[derive(Debug, Clone)]
pub struct Network {
    pub layers: Vec<Layer>,
}

impl Network {
    /// Forward pass; stores activations in each layer for backprop.
    pub fn forward(&mut self, input: Vec<f64>) -> Vec<f64> {
        let mut current = input;
        for layer in &mut self.layers {
            current = layer.feed_from(current);
        }
        current
    }

    /// Forward pass that leaves the cached activations alone.
    pub fn infer(&self, input: Vec<f64>) -> Vec<f64> {
        self.layers.iter().fold(input, |current, layer| layer.infer(current))
    }

    /// Index of the most probable class.
    pub fn predict(&self, input: Vec<f64>) -> usize {
        argmax(&self.infer(input))
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map(|l| l.input_size()).unwrap_or(0)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map(|l| l.size).unwrap_or(0)
    }

    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(Layer::parameter_count).sum()
    }

    /// A model summary table: one row per layer with output shape and
    /// trainable parameter count.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(60);
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "{:<24}{:<16}{:>10}  {}", "Layer (type)", "Output Shape", "Param #", "Activation");
        let _ = writeln!(out, "{}", rule);
        for (i, layer) in self.layers.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:<24}{:<16}{:>10}  {}",
                format!("dense_{} (Dense)", i + 1),
                format!("(None, {})", layer.size),
                layer.parameter_count(),
                layer.activator.name(),
            );
        }
        let _ = writeln!(out, "{}", rule);
        let _ = write!(out, "Total params: {}", self.parameter_count());
        out
    }
}

/// Index of the maximum element in a slice.
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
