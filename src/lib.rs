//! A from-scratch feed-forward classifier for the Breast Cancer Wisconsin
//! (Diagnostic) dataset: loading, standardization, a seeded train/test
//! split, a small dense network trained with mini-batch Adam or SGD, and
//! PNG plots of the accuracy and loss curves.

pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod data;
pub mod metrics;
pub mod plot;
pub mod config;
pub mod experiment;
pub mod exercises;

// Convenience re-exports
pub use error::{Error, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::{Layer, Initializer};
pub use network::{Network, NetworkSpec, LayerSpec};
pub use loss::{LossType, CrossEntropyLoss, MseLoss};
pub use optim::{Optimizer, OptimizerType, Adam, Sgd};
pub use train::{train_loop, evaluate, EpochStats, History, TrainConfig};
pub use data::{Dataset, StandardScaler, train_test_split};
pub use metrics::ConfusionMatrix;
pub use config::ExperimentConfig;
pub use experiment::{run, run_on, Report};
