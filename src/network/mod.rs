pub mod network;
pub mod spec;

pub use network::{Network, argmax};
pub use spec::{NetworkSpec, LayerSpec, BREAST_CANCER_FEATURES};
