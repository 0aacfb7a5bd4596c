pub mod optimizer;
pub mod sgd;
pub mod adam;
pub mod optimizer_type;

pub use optimizer::Optimizer;
pub use sgd::Sgd;
pub use adam::Adam;
pub use optimizer_type::OptimizerType;
