pub mod cross_entropy;
pub mod mse;
pub mod mae;
pub mod huber;
pub mod loss_type;

pub use cross_entropy::CrossEntropyLoss;
pub use mse::MseLoss;
pub use mae::MaeLoss;
pub use huber::HuberLoss;
pub use loss_type::LossType;
