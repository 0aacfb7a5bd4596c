pub mod dataset;
pub mod scaler;
pub mod split;
pub mod wdbc;

pub use dataset::{Dataset, one_hot};
pub use scaler::StandardScaler;
pub use split::{Split, train_test_split};
