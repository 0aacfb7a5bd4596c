pub mod chart;
pub mod curves;
pub mod font;

pub use chart::{LineChart, Series, LegendPosition};
pub use curves::{accuracy_chart, loss_chart, DEFAULT_WIDTH, DEFAULT_HEIGHT};
