use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::network::spec::{NetworkSpec, BREAST_CANCER_FEATURES};
use crate::optim::optimizer_type::OptimizerType;
use crate::plot::curves::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Everything one training run needs. Missing JSON fields take the
/// defaults below, so a config file only has to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// `wdbc.data` or `breast_cancer.csv`.
    pub data_path: Option<PathBuf>,
    /// Where plots and the history file are written.
    pub output_dir: PathBuf,
    /// Fraction of samples held out for testing.
    pub test_size: f64,
    /// Seeds the split, weight initialization and per-epoch shuffling.
    pub seed: u64,
    pub network: NetworkSpec,
    pub optimizer: OptimizerType,
    pub epochs: usize,
    pub batch_size: usize,
    pub plot_width: u32,
    pub plot_height: u32,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            data_path: None,
            output_dir: PathBuf::from("output"),
            test_size: 0.3,
            seed: 70,
            network: NetworkSpec::breast_cancer(BREAST_CANCER_FEATURES),
            optimizer: OptimizerType::default(),
            epochs: 15,
            batch_size: 8,
            plot_width: DEFAULT_WIDTH,
            plot_height: DEFAULT_HEIGHT,
        }
    }
}

impl ExperimentConfig {
    /// Checks everything that does not depend on the dataset.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(Error::Config(format!("test_size must be in (0, 1), got {}", self.test_size)));
        }
        if self.epochs == 0 {
            return Err(Error::Config("epochs must be at least 1".into()));
        }
        if self.batch_size == 0 {
            return Err(Error::Config("batch_size must be at least 1".into()));
        }
        if self.plot_width == 0 || self.plot_height == 0 {
            return Err(Error::Config("plot dimensions must be positive".into()));
        }
        if !(self.optimizer.learning_rate() > 0.0) {
            return Err(Error::Config("learning_rate must be positive".into()));
        }
        self.network.validate()
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<ExperimentConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loss::loss_type::LossType;

    #[test]
    fn defaults_describe_the_reference_run() {
        let c = ExperimentConfig::default();
        assert_eq!((c.test_size, c.seed, c.epochs, c.batch_size), (0.3, 70, 15, 8));
        assert_eq!(c.network.loss, LossType::CrossEntropy);
        assert!(matches!(c.optimizer, OptimizerType::Adam { .. }));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let c: ExperimentConfig = serde_json::from_str(r#"{ "epochs": 40, "optimizer": { "type": "sgd", "learning_rate": 0.05 } }"#).unwrap();
        assert_eq!(c.epochs, 40);
        assert_eq!(c.batch_size, 8);
        assert_eq!(c.optimizer, OptimizerType::Sgd { learning_rate: 0.05 });
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut c = ExperimentConfig { test_size: 1.5, ..Default::default() };
        assert!(c.validate().is_err());
        c.test_size = 0.3;
        c.batch_size = 0;
        assert!(c.validate().is_err());
        c.batch_size = 8;
        c.optimizer = OptimizerType::Sgd { learning_rate: 0.0 };
        assert!(c.validate().is_err());
    }

    #[test]
    fn round_trips_through_a_file() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.child("config.json");
        let mut c = ExperimentConfig::default();
        c.data_path = Some(PathBuf::from("wdbc.data"));
        c.save_json(&path).unwrap();
        assert_eq!(ExperimentConfig::load_json(&path).unwrap(), c);
    }
}
