use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use breast_cancer_nn::{ActivationFunction, ExperimentConfig, LossType, OptimizerType};

pub const HELP: &str = "\
breast-cancer-nn

Trains a small dense neural network (30 -> 16 relu -> 16 relu -> 2 softmax)
on the Breast Cancer Wisconsin (Diagnostic) dataset and plots training and
test accuracy/loss per epoch.

USAGE:
    breast-cancer-nn --data PATH [OPTIONS]

The dataset may be the UCI `wdbc.data` file or scikit-learn's
`breast_cancer.csv`. Plots (accuracy.png, loss.png) and history.json are
written to the output directory.

FLAGS:
    -h, --help                  Show this help message and exit

OPTIONS:
    -d, --data <PATH>           Dataset file
    -c, --config <PATH>         Load an experiment config (JSON); flags below override it
    -o, --out <DIR>             Output directory [default: output]
        --epochs <N>            Training epochs [default: 15]
        --batch-size <N>        Mini-batch size [default: 8]
        --seed <N>              Seed for split, initialization and shuffling [default: 70]
        --test-size <F>         Held-out fraction [default: 0.3]
        --hidden1 <N>           Units in the first hidden layer [default: 16]
        --hidden2 <N>           Units in the second hidden layer, 0 removes it [default: 16]
        --activation <NAME>     Hidden activation: relu, sigmoid, tanh, linear, leaky_relu
        --optimizer <NAME>      adam or sgd [default: adam]
        --learning-rate <F>     Optimizer learning rate
        --loss <NAME>           categorical_crossentropy, mse, mae or huber
        --dump-config <PATH>    Write the effective config as JSON and exit

Log verbosity follows RUST_LOG (default: info).
";

#[derive(Debug, Default)]
pub struct AppArgs {
    pub data: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub epochs: Option<usize>,
    pub batch_size: Option<usize>,
    pub seed: Option<u64>,
    pub test_size: Option<f64>,
    pub hidden1: Option<usize>,
    pub hidden2: Option<usize>,
    pub activation: Option<String>,
    pub optimizer: Option<String>,
    pub learning_rate: Option<f64>,
    pub loss: Option<String>,
    pub dump_config: Option<PathBuf>,
}

impl AppArgs {
    /// Parses the process arguments. `Ok(None)` means help was printed.
    pub fn parse() -> Result<Option<Self>> {
        let mut pargs = pico_args::Arguments::from_env();

        if pargs.contains(["-h", "--help"]) {
            print!("{}", HELP);
            return Ok(None);
        }

        let args = AppArgs {
            data: pargs.opt_value_from_os_str(["-d", "--data"], parse_path)?,
            config: pargs.opt_value_from_os_str(["-c", "--config"], parse_path)?,
            out: pargs.opt_value_from_os_str(["-o", "--out"], parse_path)?,
            epochs: pargs.opt_value_from_str("--epochs")?,
            batch_size: pargs.opt_value_from_str("--batch-size")?,
            seed: pargs.opt_value_from_str("--seed")?,
            test_size: pargs.opt_value_from_str("--test-size")?,
            hidden1: pargs.opt_value_from_str("--hidden1")?,
            hidden2: pargs.opt_value_from_str("--hidden2")?,
            activation: pargs.opt_value_from_str("--activation")?,
            optimizer: pargs.opt_value_from_str("--optimizer")?,
            learning_rate: pargs.opt_value_from_str("--learning-rate")?,
            loss: pargs.opt_value_from_str("--loss")?,
            dump_config: pargs.opt_value_from_os_str("--dump-config", parse_path)?,
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            return Err(anyhow!("unused arguments: {:?}", remaining));
        }

        Ok(Some(args))
    }

    /// Starts from `--config` (or the defaults) and applies every flag.
    pub fn into_config(self) -> Result<ExperimentConfig> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::load_json(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ExperimentConfig::default(),
        };

        if let Some(data) = self.data {
            config.data_path = Some(data);
        }
        if let Some(out) = self.out {
            config.output_dir = out;
        }
        if let Some(epochs) = self.epochs {
            config.epochs = epochs;
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(test_size) = self.test_size {
            config.test_size = test_size;
        }

        if self.hidden1.is_some() || self.hidden2.is_some() || self.activation.is_some() {
            let mut hidden = config.network.hidden_sizes();
            if let Some(h1) = self.hidden1 {
                set_or_push(&mut hidden, 0, h1);
            }
            if let Some(h2) = self.hidden2 {
                set_or_push(&mut hidden, 1, h2);
            }
            let activation = match &self.activation {
                Some(name) => ActivationFunction::from_name(name)
                    .ok_or_else(|| anyhow!("unknown activation '{}'", name))?,
                None => config.network.hidden_activation().cloned().unwrap_or(ActivationFunction::ReLU),
            };
            config.network = config.network.with_hidden_layers(&hidden, activation);
        }

        if let Some(name) = &self.optimizer {
            config.optimizer = OptimizerType::from_name(name)
                .ok_or_else(|| anyhow!("unknown optimizer '{}'", name))?;
        }
        if let Some(lr) = self.learning_rate {
            config.optimizer = config.optimizer.with_learning_rate(lr);
        }
        if let Some(name) = &self.loss {
            config.network.loss = LossType::from_name(name)
                .ok_or_else(|| anyhow!("unknown loss '{}'", name))?;
        }

        Ok(config)
    }
}

fn set_or_push(hidden: &mut Vec<usize>, index: usize, size: usize) {
    if index < hidden.len() {
        hidden[index] = size;
    } else {
        hidden.push(size);
    }
}

fn parse_path(s: &std::ffi::OsStr) -> Result<PathBuf, &'static str> {
    Ok(s.into())
}
