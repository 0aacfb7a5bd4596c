use std::path::PathBuf;

use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use crate::config::ExperimentConfig;
use crate::data::{dataset::Dataset, scaler::StandardScaler, split::train_test_split, wdbc};
use crate::error::{Error, Result};
use crate::metrics::confusion::ConfusionMatrix;
use crate::plot::curves::{accuracy_chart, loss_chart};
use crate::train::{history::History, loop_fn::train_loop, train_config::TrainConfig};

/// Files written by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub accuracy_plot: PathBuf,
    pub loss_plot: PathBuf,
    pub history: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Report {
    pub history: History,
    pub test_confusion: ConfusionMatrix,
    pub artifacts: Artifacts,
}

/// Loads the dataset named by `config.data_path` and runs the experiment.
pub fn run(config: &ExperimentConfig) -> Result<Report> {
    config.validate()?;
    let path = config.data_path.as_ref()
        .ok_or_else(|| Error::Config("no dataset path given".into()))?;
    let dataset = wdbc::load(path)?;
    run_on(dataset, config)
}

/// Label-encode, standardize, split, build, fit, evaluate, plot.
pub fn run_on(dataset: Dataset, config: &ExperimentConfig) -> Result<Report> {
    config.validate()?;
    if dataset.is_empty() {
        return Err(Error::Dataset("dataset has no samples".into()));
    }
    info!(
        "dataset: {} samples, {} features, class counts {:?} for {:?}",
        dataset.len(), dataset.n_features(), dataset.class_counts(), dataset.class_names
    );

    let spec = &config.network;
    if spec.input_size() != dataset.n_features() {
        return Err(Error::Config(format!(
            "network expects {} inputs but the dataset has {} features",
            spec.input_size(), dataset.n_features()
        )));
    }
    if spec.output_size() != dataset.n_classes() {
        return Err(Error::Config(format!(
            "network has {} outputs but the dataset has {} classes",
            spec.output_size(), dataset.n_classes()
        )));
    }

    let targets = dataset.one_hot_targets();
    // Fit on every sample before splitting.
    let mut scaler = StandardScaler::new();
    let features = scaler.fit_transform(&dataset.features)?;
    debug!("feature means: {:?}", scaler.mean());

    let split = train_test_split(dataset.len(), config.test_size, config.seed)?;
    let (x_train, x_test) = split.select(&features);
    let (y_train, y_test) = split.select(&targets);
    info!("split: {} train / {} test (seed {})", x_train.len(), x_test.len(), config.seed);

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut network = spec.build(&mut rng)?;
    info!("model summary:\n{}", network.summary());

    let mut optimizer = config.optimizer.build();
    let train_config = TrainConfig::new(config.epochs, config.batch_size, spec.loss)
        .with_seed(config.seed.wrapping_add(1));
    let history = train_loop(
        &mut network,
        &x_train,
        &y_train,
        Some((x_test.as_slice(), y_test.as_slice())),
        optimizer.as_mut(),
        &train_config,
    )?;

    let predicted: Vec<usize> = x_test.iter().map(|x| network.predict(x.clone())).collect();
    let actual: Vec<usize> = split.test.iter().map(|&i| dataset.targets[i]).collect();
    let test_confusion = ConfusionMatrix::from_predictions(&dataset.class_names, &predicted, &actual);

    std::fs::create_dir_all(&config.output_dir)?;
    let artifacts = Artifacts {
        accuracy_plot: config.output_dir.join("accuracy.png"),
        loss_plot: config.output_dir.join("loss.png"),
        history: config.output_dir.join("history.json"),
    };
    accuracy_chart(&history).save_png(&artifacts.accuracy_plot, config.plot_width, config.plot_height)?;
    loss_chart(&history).save_png(&artifacts.loss_plot, config.plot_width, config.plot_height)?;
    history.save_json(&artifacts.history)?;
    info!(
        "wrote {}, {} and {}",
        artifacts.accuracy_plot.display(), artifacts.loss_plot.display(), artifacts.history.display()
    );

    Ok(Report { history, test_confusion, artifacts })
}
