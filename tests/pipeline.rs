use std::fmt::Write as _;
use std::path::Path;

use breast_cancer_nn::{run, ExperimentConfig, Error, OptimizerType};
use temp_dir::TempDir;

/// Writes `n` rows in the UCI `wdbc.data` layout. Malignant rows sit about
/// three units above benign ones on every feature.
fn write_uci(path: &Path, n: usize) {
    let mut text = String::new();
    for i in 0..n {
        let malignant = i % 3 == 0;
        let base = if malignant { 4.0 } else { 1.0 };
        let _ = write!(text, "{},{}", 900000 + i, if malignant { "M" } else { "B" });
        for j in 0..30 {
            let jitter = (((i * 31 + j * 17) % 13) as f64 - 6.0) / 8.0;
            let _ = write!(text, ",{:.4}", base * (1.0 + j as f64 / 10.0) + jitter);
        }
        text.push('\n');
    }
    std::fs::write(path, text).unwrap();
}

#[test]
fn full_run_on_uci_file_learns_and_writes_plots() {
    let dir = TempDir::new().unwrap();
    let data = dir.child("wdbc.data");
    write_uci(&data, 200);

    let config = ExperimentConfig {
        data_path: Some(data),
        output_dir: dir.child("out"),
        epochs: 30,
        optimizer: OptimizerType::default().with_learning_rate(0.01),
        plot_width: 500,
        plot_height: 300,
        ..Default::default()
    };
    let report = run(&config).unwrap();

    assert_eq!(report.history.len(), 30);
    let last = report.history.last().unwrap();
    assert!(last.val_accuracy.unwrap() > 0.9, "{:?}", last);
    assert!(last.train_loss < report.history.epochs[0].train_loss);
    assert_eq!(report.test_confusion.total(), 60);
    assert_eq!(report.test_confusion.labels, vec!["malignant", "benign"]);

    for path in [&report.artifacts.accuracy_plot, &report.artifacts.loss_plot, &report.artifacts.history] {
        assert!(path.exists(), "{} missing", path.display());
    }
    let png = std::fs::read(&report.artifacts.accuracy_plot).unwrap();
    assert_eq!(&png[1..4], b"PNG");
}

#[test]
fn sklearn_layout_runs_end_to_end() {
    let dir = TempDir::new().unwrap();
    let data = dir.child("breast_cancer.csv");
    let mut text = String::from("40,30,malignant,benign\n");
    for i in 0..40 {
        let target = i % 2;
        let row: Vec<String> = (0..30).map(|j| format!("{}", (i * j % 7) as f64 + target as f64 * 5.0)).collect();
        let _ = writeln!(text, "{},{}", row.join(","), target);
    }
    std::fs::write(&data, text).unwrap();

    let config = ExperimentConfig {
        data_path: Some(data),
        output_dir: dir.child("out"),
        epochs: 2,
        plot_width: 300,
        plot_height: 200,
        ..Default::default()
    };
    let report = run(&config).unwrap();
    assert_eq!(report.history.len(), 2);
    assert_eq!(report.test_confusion.total(), 12);
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = ExperimentConfig {
        data_path: Some(dir.child("nope.data")),
        output_dir: dir.child("out"),
        ..Default::default()
    };
    let err = run(&config).unwrap_err();
    assert!(matches!(err, Error::Dataset(_)));
    assert!(err.to_string().contains("nope.data"));
}
