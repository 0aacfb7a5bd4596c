//! Loader for the Breast Cancer Wisconsin (Diagnostic) dataset.
//!
//! Two on-disk layouts are recognized automatically:
//!
//! - the UCI `wdbc.data` file: `id, diagnosis (M|B), 30 features`, no header;
//! - the scikit-learn `breast_cancer.csv` file: a first row
//!   `n_samples, n_features, class names...`, then rows of features followed
//!   by an integer class index.
//!
//! Targets follow the scikit-learn encoding: `0 = malignant`, `1 = benign`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use log::debug;

use crate::data::dataset::Dataset;
use crate::error::{Error, Result};

pub const CLASS_NAMES: [&str; 2] = ["malignant", "benign"];

/// Mean, standard error and "worst" value of ten nuclear measurements.
pub const FEATURE_NAMES: [&str; 30] = [
    "mean radius", "mean texture", "mean perimeter", "mean area",
    "mean smoothness", "mean compactness", "mean concavity",
    "mean concave points", "mean symmetry", "mean fractal dimension",
    "radius error", "texture error", "perimeter error", "area error",
    "smoothness error", "compactness error", "concavity error",
    "concave points error", "symmetry error", "fractal dimension error",
    "worst radius", "worst texture", "worst perimeter", "worst area",
    "worst smoothness", "worst compactness", "worst concavity",
    "worst concave points", "worst symmetry", "worst fractal dimension",
];

const UCI_COLUMNS: usize = 2 + FEATURE_NAMES.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Uci,
    Sklearn,
}

/// Reads the dataset from `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        Error::Dataset(format!("failed to open {}: {}", path.display(), e))
    })?;
    let ds = from_reader(file)?;
    debug!("loaded {} samples with {} features from {}", ds.len(), ds.n_features(), path.display());
    Ok(ds)
}

/// Parses either supported layout from any reader.
pub fn from_reader<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let records = rdr.records().collect::<std::result::Result<Vec<StringRecord>, _>>()?;
    let first = records.first()
        .ok_or_else(|| Error::Dataset("file contains no rows".into()))?;

    match detect_layout(first) {
        Some(Layout::Uci)     => parse_uci(&records),
        Some(Layout::Sklearn) => parse_sklearn(&records),
        None => Err(Error::Dataset(format!(
            "unrecognized layout: first row has {} columns and is neither a UCI record nor a sample-count header",
            first.len()
        ))),
    }
}

fn detect_layout(first: &StringRecord) -> Option<Layout> {
    if first.len() == UCI_COLUMNS && matches!(first.get(1), Some("M") | Some("B")) {
        return Some(Layout::Uci);
    }
    let is_count = |i: usize| first.get(i).map(|c| c.parse::<usize>().is_ok()).unwrap_or(false);
    if first.len() >= 2 && is_count(0) && is_count(1) {
        return Some(Layout::Sklearn);
    }
    None
}

fn parse_uci(records: &[StringRecord]) -> Result<Dataset> {
    let mut features = Vec::with_capacity(records.len());
    let mut targets = Vec::with_capacity(records.len());

    for (i, record) in records.iter().enumerate() {
        let row = i + 1;
        if record.len() != UCI_COLUMNS {
            return Err(Error::Dataset(format!(
                "row {}: expected {} columns, got {}", row, UCI_COLUMNS, record.len()
            )));
        }
        let target = match &record[1] {
            "M" => 0,
            "B" => 1,
            other => {
                return Err(Error::Dataset(format!("row {}: unknown diagnosis '{}'", row, other)));
            }
        };
        features.push(parse_floats(record.iter().skip(2), row)?);
        targets.push(target);
    }

    Ok(Dataset {
        features,
        targets,
        feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        class_names: CLASS_NAMES.iter().map(|s| s.to_string()).collect(),
    })
}

fn parse_sklearn(records: &[StringRecord]) -> Result<Dataset> {
    let header = &records[0];
    // detect_layout already checked both counts parse.
    let n_samples: usize = header[0].parse().map_err(|_| Error::Dataset("bad sample count".into()))?;
    let n_features: usize = header[1].parse().map_err(|_| Error::Dataset("bad feature count".into()))?;
    let class_names: Vec<String> = if header.len() > 2 {
        header.iter().skip(2).map(str::to_owned).collect()
    } else {
        CLASS_NAMES.iter().map(|s| s.to_string()).collect()
    };

    let body = &records[1..];
    if body.len() != n_samples {
        return Err(Error::Dataset(format!(
            "header announces {} samples but file has {}", n_samples, body.len()
        )));
    }

    let mut features = Vec::with_capacity(n_samples);
    let mut targets = Vec::with_capacity(n_samples);
    for (i, record) in body.iter().enumerate() {
        // Header is row 1.
        let row = i + 2;
        if record.len() != n_features + 1 {
            return Err(Error::Dataset(format!(
                "row {}: expected {} columns, got {}", row, n_features + 1, record.len()
            )));
        }
        let label = &record[n_features];
        let target = label.parse::<f64>().ok()
            .filter(|t| t.fract() == 0.0 && *t >= 0.0 && (*t as usize) < class_names.len())
            .map(|t| t as usize)
            .ok_or_else(|| Error::Dataset(format!("row {}: invalid class index '{}'", row, label)))?;
        features.push(parse_floats(record.iter().take(n_features), row)?);
        targets.push(target);
    }

    let feature_names = if n_features == FEATURE_NAMES.len() {
        FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
    } else {
        (0..n_features).map(|i| format!("feature {}", i)).collect()
    };

    Ok(Dataset { features, targets, feature_names, class_names })
}

fn parse_floats<'a, I>(cells: I, row: usize) -> Result<Vec<f64>>
where
    I: Iterator<Item = &'a str>,
{
    cells
        .map(|c| {
            c.parse::<f64>().map_err(|_| {
                Error::Dataset(format!("row {}: '{}' is not a valid number", row, c))
            })
        })
        .collect()
}
