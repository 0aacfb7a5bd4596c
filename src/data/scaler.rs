use crate::error::{Error, Result};

/// Standardizes features to zero mean and unit (population) variance.
///
/// Features with zero variance keep a scale of 1 so they map to 0 instead
/// of NaN.
#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new() -> StandardScaler {
        StandardScaler::default()
    }

    pub fn fit(&mut self, rows: &[Vec<f64>]) -> Result<()> {
        let n_features = rows.first()
            .map(|r| r.len())
            .ok_or_else(|| Error::Dataset("cannot fit a scaler on zero samples".into()))?;
        if let Some(i) = rows.iter().position(|r| r.len() != n_features) {
            return Err(Error::Dataset(format!(
                "sample {} has {} features, expected {}", i, rows[i].len(), n_features
            )));
        }

        let n = rows.len() as f64;
        let mut mean = vec![0.0; n_features];
        for row in rows {
            for (m, x) in mean.iter_mut().zip(row) {
                *m += x;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut var = vec![0.0; n_features];
        for row in rows {
            for ((v, x), m) in var.iter_mut().zip(row).zip(&mean) {
                *v += (x - m).powi(2);
            }
        }
        self.scale = var.into_iter()
            .map(|v| {
                let std = (v / n).sqrt();
                if std > f64::EPSILON { std } else { 1.0 }
            })
            .collect();
        self.mean = mean;
        Ok(())
    }

    pub fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        if self.mean.is_empty() {
            return Err(Error::Dataset("scaler used before fit".into()));
        }
        rows.iter().enumerate()
            .map(|(i, row)| -> Result<Vec<f64>> {
                if row.len() != self.mean.len() {
                    return Err(Error::Dataset(format!(
                        "sample {} has {} features, scaler was fit on {}", i, row.len(), self.mean.len()
                    )));
                }
                Ok(row.iter().zip(&self.mean).zip(&self.scale)
                    .map(|((x, m), s)| (x - m) / s)
                    .collect())
            })
            .collect()
    }

    pub fn fit_transform(&mut self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        self.fit(rows)?;
        self.transform(rows)
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standardizes_each_column() {
        let rows = vec![vec![1.0, 10.0], vec![3.0, 10.0], vec![5.0, 10.0]];
        let mut scaler = StandardScaler::new();
        let out = scaler.fit_transform(&rows).unwrap();

        assert_eq!(scaler.mean(), &[3.0, 10.0]);
        let col0: Vec<f64> = out.iter().map(|r| r[0]).collect();
        assert!((col0.iter().sum::<f64>()).abs() < 1e-12);
        assert!((col0.iter().map(|x| x * x).sum::<f64>() / 3.0 - 1.0).abs() < 1e-12);
        // Constant column.
        assert!(out.iter().all(|r| r[1] == 0.0));
    }

    #[test]
    fn rejects_ragged_rows_and_unfitted_use() {
        let mut scaler = StandardScaler::new();
        assert!(scaler.transform(&[vec![1.0]]).is_err());
        assert!(scaler.fit(&[vec![1.0, 2.0], vec![1.0]]).is_err());
        assert!(scaler.fit(&[]).is_err());
    }
}
