use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::train::epoch_stats::EpochStats;

/// Everything `train_loop` recorded, one entry per completed epoch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub epochs: Vec<EpochStats>,
}

impl History {
    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    pub fn last(&self) -> Option<&EpochStats> {
        self.epochs.last()
    }

    pub fn loss(&self) -> Vec<f64> {
        self.epochs.iter().map(|e| e.train_loss).collect()
    }

    pub fn accuracy(&self) -> Vec<f64> {
        self.epochs.iter().map(|e| e.train_accuracy).collect()
    }

    /// Validation losses; epochs without a validation pass are skipped.
    pub fn val_loss(&self) -> Vec<f64> {
        self.epochs.iter().filter_map(|e| e.val_loss).collect()
    }

    pub fn val_accuracy(&self) -> Vec<f64> {
        self.epochs.iter().filter_map(|e| e.val_accuracy).collect()
    }

    /// (1-based epoch, accuracy) of the best validation epoch.
    pub fn best_val_accuracy(&self) -> Option<(usize, f64)> {
        self.epochs.iter()
            .filter_map(|e| e.val_accuracy.map(|a| (e.epoch, a)))
            .fold(None, |best, (epoch, acc)| match best {
                Some((_, b)) if b >= acc => best,
                _ => Some((epoch, acc)),
            })
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<History> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(epoch: usize, val_accuracy: Option<f64>) -> EpochStats {
        EpochStats {
            epoch,
            total_epochs: 3,
            train_loss: 1.0 / epoch as f64,
            train_accuracy: 0.5,
            val_loss: val_accuracy.map(|a| 1.0 - a),
            val_accuracy,
            elapsed_ms: 1,
        }
    }

    #[test]
    fn best_val_accuracy_keeps_earliest_maximum() {
        let h = History { epochs: vec![stats(1, Some(0.9)), stats(2, Some(0.95)), stats(3, Some(0.95))] };
        assert_eq!(h.best_val_accuracy(), Some((2, 0.95)));
        assert_eq!(h.loss(), vec![1.0, 0.5, 1.0 / 3.0]);
    }

    #[test]
    fn curves_skip_missing_validation() {
        let h = History { epochs: vec![stats(1, None), stats(2, Some(0.8))] };
        assert_eq!(h.val_accuracy(), vec![0.8]);
        assert_eq!(h.accuracy().len(), 2);
    }

    #[test]
    fn diverged_history_reloads() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.child("history.json");
        let mut diverged = stats(2, Some(0.5));
        diverged.train_loss = f64::NAN;
        diverged.val_loss = Some(f64::NAN);
        let h = History { epochs: vec![stats(1, Some(0.6)), diverged] };
        h.save_json(&path).unwrap();

        let back = History::load_json(&path).unwrap();
        assert_eq!(back.len(), 2);
        assert!(back.loss()[1].is_nan());
        assert_eq!(back.val_loss().len(), 2);
        assert!(back.val_loss()[1].is_nan());
        assert_eq!(back.best_val_accuracy(), Some((1, 0.6)));
    }
}
