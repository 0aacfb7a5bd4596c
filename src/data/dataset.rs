/// An in-memory tabular classification dataset.
///
/// `targets[i]` is the class index of `features[i]`; `class_names[k]` names
/// class `k`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub features: Vec<Vec<f64>>,
    pub targets: Vec<usize>,
    pub feature_names: Vec<String>,
    pub class_names: Vec<String>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.features.first().map(|r| r.len()).unwrap_or(0)
    }

    pub fn n_classes(&self) -> usize {
        self.class_names.len()
    }

    /// Number of samples per class, indexed by class.
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes()];
        for &t in &self.targets {
            if t < counts.len() {
                counts[t] += 1;
            }
        }
        counts
    }

    /// Label encoding: every target as a one-hot vector over `n_classes()`.
    pub fn one_hot_targets(&self) -> Vec<Vec<f64>> {
        let n = self.n_classes();
        self.targets.iter().map(|&t| one_hot(t, n)).collect()
    }
}

/// One-hot encodes `label` into a vector of length `num_classes`.
pub fn one_hot(label: usize, num_classes: usize) -> Vec<f64> {
    let mut v = vec![0.0; num_classes];
    if label < num_classes {
        v[label] = 1.0;
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> Dataset {
        Dataset {
            features: vec![vec![1.0], vec![2.0], vec![3.0]],
            targets: vec![0, 1, 1],
            feature_names: vec!["x".into()],
            class_names: vec!["malignant".into(), "benign".into()],
        }
    }

    #[test]
    fn counts_and_encodes_classes() {
        let ds = tiny();
        assert_eq!(ds.class_counts(), vec![1, 2]);
        assert_eq!(ds.one_hot_targets()[0], vec![1.0, 0.0]);
        assert_eq!(ds.one_hot_targets()[2], vec![0.0, 1.0]);
        assert_eq!(ds.n_features(), 1);
    }
}
