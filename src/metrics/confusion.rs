use std::fmt;

/// Fraction of positions where `predicted` equals `actual`.
pub fn accuracy(predicted: &[usize], actual: &[usize]) -> f64 {
    if predicted.is_empty() {
        return 0.0;
    }
    let correct = predicted.iter().zip(actual).filter(|(p, a)| p == a).count();
    correct as f64 / predicted.len() as f64
}

/// `counts[actual][predicted]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub counts: Vec<Vec<usize>>,
    pub labels: Vec<String>,
}

impl ConfusionMatrix {
    /// Tallies predictions; indices outside `0..labels.len()` are ignored.
    pub fn from_predictions(labels: &[String], predicted: &[usize], actual: &[usize]) -> ConfusionMatrix {
        let n = labels.len();
        let mut counts = vec![vec![0usize; n]; n];
        for (&p, &a) in predicted.iter().zip(actual) {
            if p < n && a < n {
                counts[a][p] += 1;
            }
        }
        ConfusionMatrix { counts, labels: labels.to_vec() }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let diag: usize = (0..self.counts.len()).map(|i| self.counts[i][i]).sum();
        diag as f64 / total as f64
    }

    /// TP / (TP + FP) for `class`; 0 when the class was never predicted
    /// or is not one of the labels.
    pub fn precision(&self, class: usize) -> f64 {
        if class >= self.counts.len() {
            return 0.0;
        }
        let predicted: usize = self.counts.iter().map(|row| row[class]).sum();
        ratio(self.counts[class][class], predicted)
    }

    /// TP / (TP + FN) for `class`; 0 when the class never occurs or is not
    /// one of the labels.
    pub fn recall(&self, class: usize) -> f64 {
        match self.counts.get(class) {
            Some(row) => ratio(row[class], row.iter().sum()),
            None => 0.0,
        }
    }

    pub fn f1(&self, class: usize) -> f64 {
        let (p, r) = (self.precision(class), self.recall(class));
        if p + r == 0.0 { 0.0 } else { 2.0 * p * r / (p + r) }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.labels.iter().map(|l| l.len()).max().unwrap_or(0).max(9);
        write!(f, "{:>w$}", "actual \\ predicted", w = width + 10)?;
        for label in &self.labels {
            write!(f, " {:>w$}", label, w = width)?;
        }
        writeln!(f)?;
        for (label, row) in self.labels.iter().zip(&self.counts) {
            write!(f, "{:>w$}", label, w = width + 10)?;
            for count in row {
                write!(f, " {:>w$}", count, w = width)?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;
        writeln!(f, "{:>w$} {:>9} {:>9} {:>9}", "", "precision", "recall", "f1", w = width + 10)?;
        for (i, label) in self.labels.iter().enumerate() {
            writeln!(
                f,
                "{:>w$} {:>9.3} {:>9.3} {:>9.3}",
                label, self.precision(i), self.recall(i), self.f1(i), w = width + 10
            )?;
        }
        write!(f, "{:>w$} {:>9.3}", "accuracy", self.accuracy(), w = width + 10)
    }
}
