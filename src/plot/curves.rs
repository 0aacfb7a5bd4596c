use crate::plot::chart::{LegendPosition, LineChart, Series, TEST_COLOR, TRAIN_COLOR};
use crate::train::history::History;

/// Default figure size: 10 × 6 inches at 100 dpi.
pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 600;

/// "Model accuracy": training vs held-out accuracy per epoch.
pub fn accuracy_chart(history: &History) -> LineChart {
    train_test_chart("Model accuracy", "Accuracy", history.accuracy(), history.val_accuracy(), LegendPosition::LowerRight)
}

/// "Model loss": training vs held-out loss per epoch.
pub fn loss_chart(history: &History) -> LineChart {
    train_test_chart("Model loss", "Loss", history.loss(), history.val_loss(), LegendPosition::UpperRight)
}

fn train_test_chart(
    title: &str,
    y_label: &str,
    train: Vec<f64>,
    test: Vec<f64>,
    legend: LegendPosition,
) -> LineChart {
    let mut series = vec![Series { name: "Train".into(), color: TRAIN_COLOR, values: train }];
    if !test.is_empty() {
        series.push(Series { name: "Test".into(), color: TEST_COLOR, values: test });
    }
    LineChart {
        title: title.into(),
        x_label: "Epoch".into(),
        y_label: y_label.into(),
        series,
        legend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::train::epoch_stats::EpochStats;

    fn history() -> History {
        let epochs = (1..=3).map(|epoch| EpochStats {
            epoch,
            total_epochs: 3,
            train_loss: 0.7 / epoch as f64,
            train_accuracy: 0.6 + 0.1 * epoch as f64,
            val_loss: Some(0.8 / epoch as f64),
            val_accuracy: Some(0.55 + 0.1 * epoch as f64),
            elapsed_ms: 2,
        }).collect();
        History { epochs }
    }

    #[test]
    fn accuracy_chart_has_train_and_test() {
        let chart = accuracy_chart(&history());
        assert_eq!(chart.title, "Model accuracy");
        assert_eq!(chart.legend, LegendPosition::LowerRight);
        let names: Vec<&str> = chart.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Train", "Test"]);
        assert_eq!(chart.series[1].values.len(), 3);
    }

    #[test]
    fn loss_chart_legend_is_upper_right() {
        let chart = loss_chart(&history());
        assert_eq!(chart.y_label, "Loss");
        assert_eq!(chart.legend, LegendPosition::UpperRight);
        assert_eq!(chart.series[0].values[0], 0.7);
    }

    #[test]
    fn no_test_series_without_validation() {
        let mut h = history();
        h.epochs.iter_mut().for_each(|e| e.val_loss = None);
        assert_eq!(loss_chart(&h).series.len(), 1);
    }
}
