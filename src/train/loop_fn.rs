use std::sync::atomic::Ordering;
use std::time::Instant;

use log::{debug, info};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::error::{Error, Result};
use crate::loss::loss_type::LossType;
use crate::math::matrix::Matrix;
use crate::network::network::{argmax, Network};
use crate::optim::optimizer::Optimizer;
use crate::train::epoch_stats::EpochStats;
use crate::train::history::History;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs and returns the per-epoch
/// history.
///
/// # Arguments
/// - `network`      — mutable reference to the network; modified in place
/// - `train_inputs` — training samples, each of length `network.input_size()`
/// - `train_labels` — one-hot targets, same length as `train_inputs`
/// - `validation`   — optional held-out `(inputs, labels)` evaluated after
///                    every epoch
/// - `optimizer`    — parameter update rule; keeps its state across epochs
/// - `config`       — hyperparameters, optional progress channel, optional stop flag
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
pub fn train_loop(
    network: &mut Network,
    train_inputs: &[Vec<f64>],
    train_labels: &[Vec<f64>],
    validation: Option<(&[Vec<f64>], &[Vec<f64>])>,
    optimizer: &mut dyn Optimizer,
    config: &TrainConfig,
) -> Result<History> {
    if train_inputs.is_empty() {
        return Err(Error::Training("training set is empty".into()));
    }
    if config.batch_size == 0 {
        return Err(Error::Training("batch_size must be at least 1".into()));
    }
    if config.epochs == 0 {
        return Err(Error::Training("epochs must be at least 1".into()));
    }
    check_shapes(network, train_inputs, train_labels, "training")?;
    if let Some((vi, vl)) = validation {
        check_shapes(network, vi, vl, "validation")?;
    }

    debug!(
        "training on {} samples ({} validation), batch size {}, optimizer {}",
        train_inputs.len(),
        validation.map(|(vi, _)| vi.len()).unwrap_or(0),
        config.batch_size,
        optimizer.name(),
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut order: Vec<usize> = (0..train_inputs.len()).collect();
    let mut history = History::default();

    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            break;
        }

        let t_start = Instant::now();

        if config.shuffle {
            order.shuffle(&mut rng);
        }

        // ── One full pass over the training data ───────────────────────────
        let (train_loss, train_accuracy) = run_one_epoch(
            network,
            train_inputs,
            train_labels,
            &order,
            optimizer,
            config.batch_size,
            config.loss_type,
        );

        // ── Validation ────────────────────────────────────────────────────
        let (val_loss, val_accuracy) = match validation {
            Some((vi, vl)) => {
                let (l, a) = evaluate(network, vi, vl, config.loss_type);
                (Some(l), Some(a))
            }
            None => (None, None),
        };

        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            train_accuracy,
            val_loss,
            val_accuracy,
            elapsed_ms,
        };
        log_epoch(&stats);
        history.epochs.push(stats.clone());

        // ── Emit progress ─────────────────────────────────────────────────
        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                debug!("progress receiver dropped; stopping after epoch {}", epoch);
                break;
            }
        }
    }

    Ok(history)
}

/// Mean loss and accuracy over a dataset, without touching the network.
pub fn evaluate(
    network: &Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    loss_type: LossType,
) -> (f64, f64) {
    let n = inputs.len();
    if n == 0 {
        return (0.0, 0.0);
    }
    let (total_loss, correct) = inputs.iter().zip(labels.iter())
        .fold((0.0, 0usize), |(loss, correct), (input, label)| {
            let output = network.infer(input.clone());
            let hit = argmax(&output) == argmax(label);
            (loss + loss_type.loss(&output, label), correct + hit as usize)
        });
    (total_loss / n as f64, correct as f64 / n as f64)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Runs one full epoch of mini-batch gradient descent in the given sample
/// order. Returns the running mean loss and accuracy over all samples, each
/// measured before the update of the batch it belongs to.
fn run_one_epoch(
    network: &mut Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    order: &[usize],
    optimizer: &mut dyn Optimizer,
    batch_size: usize,
    loss_type: LossType,
) -> (f64, f64) {
    let n = order.len();
    let mut total_loss = 0.0;
    let mut correct = 0usize;

    for batch in order.chunks(batch_size) {
        // Zero-initialize accumulated gradient storage.
        let mut acc_grads: Vec<(Matrix, Matrix)> = network.layers.iter()
            .map(|layer| (
                Matrix::zeros(layer.weights.rows, layer.weights.cols),
                Matrix::zeros(layer.biases.rows, layer.biases.cols),
            ))
            .collect();

        // Accumulate gradients over the mini-batch.
        for &idx in batch {
            let input    = &inputs[idx];
            let expected = &labels[idx];

            let output = network.forward(input.clone());

            total_loss += loss_type.loss(&output, expected);
            if argmax(&output) == argmax(expected) {
                correct += 1;
            }

            let mut delta = Matrix::row(loss_type.derivative(&output, expected));

            // Backward pass.
            for i in (0..network.layers.len()).rev() {
                let input_for_layer = if i == 0 {
                    Matrix::row(input.clone())
                } else {
                    network.layers[i - 1].neurons.clone()
                };

                let (w_grad, b_grad) = network.layers[i].compute_gradients(delta, &input_for_layer);

                // Propagate δ_i through weights to get ∂L/∂a_{i-1}.
                delta = if i > 0 {
                    &b_grad * &network.layers[i].weights.transpose()
                } else {
                    Matrix::default()
                };

                let (w_acc, b_acc) = &mut acc_grads[i];
                *w_acc = w_acc.clone() + w_grad;
                *b_acc = b_acc.clone() + b_grad;
            }
        }

        // Average and apply.
        let inv_batch = 1.0 / batch.len() as f64;
        for (i, (w_acc, b_acc)) in acc_grads.into_iter().enumerate() {
            let w_avg = w_acc.map(|x| x * inv_batch);
            let b_avg = b_acc.map(|x| x * inv_batch);
            optimizer.step(i, &mut network.layers[i], w_avg, b_avg);
        }
    }

    (total_loss / n as f64, correct as f64 / n as f64)
}

fn check_shapes(network: &Network, inputs: &[Vec<f64>], labels: &[Vec<f64>], what: &str) -> Result<()> {
    if inputs.len() != labels.len() {
        return Err(Error::Training(format!(
            "{} inputs ({}) and labels ({}) must have equal length", what, inputs.len(), labels.len()
        )));
    }
    let (n_in, n_out) = (network.input_size(), network.output_size());
    if let Some(i) = inputs.iter().position(|x| x.len() != n_in) {
        return Err(Error::Training(format!(
            "{} sample {} has {} features, network expects {}", what, i, inputs[i].len(), n_in
        )));
    }
    if let Some(i) = labels.iter().position(|y| y.len() != n_out) {
        return Err(Error::Training(format!(
            "{} label {} has width {}, network outputs {}", what, i, labels[i].len(), n_out
        )));
    }
    Ok(())
}

fn stop_requested(config: &TrainConfig) -> bool {
    config.stop_flag.as_ref().map(|f| f.load(Ordering::Relaxed)).unwrap_or(false)
}

fn log_epoch(stats: &EpochStats) {
    let mut line = format!(
        "Epoch {}/{} - {}ms - loss: {:.4} - accuracy: {:.4}",
        stats.epoch, stats.total_epochs, stats.elapsed_ms, stats.train_loss, stats.train_accuracy
    );
    if let (Some(vl), Some(va)) = (stats.val_loss, stats.val_accuracy) {
        line.push_str(&format!(" - val_loss: {:.4} - val_accuracy: {:.4}", vl, va));
    }
    info!("{}", line);
}
