mod cli;

use anyhow::{Context, Result};
use log::info;

use breast_cancer_nn::{experiment, exercises};

use cli::AppArgs;

fn main() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let args = match AppArgs::parse()? {
        Some(args) => args,
        None => return Ok(()),
    };
    let dump_path = args.dump_config.clone();
    let config = args.into_config()?;

    if let Some(path) = dump_path {
        config.save_json(&path)
            .with_context(|| format!("failed to write config {}", path.display()))?;
        info!("wrote config to {}", path.display());
        return Ok(());
    }

    if config.data_path.is_none() {
        eprint!("{}", cli::HELP);
        anyhow::bail!("missing --data PATH (or data_path in the config file)");
    }

    let report = experiment::run(&config).context("training run failed")?;

    if let Some((epoch, acc)) = report.history.best_val_accuracy() {
        println!("Best test accuracy: {:.4} (epoch {})", acc, epoch);
    }
    if let Some(last) = report.history.last() {
        println!(
            "Final epoch: loss {:.4}, accuracy {:.4}, test loss {:.4}, test accuracy {:.4}",
            last.train_loss,
            last.train_accuracy,
            last.val_loss.unwrap_or(f64::NAN),
            last.val_accuracy.unwrap_or(f64::NAN),
        );
    }
    println!("\nTest set confusion matrix:\n{}\n", report.test_confusion);
    println!("Accuracy curve: {}", report.artifacts.accuracy_plot.display());
    println!("Loss curve:     {}", report.artifacts.loss_plot.display());
    println!("History:        {}\n", report.artifacts.history.display());
    println!("{}", exercises::render());

    Ok(())
}
