//! Offline trainer: CSV in, model bundle out.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use dropout_core::constants::{DEFAULT_MODEL_PATH, DEFAULT_SEED, DEFAULT_TEST_SIZE, DEFAULT_TREES};
use dropout_core::logic::model::ForestParams;
use dropout_core::logic::training::{self, TrainOptions, TrainingReport};

#[derive(Debug, Parser)]
#[command(name = "train", version, about = "Train the dropout-risk classifier from a student CSV")]
struct Cli {
    /// Student CSV (total_attend/total_held or attendance, no_of_backlogs, fee_status)
    #[arg(long)]
    csv: PathBuf,

    /// Where to write the model bundle (overwritten)
    #[arg(long, env = "MODEL_PATH", default_value = DEFAULT_MODEL_PATH)]
    out: PathBuf,

    /// Trees in the ensemble
    #[arg(long, default_value_t = DEFAULT_TREES)]
    trees: usize,

    /// Seed for the split and the bootstrap samples
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Held-out fraction for evaluation
    #[arg(long, default_value_t = DEFAULT_TEST_SIZE)]
    test_size: f64,

    /// Optional depth limit per tree
    #[arg(long)]
    max_depth: Option<usize>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match train(&cli) {
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn train(cli: &Cli) -> anyhow::Result<TrainingReport> {
    let opts = TrainOptions {
        csv: cli.csv.clone(),
        out: cli.out.clone(),
        forest: ForestParams {
            n_trees: cli.trees,
            seed: cli.seed,
            max_depth: cli.max_depth,
        },
        test_size: cli.test_size,
    };

    training::run(&opts).with_context(|| format!("training on {} failed", cli.csv.display()))
}

fn print_report(report: &TrainingReport) {
    println!(
        "Rows: {} ({} train / {} test)",
        report.rows, report.train_rows, report.test_rows
    );
    println!("Fee classes: {:?}", report.fee_classes);
    println!("Risk classes: {:?}", report.risk_classes);
    println!();
    println!("{}", report.evaluation);
    println!("Saved model to {}", report.out.display());
}
