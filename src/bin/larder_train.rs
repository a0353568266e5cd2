//! Offline training CLI for the recommendation index.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "larder-train",
    about = "Train the recipe recommendation index from a corpus file"
)]
struct Args {
    /// Recipe corpus: a JSON array of {recipe_id, title, ingredients, diet_tag?}
    corpus: PathBuf,

    /// Directory the training artifacts are written to
    #[arg(long, env = "LARDER_ARTIFACTS_DIR", default_value = "artifacts")]
    artifacts: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match larder::recommend::train::train(&args.corpus, &args.artifacts) {
        Ok(report) => {
            println!(
                "trained {} recipes, vocabulary size {}",
                report.recipes, report.vocabulary
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("training failed: {e}");
            ExitCode::FAILURE
        }
    }
}
