use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use print_predictor::{GCodeFile, PredictorProfile};

#[derive(Parser, Debug)]
#[command(author, version, about = "Predict the duration of a G-code print", long_about = None)]
struct Args {
    /// The G-code file to analyse.
    #[arg(value_name = "GCODE_FILE_PATH")]
    path: PathBuf,
}

fn run(args: &Args) -> anyhow::Result<f64> {
    let file = GCodeFile::load(&args.path)
        .with_context(|| format!("Cannot read {}", args.path.display()))?;
    let profile = PredictorProfile::load();
    let result = file.estimate(&profile)?;

    log::info!(
        "{}: {} ({} moves, {} unknown codes)",
        file.filename,
        result.hms(),
        result.timed_moves,
        result.unknown_codes
    );
    Ok(result.estimated_seconds)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(seconds) => {
            println!("{seconds}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
