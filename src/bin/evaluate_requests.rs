//! Evaluate a file of calculation requests and write the resulting history
//!
//! Usage: cargo run --bin evaluate_requests -- requests.json --user demo --output history.json
//!
//! Requests are evaluated one after another. A request that fails (for
//! example a single-member chit fund) is logged and skipped.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use savings_calc::calculator::{evaluate, record_calculation, CalculationRequest, HistoryStore, MemoryHistory};
use savings_calc::CalculatorDefaults;

#[derive(Debug, Parser)]
#[command(about = "Evaluate a JSON array of calculation requests")]
struct Args {
    /// JSON file containing an array of requests
    input: PathBuf,

    /// User id the records are saved under
    #[arg(long)]
    user: String,

    /// Where to write the saved history records
    #[arg(long, default_value = "calculation_history.json")]
    output: PathBuf,

    /// JSON file overriding calculator defaults
    #[arg(long)]
    defaults: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    let defaults = match &args.defaults {
        Some(path) => CalculatorDefaults::from_json_path(path)?,
        None => CalculatorDefaults::default(),
    };

    let file = File::open(&args.input).with_context(|| format!("opening {}", args.input.display()))?;
    let requests: Vec<CalculationRequest> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", args.input.display()))?;
    println!("Loaded {} requests", requests.len());

    let mut history = MemoryHistory::new();
    let mut failed = 0;

    for (idx, request) in requests.iter().enumerate() {
        match evaluate(request, &defaults) {
            Ok(output) => {
                let record = record_calculation(&mut history, &args.user, request, &output)?;
                info!("request {}: {}", idx + 1, record.summary);
            }
            Err(err) => {
                warn!("request {} ({}) skipped: {}", idx + 1, request.calculator_type(), err);
                failed += 1;
            }
        }
    }

    let records = history.list(&args.user, None);
    let out = File::create(&args.output).with_context(|| format!("creating {}", args.output.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(out), &records)?;

    println!("Saved {} records, skipped {}", records.len(), failed);
    println!("Output written to {}", args.output.display());
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}
