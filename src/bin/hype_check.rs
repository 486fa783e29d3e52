//! One-shot meter readings from the terminal

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use hype_meter::database::MemoryStore;
use hype_meter::logging::init_console_tracing;
use hype_meter::util::display::{print_hype_signal, print_signal_error};
use hype_meter::HypeAnalyzer;

#[derive(Parser, Debug)]
#[command(name = "hype-check", about = "Print hype meter readings for tokens")]
struct Args {
    /// Token identifiers to evaluate
    #[arg(default_value = "TEST")]
    tokens: Vec<String>,

    /// Observation snapshot; tokens without data fall back to mock profiles
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_console_tracing(&args.log_level);

    let store = match &args.snapshot {
        Some(path) => MemoryStore::load_snapshot(path)?,
        None => MemoryStore::new(),
    };
    let analyzer = HypeAnalyzer::new(Arc::new(store));

    let mut failures = 0;
    for token_id in &args.tokens {
        match analyzer.compute_signal(token_id) {
            Ok(signal) => print_hype_signal(token_id, &signal),
            Err(e) => {
                failures += 1;
                print_signal_error(token_id, &e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} tokens had no reading", failures, args.tokens.len());
    }
    Ok(())
}
