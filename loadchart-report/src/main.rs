use clap::Parser;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process;

use loadchart_charts::PngRenderer;
use loadchart_common::RequestOutcome;
use loadchart_report::{DurationSampler, RequestCounter};

#[derive(Parser)]
#[command(name = "loadchart-report", about = "Render load-test result charts from a results log")]
struct Args {
    /// NDJSON results log, one {"status_code","duration","concurrency"} object per line
    #[arg(long, conflicts_with = "demo", required_unless_present = "demo")]
    input: Option<PathBuf>,

    /// Generate a synthetic demo workload instead of reading a log
    #[arg(long)]
    demo: bool,

    /// Directory to write the chart PNGs into
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

/// Concurrency ramp used by `--demo`.
const DEMO_LEVELS: [u32; 6] = [1, 2, 5, 10, 20, 50];
const DEMO_REQUESTS_PER_LEVEL: usize = 200;

fn main() {
    let args = Args::parse();

    let (outcomes, malformed) = match &args.input {
        Some(path) => read_log(path).unwrap_or_else(|e| {
            eprintln!("Failed to read {}: {e}", path.display());
            process::exit(3);
        }),
        None => {
            let mut rng = rand::thread_rng();
            (
                loadchart_report::synthetic::generate(
                    &DEMO_LEVELS,
                    DEMO_REQUESTS_PER_LEVEL,
                    &mut rng,
                ),
                0,
            )
        }
    };

    let mut counter = RequestCounter::new();
    let mut sampler = DurationSampler::new();
    let mut ignored: u64 = 0;
    for outcome in &outcomes {
        if !outcome.is_success() {
            ignored += 1;
        }
        counter.record_outcome(outcome);
        sampler.record_outcome(outcome);
    }

    let renderer = PngRenderer::default();
    let count_path = counter.save_to(&args.out_dir, &renderer).unwrap_or_else(|e| {
        eprintln!("Failed to write request-count chart: {e}");
        process::exit(3);
    });
    let violin_path = sampler.save_to(&args.out_dir, &renderer).unwrap_or_else(|e| {
        eprintln!("Failed to write duration chart: {e}");
        process::exit(3);
    });

    print_report(&counter, outcomes.len() as u64, ignored, malformed);
    println!("Wrote {}", count_path.display());
    println!("Wrote {}", violin_path.display());
}

/// Parse an NDJSON results log. Malformed lines are skipped and counted;
/// returns the parsed outcomes plus that count. Only failure to open or
/// read the file itself is an error.
fn read_log(path: &PathBuf) -> std::io::Result<(Vec<RequestOutcome>, u64)> {
    let reader = BufReader::new(File::open(path)?);
    let mut outcomes = Vec::new();
    let mut malformed: u64 = 0;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<RequestOutcome>(&line) {
            Ok(outcome) => outcomes.push(outcome),
            Err(_) => malformed += 1,
        }
    }
    Ok((outcomes, malformed))
}

fn print_report(counter: &RequestCounter, total: u64, ignored: u64, malformed: u64) {
    println!("LoadChart Report");
    println!("================");
    println!("Outcomes read:         {}", total);
    println!("Malformed lines:       {}", malformed);
    println!("Successful (200):      {}", counter.total());
    println!("Ignored (non-200):     {}", ignored);
    println!();
    if counter.is_empty() {
        println!("No successful requests recorded; charts are blank.");
    } else {
        println!("Completed requests per concurrency level:");
        for level in counter.levels() {
            println!("  {:>6}  {}", level, counter.count_for(level));
        }
    }
    println!();
}
