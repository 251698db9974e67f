use anyhow::{Context, Result};
use bstr::io::BufReadExt;
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod algorithm;
mod args;
mod errors;
mod io;
mod record;
mod utils;

use algorithm::DuplicateTracker;
use args::Args;
use errors::DedupError;
use io::{BarcodeSet, ClassOutputs};
use record::SamRecord;
use utils::format_duration;

fn main() -> Result<()> {
    let args = Args::parse();

    // Rejected before any input is opened.
    if args.paired {
        return Err(DedupError::PairedEndUnsupported.into());
    }

    let total_start = Instant::now();

    let barcodes = BarcodeSet::load(&args.umi)?;
    eprintln!("deduprs: loaded {} valid barcodes", barcodes.len());

    let input = File::open(&args.file)
        .with_context(|| format!("failed to open {}", args.file.display()))?;
    let reader = BufReader::new(input);

    let mut outputs = ClassOutputs::create(&args.out_dir)?;
    let mut tracker = DuplicateTracker::new();

    // A record that fails to parse aborts the run; skipping it silently
    // could misreport the duplicate counts.
    let mut line_no: u64 = 0;
    for line in reader.byte_lines() {
        let line = line?;
        line_no += 1;
        let record =
            SamRecord::parse(&line).with_context(|| format!("input line {line_no}"))?;
        let class = tracker
            .classify(&record, &barcodes)
            .with_context(|| format!("input line {line_no}"))?;
        outputs.write(class, &line)?;
    }

    let summary = outputs.finish()?;

    println!("Misindexed reads: {}", summary.misindexed);
    println!("Duplicate reads: {}", summary.duplicate);
    println!("Unique reads: {}", summary.unique);

    eprintln!(
        "processed {} records in {}",
        summary.total(),
        format_duration(total_start.elapsed())
    );

    Ok(())
}
