// Command-line argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "deduprs",
    about = "Remove PCR duplicates from a single-end SAM file sorted by reference name"
)]
pub struct Args {
    /// Path to the SAM file (must be sorted by reference name)
    #[arg(short, long)]
    pub file: PathBuf,
    /// Newline-delimited list of valid UMIs/barcodes
    #[arg(short, long)]
    pub umi: PathBuf,
    /// Designates the file as paired end (unsupported, fails immediately)
    #[arg(short, long)]
    pub paired: bool,
    /// Directory that receives deduped.sam, duplicates.sam, misindexed.sam
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,
}
