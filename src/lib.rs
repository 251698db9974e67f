//! deduprs - PCR duplicate removal for single-end SAM files
//!
//! Given a SAM file of uniquely mapped single-end reads sorted by reference
//! name and a list of valid UMIs, this library partitions records into
//! unique, PCR-duplicate, and misindexed reads. Duplicates are detected by
//! a (barcode, reference, adjusted position, strand) signature, where the
//! position is normalized for soft clipping so that re-sequenced copies of
//! one fragment collide regardless of clipping artifacts.
//!
//! # Example
//!
//! ```ignore
//! use deduprs::{BarcodeSet, Classification, DuplicateTracker, SamRecord};
//!
//! let barcodes: BarcodeSet = [b"AACGCCAT".to_vec()].into_iter().collect();
//! let mut tracker = DuplicateTracker::new();
//!
//! let record = SamRecord::parse(b"read:AACGCCAT\t0\tchr1\t100\t36\t8S42M")?;
//! assert_eq!(tracker.classify(&record, &barcodes)?, Classification::Unique);
//! ```

pub mod algorithm;
pub mod args;
pub mod errors;
pub mod io;
pub mod record;
pub mod utils;

// Re-export commonly used items
pub use algorithm::{Classification, DuplicateTracker, Signature, adjusted_start, parse_cigar};
pub use args::Args;
pub use errors::DedupError;
pub use io::{BarcodeSet, ClassOutputs, Summary};
pub use record::{BARCODE_LEN, REVERSE_FLAG, SamRecord};
