//! Error types for record parsing and run configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for deduprs operations
#[derive(Error, Debug)]
pub enum DedupError {
    /// Line has fewer than the required number of tab-separated fields
    #[error("truncated record: expected at least 6 tab-separated fields, found {found}")]
    TruncatedRecord {
        /// Number of fields actually present
        found: usize,
    },

    /// A numeric field could not be parsed
    #[error("invalid {field} field: {value:?}")]
    InvalidField {
        /// SAM field name (e.g. "flag", "pos")
        field: &'static str,
        /// The offending text
        value: String,
    },

    /// CIGAR string is empty, `*`, or contains an unparseable token
    #[error("invalid CIGAR string: {0:?}")]
    InvalidCigar(String),

    /// Paired-end mode was requested
    #[error(
        "paired-end input is not supported; rerun without the -p/--paired option"
    )]
    PairedEndUnsupported,

    /// Barcode list file contained no barcodes
    #[error("barcode list {path} is empty")]
    EmptyBarcodeList {
        /// Path to the offending list file
        path: PathBuf,
    },
}
