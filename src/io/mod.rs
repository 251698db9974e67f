//! Barcode list loading and classified output routing
//!
//! Input lines are routed verbatim to one of three output files depending
//! on their classification; the counters double as the run summary.

use crate::algorithm::Classification;
use crate::errors::DedupError;
use anyhow::{Context, Result};
use bstr::ByteSlice;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output file name for unique reads
pub const UNIQUE_FILE: &str = "deduped.sam";

/// Output file name for PCR-duplicate reads
pub const DUPLICATE_FILE: &str = "duplicates.sam";

/// Output file name for misindexed reads
pub const MISINDEXED_FILE: &str = "misindexed.sam";

/// Immutable set of known-valid barcodes
///
/// Loaded once before processing and never mutated. Membership is exact
/// byte equality, no case folding.
#[derive(Debug, Default)]
pub struct BarcodeSet(HashSet<Vec<u8>>);

impl BarcodeSet {
    /// Load a newline-delimited barcode list
    ///
    /// Blank lines are ignored; an empty result is a configuration error.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read(path)
            .with_context(|| format!("failed to read barcode list {}", path.display()))?;
        let set: HashSet<Vec<u8>> = raw
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| l.to_vec())
            .collect();
        if set.is_empty() {
            return Err(DedupError::EmptyBarcodeList {
                path: path.to_path_buf(),
            }
            .into());
        }
        Ok(Self(set))
    }

    #[inline]
    pub fn contains(&self, barcode: &[u8]) -> bool {
        self.0.contains(barcode)
    }

    /// Number of loaded barcodes
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<Vec<u8>> for BarcodeSet {
    fn from_iter<I: IntoIterator<Item = Vec<u8>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Per-class record counts reported at the end of a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub misindexed: u64,
    pub duplicate: u64,
    pub unique: u64,
}

impl Summary {
    /// Total records routed; equals the input record count
    pub fn total(&self) -> u64 {
        self.misindexed + self.duplicate + self.unique
    }
}

/// The three classified output destinations
///
/// Writers are buffered; call [`ClassOutputs::finish`] to flush before
/// printing the summary so no exit path leaves output unflushed.
pub struct ClassOutputs {
    unique: BufWriter<File>,
    duplicate: BufWriter<File>,
    misindexed: BufWriter<File>,
    summary: Summary,
}

impl ClassOutputs {
    /// Create the three output files under `dir`
    pub fn create(dir: &Path) -> Result<Self> {
        let open = |name: &str| -> Result<BufWriter<File>> {
            let path = dir.join(name);
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(BufWriter::new(file))
        };
        Ok(Self {
            unique: open(UNIQUE_FILE)?,
            duplicate: open(DUPLICATE_FILE)?,
            misindexed: open(MISINDEXED_FILE)?,
            summary: Summary::default(),
        })
    }

    /// Route one original record line to its classified destination
    pub fn write(&mut self, class: Classification, line: &[u8]) -> Result<()> {
        let writer = match class {
            Classification::Unique => {
                self.summary.unique += 1;
                &mut self.unique
            }
            Classification::Duplicate => {
                self.summary.duplicate += 1;
                &mut self.duplicate
            }
            Classification::Misindexed => {
                self.summary.misindexed += 1;
                &mut self.misindexed
            }
        };
        writer.write_all(line)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Flush all three writers and return the final counts
    pub fn finish(mut self) -> Result<Summary> {
        self.unique.flush()?;
        self.duplicate.flush()?;
        self.misindexed.flush()?;
        Ok(self.summary)
    }
}
