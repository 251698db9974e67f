//! PCR-duplicate detection core
//!
//! Two reads are copies of the same original fragment when they share a
//! barcode, reference, strand, and clipping-normalized start coordinate.
//! The tracker keeps one signature set per reference-sequence block, which
//! bounds memory to the largest block rather than the whole input.

use crate::errors::DedupError;
use crate::io::BarcodeSet;
use crate::record::SamRecord;
use std::collections::HashSet;

/// CIGAR operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Match,
    Insertion,
    Deletion,
    Skip,
    SoftClip,
    HardClip,
    Padding,
    SeqMatch,
    SeqMismatch,
}

impl OpKind {
    fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'M' => Some(Self::Match),
            b'I' => Some(Self::Insertion),
            b'D' => Some(Self::Deletion),
            b'N' => Some(Self::Skip),
            b'S' => Some(Self::SoftClip),
            b'H' => Some(Self::HardClip),
            b'P' => Some(Self::Padding),
            b'=' => Some(Self::SeqMatch),
            b'X' => Some(Self::SeqMismatch),
            _ => None,
        }
    }
}

/// One (length, kind) run from a CIGAR string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CigarOp {
    pub len: i64,
    pub kind: OpKind,
}

/// Parse a CIGAR string into an ordered operation list
///
/// The string is scanned once up front; later passes work on the parsed
/// list instead of re-searching the raw text per operation kind. Empty
/// strings and `*` (CIGAR unavailable) are rejected, as are runs missing
/// either the length or the operation character.
pub fn parse_cigar(raw: &[u8]) -> Result<Vec<CigarOp>, DedupError> {
    let invalid = || DedupError::InvalidCigar(String::from_utf8_lossy(raw).into_owned());

    if raw.is_empty() || raw == b"*" {
        return Err(invalid());
    }

    let mut ops = Vec::new();
    let mut len: i64 = 0;
    let mut have_len = false;
    for &b in raw {
        if b.is_ascii_digit() {
            len = len
                .checked_mul(10)
                .and_then(|l| l.checked_add(i64::from(b - b'0')))
                .ok_or_else(invalid)?;
            have_len = true;
        } else {
            let kind = OpKind::from_byte(b).ok_or_else(invalid)?;
            if !have_len {
                return Err(invalid());
            }
            ops.push(CigarOp { len, kind });
            len = 0;
            have_len = false;
        }
    }
    // Trailing digits with no operation character
    if have_len {
        return Err(invalid());
    }
    Ok(ops)
}

/// Normalize a reported start position to the fragment's 5' origin
///
/// Forward reads subtract a leading soft clip from the reported start.
/// Reverse reads add every reference-consuming run (match, deletion, skip)
/// plus a trailing soft clip, landing on the rightmost covered coordinate.
/// Duplicate fragments with different clipping artifacts converge on the
/// same value.
pub fn adjusted_start(start: i64, ops: &[CigarOp], reverse: bool) -> i64 {
    if !reverse {
        return match ops.first() {
            Some(op) if op.kind == OpKind::SoftClip => start - op.len,
            _ => start,
        };
    }

    let mut span = 0;
    for op in ops {
        match op.kind {
            OpKind::Match | OpKind::Deletion | OpKind::Skip => span += op.len,
            _ => {}
        }
    }
    let trailing_clip = match ops.last() {
        Some(op) if op.kind == OpKind::SoftClip => op.len,
        _ => 0,
    };
    start + span + trailing_clip
}

/// Identity of an original fragment within one reference block
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pub barcode: Vec<u8>,
    pub reference: Vec<u8>,
    pub position: i64,
    pub reverse: bool,
}

/// Outcome for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Unique,
    Duplicate,
    Misindexed,
}

/// Streaming classifier state
///
/// Holds the signatures seen since the last reference-name change. Requires
/// input sorted by reference name; a reference that reappears after another
/// was scanned silently produces wrong results.
#[derive(Debug, Default)]
pub struct DuplicateTracker {
    current_reference: Option<Vec<u8>>,
    seen: HashSet<Signature>,
}

impl DuplicateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one record, updating tracker state
    ///
    /// Records with an unknown barcode are misindexed and leave the tracker
    /// untouched: no reference transition, no signature insertion.
    pub fn classify(
        &mut self,
        record: &SamRecord<'_>,
        barcodes: &BarcodeSet,
    ) -> Result<Classification, DedupError> {
        if !barcodes.contains(record.barcode) {
            return Ok(Classification::Misindexed);
        }

        match self.current_reference.as_deref() {
            Some(r) if r == record.reference => {}
            Some(_) => {
                // Reference boundary: drop the previous block's signatures
                // (clear keeps the allocation).
                self.seen.clear();
                self.current_reference = Some(record.reference.to_vec());
            }
            None => self.current_reference = Some(record.reference.to_vec()),
        }

        let ops = parse_cigar(record.cigar)?;
        let position = adjusted_start(record.start, &ops, record.is_reverse());
        let signature = Signature {
            barcode: record.barcode.to_vec(),
            reference: record.reference.to_vec(),
            position,
            reverse: record.is_reverse(),
        };

        if self.seen.insert(signature) {
            Ok(Classification::Unique)
        } else {
            Ok(Classification::Duplicate)
        }
    }
}
