//! SAM line parsing
//!
//! This module provides a borrowed view over one tab-delimited alignment
//! line, extracting only the fields the classifier needs. The original
//! line bytes are kept intact so output files receive the input verbatim.

use crate::errors::DedupError;
use bstr::ByteSlice;

/// Number of trailing qname bytes that form the barcode (UMI)
pub const BARCODE_LEN: usize = 8;

/// SAM flag bit indicating a reverse-strand alignment
pub const REVERSE_FLAG: u16 = 0x10;

/// Minimum number of tab-separated fields in a parseable record
pub const MIN_FIELDS: usize = 6;

/// Borrowed view of one alignment record line
///
/// Only the fields used for classification are extracted; everything else
/// stays in the raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamRecord<'a> {
    /// Last [`BARCODE_LEN`] bytes of the read identifier (shorter
    /// identifiers yield the whole identifier, validated later)
    pub barcode: &'a [u8],
    /// SAM flag bitfield
    pub flag: u16,
    /// Reference sequence name, verbatim
    pub reference: &'a [u8],
    /// 1-based leftmost mapped position, as reported
    pub start: i64,
    /// Raw CIGAR string, verbatim
    pub cigar: &'a [u8],
}

impl<'a> SamRecord<'a> {
    /// Parse one tab-delimited alignment line
    ///
    /// Requires at least [`MIN_FIELDS`] fields: qname, flag, rname, pos,
    /// mapq, cigar. Trailing fields are ignored.
    pub fn parse(line: &'a [u8]) -> Result<Self, DedupError> {
        // Everything past the CIGAR field is irrelevant here, so the split
        // stops after it.
        let fields: Vec<&'a [u8]> = line.splitn_str(MIN_FIELDS + 1, "\t").collect();
        if line.is_empty() || fields.len() < MIN_FIELDS {
            let found = if line.is_empty() { 0 } else { fields.len() };
            return Err(DedupError::TruncatedRecord { found });
        }

        let qname = fields[0];
        let flag = parse_int::<u16>(fields[1], "flag")?;
        let reference = fields[2];
        let start = parse_int::<i64>(fields[3], "pos")?;
        let cigar = fields[5];

        // No length check here: a short qname is tolerated and caught by
        // the barcode validator instead.
        let barcode = &qname[qname.len().saturating_sub(BARCODE_LEN)..];

        Ok(Self {
            barcode,
            flag,
            reference,
            start,
            cigar,
        })
    }

    /// Whether the alignment is on the reverse strand (flag bit 0x10)
    #[inline]
    pub fn is_reverse(&self) -> bool {
        self.flag & REVERSE_FLAG != 0
    }
}

fn parse_int<T: std::str::FromStr>(
    raw: &[u8],
    field: &'static str,
) -> Result<T, DedupError> {
    std::str::from_utf8(raw)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| DedupError::InvalidField {
            field,
            value: String::from_utf8_lossy(raw).into_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &[u8] = b"NS500:42:AACGCCAT\t0\tchr1\t100\t36\t8S42M\t*\t0\t0\tACGT\tFFFF";

    #[test]
    fn test_parse_extracts_fields() {
        let rec = SamRecord::parse(LINE).unwrap();
        assert_eq!(rec.barcode, b"AACGCCAT");
        assert_eq!(rec.flag, 0);
        assert_eq!(rec.reference, b"chr1");
        assert_eq!(rec.start, 100);
        assert_eq!(rec.cigar, b"8S42M");
    }

    #[test]
    fn test_parse_minimal_six_fields() {
        let rec = SamRecord::parse(b"r1:AACGCCAT\t16\tchr2\t55\t0\t42M").unwrap();
        assert_eq!(rec.reference, b"chr2");
        assert_eq!(rec.start, 55);
        assert!(rec.is_reverse());
    }

    #[test]
    fn test_short_qname_barcode() {
        // Qname shorter than the barcode length: take it whole, let the
        // validator reject it.
        let rec = SamRecord::parse(b"ACGT\t0\tchr1\t10\t0\t4M").unwrap();
        assert_eq!(rec.barcode, b"ACGT");
    }

    #[test]
    fn test_truncated_line() {
        let err = SamRecord::parse(b"r1\t0\tchr1\t100\t36").unwrap_err();
        assert!(matches!(err, DedupError::TruncatedRecord { found: 5 }));
    }

    #[test]
    fn test_empty_line() {
        let err = SamRecord::parse(b"").unwrap_err();
        assert!(matches!(err, DedupError::TruncatedRecord { found: 0 }));
    }

    #[test]
    fn test_bad_flag() {
        let err = SamRecord::parse(b"r1\txx\tchr1\t100\t36\t42M").unwrap_err();
        assert!(matches!(err, DedupError::InvalidField { field: "flag", .. }));
    }

    #[test]
    fn test_bad_pos() {
        let err = SamRecord::parse(b"r1\t0\tchr1\tabc\t36\t42M").unwrap_err();
        assert!(matches!(err, DedupError::InvalidField { field: "pos", .. }));
    }

    #[test]
    fn test_is_reverse_bit() {
        // Bit 0x10 must be tested bitwise, not via string formatting.
        let fwd = SamRecord::parse(b"r1\t0\tchr1\t100\t36\t42M").unwrap();
        assert!(!fwd.is_reverse());

        let rev = SamRecord::parse(b"r1\t16\tchr1\t100\t36\t42M").unwrap();
        assert!(rev.is_reverse());

        // 0x10 combined with unrelated bits still reads as reverse.
        let rev_extra = SamRecord::parse(b"r1\t1040\tchr1\t100\t36\t42M").unwrap();
        assert!(rev_extra.is_reverse());

        // Unrelated bits alone do not.
        let fwd_extra = SamRecord::parse(b"r1\t1024\tchr1\t100\t36\t42M").unwrap();
        assert!(!fwd_extra.is_reverse());
    }
}
