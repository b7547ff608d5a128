//! Common helpers shared by the scorer: the error type, gap classification
//! and gap stripping.
//!
//! ## Gaps
//! Four symbols mark an alignment gap or a masked/unresolved position:
//! `*`, `-`, `X` and `?`. Anything else is a residue. Note that `X` is treated
//! as a gap even in protein alignments, so masked residues never anchor a
//! homology pair.
//!
//! ## Examples
//! ```rust
//! use msascorer::{is_gap, remove_gaps};
//! assert!(is_gap(b'-'));
//! assert!(!is_gap(b'A'));
//! assert_eq!(remove_gaps("A-C*G?T"), "ACGT");
//! ```
//!
use std::path::PathBuf;

/// Characters that denote an alignment gap or a masked position.
pub const GAP_CHARS: &[u8] = b"*-X?";

/// Errors that can be returned by the loaders and the scorer.
#[derive(thiserror::Error, Debug)]
pub enum MsaScoreError {
    /// The ungapped reference row is not a contiguous substring of the
    /// ungapped test row for the same sequence.
    #[error("reference sequence is not a valid subset of the test sequence\ntest: {test}\nref:  {reference}")]
    AlignmentMismatch { test: String, reference: String },
    /// An internal invariant was broken (label arrays of different length,
    /// negative false-negative count, ...).
    #[error("internal contract violated: {0}")]
    ContractViolation(String),
    /// Returned when an alignment holds no sequences.
    #[error("empty alignment: {0}")]
    EmptyAlignment(&'static str),
    /// Test and reference hold a different number of sequences.
    #[error("test and reference MSAs have different number of sequences (test={test}, reference={reference})")]
    SequenceCountMismatch { test: usize, reference: usize },
    /// After sorting by name, the rows at the same index carry different names.
    #[error("test ({test}) and ref ({reference}) have different names")]
    NameMismatch { test: String, reference: String },
    /// A name occurs twice inside one alignment.
    #[error("duplicate sequence name {name:?} in {alignment} MSA")]
    DuplicateName { alignment: &'static str, name: String },
    /// Rows of one alignment differ in width.
    #[error("sequences of uneven length in {alignment} MSA: {name} has {found} columns, expected {expected}")]
    UnevenLength { alignment: &'static str, name: String, expected: usize, found: usize },
    /// The reference alignment has more columns than the test alignment.
    #[error("reference MSA is longer than test MSA (test={test}, reference={reference})")]
    ReferenceWider { test: usize, reference: usize },
    /// Malformed alignment text.
    #[error("could not parse {format} alignment: {message}")]
    Parse { format: &'static str, message: String },
    /// File could not be read.
    #[error("failed to read {}", path.display())]
    Io { path: PathBuf, #[source] source: std::io::Error },
}

/// Return `true` if `c` is a gap or masked symbol (`*`, `-`, `X`, `?`).
#[inline]
pub fn is_gap(c: u8) -> bool {
    GAP_CHARS.contains(&c)
}

/// Strip every gap symbol from `seq`, keeping residue order.
///
/// Used to recover the raw residue string behind an aligned row, which is
/// what the reference window is anchored against.
pub fn remove_gaps(seq: &str) -> String {
    seq.bytes().filter(|&b| !is_gap(b)).map(char::from).collect()
}
