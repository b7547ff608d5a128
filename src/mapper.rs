//! Position mapping between a test row and its (possibly trimmed) reference row.
//!
//! For one sequence we have two aligned rows: the row from the test MSA and the
//! row from the reference MSA. The reference row may cover only a contiguous
//! stretch of the sequence's residues. Mapping anchors the ungapped reference
//! inside the ungapped test sequence and then labels every column of both rows
//! with a [`Label`], so that two sequences' labels can later be paired up
//! column by column.
//!
//! Label magnitudes are **reference column indices**. A test residue inside
//! the reference window is labelled `AlignedToResidue(c)`, where `c` is the
//! reference column holding the same residue, so a test-derived pair is
//! directly comparable to a reference pair. The gap tag only ever appears on
//! the reference row.
//!
//! ### Example
//! ```rust
//! use msascorer::{map_positions, Label};
//! // reference row "CD-E" against companion "C-DE"
//! let labels = map_positions("ACDE-FG", "CD-E", "C-DE").unwrap();
//! assert_eq!(labels.reference[0], Label::AlignedToResidue(0));
//! assert_eq!(labels.reference[1], Label::AlignedToGap(1));
//! // the test 'A' lies outside the reference window
//! assert_eq!(labels.test[0], Label::Absent);
//! assert_eq!(labels.test[1], Label::AlignedToResidue(0));
//! ```
//!
use crate::common::{is_gap, remove_gaps, MsaScoreError};

/// Sentinel used by [`Label::to_signed`] for [`Label::Absent`].
pub const ABSENT_SENTINEL: i64 = -1_000_000_000;

/// Label attached to one alignment column of one sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    /// No correspondent in the reference (a gap, or a residue outside the
    /// reference window).
    Absent,
    /// Present in the reference, but opposite a gap in the companion row.
    AlignedToGap(usize),
    /// Present in the reference and opposite a real character in the companion row.
    AlignedToResidue(usize),
}

impl Label {
    /// Index carried by an informative label; `None` for anything that
    /// cannot take part in a homology pair.
    #[inline]
    pub fn informative(self) -> Option<usize> {
        match self {
            Label::AlignedToResidue(k) => Some(k),
            Label::Absent | Label::AlignedToGap(_) => None,
        }
    }

    /// Legacy signed encoding: `k`, `-k`, or [`ABSENT_SENTINEL`].
    ///
    /// `AlignedToGap(0)` encodes as `0` and therefore collides with
    /// `AlignedToResidue(0)`; the tagged form does not have that problem.
    pub fn to_signed(self) -> i64 {
        match self {
            Label::Absent => ABSENT_SENTINEL,
            Label::AlignedToGap(k) => -(k as i64),
            Label::AlignedToResidue(k) => k as i64,
        }
    }

    /// Decode the legacy signed encoding. Zero decodes as `AlignedToResidue(0)`.
    pub fn from_signed(v: i64) -> Label {
        if v <= ABSENT_SENTINEL {
            Label::Absent
        } else if v < 0 {
            Label::AlignedToGap(v.unsigned_abs() as usize)
        } else {
            Label::AlignedToResidue(v as usize)
        }
    }
}

/// How labels are derived for a sequence pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelMode {
    /// Use the other sequence's reference row to separate residues aligned to
    /// a gap from residues aligned to a residue.
    #[default]
    Companion,
    /// Plain canonical indices with no gap/residue distinction. Less precise.
    Simple,
}

/// Parallel label arrays for one sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionLabels {
    /// One label per test-alignment column.
    pub test: Vec<Label>,
    /// One label per reference-alignment column.
    pub reference: Vec<Label>,
}

/// Rows are indexed by byte, so every row must be ASCII.
fn require_ascii(rows: &[&str]) -> Result<(), MsaScoreError> {
    match rows.iter().find(|r| !r.is_ascii()) {
        Some(r) => Err(MsaScoreError::ContractViolation(format!("row {r:?} contains non-ASCII characters"))),
        None => Ok(()),
    }
}

/// Half-open window `[start, end)` of the ungapped test residues covered by
/// the ungapped reference.
fn anchor(test: &str, reference: &str) -> Result<(usize, usize), MsaScoreError> {
    let test_clean = remove_gaps(test);
    let ref_clean = remove_gaps(reference);
    match test_clean.find(&ref_clean) {
        Some(start) => Ok((start, start + ref_clean.len())),
        None => Err(MsaScoreError::AlignmentMismatch {
            test: test.to_string(),
            reference: reference.to_string(),
        }),
    }
}

/// Project `lookup` (indexed by residue number inside the reference window)
/// onto the columns of the test row.
fn project_onto_test(test: &str, start: usize, end: usize, lookup: &[Label]) -> Vec<Label> {
    let mut out = vec![Label::Absent; test.len()];
    let mut pos = 0usize;
    for (i, b) in test.bytes().enumerate() {
        if is_gap(b) { continue; }
        if pos >= start && pos < end {
            out[i] = lookup[pos - start];
        }
        pos += 1;
    }
    out
}

/// Map one sequence's test row onto its reference row, using `companion`
/// (another sequence's row in the same reference MSA) to tell apart residues
/// aligned to a gap from residues aligned to a residue.
///
/// # Errors
/// - [`MsaScoreError::ContractViolation`] if any row is not ASCII, or if
///   `reference` and `companion` differ in length.
/// - [`MsaScoreError::AlignmentMismatch`] if the ungapped reference is not a
///   contiguous substring of the ungapped test row.
pub fn map_positions(test: &str, reference: &str, companion: &str) -> Result<PositionLabels, MsaScoreError> {
    require_ascii(&[test, reference, companion])?;
    if reference.len() != companion.len() {
        return Err(MsaScoreError::ContractViolation(format!(
            "reference row has {} columns but companion has {}",
            reference.len(),
            companion.len()
        )));
    }
    let (start, end) = anchor(test, reference)?;

    let mut ref_labels = Vec::with_capacity(reference.len());
    let mut lookup = Vec::with_capacity(end - start);
    for (i, (r, z)) in reference.bytes().zip(companion.bytes()).enumerate() {
        let label = if is_gap(z) { Label::AlignedToGap(i) } else { Label::AlignedToResidue(i) };
        ref_labels.push(label);
        if !is_gap(r) {
            lookup.push(Label::AlignedToResidue(i));
        }
    }

    let test_labels = project_onto_test(test, start, end, &lookup);
    log::trace!("mapped window [{start}, {end}) onto {} test columns", test.len());
    Ok(PositionLabels { test: test_labels, reference: ref_labels })
}

/// Degraded mapping without a companion row: every present column gets the
/// canonical (ungapped) index of its residue inside the reference.
///
/// # Errors
/// [`MsaScoreError::ContractViolation`] and [`MsaScoreError::AlignmentMismatch`]
/// as for [`map_positions`].
pub fn map_positions_simple(test: &str, reference: &str) -> Result<PositionLabels, MsaScoreError> {
    require_ascii(&[test, reference])?;
    let (start, end) = anchor(test, reference)?;

    let mut ref_labels = vec![Label::Absent; reference.len()];
    let mut lookup = Vec::with_capacity(end - start);
    for (i, r) in reference.bytes().enumerate() {
        if is_gap(r) { continue; }
        let label = Label::AlignedToResidue(lookup.len());
        ref_labels[i] = label;
        lookup.push(label);
    }

    let test_labels = project_onto_test(test, start, end, &lookup);
    Ok(PositionLabels { test: test_labels, reference: ref_labels })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use super::Label::*;

    #[test]
    fn worked_example_with_gap_in_companion() {
        // test:      A C D E - F G
        // reference:   C D - E        (residues "CDE", window [1, 4))
        // companion:   C - D E
        let l = map_positions("ACDE-FG", "CD-E", "C-DE").unwrap();
        assert_eq!(l.reference, vec![AlignedToResidue(0), AlignedToGap(1), AlignedToResidue(2), AlignedToResidue(3)]);
        // C -> column 0, D -> column 1, E -> column 3; the gap tag stays on the reference row
        assert_eq!(l.test, vec![Absent, AlignedToResidue(0), AlignedToResidue(1), AlignedToResidue(3), Absent, Absent, Absent]);
    }

    #[test]
    fn test_residue_facing_companion_gap_stays_pairable() {
        let l = map_positions("MACD-", "MACD", "M-CD").unwrap();
        assert_eq!(l.reference[1], AlignedToGap(1));
        assert_eq!(l.test[1], AlignedToResidue(1));
    }

    #[test]
    fn non_ascii_rows_are_rejected() {
        let err = map_positions("\u{c9}A", "\u{c9}", "\u{c9}").unwrap_err();
        assert!(matches!(err, MsaScoreError::ContractViolation(_)));
        let err = map_positions("AC", "C", "\u{c9}").unwrap_err();
        assert!(matches!(err, MsaScoreError::ContractViolation(_)));
        let err = map_positions_simple("\u{c9}A", "\u{c9}").unwrap_err();
        assert!(matches!(err, MsaScoreError::ContractViolation(_)));
    }

    #[test]
    fn gap_column_in_reference_still_labelled() {
        // reference gap at column 2 faces a residue in the companion
        let l = map_positions("CDE", "CD-E", "CDDE").unwrap();
        assert_eq!(l.reference[2], AlignedToResidue(2));
        assert_eq!(l.test, vec![AlignedToResidue(0), AlignedToResidue(1), AlignedToResidue(3)]);
    }

    #[test]
    fn zero_index_gap_is_not_informative() {
        let l = map_positions("AC", "AC", "-C").unwrap();
        assert_eq!(l.reference[0], AlignedToGap(0));
        assert_eq!(l.reference[0].informative(), None);
        // the legacy encoding cannot tell these apart
        assert_eq!(AlignedToGap(0).to_signed(), AlignedToResidue(0).to_signed());
    }

    #[test]
    fn mismatch_is_an_error() {
        let err = map_positions("ACDE", "CE", "CE").unwrap_err();
        assert!(matches!(err, MsaScoreError::AlignmentMismatch { .. }));
        let err = map_positions_simple("ACDE", "AX-Q").unwrap_err();
        assert!(matches!(err, MsaScoreError::AlignmentMismatch { .. }));
    }

    #[test]
    fn companion_length_checked() {
        let err = map_positions("ACDE", "CD", "C").unwrap_err();
        assert!(matches!(err, MsaScoreError::ContractViolation(_)));
    }

    #[test]
    fn empty_reference_maps_nothing() {
        let l = map_positions("AC-D", "--", "AC").unwrap();
        assert!(l.test.iter().all(|x| *x == Absent));
        assert_eq!(l.reference, vec![AlignedToResidue(0), AlignedToResidue(1)]);
    }

    #[test]
    fn simple_mode_uses_canonical_indices() {
        let l = map_positions_simple("ACDE-FG", "CD-E").unwrap();
        assert_eq!(l.reference, vec![AlignedToResidue(0), AlignedToResidue(1), Absent, AlignedToResidue(2)]);
        assert_eq!(l.test, vec![Absent, AlignedToResidue(0), AlignedToResidue(1), AlignedToResidue(2), Absent, Absent, Absent]);
    }

    #[test]
    fn signed_round_trip_for_edge_values() {
        assert_eq!(Label::from_signed(ABSENT_SENTINEL), Absent);
        assert_eq!(Label::from_signed(-7), AlignedToGap(7));
        assert_eq!(Label::from_signed(0), AlignedToResidue(0));
        assert_eq!(AlignedToGap(7).to_signed(), -7);
    }

    fn row() -> impl Strategy<Value = String> {
        "[ACDEFGHIK-]{1,40}"
    }

    proptest! {
        #[test]
        fn label_lengths_follow_inputs(test in row(), cut in 0usize..40, take in 0usize..40, companion in row()) {
            // reference = a gapped copy of a contiguous stretch of the test residues
            let clean = remove_gaps(&test);
            let a = cut.min(clean.len());
            let b = (a + take).min(clean.len());
            let reference: String = clean[a..b].chars().flat_map(|c| [c, '-']).collect();
            let companion: String = companion.chars().cycle().take(reference.len()).collect();

            let l = map_positions(&test, &reference, &companion).unwrap();
            prop_assert_eq!(l.test.len(), test.len());
            prop_assert_eq!(l.reference.len(), reference.len());

            let s = map_positions_simple(&test, &reference).unwrap();
            prop_assert_eq!(s.test.len(), test.len());
            prop_assert_eq!(s.reference.len(), reference.len());
        }
    }
}
