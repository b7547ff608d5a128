//! Pair scoring and score accumulation.
//!
//! [`compare_pairs`] scores one pair of sequences: each sequence is mapped
//! onto its reference row (with the other sequence as companion), homology
//! pairs are built for the test and the reference alignments, and the test
//! pairs that land on identical reference coordinates are the true positives.
//!
//! [`score_alignments`] runs that over every unordered pair of sequences and
//! folds the partial scores into one [`Score`].
//!
//! ### Example
//! ```rust
//! use msascorer::{compare_pairs, LabelMode, SequenceRows};
//! let a = SequenceRows { test: "AC-GT", reference: "AC-GT" };
//! let b = SequenceRows { test: "A-CGT", reference: "A-CGT" };
//! let s = compare_pairs(a, b, LabelMode::Companion).unwrap();
//! assert_eq!((s.true_pos, s.false_pos, s.false_neg), (3, 0, 0));
//! ```
//!
use std::collections::HashSet;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::alignment::PairedAlignments;
use crate::common::MsaScoreError;
use crate::mapper::{map_positions, map_positions_simple, LabelMode, PositionLabels};
use crate::pairs::{make_pairs, HomologyPair};

/// Confusion-matrix counters over homology pairs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Score {
    /// Reference pairs reproduced by the test alignment.
    pub true_pos: usize,
    /// Test pairs (between reference residues) that the reference does not assert.
    pub false_pos: usize,
    /// Reference pairs missed by the test alignment.
    pub false_neg: usize,
    /// Number of pairs in the reference alignment (`true_pos + false_neg`).
    pub total_ref: usize,
    /// Number of test pairs between reference residues (`true_pos + false_pos`).
    pub total_test: usize,
}

impl Score {
    /// Build a score from the three primary counts, deriving FP and FN.
    ///
    /// # Errors
    /// [`MsaScoreError::ContractViolation`] if `true_pos` exceeds either total.
    pub fn from_counts(true_pos: usize, total_ref: usize, total_test: usize) -> Result<Score, MsaScoreError> {
        let false_neg = total_ref.checked_sub(true_pos).ok_or_else(|| {
            MsaScoreError::ContractViolation(format!("negative false negatives (TP={true_pos}, totalRef={total_ref})"))
        })?;
        let false_pos = total_test.checked_sub(true_pos).ok_or_else(|| {
            MsaScoreError::ContractViolation(format!("negative false positives (TP={true_pos}, totalTest={total_test})"))
        })?;
        Ok(Score { true_pos, false_pos, false_neg, total_ref, total_test })
    }

    /// `TP / (TP + FP)`; `None` when the test alignment has no qualifying pairs.
    pub fn precision(&self) -> Option<f64> {
        ratio(self.true_pos, self.total_test)
    }

    /// `TP / (TP + FN)`; `None` when the reference has no pairs.
    pub fn recall(&self) -> Option<f64> {
        ratio(self.true_pos, self.total_ref)
    }

    /// Harmonic mean of precision and recall.
    pub fn f1(&self) -> Option<f64> {
        ratio(2 * self.true_pos, self.total_test + self.total_ref)
    }
}

fn ratio(num: usize, den: usize) -> Option<f64> {
    (den > 0).then(|| num as f64 / den as f64)
}

impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Score) {
        self.true_pos += rhs.true_pos;
        self.false_pos += rhs.false_pos;
        self.false_neg += rhs.false_neg;
        self.total_ref += rhs.total_ref;
        self.total_test += rhs.total_test;
    }
}

impl Add for Score {
    type Output = Score;
    fn add(mut self, rhs: Score) -> Score {
        self += rhs;
        self
    }
}

impl Sum for Score {
    fn sum<I: Iterator<Item = Score>>(iter: I) -> Score {
        iter.fold(Score::default(), Add::add)
    }
}

impl<'a> Sum<&'a Score> for Score {
    fn sum<I: Iterator<Item = &'a Score>>(iter: I) -> Score {
        iter.copied().sum()
    }
}

/// The two aligned rows of one sequence.
#[derive(Clone, Copy, Debug)]
pub struct SequenceRows<'a> {
    /// Row in the test MSA.
    pub test: &'a str,
    /// Row in the reference MSA.
    pub reference: &'a str,
}

/// Options for a scoring run.
#[derive(Clone, Debug, Default)]
pub struct ScoreOptions {
    /// Label derivation; companion mode unless the caller asks otherwise.
    pub mode: LabelMode,
}

/// Score of one sequence pair, with the names it was computed for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairScore {
    pub a_id: String,
    pub b_id: String,
    pub score: Score,
}

/// Result of [`score_alignments`].
#[derive(Clone, Debug, Default)]
pub struct ScoreSummary {
    /// Sum of every pair score.
    pub total: Score,
    /// Per-pair scores in enumeration order (`i < j`, row-major).
    pub pairs: Vec<PairScore>,
}

impl ScoreSummary {
    /// Number of sequence pairs that were compared.
    pub fn comparisons(&self) -> usize {
        self.pairs.len()
    }
}

/// Label both sequences of a pair for the given mode.
pub fn label_pair(a: SequenceRows<'_>, b: SequenceRows<'_>, mode: LabelMode) -> Result<(PositionLabels, PositionLabels), MsaScoreError> {
    match mode {
        LabelMode::Companion => Ok((
            map_positions(a.test, a.reference, b.reference)?,
            map_positions(b.test, b.reference, a.reference)?,
        )),
        LabelMode::Simple => Ok((
            map_positions_simple(a.test, a.reference)?,
            map_positions_simple(b.test, b.reference)?,
        )),
    }
}

/// Score one pair of sequences.
///
/// # Errors
/// Propagates [`MsaScoreError::AlignmentMismatch`] from the mapper and
/// [`MsaScoreError::ContractViolation`] from pair generation or counting.
pub fn compare_pairs(a: SequenceRows<'_>, b: SequenceRows<'_>, mode: LabelMode) -> Result<Score, MsaScoreError> {
    let (la, lb) = label_pair(a, b, mode)?;
    let test_pairs = make_pairs(&la.test, &lb.test)?;
    let ref_pairs = make_pairs(&la.reference, &lb.reference)?;

    let true_pos = match mode {
        LabelMode::Companion => test_pairs.iter().filter(|p| p.is_identity()).count(),
        LabelMode::Simple => {
            let reference: HashSet<HomologyPair> = ref_pairs.iter().copied().collect();
            test_pairs.iter().filter(|p| reference.contains(p)).count()
        }
    };
    Score::from_counts(true_pos, ref_pairs.len(), test_pairs.len())
}

/// Score every unordered pair of sequences of a validated test/reference set.
///
/// The first error aborts the run; no partial total is returned.
pub fn score_alignments(paired: &PairedAlignments, opts: &ScoreOptions) -> Result<ScoreSummary, MsaScoreError> {
    let n = paired.len();
    let mut summary = ScoreSummary { total: Score::default(), pairs: Vec::with_capacity(n * n.saturating_sub(1) / 2) };
    for i in 0..n {
        for j in i + 1..n {
            let score = compare_pairs(paired.rows(i), paired.rows(j), opts.mode)?;
            log::debug!("{} vs {}: {:?}", paired.name(i), paired.name(j), score);
            summary.total += score;
            summary.pairs.push(PairScore { a_id: paired.name(i).to_string(), b_id: paired.name(j).to_string(), score });
        }
    }
    log::info!("scored {} sequence pairs (mode={:?})", summary.comparisons(), opts.mode);
    Ok(summary)
}
