//! Homology pair generation from two sequences' label arrays.
use crate::common::MsaScoreError;
use crate::mapper::Label;

/// Claim that index `a` of one sequence and index `b` of another sit in the
/// same alignment column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HomologyPair {
    /// Label index from the first sequence.
    pub a: usize,
    /// Label index from the second sequence.
    pub b: usize,
}

impl HomologyPair {
    /// Both sides resolve to the same reference coordinate.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.a == self.b
    }
}

/// Pair up two label arrays taken from the same alignment, keeping only the
/// columns where both labels are informative. Pairs come out in column order.
///
/// # Errors
/// [`MsaScoreError::ContractViolation`] if the arrays differ in length.
pub fn make_pairs(labels_a: &[Label], labels_b: &[Label]) -> Result<Vec<HomologyPair>, MsaScoreError> {
    if labels_a.len() != labels_b.len() {
        return Err(MsaScoreError::ContractViolation(format!(
            "label arrays of different length ({} vs {})",
            labels_a.len(),
            labels_b.len()
        )));
    }
    Ok(labels_a
        .iter()
        .zip(labels_b)
        .filter_map(|(x, y)| Some(HomologyPair { a: x.informative()?, b: y.informative()? }))
        .collect())
}
