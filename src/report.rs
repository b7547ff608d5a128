//! Text report for a scoring run.
//!
//! ```text
//! #Comparing test.fas (seq:4;l=112) => REF ref.fas(seq:4;l=78)
//! #TruePos       FalsePos       FalseNeg       totalRef
//! 346            59             110            456
//! ```
//!
//! `TruePos + FalsePos` is the number of test pairs between characters that
//! also occur in the reference; `TruePos + FalseNeg` is `totalRef`.
use std::io::{self, Write};

use crate::score::Score;

const WIDTH: usize = 15;

/// Description of the two inputs, printed as the `#Comparing` line.
#[derive(Clone, Debug)]
pub struct ReportHeader {
    pub test_name: String,
    pub test_seqs: usize,
    pub test_width: usize,
    pub ref_name: String,
    pub ref_seqs: usize,
    pub ref_width: usize,
}

/// Write the header line and the four-column score table.
pub fn write_report<W: Write>(out: &mut W, header: &ReportHeader, score: &Score) -> io::Result<()> {
    writeln!(
        out,
        "#Comparing {} (seq:{};l={}) => REF {}(seq:{};l={})",
        header.test_name, header.test_seqs, header.test_width, header.ref_name, header.ref_seqs, header.ref_width
    )?;
    writeln!(out, "{:<WIDTH$}{:<WIDTH$}{:<WIDTH$}{:<WIDTH$}", "#TruePos", "FalsePos", "FalseNeg", "totalRef")?;
    writeln!(out, "{:<WIDTH$}{:<WIDTH$}{:<WIDTH$}{:<WIDTH$}", score.true_pos, score.false_pos, score.false_neg, score.total_ref)?;
    Ok(())
}

/// Write precision, recall and F1 under the score table (`NA` when undefined).
pub fn write_metrics<W: Write>(out: &mut W, score: &Score) -> io::Result<()> {
    let fmt = |v: Option<f64>| v.map_or_else(|| "NA".to_string(), |x| format!("{x:.4}"));
    writeln!(out, "{:<WIDTH$}{:<WIDTH$}{:<WIDTH$}{:<WIDTH$}", "#Precision", "Recall", "F1", "totalTest")?;
    writeln!(
        out,
        "{:<WIDTH$}{:<WIDTH$}{:<WIDTH$}{:<WIDTH$}",
        fmt(score.precision()),
        fmt(score.recall()),
        fmt(score.f1()),
        score.total_test
    )?;
    Ok(())
}
