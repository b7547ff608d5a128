//! # msascorer
//!
//! Score a **test** multiple sequence alignment against a **reference**
//! alignment that may cover only part of each sequence.
//!
//! Every unordered pair of sequences is compared. For each pair, the residues
//! of both sequences are mapped onto reference coordinates and the homology
//! pairs asserted by each alignment are counted:
//!
//! - **TruePos**: reference pairs reproduced by the test alignment
//! - **FalsePos**: test pairs between reference residues that the reference does not assert
//! - **FalseNeg**: reference pairs the test alignment misses
//! - **totalRef**: all reference pairs (`TruePos + FalseNeg`)
//!
//! True negatives are not reported; they are every pair that could be formed
//! from reference characters.
//!
//! ## Reference windows
//! A reference row does not have to hold the whole sequence. Its residues
//! (gaps removed) must appear as one contiguous stretch of the test row's
//! residues; residues outside that stretch are ignored. Gap symbols are
//! `*`, `-`, `X` and `?`.
//!
//! ### Example
//! ```
//! use msascorer::{parse_alignment, score_alignments, AlignmentFormat, PairedAlignments, ScoreOptions};
//! let test = parse_alignment(">a\nMKV-LA\n>b\nMK-VLA\n", AlignmentFormat::Auto).unwrap();
//! let reference = parse_alignment(">a\nKV-L\n>b\nK-VL\n", AlignmentFormat::Auto).unwrap();
//! let paired = PairedAlignments::new(test, reference).unwrap();
//! let summary = score_alignments(&paired, &ScoreOptions::default()).unwrap();
//! assert_eq!(summary.comparisons(), 1);
//! assert_eq!(summary.total.true_pos, summary.total.total_ref);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod alignment;
pub mod common;
pub mod mapper;
pub mod pairs;
pub mod report;
pub mod score;

pub use alignment::{load_alignment, parse_alignment, parse_fasta, AlignedSequence, AlignmentFormat, PairedAlignments};
pub use common::{is_gap, remove_gaps, MsaScoreError, GAP_CHARS};
pub use mapper::{map_positions, map_positions_simple, Label, LabelMode, PositionLabels, ABSENT_SENTINEL};
pub use pairs::{make_pairs, HomologyPair};
pub use report::{write_metrics, write_report, ReportHeader};
pub use score::{compare_pairs, label_pair, score_alignments, PairScore, Score, ScoreOptions, ScoreSummary, SequenceRows};
