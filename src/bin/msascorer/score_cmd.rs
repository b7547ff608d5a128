//! CLI for `msascorer score` (confusion counts over homology pairs).
use std::io::{self, Write};
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use msascorer::*;

use crate::{FormatChoice, ModeChoice};

/// Options for the `score` subcommand.
#[derive(Debug, Args)]
pub struct ScoreCmd {
    /// Test alignment (FASTA, MSF, Phylip or simple).
    #[arg(long, value_name="FILE")]
    pub test: PathBuf,
    /// Reference alignment; each row may hold a contiguous subset of the test residues.
    #[arg(long = "reference", alias = "ref", value_name="FILE")]
    pub reference: PathBuf,
    /// Input layout for both files.
    #[arg(long, value_enum, default_value_t=FormatChoice::Auto)]
    pub format: FormatChoice,
    /// Labelling mode.
    #[arg(long, value_enum, default_value_t=ModeChoice::Companion)]
    pub mode: ModeChoice,
    /// Optional per-pair TSV report.
    #[arg(long, value_name="FILE")]
    pub pairs: Option<PathBuf>,
    /// Also print precision, recall and F1.
    #[arg(long, default_value_t=false)]
    pub metrics: bool,
}

pub fn run(cmd: ScoreCmd) -> Result<()> {
    let format = AlignmentFormat::from(cmd.format);
    let test = load_alignment(&cmd.test, format).with_context(|| format!("load test MSA: {}", cmd.test.display()))?;
    let reference = load_alignment(&cmd.reference, format).with_context(|| format!("load reference MSA: {}", cmd.reference.display()))?;
    let paired = PairedAlignments::new(test, reference)?;

    let opts = ScoreOptions { mode: cmd.mode.into() };
    let summary = score_alignments(&paired, &opts)?;

    let header = ReportHeader {
        test_name: cmd.test.display().to_string(),
        test_seqs: paired.len(),
        test_width: paired.test_width(),
        ref_name: cmd.reference.display().to_string(),
        ref_seqs: paired.len(),
        ref_width: paired.reference_width(),
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &header, &summary.total)?;
    if cmd.metrics {
        write_metrics(&mut out, &summary.total)?;
    }
    out.flush()?;

    if let Some(path) = &cmd.pairs {
        let mut w = csv::WriterBuilder::new().delimiter(b'\t').from_path(path)
            .with_context(|| format!("create {}", path.display()))?;
        w.write_record(["a_id","b_id","true_pos","false_pos","false_neg","total_ref","total_test"])?;
        for p in &summary.pairs {
            let s = &p.score;
            w.write_record([
                p.a_id.clone(),
                p.b_id.clone(),
                s.true_pos.to_string(),
                s.false_pos.to_string(),
                s.false_neg.to_string(),
                s.total_ref.to_string(),
                s.total_test.to_string(),
            ])?;
        }
        w.flush()?;
    }
    Ok(())
}
