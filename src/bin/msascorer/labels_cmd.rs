//! CLI for `msascorer labels` (per-column labels of one sequence pair).
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use msascorer::*;

use crate::{FormatChoice, ModeChoice};

/// Options for the `labels` subcommand.
#[derive(Debug, Args)]
pub struct LabelsCmd {
    /// Test alignment.
    #[arg(long, value_name="FILE")]
    pub test: PathBuf,
    /// Reference alignment.
    #[arg(long = "reference", alias = "ref", value_name="FILE")]
    pub reference: PathBuf,
    /// First sequence name.
    #[arg(long)]
    pub seq_a: String,
    /// Second sequence name.
    #[arg(long)]
    pub seq_b: String,
    /// Input layout for both files.
    #[arg(long, value_enum, default_value_t=FormatChoice::Auto)]
    pub format: FormatChoice,
    /// Labelling mode.
    #[arg(long, value_enum, default_value_t=ModeChoice::Companion)]
    pub mode: ModeChoice,
    /// Print the legacy signed encoding instead of tagged labels.
    #[arg(long, default_value_t=false)]
    pub signed: bool,
}

pub fn run(cmd: LabelsCmd) -> Result<()> {
    let format = AlignmentFormat::from(cmd.format);
    let test = load_alignment(&cmd.test, format).with_context(|| format!("load test MSA: {}", cmd.test.display()))?;
    let reference = load_alignment(&cmd.reference, format).with_context(|| format!("load reference MSA: {}", cmd.reference.display()))?;
    let paired = PairedAlignments::new(test, reference)?;

    let find = |name: &str| paired.position(name).ok_or_else(|| anyhow::anyhow!("no sequence named {name}"));
    let (i, j) = (find(&cmd.seq_a)?, find(&cmd.seq_b)?);
    let (la, lb) = label_pair(paired.rows(i), paired.rows(j), cmd.mode.into())?;

    let show = |l: &Label| -> String {
        if cmd.signed {
            return l.to_signed().to_string();
        }
        match l {
            Label::Absent => ".".to_string(),
            Label::AlignedToGap(k) => format!("gap:{k}"),
            Label::AlignedToResidue(k) => k.to_string(),
        }
    };

    let mut w = csv::WriterBuilder::new().delimiter(b'\t').from_writer(std::io::stdout());
    w.write_record(["alignment", "column", cmd.seq_a.as_str(), cmd.seq_b.as_str()])?;
    for (name, a, b) in [("test", &la.test, &lb.test), ("reference", &la.reference, &lb.reference)] {
        for (col, (x, y)) in a.iter().zip(b.iter()).enumerate() {
            w.write_record([name.to_string(), col.to_string(), show(x), show(y)])?;
        }
    }
    w.flush()?;
    Ok(())
}
