//! Command-line interface for the `msascorer` crate.
//!
//! Subcommands are implemented in separate files (modules) under `src/bin/msascorer/`:
//! - `score_cmd.rs`
//! - `labels_cmd.rs`
//!
use clap::{Parser, Subcommand, ValueEnum};
use anyhow::Result;
use msascorer::{AlignmentFormat, LabelMode};

#[derive(Debug, Parser)]
#[command(name="msascorer", version=env!("CARGO_PKG_VERSION"), about="Score a test MSA against a (partial) reference MSA", disable_help_subcommand=true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action=clap::ArgAction::Count, global=true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Count true/false positive and false negative homology pairs.
    Score(score_cmd::ScoreCmd),
    /// Show the per-column labels computed for two sequences.
    Labels(labels_cmd::LabelsCmd),
}

/// Alignment file layout.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatChoice { Auto, Fasta, Msf, Phylip, Simple }

impl From<FormatChoice> for AlignmentFormat {
    fn from(f: FormatChoice) -> Self {
        match f {
            FormatChoice::Auto => AlignmentFormat::Auto,
            FormatChoice::Fasta => AlignmentFormat::Fasta,
            FormatChoice::Msf => AlignmentFormat::Msf,
            FormatChoice::Phylip => AlignmentFormat::Phylip,
            FormatChoice::Simple => AlignmentFormat::Simple,
        }
    }
}

/// How residues are labelled before pairing.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeChoice { Companion, Simple }

impl From<ModeChoice> for LabelMode {
    fn from(m: ModeChoice) -> Self {
        match m {
            ModeChoice::Companion => LabelMode::Companion,
            ModeChoice::Simple => LabelMode::Simple,
        }
    }
}

#[path = "msascorer/score_cmd.rs"] mod score_cmd;
#[path = "msascorer/labels_cmd.rs"] mod labels_cmd;

fn setup_logger(verbosity: u8) {
    env_logger::Builder::new()
        .filter_level(match verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logger(cli.verbose);
    match cli.command {
        Command::Score(cmd) => score_cmd::run(cmd),
        Command::Labels(cmd) => labels_cmd::run(cmd),
    }
}
