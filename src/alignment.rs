//! Alignment loading and test/reference validation.
//!
//! Supported layouts (detected automatically unless a format is forced):
//! - **FASTA** with gaps (`>id` header lines, wrapped rows allowed)
//! - **MSF** (GCG; header terminated by `//`, `.` and `~` gaps)
//! - **Phylip**, sequential or interleaved, with relaxed (whitespace separated) names
//! - **simple**: one `id<space>row` per line, `#` comments
//!
//! Rows are uppercased and must be ASCII.
//!
//! ### Example
//! ```rust
//! use msascorer::{parse_alignment, AlignmentFormat, PairedAlignments};
//! let test = parse_alignment(">b\nAC-GT\n>a\nACG-T\n", AlignmentFormat::Auto).unwrap();
//! let reference = parse_alignment("a CG\nb C-\n", AlignmentFormat::Auto).unwrap();
//! let paired = PairedAlignments::new(test, reference).unwrap();
//! assert_eq!(paired.name(0), "a");
//! assert_eq!(paired.reference_width(), 2);
//! ```
//!
use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::common::MsaScoreError;
use crate::score::SequenceRows;

/// One row of an alignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignedSequence {
    /// Sequence name (first word of the header).
    pub id: String,
    /// Aligned row, uppercase, gaps included.
    pub seq: String,
}

/// Input layout of an alignment file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlignmentFormat {
    /// Guess from the content.
    #[default]
    Auto,
    Fasta,
    Msf,
    Phylip,
    Simple,
}

impl fmt::Display for AlignmentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(fmt_name(*self))
    }
}

impl AlignmentFormat {
    /// Guess the layout of `text`. Never returns [`AlignmentFormat::Auto`].
    pub fn detect(text: &str) -> AlignmentFormat {
        let t = text.trim_start();
        if t.starts_with('>') {
            return AlignmentFormat::Fasta;
        }
        let has_sep = text.lines().any(|l| l.trim() == "//");
        if has_sep && (text.contains("MSF:") || text.starts_with("PileUp") || text.contains("!!AA_MULTIPLE_ALIGNMENT") || text.contains("!!NA_MULTIPLE_ALIGNMENT")) {
            return AlignmentFormat::Msf;
        }
        if let Some(first) = t.lines().next() {
            let toks: Vec<&str> = first.split_whitespace().collect();
            if toks.len() == 2 && toks.iter().all(|x| x.parse::<usize>().is_ok()) {
                return AlignmentFormat::Phylip;
            }
        }
        AlignmentFormat::Simple
    }
}

/// Parse alignment text in the given (or detected) format.
///
/// # Errors
/// [`MsaScoreError::Parse`] for malformed input or non-ASCII rows, and
/// [`MsaScoreError::EmptyAlignment`] when no rows are found.
pub fn parse_alignment(text: &str, format: AlignmentFormat) -> Result<Vec<AlignedSequence>, MsaScoreError> {
    let format = match format {
        AlignmentFormat::Auto => AlignmentFormat::detect(text),
        f => f,
    };
    let recs = match format {
        AlignmentFormat::Fasta => parse_fasta(text),
        AlignmentFormat::Msf => parse_msf(text)?,
        AlignmentFormat::Phylip => parse_phylip(text)?,
        AlignmentFormat::Simple | AlignmentFormat::Auto => parse_simple(text),
    };
    if recs.is_empty() {
        return Err(MsaScoreError::EmptyAlignment("no sequences found"));
    }
    if let Some(bad) = recs.iter().find(|r| !r.seq.is_ascii() || !r.id.is_ascii()) {
        return Err(MsaScoreError::Parse { format: fmt_name(format), message: format!("non-ASCII characters in {}", bad.id) });
    }
    log::info!("parsed {} {} rows", recs.len(), format);
    Ok(recs)
}

/// Read and parse an alignment file.
pub fn load_alignment(path: &Path, format: AlignmentFormat) -> Result<Vec<AlignedSequence>, MsaScoreError> {
    let text = std::fs::read_to_string(path).map_err(|source| MsaScoreError::Io { path: path.to_path_buf(), source })?;
    parse_alignment(&text, format)
}

fn fmt_name(format: AlignmentFormat) -> &'static str {
    match format {
        AlignmentFormat::Auto => "auto",
        AlignmentFormat::Fasta => "FASTA",
        AlignmentFormat::Msf => "MSF",
        AlignmentFormat::Phylip => "Phylip",
        AlignmentFormat::Simple => "simple",
    }
}

fn parse_err(format: &'static str, message: impl Into<String>) -> MsaScoreError {
    MsaScoreError::Parse { format, message: message.into() }
}

/// Parse gapped FASTA. Lines starting with `>` open a record; all other
/// lines are appended (whitespace removed) to the current row.
pub fn parse_fasta(text: &str) -> Vec<AlignedSequence> {
    let mut out: Vec<AlignedSequence> = vec![];
    let mut id: Option<String> = None;
    let mut seq = String::new();
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix('>') {
            if let Some(prev) = id.take() {
                out.push(AlignedSequence { id: prev, seq: seq.to_ascii_uppercase() });
                seq.clear();
            }
            id = Some(rest.split_whitespace().next().unwrap_or("").to_string());
        } else if id.is_some() {
            seq.extend(line.chars().filter(|c| !c.is_whitespace()));
        }
    }
    if let Some(prev) = id {
        out.push(AlignedSequence { id: prev, seq: seq.to_ascii_uppercase() });
    }
    out
}

/// Parse the simple `id<space>row` layout. Blank lines and `#` comments are skipped.
fn parse_simple(text: &str) -> Vec<AlignedSequence> {
    let mut out = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        if let Some((id, row)) = line.split_once(char::is_whitespace) {
            let seq: String = row.chars().filter(|c| !c.is_whitespace()).collect();
            out.push(AlignedSequence { id: id.to_string(), seq: seq.to_ascii_uppercase() });
        }
    }
    out
}

/// Parse GCG MSF. Names come from the `Name:` header lines; the block after
/// `//` holds `name chunk chunk ...` lines, possibly interleaved with
/// position rulers.
fn parse_msf(text: &str) -> Result<Vec<AlignedSequence>, MsaScoreError> {
    let mut lines = text.lines();
    let mut order: Vec<String> = Vec::new();
    let mut seen_sep = false;
    for line in lines.by_ref() {
        let t = line.trim();
        if t == "//" {
            seen_sep = true;
            break;
        }
        if let Some(rest) = t.strip_prefix("Name:") {
            if let Some(name) = rest.split_whitespace().next() {
                order.push(name.to_string());
            }
        }
    }
    if !seen_sep {
        return Err(parse_err("MSF", "missing `//` separator"));
    }
    if order.is_empty() {
        return Err(parse_err("MSF", "no `Name:` lines in header"));
    }

    let mut rows: HashMap<&str, String> = order.iter().map(|n| (n.as_str(), String::new())).collect();
    for line in lines {
        let mut toks = line.split_whitespace();
        let Some(name) = toks.next() else { continue };
        // position rulers carry only numbers
        if name.parse::<usize>().is_ok() { continue; }
        let row = rows.get_mut(name).ok_or_else(|| parse_err("MSF", format!("sequence {name} not declared in header")))?;
        for chunk in toks {
            row.extend(chunk.chars().map(|c| if c == '.' || c == '~' { '-' } else { c.to_ascii_uppercase() }));
        }
    }
    Ok(order
        .iter()
        .map(|n| AlignedSequence { id: n.clone(), seq: rows.remove(n.as_str()).unwrap_or_default() })
        .collect())
}

/// Parse Phylip (relaxed names). Interleaved layout is tried first; if the
/// rows do not come out at the declared width, sequential layout is tried.
fn parse_phylip(text: &str) -> Result<Vec<AlignedSequence>, MsaScoreError> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    let header = lines.next().ok_or_else(|| parse_err("Phylip", "empty input"))?;
    let dims: Vec<usize> = header
        .split_whitespace()
        .map(|t| t.parse::<usize>())
        .collect::<Result<_, _>>()
        .map_err(|e| parse_err("Phylip", format!("bad header {header:?}: {e}")))?;
    let (ntax, nchar) = match dims.as_slice() {
        [ntax, nchar] => (*ntax, *nchar),
        _ => return Err(parse_err("Phylip", format!("header must hold two integers, got {header:?}"))),
    };
    let body: Vec<&str> = lines.collect();
    if ntax == 0 || body.len() < ntax {
        return Err(parse_err("Phylip", format!("expected {ntax} sequences, found {} lines", body.len())));
    }

    if let Some(recs) = phylip_interleaved(&body, ntax, nchar) {
        return Ok(recs);
    }
    phylip_sequential(&body, ntax, nchar)
        .ok_or_else(|| parse_err("Phylip", format!("rows do not add up to {ntax} sequences of {nchar} columns")))
}

fn squash(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).map(|c| c.to_ascii_uppercase()).collect()
}

fn split_name(line: &str) -> (String, String) {
    match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name.to_string(), squash(rest)),
        None => (line.to_string(), String::new()),
    }
}

fn phylip_interleaved(body: &[&str], ntax: usize, nchar: usize) -> Option<Vec<AlignedSequence>> {
    let mut recs: Vec<AlignedSequence> = body[..ntax]
        .iter()
        .map(|l| {
            let (id, seq) = split_name(l);
            AlignedSequence { id, seq }
        })
        .collect();
    if (body.len() - ntax) % ntax != 0 {
        return None;
    }
    for (k, line) in body[ntax..].iter().enumerate() {
        recs[k % ntax].seq.push_str(&squash(line));
    }
    recs.iter().all(|r| r.seq.len() == nchar).then_some(recs)
}

fn phylip_sequential(body: &[&str], ntax: usize, nchar: usize) -> Option<Vec<AlignedSequence>> {
    let mut recs = Vec::with_capacity(ntax);
    let mut it = body.iter();
    while recs.len() < ntax {
        let (id, mut seq) = split_name(it.next()?);
        while seq.len() < nchar {
            seq.push_str(&squash(it.next()?));
        }
        if seq.len() != nchar {
            return None;
        }
        recs.push(AlignedSequence { id, seq });
    }
    it.next().is_none().then_some(recs)
}

/// Test and reference alignments, sorted by name and checked against each other.
#[derive(Clone, Debug)]
pub struct PairedAlignments {
    test: Vec<AlignedSequence>,
    reference: Vec<AlignedSequence>,
}

impl PairedAlignments {
    /// Sort both collections by name and check that they can be scored:
    /// non-empty, same size, unique and matching names, rectangular, and a
    /// reference no wider than the test.
    pub fn new(mut test: Vec<AlignedSequence>, mut reference: Vec<AlignedSequence>) -> Result<Self, MsaScoreError> {
        test.sort_by(|a, b| a.id.cmp(&b.id));
        reference.sort_by(|a, b| a.id.cmp(&b.id));

        if test.is_empty() { return Err(MsaScoreError::EmptyAlignment("test MSA has no sequences")); }
        if reference.is_empty() { return Err(MsaScoreError::EmptyAlignment("reference MSA has no sequences")); }
        if test.len() != reference.len() {
            return Err(MsaScoreError::SequenceCountMismatch { test: test.len(), reference: reference.len() });
        }
        check_unique("test", &test)?;
        check_unique("reference", &reference)?;
        if let Some((t, r)) = test.iter().zip(&reference).find(|(t, r)| t.id != r.id) {
            return Err(MsaScoreError::NameMismatch { test: t.id.clone(), reference: r.id.clone() });
        }
        let test_width = check_width("test", &test)?;
        let ref_width = check_width("reference", &reference)?;
        if ref_width > test_width {
            return Err(MsaScoreError::ReferenceWider { test: test_width, reference: ref_width });
        }
        log::info!("{} sequences; test width {}, reference width {}", test.len(), test_width, ref_width);
        Ok(Self { test, reference })
    }

    /// Number of sequences.
    pub fn len(&self) -> usize {
        self.test.len()
    }

    /// `true` when there are no sequences; never the case after [`PairedAlignments::new`].
    pub fn is_empty(&self) -> bool {
        self.test.is_empty()
    }

    /// Number of columns in the test alignment.
    pub fn test_width(&self) -> usize {
        self.test[0].seq.len()
    }

    /// Number of columns in the reference alignment.
    pub fn reference_width(&self) -> usize {
        self.reference[0].seq.len()
    }

    /// Name of sequence `i` (sorted order).
    pub fn name(&self, i: usize) -> &str {
        &self.test[i].id
    }

    /// Index of the sequence called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.test.binary_search_by(|s| s.id.as_str().cmp(name)).ok()
    }

    /// Test and reference rows of sequence `i`.
    pub fn rows(&self, i: usize) -> SequenceRows<'_> {
        SequenceRows { test: &self.test[i].seq, reference: &self.reference[i].seq }
    }
}

fn check_unique(alignment: &'static str, seqs: &[AlignedSequence]) -> Result<(), MsaScoreError> {
    let mut seen = HashSet::new();
    for s in seqs {
        if !seen.insert(s.id.as_str()) {
            return Err(MsaScoreError::DuplicateName { alignment, name: s.id.clone() });
        }
    }
    Ok(())
}

fn check_width(alignment: &'static str, seqs: &[AlignedSequence]) -> Result<usize, MsaScoreError> {
    let expected = seqs[0].seq.len();
    match seqs.iter().find(|s| s.seq.len() != expected) {
        Some(s) => Err(MsaScoreError::UnevenLength { alignment, name: s.id.clone(), expected, found: s.seq.len() }),
        None => Ok(expected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn seq(id: &str, s: &str) -> AlignedSequence {
        AlignedSequence { id: id.into(), seq: s.into() }
    }

    #[test]
    fn fasta_wrapped_and_uppercased() {
        let recs = parse_alignment(">s1 desc\nac-\ngt\n>s2\nACG-T\n", AlignmentFormat::Auto).unwrap();
        assert_eq!(recs, vec![seq("s1", "AC-GT"), seq("s2", "ACG-T")]);
    }

    #[test]
    fn simple_layout_skips_comments() {
        let recs = parse_alignment("# header\na A-CG\n\nb ATCG\n", AlignmentFormat::Auto).unwrap();
        assert_eq!(recs, vec![seq("a", "A-CG"), seq("b", "ATCG")]);
    }

    #[test]
    fn msf_with_ruler_and_dot_gaps() {
        let text = "\
PileUp

 MSF: 8  Type: P  Check: 1234  ..

 Name: alpha  Len: 8  Check: 1  Weight: 1.00
 Name: beta   Len: 8  Check: 2  Weight: 1.00

//

           1                   8
alpha      MKV.. LA~
beta       MK.VL LA.
";
        assert_eq!(AlignmentFormat::detect(text), AlignmentFormat::Msf);
        let recs = parse_alignment(text, AlignmentFormat::Auto).unwrap();
        assert_eq!(recs, vec![seq("alpha", "MKV--LA-"), seq("beta", "MK-VLLA-")]);
    }

    #[test]
    fn msf_rejects_undeclared_name() {
        let text = " MSF: 4\n Name: a Len: 4\n//\nb ACGT\n";
        assert!(matches!(parse_alignment(text, AlignmentFormat::Msf), Err(MsaScoreError::Parse { .. })));
    }

    #[test]
    fn phylip_sequential_and_interleaved() {
        let seqtext = "2 6\nfoo ACG-TT\nbar AC\nGGTT\n";
        assert_eq!(AlignmentFormat::detect(seqtext), AlignmentFormat::Phylip);
        let recs = parse_alignment(seqtext, AlignmentFormat::Auto).unwrap();
        assert_eq!(recs, vec![seq("foo", "ACG-TT"), seq("bar", "ACGGTT")]);

        let inter = " 2 8\nfoo ACG-\nbar ACGG\n\nTTAA\nTT-A\n";
        let recs = parse_alignment(inter, AlignmentFormat::Auto).unwrap();
        assert_eq!(recs, vec![seq("foo", "ACG-TTAA"), seq("bar", "ACGGTT-A")]);
    }

    #[test]
    fn phylip_wrong_width_is_an_error() {
        let text = "2 5\nfoo ACG\nbar ACGTT\n";
        assert!(matches!(parse_alignment(text, AlignmentFormat::Phylip), Err(MsaScoreError::Parse { .. })));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(parse_alignment("", AlignmentFormat::Auto), Err(MsaScoreError::EmptyAlignment(_))));
    }

    #[test]
    fn load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, ">x\nAC-\n>y\nA-C\n").unwrap();
        let recs = load_alignment(f.path(), AlignmentFormat::Fasta).unwrap();
        assert_eq!(recs.len(), 2);
        let missing = load_alignment(Path::new("/nonexistent/aln.fa"), AlignmentFormat::Auto);
        assert!(matches!(missing, Err(MsaScoreError::Io { .. })));
    }

    #[test]
    fn pairing_sorts_and_validates() {
        let p = PairedAlignments::new(
            vec![seq("b", "AC-GT"), seq("a", "ACG-T")],
            vec![seq("b", "CG"), seq("a", "CG")],
        )
        .unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.name(0), "a");
        assert_eq!(p.rows(1).test, "AC-GT");
        assert_eq!(p.position("b"), Some(1));
        assert_eq!((p.test_width(), p.reference_width()), (5, 2));
    }

    #[test]
    fn pairing_errors() {
        let t = || vec![seq("a", "ACGT"), seq("b", "AC-T")];
        assert!(matches!(
            PairedAlignments::new(t(), vec![seq("a", "AC")]),
            Err(MsaScoreError::SequenceCountMismatch { test: 2, reference: 1 })
        ));
        assert!(matches!(
            PairedAlignments::new(t(), vec![seq("a", "AC"), seq("c", "AC")]),
            Err(MsaScoreError::NameMismatch { .. })
        ));
        assert!(matches!(
            PairedAlignments::new(t(), vec![seq("a", "AC"), seq("b", "A")]),
            Err(MsaScoreError::UnevenLength { alignment: "reference", .. })
        ));
        assert!(matches!(
            PairedAlignments::new(t(), vec![seq("a", "ACGTA"), seq("b", "ACGTA")]),
            Err(MsaScoreError::ReferenceWider { test: 4, reference: 5 })
        ));
        assert!(matches!(
            PairedAlignments::new(vec![seq("a", "AC"), seq("a", "AC")], vec![seq("a", "AC"), seq("a", "AC")]),
            Err(MsaScoreError::DuplicateName { alignment: "test", .. })
        ));
        assert!(matches!(PairedAlignments::new(vec![], vec![]), Err(MsaScoreError::EmptyAlignment(_))));
    }
}
