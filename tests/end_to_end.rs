use std::io::Write;

use msascorer::*;

fn write_tmp(text: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(text.as_bytes()).unwrap();
    f
}

fn score_text(test: &str, reference: &str, mode: LabelMode) -> Result<ScoreSummary, MsaScoreError> {
    let t = write_tmp(test);
    let r = write_tmp(reference);
    let paired = PairedAlignments::new(
        load_alignment(t.path(), AlignmentFormat::Auto)?,
        load_alignment(r.path(), AlignmentFormat::Auto)?,
    )?;
    score_alignments(&paired, &ScoreOptions { mode })
}

#[test]
fn trimmed_reference_scenario() {
    // reference covers residues CDE only; D faces a gap in both reference rows,
    // so the test's D~D pair is a false positive
    let test = ">a\nACDE-FG\n>b\nACDEFG-\n";
    let reference = ">a\nCD-E\n>b\nC-DE\n";
    let s = score_text(test, reference, LabelMode::Companion).unwrap();
    assert_eq!(s.comparisons(), 1);
    assert_eq!(s.total, Score { true_pos: 2, false_pos: 1, false_neg: 0, total_ref: 2, total_test: 3 });
}

#[test]
fn formats_can_differ_between_inputs() {
    let test = "3 8\nx MKV-LAGG\ny MK-VLAGG\nz -MKVLAGG\n";
    let reference = "# trimmed reference\nx KV-LA\ny K-VLA\nz KVLA-\n";
    let s = score_text(test, reference, LabelMode::Companion).unwrap();
    assert_eq!(s.comparisons(), 3);
    let t = s.total;
    assert_eq!(t.false_neg, t.total_ref - t.true_pos);
    assert_eq!(t.false_pos, t.total_test - t.true_pos);
}

#[test]
fn comparisons_grow_quadratically() {
    for n in 1..7usize {
        let rows: String = (0..n).map(|i| format!(">s{i}\nACGT\n")).collect();
        let s = score_text(&rows, &rows, LabelMode::Companion).unwrap();
        assert_eq!(s.comparisons(), n * (n - 1) / 2);
        assert_eq!(s.total.total_ref, 4 * n * (n - 1) / 2);
        assert_eq!(s.total.true_pos, s.total.total_ref);
    }
}

#[test]
fn unrelated_reference_aborts_without_score() {
    let test = ">a\nACDE\n>b\nACDE\n";
    let reference = ">a\nWW\n>b\nCD\n";
    let err = score_text(test, reference, LabelMode::Companion).unwrap_err();
    assert!(matches!(err, MsaScoreError::AlignmentMismatch { .. }));
    assert!(err.to_string().contains("not a valid subset"));
}

#[test]
fn report_for_identical_alignments() {
    let aln = ">a\nAC-GT\n>b\nA-CGT\n>c\nACG-T\n";
    let s = score_text(aln, aln, LabelMode::Simple).unwrap();
    let header = ReportHeader {
        test_name: "t".into(),
        test_seqs: 3,
        test_width: 5,
        ref_name: "r".into(),
        ref_seqs: 3,
        ref_width: 5,
    };
    let mut buf = Vec::new();
    write_report(&mut buf, &header, &s.total).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let values: Vec<usize> = text.lines().nth(2).unwrap().split_whitespace().map(|v| v.parse().unwrap()).collect();
    assert_eq!(values[1], 0);
    assert_eq!(values[2], 0);
    assert_eq!(values[0], values[3]);
}
