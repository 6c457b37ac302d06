use std::path::PathBuf;

use flare_trigger_sweep::ctx::Ctx;
use flare_trigger_sweep::io::summary::format_summary;
use flare_trigger_sweep::schema::v1::Mode;
use flare_trigger_sweep::scores::{ConfusionCounts, ScoreRow, ScoreTable};
use flare_trigger_sweep::sweep::{AcceptanceRule, partition};

fn row(threshold: f64, precision: f64, recall: f64, ratio: f64) -> ScoreRow {
    ScoreRow {
        thresholds: vec![threshold],
        counts: ConfusionCounts::default(),
        precision,
        recall,
        trigger_to_launch: ratio,
    }
}

#[test]
fn summary_format() {
    let mut ctx = Ctx::new(
        Mode::Merge,
        PathBuf::from("out"),
        AcceptanceRule::default(),
        "0.0.0-test",
    );
    ctx.merge_inputs = vec![PathBuf::from("a.tsv"), PathBuf::from("b.tsv")];
    let mut table = ScoreTable::new(vec!["xrsb".to_string()], vec!["W/m^2".to_string()]);
    table.rows = vec![
        row(1e-6, 0.5, 0.8, 0.9),
        row(5e-6, 0.75, 0.6, 0.7),
        row(7.5e-6, f64::NAN, 0.0, 0.1),
    ];
    let (accepted, rejected) = partition(&table, &ctx.acceptance);
    ctx.scores = Some(table);
    ctx.accepted = Some(accepted);
    ctx.rejected = Some(rejected);

    let s = format_summary(&ctx).unwrap();
    assert!(s.contains("flare-trigger-sweep v"));
    assert!(s.contains("Merged: 2 score tables"));
    assert!(s.contains("Signals: xrsb"));
    assert!(s.contains("Grid points: 3"));
    assert!(s.contains("Acceptable: 2"));
    assert!(s.contains("rejected: 1"));
    assert!(s.contains("Best: 5e-6 precision=0.7500"));
}

#[test]
fn summary_without_acceptable_rows() {
    let mut ctx = Ctx::new(
        Mode::Merge,
        PathBuf::from("out"),
        AcceptanceRule::default(),
        "0.0.0-test",
    );
    let table = ScoreTable::new(vec!["xrsb".to_string()], vec![String::new()]);
    ctx.accepted = Some(table.clone());
    ctx.rejected = Some(table.clone());
    ctx.scores = Some(table);

    let s = format_summary(&ctx).unwrap();
    assert!(s.contains("Best: none"));
}
