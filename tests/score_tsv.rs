use std::fs;

use tempfile::TempDir;

use flare_trigger_sweep::io::score_tsv::{read_score_tsv, write_score_tsv};
use flare_trigger_sweep::scores::{ConfusionCounts, ScoreRow, ScoreTable};
use flare_trigger_sweep::sweep::{AcceptanceRule, merge_tables, partition};

fn row(thresholds: Vec<f64>, precision: f64, recall: f64, ratio: f64) -> ScoreRow {
    ScoreRow {
        thresholds,
        counts: ConfusionCounts {
            tn: 10,
            tn_cancelled: 1,
            tp: 3,
            tp_noc5_observed: 1,
            fn_: 2,
            fn_cancelled: 1,
            fp_c5_not_observed: 2,
            fp_noc5_not_observed: 4,
        },
        precision,
        recall,
        trigger_to_launch: ratio,
    }
}

fn table(rows: Vec<ScoreRow>) -> ScoreTable {
    let mut t = ScoreTable::new(
        vec!["xrsb".to_string(), "1minxrsa".to_string()],
        vec!["W/m^2".to_string(), "W/m^2".to_string()],
    );
    t.rows = rows;
    t
}

#[test]
fn score_table_round_trip_with_nan() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("AllParameterScores.tsv");
    let t = table(vec![
        row(vec![1e-6, 2e-8], 0.4, 0.8, 0.9),
        row(vec![5e-6, 2e-8], f64::NAN, 0.0, f64::NAN),
    ]);
    write_score_tsv(&path, &t).unwrap();

    let back = read_score_tsv(&path).unwrap();
    assert_eq!(back.keys, t.keys);
    assert_eq!(back.units, t.units);
    assert_eq!(back.rows.len(), 2);
    assert_eq!(back.rows[0], t.rows[0]);
    assert_eq!(back.rows[1].counts, t.rows[1].counts);
    assert!(back.rows[1].precision.is_nan());
    assert!(back.rows[1].trigger_to_launch.is_nan());

    let header = fs::read_to_string(&path).unwrap();
    assert!(header.starts_with("xrsb\t1minxrsa\txrsb_units\t1minxrsa_units\tTN\t"));
}

#[test]
fn partition_is_strict_and_sorted_by_precision() {
    let t = table(vec![
        row(vec![1.0, 1.0], 0.2, 0.9, 0.9),
        row(vec![2.0, 1.0], f64::NAN, 0.9, 0.9),
        row(vec![3.0, 1.0], 0.7, 0.9, 0.9),
        row(vec![4.0, 1.0], 0.9, 0.4, 0.9),
        row(vec![5.0, 1.0], 0.9, 0.9, f64::NAN),
    ]);
    let (accepted, rejected) = partition(&t, &AcceptanceRule::default());
    assert_eq!(accepted.len() + rejected.len(), t.len());

    let accepted_first: Vec<f64> = accepted.rows.iter().map(|r| r.thresholds[0]).collect();
    assert_eq!(accepted_first, vec![3.0, 1.0, 2.0]);
    let rejected_first: Vec<f64> = rejected.rows.iter().map(|r| r.thresholds[0]).collect();
    assert_eq!(rejected_first, vec![4.0, 5.0]);
}

#[test]
fn merge_concatenates_and_sorts_by_thresholds() {
    let a = table(vec![row(vec![5e-6, 1e-8], 0.5, 0.5, 0.5)]);
    let b = table(vec![
        row(vec![1e-6, 2e-8], 0.5, 0.5, 0.5),
        row(vec![1e-6, 1e-8], 0.5, 0.5, 0.5),
    ]);
    let merged = merge_tables(vec![a, b]).unwrap();
    let order: Vec<Vec<f64>> = merged.rows.iter().map(|r| r.thresholds.clone()).collect();
    assert_eq!(
        order,
        vec![vec![1e-6, 1e-8], vec![1e-6, 2e-8], vec![5e-6, 1e-8]]
    );
}

#[test]
fn merge_rejects_different_signals() {
    let a = table(Vec::new());
    let mut b = table(Vec::new());
    b.keys = vec!["xrsa".to_string(), "1minxrsa".to_string()];
    assert!(merge_tables(vec![a, b]).is_err());
    assert!(merge_tables(Vec::new()).is_err());
}

#[test]
fn malformed_score_table_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.tsv");
    fs::write(&path, "xrsb\tTN\n1e-6\t3\n").unwrap();
    assert!(read_score_tsv(&path).is_err());
}
