use std::fs;
use std::path::Path;

use assert_cmd::Command;
use serde_json::{Value, json};
use tempfile::TempDir;

use flare_trigger_sweep::io::launch_tsv::read_launch_tsv;
use flare_trigger_sweep::io::score_tsv::read_score_tsv;

const LEN: usize = 20;

fn flare(id: &str, above_c5: bool, bright: bool, cancel: bool) -> Value {
    let xrsb: Vec<f64> = (0..LEN)
        .map(|i| if bright && i >= 2 { 1e-5 } else { 1e-7 })
        .collect();
    let xrsa: Vec<f64> = (0..LEN)
        .map(|i| {
            if cancel {
                1e-6 - 1e-8 * i as f64
            } else {
                1e-7 + 1e-8 * i as f64
            }
        })
        .collect();
    let (class, peak_flux) = if above_c5 { ("M2.0", 2e-5) } else { ("C3.0", 3e-6) };
    let time: Vec<String> = (0..LEN)
        .map(|i| format!("2014-01-01T00:{:02}:00", i))
        .collect();
    json!({
        "flare_id": id,
        "peak_time": format!("{}-peak", id),
        "class": class,
        "peak_flux": peak_flux,
        "background_flux": 1e-7,
        "start_to_peak_minutes": 8.0,
        "above_c5": above_c5,
        "above_c5_10min": above_c5,
        "time": time,
        "xrsa": xrsa,
        "xrsb": xrsb,
    })
}

fn write_catalog(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("catalog.json");
    let catalog = json!({ "flares": [
        flare("a", true, true, false),
        flare("b", false, false, false),
        flare("c", true, true, true),
        flare("d", false, false, false),
    ] });
    fs::write(&path, serde_json::to_string(&catalog).unwrap()).unwrap();
    path
}

#[test]
fn sweep_writes_tables_and_report() {
    let tmp = TempDir::new().unwrap();
    let catalog = write_catalog(tmp.path());
    let out = tmp.path().join("out");

    let mut cmd = Command::cargo_bin("flare-trigger-sweep").unwrap();
    cmd.arg("sweep")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--out")
        .arg(&out)
        .arg("--param")
        .arg("xrsb=1e-6,5e-5")
        .arg("--threads")
        .arg("2")
        .arg("--json");
    cmd.assert().success();

    let all = read_score_tsv(&out.join("AllParameterScores.tsv")).unwrap();
    assert_eq!(all.keys, vec!["xrsb"]);
    assert_eq!(all.rows.len(), 2);
    let low = &all.rows[0];
    assert_eq!(low.thresholds, vec![1e-6]);
    assert_eq!(low.counts.tp, 1);
    assert_eq!(low.counts.fn_cancelled, 1);
    assert_eq!(low.counts.tn, 2);
    assert_eq!(low.recall, 0.5);

    let acceptable = read_score_tsv(&out.join("AcceptableParams.tsv")).unwrap();
    let rejected = read_score_tsv(&out.join("RejectedParams.tsv")).unwrap();
    assert_eq!(acceptable.rows.len(), 1);
    assert_eq!(rejected.rows.len(), 1);
    assert_eq!(acceptable.rows[0].thresholds, vec![1e-6]);

    let launches = read_launch_tsv(&out.join("Launches").join("1e-6_results.tsv")).unwrap();
    assert_eq!(launches.records.len(), 2);
    assert_eq!(launches.records[0].flare_id, "a");
    let none = read_launch_tsv(&out.join("Launches").join("5e-5_results.tsv")).unwrap();
    assert!(none.records.is_empty());
    assert_eq!(none.thresholds, vec![5e-5]);

    let report: Value =
        serde_json::from_str(&fs::read_to_string(out.join("sweep_report.json")).unwrap()).unwrap();
    assert_eq!(report["tool"], "flare-trigger-sweep");
    assert_eq!(report["catalog"]["flares"], 4);
    assert_eq!(report["grid_points"], 2);
    assert_eq!(report["partition"]["acceptable"], 1);
    assert_eq!(report["best"]["counts"]["TP"], 1);
    assert_eq!(report["timing"]["prep_minutes"], 4);
    assert_eq!(report["artifacts"]["launches_dir"], "Launches");
    assert_eq!(report["artifacts"]["all_scores"], "AllParameterScores.tsv");
    assert_eq!(report["artifacts"]["rejected"], "RejectedParams.tsv");
}

#[test]
fn sweep_without_launch_tables() {
    let tmp = TempDir::new().unwrap();
    let catalog = write_catalog(tmp.path());
    let out = tmp.path().join("out");

    let mut cmd = Command::cargo_bin("flare-trigger-sweep").unwrap();
    cmd.arg("sweep")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--out")
        .arg(&out)
        .arg("--param")
        .arg("xrsb=1e-6")
        .arg("--no-launches");
    cmd.assert().success();

    assert!(out.join("AllParameterScores.tsv").exists());
    assert!(!out.join("Launches").exists());
    assert!(!out.join("sweep_report.json").exists());
}

#[test]
fn merge_recombines_partial_tables() {
    let tmp = TempDir::new().unwrap();
    let catalog = write_catalog(tmp.path());
    let mut inputs = Vec::new();
    for (name, values) in [("job1", "xrsb=5e-5"), ("job2", "xrsb=1e-6")] {
        let out = tmp.path().join(name);
        let mut cmd = Command::cargo_bin("flare-trigger-sweep").unwrap();
        cmd.arg("sweep")
            .arg("--catalog")
            .arg(&catalog)
            .arg("--out")
            .arg(&out)
            .arg("--param")
            .arg(values)
            .arg("--no-launches");
        cmd.assert().success();
        inputs.push(out.join("AllParameterScores.tsv"));
    }

    let merged_dir = tmp.path().join("merged");
    let mut cmd = Command::cargo_bin("flare-trigger-sweep").unwrap();
    cmd.arg("merge")
        .arg("--input")
        .args(&inputs)
        .arg("--out")
        .arg(&merged_dir);
    cmd.assert().success();

    let merged = read_score_tsv(&merged_dir.join("AllParameterScores.tsv")).unwrap();
    let order: Vec<f64> = merged.rows.iter().map(|r| r.thresholds[0]).collect();
    assert_eq!(order, vec![1e-6, 5e-5]);
    let acceptable = read_score_tsv(&merged_dir.join("AcceptableParams.tsv")).unwrap();
    assert_eq!(acceptable.rows.len(), 1);
}

#[test]
fn bad_catalog_exits_nonzero() {
    let tmp = TempDir::new().unwrap();
    let catalog = tmp.path().join("catalog.json");
    fs::write(&catalog, "{ not json").unwrap();

    let mut cmd = Command::cargo_bin("flare-trigger-sweep").unwrap();
    cmd.arg("sweep")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--out")
        .arg(tmp.path().join("out"))
        .arg("--param")
        .arg("xrsb");
    cmd.assert().failure();
}

#[test]
fn repeated_threshold_exits_nonzero() {
    let tmp = TempDir::new().unwrap();
    let catalog = write_catalog(tmp.path());
    let out = tmp.path().join("out");

    let mut cmd = Command::cargo_bin("flare-trigger-sweep").unwrap();
    cmd.arg("sweep")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--out")
        .arg(&out)
        .arg("--threads")
        .arg("2")
        .arg("--param")
        .arg("xrsb=1e-6,0.000001");
    cmd.assert().failure();
    assert!(!out.join("AllParameterScores.tsv").exists());
}

#[test]
fn unknown_signal_column_exits_nonzero() {
    let tmp = TempDir::new().unwrap();
    let catalog = write_catalog(tmp.path());

    let mut cmd = Command::cargo_bin("flare-trigger-sweep").unwrap();
    cmd.arg("sweep")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--out")
        .arg(tmp.path().join("out"))
        .arg("--param")
        .arg("temp");
    cmd.assert().failure();
}

#[test]
fn validate_command_ok() {
    let tmp = TempDir::new().unwrap();
    let catalog = write_catalog(tmp.path());

    let mut cmd = Command::cargo_bin("flare-trigger-sweep").unwrap();
    cmd.arg("validate")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--param")
        .arg("xrsa");
    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.contains("validate ok"));
    assert!(stdout.contains("flares: 4"));
}

#[test]
fn signals_show_lists_builtin() {
    let mut cmd = Command::cargo_bin("flare-trigger-sweep").unwrap();
    cmd.arg("signals").arg("show");
    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.contains("signals (version v1):"));
    assert!(stdout.contains("xrsb\txrsb\tW/m^2"));
}
