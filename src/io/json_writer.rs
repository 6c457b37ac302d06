use std::path::Path;

use anyhow::{Context, Result};

use crate::ctx::{ACCEPTABLE_FILE, ALL_SCORES_FILE, Ctx, LAUNCHES_DIR, REJECTED_FILE};
use crate::schema::v1::{
    Artifacts, BestRow, CatalogMeta, CountsV1, PartitionCounts, SignalEntry, SweepReportV1,
    TimingMeta,
};
use crate::scores::{ConfusionCounts, ScoreRow};
use crate::trigger::TriggerConfig;

pub fn build_report(ctx: &Ctx) -> Result<SweepReportV1> {
    let scores = ctx.scores.as_ref().context("score table missing")?;
    let accepted = ctx.accepted.as_ref().context("acceptable partition missing")?;
    let rejected = ctx.rejected.as_ref().context("rejected partition missing")?;

    let catalog = match &ctx.catalog {
        Some(c) => CatalogMeta {
            flares: Some(c.len() as u64),
            above_c5: Some(c.above_c5_count() as u64),
            derived_joined: ctx.derived_path.is_some(),
        },
        None => CatalogMeta::default(),
    };

    let signals = if ctx.selection.is_empty() {
        scores
            .keys
            .iter()
            .zip(&scores.units)
            .map(|(key, units)| SignalEntry {
                key: key.clone(),
                column: None,
                units: units.clone(),
                candidates: None,
            })
            .collect()
    } else {
        ctx.selection
            .iter()
            .map(|s| SignalEntry {
                key: s.key.clone(),
                column: Some(s.column.clone()),
                units: s.units.clone(),
                candidates: Some(s.values.len() as u64),
            })
            .collect()
    };

    let timing = ctx.catalog.as_ref().map(|_| timing_meta(&ctx.trigger));

    let artifacts = Artifacts {
        all_scores: ALL_SCORES_FILE.to_string(),
        acceptable: ACCEPTABLE_FILE.to_string(),
        rejected: REJECTED_FILE.to_string(),
        launches_dir: ctx.launches_dir().map(|_| LAUNCHES_DIR.to_string()),
    };

    Ok(SweepReportV1 {
        catalog,
        signals,
        timing,
        grid_points: scores.len() as u64,
        partition: PartitionCounts {
            acceptable: accepted.len() as u64,
            rejected: rejected.len() as u64,
        },
        best: accepted.rows.first().map(best_row),
        artifacts,
        ..ctx.report.clone()
    })
}

pub fn write_json(path: &Path, ctx: &Ctx) -> Result<()> {
    let report = build_report(ctx)?;
    crate::io::write_json(path, &report)
}

fn timing_meta(config: &TriggerConfig) -> TimingMeta {
    let t = &config.timing;
    TimingMeta {
        latency_minutes: t.latency as u64,
        prep_minutes: t.prep as u64,
        launch_minutes: t.launch as u64,
        foxsi_duration_minutes: t.foxsi_duration as u64,
        hic_delay_minutes: t.hic_delay as u64,
        hic_duration_minutes: t.hic_duration as u64,
        cancel_lookahead_minutes: t.cancel_lookahead as u64,
        single_comparator: config.single_comparator.symbol().to_string(),
        joint_comparator: config.joint_comparator.symbol().to_string(),
    }
}

fn best_row(row: &ScoreRow) -> BestRow {
    BestRow {
        thresholds: row.thresholds.clone(),
        precision: finite(row.precision),
        recall: finite(row.recall),
        trigger_to_launch: finite(row.trigger_to_launch),
        counts: counts_v1(&row.counts),
    }
}

fn counts_v1(c: &ConfusionCounts) -> CountsV1 {
    CountsV1 {
        tn: c.tn as u64,
        tn_cancelled: c.tn_cancelled as u64,
        tp: c.tp as u64,
        tp_noc5_observed: c.tp_noc5_observed as u64,
        fn_: c.fn_ as u64,
        fn_cancelled: c.fn_cancelled as u64,
        fp_c5_not_observed: c.fp_c5_not_observed as u64,
        fp_noc5_not_observed: c.fp_noc5_not_observed as u64,
    }
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}
