use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::schema::v1::Mode;
use crate::sweep::threshold_key;

pub fn format_summary(ctx: &Ctx) -> Result<String> {
    let version = env!("CARGO_PKG_VERSION");
    let scores = ctx.scores.as_ref().context("score table missing")?;
    let accepted = ctx.accepted.as_ref().context("acceptable partition missing")?;
    let rejected = ctx.rejected.as_ref().context("rejected partition missing")?;

    let mut out = String::new();
    out.push_str(&format!("flare-trigger-sweep v{}\n", version));
    match (ctx.mode, &ctx.catalog) {
        (Mode::Sweep, Some(catalog)) => out.push_str(&format!(
            "Catalog: {} flares, {} above C5\n",
            catalog.len(),
            catalog.above_c5_count()
        )),
        _ => out.push_str(&format!("Merged: {} score tables\n", ctx.merge_inputs.len())),
    }
    out.push_str(&format!("Signals: {}\n", scores.keys.join(", ")));
    out.push_str(&format!("Grid points: {}\n", scores.len()));
    out.push_str(&format!(
        "Acceptable: {} (recall > {}, ratio > {}), rejected: {}\n",
        accepted.len(),
        ctx.acceptance.min_recall,
        ctx.acceptance.min_ratio,
        rejected.len()
    ));

    match accepted.rows.first() {
        Some(best) => out.push_str(&format!(
            "Best: {} precision={:.4} recall={:.4} ratio={:.4}\n",
            threshold_key(&best.thresholds),
            best.precision,
            best.recall,
            best.trigger_to_launch
        )),
        None => out.push_str("Best: none\n"),
    }

    Ok(out)
}
