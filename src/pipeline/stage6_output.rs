use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::io::{json_writer, score_tsv};
use crate::pipeline::Stage;

pub struct Stage6Output;

impl Stage6Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage6Output {
    fn name(&self) -> &'static str {
        "stage6_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let scores = ctx.scores.as_ref().context("score table missing")?;
        let accepted = ctx.accepted.as_ref().context("acceptable partition missing")?;
        let rejected = ctx.rejected.as_ref().context("rejected partition missing")?;

        score_tsv::write_score_tsv(&ctx.output.all_scores_path, scores)?;
        score_tsv::write_score_tsv(&ctx.output.acceptable_path, accepted)?;
        score_tsv::write_score_tsv(&ctx.output.rejected_path, rejected)?;

        let report = json_writer::build_report(ctx)?;
        ctx.report = report;
        if ctx.write_json {
            json_writer::write_json(&ctx.output.json_path, ctx)?;
        }

        info!(out_dir = %ctx.output.out_dir.display(), "stage6_output_ready");
        Ok(())
    }
}
