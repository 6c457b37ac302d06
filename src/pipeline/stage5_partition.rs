use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::sweep::partition;

pub struct Stage5Partition;

impl Stage5Partition {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage5Partition {
    fn name(&self) -> &'static str {
        "stage5_partition"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let scores = ctx.scores.as_ref().context("score table missing")?;
        let (accepted, rejected) = partition(scores, &ctx.acceptance);
        info!(
            acceptable = accepted.len(),
            rejected = rejected.len(),
            min_recall = ctx.acceptance.min_recall,
            min_ratio = ctx.acceptance.min_ratio,
            "partition_ready"
        );
        ctx.accepted = Some(accepted);
        ctx.rejected = Some(rejected);
        Ok(())
    }
}
