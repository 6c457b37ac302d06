use anyhow::{Result, bail};
use tracing::info;

use crate::ctx::Ctx;
use crate::io::score_tsv::read_score_tsv;
use crate::pipeline::Stage;
use crate::sweep::merge_tables;

pub struct Stage4Merge;

impl Stage4Merge {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Merge {
    fn name(&self) -> &'static str {
        "stage4_merge"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        if ctx.merge_inputs.is_empty() {
            bail!("merge needs at least one --input score table");
        }
        let tables = ctx
            .merge_inputs
            .iter()
            .map(|p| read_score_tsv(p))
            .collect::<Result<Vec<_>>>()?;
        let merged = merge_tables(tables)?;
        info!(
            inputs = ctx.merge_inputs.len(),
            rows = merged.len(),
            "score_tables_merged"
        );
        ctx.scores = Some(merged);
        Ok(())
    }
}
