use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::sweep::{SweepConfig, sweep};

pub struct Stage4Sweep;

impl Stage4Sweep {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Sweep {
    fn name(&self) -> &'static str {
        "stage4_sweep"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let catalog = ctx.catalog.as_ref().context("catalog not loaded")?;
        let grid = ctx.grid.as_ref().context("threshold grid missing")?;
        let config = SweepConfig {
            trigger: ctx.trigger,
            threads: ctx.threads,
            launches_dir: ctx.launches_dir(),
        };
        let table = sweep(catalog, &ctx.selection, grid, &config)?;
        info!(rows = table.len(), "scores_ready");
        ctx.scores = Some(table);
        Ok(())
    }
}
