use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::sweep::ThresholdGrid;

pub struct Stage3Grid;

impl Stage3Grid {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Grid {
    fn name(&self) -> &'static str {
        "stage3_grid"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let keys = ctx.selection.iter().map(|s| s.key.clone()).collect();
        let axes = ctx.selection.iter().map(|s| s.values.clone()).collect();
        let grid = ThresholdGrid::new(keys, axes)?;
        info!(points = grid.len(), dims = grid.axes.len(), "grid_ready");
        ctx.grid = Some(grid);
        Ok(())
    }
}
