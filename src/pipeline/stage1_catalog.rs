use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::catalog::{load_catalog, load_derived};
use crate::ctx::Ctx;
use crate::pipeline::Stage;

pub struct Stage1Catalog;

impl Stage1Catalog {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Catalog {
    fn name(&self) -> &'static str {
        "stage1_catalog"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let path = ctx.catalog_path.as_ref().context("catalog path missing")?;
        let mut catalog = load_catalog(path)?;

        if let Some(derived_path) = &ctx.derived_path {
            let rows = load_derived(derived_path)?;
            let joined = rows.len();
            catalog
                .attach_derived(rows)
                .with_context(|| format!("failed to join {}", derived_path.display()))?;
            info!(flares = joined, "derived_signals_joined");
        }

        if catalog.is_empty() {
            warn!("catalog has no flares");
            ctx.warnings.push("catalog has no flares".to_string());
        }
        let short = catalog.flares().iter().filter(|f| f.is_empty()).count();
        if short > 0 {
            ctx.warnings
                .push(format!("{} flares have an empty time series", short));
        }

        info!(
            flares = catalog.len(),
            above_c5 = catalog.above_c5_count(),
            "catalog_loaded"
        );
        ctx.catalog = Some(catalog);
        Ok(())
    }
}
