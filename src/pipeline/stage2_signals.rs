use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::signals::{load_registry, resolve_selection};

pub struct Stage2Signals;

impl Stage2Signals {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Signals {
    fn name(&self) -> &'static str {
        "stage2_signals"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let registry = load_registry(ctx.signals_path.as_deref())?;
        if ctx.params.is_empty() {
            ctx.registry = Some(registry);
            return Ok(());
        }

        let selection = resolve_selection(&registry, &ctx.params)?;
        let catalog = ctx.catalog.as_ref().context("catalog not loaded")?;
        for signal in &selection {
            signal.check_catalog(catalog)?;
        }

        let keys: Vec<&str> = selection.iter().map(|s| s.key.as_str()).collect();
        info!(
            registry = %registry.version,
            signals = %keys.join(","),
            "signals_resolved"
        );
        ctx.registry = Some(registry);
        ctx.selection = selection;
        Ok(())
    }
}
