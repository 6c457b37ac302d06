use anyhow::{Context, Result};

use crate::catalog::{Catalog, FlareRecord};
use crate::trigger::{
    LaunchObservation, ThresholdSpec, TriggerConfig, compute_observation, evaluate,
};

pub fn run_one_threshold(
    catalog: &Catalog,
    columns: &[String],
    spec: &ThresholdSpec,
    config: &TriggerConfig,
) -> Result<Vec<LaunchObservation>> {
    let mut observations = Vec::new();
    for (flare_number, flare) in catalog.flares().iter().enumerate() {
        let signals = signal_views(flare, columns)?;
        let outcome = evaluate(&signals, spec, config)
            .with_context(|| format!("trigger evaluation failed for flare '{}'", flare.flare_id))?;
        if let Some(outcome) = outcome {
            observations.push(compute_observation(
                flare_number,
                flare,
                &outcome,
                &config.timing,
            )?);
        }
    }
    Ok(observations)
}

pub fn signal_views<'a>(flare: &'a FlareRecord, columns: &[String]) -> Result<Vec<&'a [f64]>> {
    columns
        .iter()
        .map(|column| {
            flare.series(column).with_context(|| {
                format!("flare '{}' has no signal column '{}'", flare.flare_id, column)
            })
        })
        .collect()
}
