use anyhow::{Result, bail};
use tracing::debug;

use crate::catalog::Catalog;
use crate::scores::confusion::derived_scores;
use crate::scores::{LaunchRecord, Membership, ObservedC5, ScoreRow, tally};
use crate::trigger::{LaunchObservation, ThresholdSpec};

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub score: ScoreRow,
    pub launches: Vec<LaunchRecord>,
    pub dropped: usize,
}

pub fn aggregate(
    catalog: &Catalog,
    observations: Vec<LaunchObservation>,
    spec: &ThresholdSpec,
) -> Result<Aggregation> {
    let mut joined = Vec::with_capacity(observations.len());
    let mut dropped = 0;
    for obs in observations {
        let Some(position) = catalog.position(&obs.flare_id) else {
            bail!(
                "launch record references flare id '{}' absent from the catalog (thresholds {})",
                obs.flare_id,
                spec
            );
        };
        // Heuristic dedup: a trigger whose window runs past the series end is
        // usually the rise of the next flare, scored on its own record.
        if obs.past_series_end {
            dropped += 1;
            continue;
        }
        joined.push((position, join_ground_truth(catalog, position, obs)?));
    }
    if dropped > 0 {
        debug!(thresholds = %spec, dropped, "launch records past the series end dropped");
    }

    let mut membership = Membership::new(catalog.flares().iter().map(|f| f.above_c5).collect());
    for (position, record) in &joined {
        let cancelled = record.is_cancelled();
        membership.triggered[*position] = true;
        membership.cancelled[*position] = cancelled;
        membership.launched[*position] = !cancelled;
        membership.observed_both_c5[*position] = !cancelled && record.observed_c5.both_instruments;
    }

    let counts = tally(&membership)?;
    let (precision, recall, trigger_to_launch) = derived_scores(&counts);

    Ok(Aggregation {
        score: ScoreRow {
            thresholds: spec.values().to_vec(),
            counts,
            precision,
            recall,
            trigger_to_launch,
        },
        launches: joined.into_iter().map(|(_, record)| record).collect(),
        dropped,
    })
}

fn join_ground_truth(
    catalog: &Catalog,
    position: usize,
    obs: LaunchObservation,
) -> Result<LaunchRecord> {
    let Some(flare) = catalog.get(position) else {
        bail!("catalog position {} out of range", position);
    };
    let observed_c5 =
        ObservedC5::from_stats(obs.max_foxsi, obs.mean_foxsi, obs.max_hic, obs.mean_hic);
    Ok(LaunchRecord {
        flare_number: obs.flare_number,
        flare_id: obs.flare_id,
        trigger_time: obs.trigger_time,
        cancelled: obs.cancelled,
        max_foxsi: obs.max_foxsi,
        mean_foxsi: obs.mean_foxsi,
        max_hic: obs.max_hic,
        mean_hic: obs.mean_hic,
        observed_c5,
        flare_class: flare.flare_class.clone(),
        peak_flux: flare.peak_flux,
        peak_time: flare.peak_time.clone(),
        start_to_peak_minutes: flare.start_to_peak_minutes,
        above_c5: flare.above_c5,
        above_c5_10min: flare.above_c5_10min,
        background_flux: flare.background_flux,
    })
}
