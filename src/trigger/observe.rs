use anyhow::{Context, Result};

use crate::catalog::FlareRecord;
use crate::math::stats::{window_max, window_mean};
use crate::trigger::{LaunchTiming, TriggerOutcome};

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchObservation {
    pub flare_number: usize,
    pub flare_id: String,
    pub trigger_time: String,
    /// `None` when the look-ahead sample is past the end of the series.
    pub cancelled: Option<bool>,
    pub max_foxsi: f64,
    pub mean_foxsi: f64,
    pub max_hic: f64,
    pub mean_hic: f64,
    /// HiC window empty. NaN gaps inside a window do not set this.
    pub past_series_end: bool,
}

pub fn compute_observation(
    flare_number: usize,
    flare: &FlareRecord,
    outcome: &TriggerOutcome,
    timing: &LaunchTiming,
) -> Result<LaunchObservation> {
    let foxsi = outcome.foxsi.slice(&flare.xrsb);
    let hic = outcome.hic.slice(&flare.xrsb);

    let t = outcome.trigger_index;
    let trigger_time = flare.time.get(t).with_context(|| {
        format!(
            "trigger index {} outside the time axis of flare '{}' ({} samples)",
            t,
            flare.flare_id,
            flare.time.len()
        )
    })?;
    let ahead = t + timing.cancel_lookahead;
    let cancelled = if ahead < flare.xrsa.len() {
        Some(flare.xrsa[ahead] - flare.xrsa[t] < 0.0)
    } else {
        None
    };

    Ok(LaunchObservation {
        flare_number,
        flare_id: flare.flare_id.clone(),
        trigger_time: trigger_time.clone(),
        cancelled,
        max_foxsi: window_max(foxsi),
        mean_foxsi: window_mean(foxsi),
        max_hic: window_max(hic),
        mean_hic: window_mean(hic),
        past_series_end: hic.is_empty(),
    })
}
