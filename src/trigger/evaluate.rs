use anyhow::{Result, bail};

use crate::trigger::{Comparator, ThresholdSpec, TriggerConfig, TriggerOutcome};

pub fn first_crossing_single(signal: &[f64], threshold: f64, cmp: Comparator) -> Option<usize> {
    signal.iter().position(|&v| cmp.holds(v, threshold))
}

pub fn first_crossing_joint(
    signals: &[&[f64]],
    thresholds: &[f64],
    cmp: Comparator,
) -> Result<Option<usize>> {
    if signals.len() != thresholds.len() {
        bail!(
            "joint trigger has {} signals but {} thresholds",
            signals.len(),
            thresholds.len()
        );
    }
    let Some(first) = signals.first() else {
        bail!("joint trigger requires at least one signal");
    };
    let n = first.len();
    for (k, s) in signals.iter().enumerate() {
        if s.len() != n {
            bail!("joint trigger signal {} has {} samples, expected {}", k, s.len(), n);
        }
    }

    for i in 0..n {
        let all = signals
            .iter()
            .zip(thresholds)
            .all(|(s, &t)| cmp.holds(s[i], t));
        if all {
            return Ok(Some(i));
        }
    }
    Ok(None)
}

pub fn evaluate(
    signals: &[&[f64]],
    spec: &ThresholdSpec,
    config: &TriggerConfig,
) -> Result<Option<TriggerOutcome>> {
    let index = match spec {
        ThresholdSpec::Single(threshold) => {
            let [signal] = signals else {
                bail!("single threshold needs exactly one signal, got {}", signals.len());
            };
            first_crossing_single(signal, *threshold, config.single_comparator)
        }
        ThresholdSpec::Joint(thresholds) => {
            first_crossing_joint(signals, thresholds, config.joint_comparator)?
        }
    };
    Ok(index.map(|i| TriggerOutcome::from_index(i, &config.timing)))
}
