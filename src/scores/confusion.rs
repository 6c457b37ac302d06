use anyhow::{Result, bail};

use crate::math::stats::ratio;
use crate::scores::ConfusionCounts;

#[derive(Debug, Clone, Default)]
pub struct Membership {
    pub above_c5: Vec<bool>,
    pub triggered: Vec<bool>,
    pub launched: Vec<bool>,
    pub observed_both_c5: Vec<bool>,
    pub cancelled: Vec<bool>,
}

impl Membership {
    pub fn new(above_c5: Vec<bool>) -> Self {
        let n = above_c5.len();
        Self {
            above_c5,
            triggered: vec![false; n],
            launched: vec![false; n],
            observed_both_c5: vec![false; n],
            cancelled: vec![false; n],
        }
    }

    pub fn len(&self) -> usize {
        self.above_c5.len()
    }

    pub fn is_empty(&self) -> bool {
        self.above_c5.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Tn,
    TnCancelled,
    FpNoC5NotObserved,
    TpNoC5Observed,
    Fn,
    FnCancelled,
    FpC5NotObserved,
    Tp,
}

pub fn classify(above_c5: bool, triggered: bool, cancelled: bool, observed_both: bool) -> Bucket {
    match (above_c5, triggered, cancelled, observed_both) {
        (false, false, _, _) => Bucket::Tn,
        (false, true, true, _) => Bucket::TnCancelled,
        (false, true, false, false) => Bucket::FpNoC5NotObserved,
        (false, true, false, true) => Bucket::TpNoC5Observed,
        (true, false, _, _) => Bucket::Fn,
        (true, true, true, _) => Bucket::FnCancelled,
        (true, true, false, false) => Bucket::FpC5NotObserved,
        (true, true, false, true) => Bucket::Tp,
    }
}

pub fn tally(m: &Membership) -> Result<ConfusionCounts> {
    let n = m.len();
    for (name, len) in [
        ("triggered", m.triggered.len()),
        ("launched", m.launched.len()),
        ("observed_both_c5", m.observed_both_c5.len()),
        ("cancelled", m.cancelled.len()),
    ] {
        if len != n {
            bail!("{} membership length mismatch: {} != {}", name, len, n);
        }
    }

    let mut counts = ConfusionCounts::default();
    for i in 0..n {
        // A triggered flare is either launched or cancelled, never both.
        let consistent = if m.triggered[i] {
            m.launched[i] != m.cancelled[i]
        } else {
            !m.launched[i] && !m.cancelled[i] && !m.observed_both_c5[i]
        };
        if !consistent {
            bail!("inconsistent launch membership for flare at position {}", i);
        }
        let bucket = classify(
            m.above_c5[i],
            m.triggered[i],
            m.cancelled[i],
            m.observed_both_c5[i],
        );
        match bucket {
            Bucket::Tn => counts.tn += 1,
            Bucket::TnCancelled => counts.tn_cancelled += 1,
            Bucket::FpNoC5NotObserved => counts.fp_noc5_not_observed += 1,
            Bucket::TpNoC5Observed => counts.tp_noc5_observed += 1,
            Bucket::Fn => counts.fn_ += 1,
            Bucket::FnCancelled => counts.fn_cancelled += 1,
            Bucket::FpC5NotObserved => counts.fp_c5_not_observed += 1,
            Bucket::Tp => counts.tp += 1,
        }
    }

    if counts.total() != n {
        bail!(
            "confusion buckets cover {} flares but the catalog has {}",
            counts.total(),
            n
        );
    }
    Ok(counts)
}

pub fn derived_scores(counts: &ConfusionCounts) -> (f64, f64, f64) {
    let successes = counts.successes();
    let launches = counts.launches();
    let precision = ratio(successes, launches);
    let recall = ratio(successes, successes + counts.fn_ + counts.fn_cancelled);
    let trigger_to_launch = ratio(launches, counts.triggers());
    (precision, recall, trigger_to_launch)
}
