pub mod aggregate;
pub mod confusion;

use crate::catalog::C5_FLUX;

pub use aggregate::{Aggregation, aggregate};
pub use confusion::{Bucket, Membership, classify, tally};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservedC5 {
    pub max_foxsi: bool,
    pub mean_foxsi: bool,
    pub max_hic: bool,
    pub mean_hic: bool,
    pub both_instruments: bool,
}

impl ObservedC5 {
    pub fn from_stats(max_foxsi: f64, mean_foxsi: f64, max_hic: f64, mean_hic: f64) -> Self {
        let max_foxsi = max_foxsi > C5_FLUX;
        let max_hic = max_hic > C5_FLUX;
        Self {
            max_foxsi,
            mean_foxsi: mean_foxsi > C5_FLUX,
            max_hic,
            mean_hic: mean_hic > C5_FLUX,
            both_instruments: max_foxsi && max_hic,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub flare_number: usize,
    pub flare_id: String,
    pub trigger_time: String,
    pub cancelled: Option<bool>,
    pub max_foxsi: f64,
    pub mean_foxsi: f64,
    pub max_hic: f64,
    pub mean_hic: f64,
    pub observed_c5: ObservedC5,
    pub flare_class: String,
    pub peak_flux: f64,
    pub peak_time: String,
    pub start_to_peak_minutes: f64,
    pub above_c5: bool,
    pub above_c5_10min: bool,
    pub background_flux: f64,
}

impl LaunchRecord {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled == Some(true)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionCounts {
    pub tn: usize,
    pub tn_cancelled: usize,
    pub tp: usize,
    pub tp_noc5_observed: usize,
    pub fn_: usize,
    pub fn_cancelled: usize,
    pub fp_c5_not_observed: usize,
    pub fp_noc5_not_observed: usize,
}

impl ConfusionCounts {
    pub fn total(&self) -> usize {
        self.tn
            + self.tn_cancelled
            + self.tp
            + self.tp_noc5_observed
            + self.fn_
            + self.fn_cancelled
            + self.fp_c5_not_observed
            + self.fp_noc5_not_observed
    }

    pub fn successes(&self) -> usize {
        self.tp + self.tp_noc5_observed
    }

    pub fn launches(&self) -> usize {
        self.successes() + self.fp_c5_not_observed + self.fp_noc5_not_observed
    }

    pub fn triggers(&self) -> usize {
        self.launches() + self.tn_cancelled + self.fn_cancelled
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    pub thresholds: Vec<f64>,
    pub counts: ConfusionCounts,
    pub precision: f64,
    pub recall: f64,
    pub trigger_to_launch: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    pub keys: Vec<String>,
    pub units: Vec<String>,
    pub rows: Vec<ScoreRow>,
}

impl ScoreTable {
    pub fn new(keys: Vec<String>, units: Vec<String>) -> Self {
        Self {
            keys,
            units,
            rows: Vec::new(),
        }
    }

    pub fn with_rows(&self, rows: Vec<ScoreRow>) -> Self {
        Self {
            keys: self.keys.clone(),
            units: self.units.clone(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
