pub mod evaluate;
pub mod flare_loop;
pub mod observe;

use std::fmt;

pub use evaluate::{evaluate, first_crossing_joint, first_crossing_single};
pub use flare_loop::run_one_threshold;
pub use observe::{LaunchObservation, compute_observation};

#[derive(Debug, Clone, PartialEq)]
pub enum ThresholdSpec {
    Single(f64),
    Joint(Vec<f64>),
}

impl ThresholdSpec {
    pub fn for_grid_point(values: &[f64]) -> Self {
        match values {
            [single] => Self::Single(*single),
            many => Self::Joint(many.to_vec()),
        }
    }

    pub fn values(&self) -> &[f64] {
        match self {
            Self::Single(v) => std::slice::from_ref(v),
            Self::Joint(v) => v,
        }
    }

    pub fn arity(&self) -> usize {
        self.values().len()
    }
}

impl fmt::Display for ThresholdSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.values().iter().map(|v| format!("{:e}", v)).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Greater,
    GreaterOrEqual,
}

impl Comparator {
    /// NaN never satisfies the comparison.
    pub fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::Greater => value > threshold,
            Self::GreaterOrEqual => value >= threshold,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchTiming {
    pub latency: usize,
    pub prep: usize,
    pub launch: usize,
    pub foxsi_duration: usize,
    pub hic_delay: usize,
    pub hic_duration: usize,
    pub cancel_lookahead: usize,
}

impl Default for LaunchTiming {
    fn default() -> Self {
        Self {
            latency: 3,
            prep: 4,
            launch: 2,
            foxsi_duration: 6,
            hic_delay: 2,
            hic_duration: 6,
            cancel_lookahead: 3,
        }
    }
}

impl LaunchTiming {
    pub fn foxsi_offset(&self) -> usize {
        self.latency + self.prep + self.launch
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerConfig {
    pub timing: LaunchTiming,
    pub single_comparator: Comparator,
    pub joint_comparator: Comparator,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            timing: LaunchTiming::default(),
            single_comparator: Comparator::Greater,
            joint_comparator: Comparator::GreaterOrEqual,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationWindow {
    pub start: usize,
    pub end: usize,
}

impl ObservationWindow {
    pub fn slice<'a>(&self, series: &'a [f64]) -> &'a [f64] {
        let start = self.start.min(series.len());
        let end = self.end.min(series.len()).max(start);
        &series[start..end]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerOutcome {
    pub trigger_index: usize,
    pub foxsi: ObservationWindow,
    pub hic: ObservationWindow,
}

impl TriggerOutcome {
    pub fn from_index(trigger_index: usize, timing: &LaunchTiming) -> Self {
        let foxsi_start = trigger_index + timing.foxsi_offset();
        let hic_start = foxsi_start + timing.hic_delay;
        Self {
            trigger_index,
            foxsi: ObservationWindow {
                start: foxsi_start,
                end: foxsi_start + timing.foxsi_duration,
            },
            hic: ObservationWindow {
                start: hic_start,
                end: hic_start + timing.hic_duration,
            },
        }
    }
}
