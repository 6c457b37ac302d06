use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Sweep,
    Merge,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogMeta {
    pub flares: Option<u64>,
    pub above_c5: Option<u64>,
    pub derived_joined: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEntry {
    pub key: String,
    pub column: Option<String>,
    pub units: String,
    pub candidates: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingMeta {
    pub latency_minutes: u64,
    pub prep_minutes: u64,
    pub launch_minutes: u64,
    pub foxsi_duration_minutes: u64,
    pub hic_delay_minutes: u64,
    pub hic_duration_minutes: u64,
    pub cancel_lookahead_minutes: u64,
    pub single_comparator: String,
    pub joint_comparator: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptanceMeta {
    pub min_recall: f64,
    pub min_ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionCounts {
    pub acceptable: u64,
    pub rejected: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountsV1 {
    #[serde(rename = "TN")]
    pub tn: u64,
    #[serde(rename = "TN_cancelled")]
    pub tn_cancelled: u64,
    #[serde(rename = "TP")]
    pub tp: u64,
    #[serde(rename = "TP_noC5_observed")]
    pub tp_noc5_observed: u64,
    #[serde(rename = "FN")]
    pub fn_: u64,
    #[serde(rename = "FN_cancelled")]
    pub fn_cancelled: u64,
    #[serde(rename = "FP_c5_notObserved")]
    pub fp_c5_not_observed: u64,
    #[serde(rename = "FP_noC5_notObserved")]
    pub fp_noc5_not_observed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestRow {
    pub thresholds: Vec<f64>,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub trigger_to_launch: Option<f64>,
    pub counts: CountsV1,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artifacts {
    pub all_scores: String,
    pub acceptable: String,
    pub rejected: String,
    pub launches_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReportV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub mode: Mode,
    pub catalog: CatalogMeta,
    pub signals: Vec<SignalEntry>,
    pub timing: Option<TimingMeta>,
    pub grid_points: u64,
    pub acceptance: AcceptanceMeta,
    pub partition: PartitionCounts,
    pub best: Option<BestRow>,
    pub artifacts: Artifacts,
}

impl SweepReportV1 {
    pub fn empty(tool_version: &str, mode: Mode, min_recall: f64, min_ratio: f64) -> Self {
        Self {
            tool: "flare-trigger-sweep".to_string(),
            version: tool_version.to_string(),
            schema_version: "v1".to_string(),
            mode,
            catalog: CatalogMeta::default(),
            signals: Vec::new(),
            timing: None,
            grid_points: 0,
            acceptance: AcceptanceMeta {
                min_recall,
                min_ratio,
            },
            partition: PartitionCounts::default(),
            best: None,
            artifacts: Artifacts::default(),
        }
    }
}
