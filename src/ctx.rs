use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::schema::v1::{Mode, SweepReportV1};
use crate::scores::ScoreTable;
use crate::signals::{ParamArg, SignalRegistry, SignalSelection};
use crate::sweep::{AcceptanceRule, ThresholdGrid};
use crate::trigger::TriggerConfig;

pub const ALL_SCORES_FILE: &str = "AllParameterScores.tsv";
pub const ACCEPTABLE_FILE: &str = "AcceptableParams.tsv";
pub const REJECTED_FILE: &str = "RejectedParams.tsv";
pub const REPORT_FILE: &str = "sweep_report.json";
pub const LAUNCHES_DIR: &str = "Launches";

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub launches_dir: PathBuf,
    pub all_scores_path: PathBuf,
    pub acceptable_path: PathBuf,
    pub rejected_path: PathBuf,
    pub json_path: PathBuf,
}

impl OutputPaths {
    pub fn new(out_dir: PathBuf) -> Self {
        Self {
            launches_dir: out_dir.join(LAUNCHES_DIR),
            all_scores_path: out_dir.join(ALL_SCORES_FILE),
            acceptable_path: out_dir.join(ACCEPTABLE_FILE),
            rejected_path: out_dir.join(REJECTED_FILE),
            json_path: out_dir.join(REPORT_FILE),
            out_dir,
        }
    }
}

#[derive(Debug)]
pub struct Ctx {
    pub mode: Mode,
    pub catalog_path: Option<PathBuf>,
    pub derived_path: Option<PathBuf>,
    pub signals_path: Option<PathBuf>,
    pub merge_inputs: Vec<PathBuf>,
    pub params: Vec<ParamArg>,
    pub trigger: TriggerConfig,
    pub acceptance: AcceptanceRule,
    pub threads: usize,
    pub write_launches: bool,
    pub write_json: bool,
    pub catalog: Option<Catalog>,
    pub registry: Option<SignalRegistry>,
    pub selection: Vec<SignalSelection>,
    pub grid: Option<ThresholdGrid>,
    pub scores: Option<ScoreTable>,
    pub accepted: Option<ScoreTable>,
    pub rejected: Option<ScoreTable>,
    pub warnings: Vec<String>,
    pub output: OutputPaths,
    pub report: SweepReportV1,
}

impl Ctx {
    pub fn new(mode: Mode, out_dir: PathBuf, acceptance: AcceptanceRule, tool_version: &str) -> Self {
        let report = SweepReportV1::empty(
            tool_version,
            mode,
            acceptance.min_recall,
            acceptance.min_ratio,
        );
        Self {
            mode,
            catalog_path: None,
            derived_path: None,
            signals_path: None,
            merge_inputs: Vec::new(),
            params: Vec::new(),
            trigger: TriggerConfig::default(),
            acceptance,
            threads: 0,
            write_launches: true,
            write_json: false,
            catalog: None,
            registry: None,
            selection: Vec::new(),
            grid: None,
            scores: None,
            accepted: None,
            rejected: None,
            warnings: Vec::new(),
            output: OutputPaths::new(out_dir),
            report,
        }
    }

    pub fn launches_dir(&self) -> Option<PathBuf> {
        if self.write_launches && self.mode == Mode::Sweep {
            Some(self.output.launches_dir.clone())
        } else {
            None
        }
    }
}
