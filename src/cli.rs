use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::signals::ParamArg;
use crate::trigger::Comparator;

#[derive(Debug, Parser)]
#[command(
    name = "flare-trigger-sweep",
    version,
    about = "GOES flare launch-trigger parameter sweep"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Sweep(SweepArgs),
    Merge(MergeArgs),
    Validate(ValidateArgs),
    Signals(SignalsArgs),
}

#[derive(Debug, Args)]
pub struct SweepArgs {
    #[arg(long, help = "Flare catalog JSON (.json or .json.gz)")]
    pub catalog: PathBuf,

    #[arg(long, help = "Optional derived-signal JSON joined by flare id")]
    pub derived: Option<PathBuf>,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(
        long = "param",
        required = true,
        help = "Signal to sweep: KEY or KEY=v1,v2,... (repeatable)"
    )]
    pub params: Vec<ParamArg>,

    #[arg(long, help = "Optional signal TSV to overlay on built-in signals")]
    pub signals: Option<PathBuf>,

    #[arg(long, default_value_t = 0, help = "Number of threads (0 = auto)")]
    pub threads: usize,

    #[command(flatten)]
    pub timing: TimingArgs,

    #[command(flatten)]
    pub acceptance: AcceptanceArgs,

    #[arg(long, default_value_t = false, help = "Skip per-threshold launch tables")]
    pub no_launches: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct TimingArgs {
    #[arg(long, default_value_t = 4)]
    pub prep_minutes: usize,

    #[arg(long, default_value_t = 3)]
    pub latency_minutes: usize,

    #[arg(long, default_value_t = 2)]
    pub launch_minutes: usize,

    #[arg(long, value_enum, default_value_t = ComparatorArg::Gt)]
    pub single_comparator: ComparatorArg,

    #[arg(long, value_enum, default_value_t = ComparatorArg::Ge)]
    pub joint_comparator: ComparatorArg,
}

#[derive(Debug, Args)]
pub struct AcceptanceArgs {
    #[arg(long, default_value_t = 0.4)]
    pub min_recall: f64,

    #[arg(long, default_value_t = 0.4)]
    pub min_ratio: f64,
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    #[arg(long, num_args = 1.., required = true, help = "Score tables to combine")]
    pub input: Vec<PathBuf>,

    #[arg(long)]
    pub out: PathBuf,

    #[command(flatten)]
    pub acceptance: AcceptanceArgs,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long)]
    pub catalog: PathBuf,

    #[arg(long)]
    pub derived: Option<PathBuf>,

    #[arg(long = "param", help = "Signals whose columns must be present")]
    pub params: Vec<ParamArg>,

    #[arg(long)]
    pub signals: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SignalsArgs {
    #[command(subcommand)]
    pub command: SignalsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SignalsCommand {
    Show(SignalsShowArgs),
}

#[derive(Debug, Args)]
pub struct SignalsShowArgs {
    #[arg(long, help = "Optional signal TSV to overlay on built-in signals")]
    pub signals: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ComparatorArg {
    Gt,
    Ge,
}

impl From<ComparatorArg> for Comparator {
    fn from(arg: ComparatorArg) -> Self {
        match arg {
            ComparatorArg::Gt => Comparator::Greater,
            ComparatorArg::Ge => Comparator::GreaterOrEqual,
        }
    }
}
