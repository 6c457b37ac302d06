use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use flare_trigger_sweep::cli::{
    AcceptanceArgs, Cli, Commands, MergeArgs, SignalsCommand, SweepArgs, TimingArgs, ValidateArgs,
};
use flare_trigger_sweep::ctx::Ctx;
use flare_trigger_sweep::io;
use flare_trigger_sweep::pipeline::Pipeline;
use flare_trigger_sweep::pipeline::stage0_scaffold::Stage0Scaffold;
use flare_trigger_sweep::pipeline::stage1_catalog::Stage1Catalog;
use flare_trigger_sweep::pipeline::stage2_signals::Stage2Signals;
use flare_trigger_sweep::pipeline::stage3_grid::Stage3Grid;
use flare_trigger_sweep::pipeline::stage4_merge::Stage4Merge;
use flare_trigger_sweep::pipeline::stage4_sweep::Stage4Sweep;
use flare_trigger_sweep::pipeline::stage5_partition::Stage5Partition;
use flare_trigger_sweep::pipeline::stage6_output::Stage6Output;
use flare_trigger_sweep::schema::v1::Mode;
use flare_trigger_sweep::signals;
use flare_trigger_sweep::sweep::AcceptanceRule;
use flare_trigger_sweep::trigger::{LaunchTiming, TriggerConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sweep(args) => run_sweep(args)?,
        Commands::Merge(args) => run_merge(args)?,
        Commands::Validate(args) => run_validate(args)?,
        Commands::Signals(args) => match args.command {
            SignalsCommand::Show(show) => {
                let registry = signals::load_registry(show.signals.as_deref())?;
                print_signal_list(&registry);
            }
        },
    }

    Ok(())
}

fn run_sweep(args: SweepArgs) -> Result<()> {
    let mut ctx = Ctx::new(
        Mode::Sweep,
        args.out,
        acceptance_rule(&args.acceptance),
        env!("CARGO_PKG_VERSION"),
    );
    ctx.catalog_path = Some(args.catalog);
    ctx.derived_path = args.derived;
    ctx.signals_path = args.signals;
    ctx.params = args.params;
    ctx.trigger = trigger_config(&args.timing);
    ctx.threads = args.threads;
    ctx.write_launches = !args.no_launches;
    ctx.write_json = args.json;

    let pipeline = Pipeline::new(vec![
        Box::new(Stage0Scaffold::new()),
        Box::new(Stage1Catalog::new()),
        Box::new(Stage2Signals::new()),
        Box::new(Stage3Grid::new()),
        Box::new(Stage4Sweep::new()),
        Box::new(Stage5Partition::new()),
        Box::new(Stage6Output::new()),
    ]);
    pipeline.run(&mut ctx)?;

    print_summary(&ctx)
}

fn run_merge(args: MergeArgs) -> Result<()> {
    let mut ctx = Ctx::new(
        Mode::Merge,
        args.out,
        acceptance_rule(&args.acceptance),
        env!("CARGO_PKG_VERSION"),
    );
    ctx.merge_inputs = args.input;
    ctx.write_json = args.json;

    let pipeline = Pipeline::new(vec![
        Box::new(Stage0Scaffold::new()),
        Box::new(Stage4Merge::new()),
        Box::new(Stage5Partition::new()),
        Box::new(Stage6Output::new()),
    ]);
    pipeline.run(&mut ctx)?;

    print_summary(&ctx)
}

fn run_validate(args: ValidateArgs) -> Result<()> {
    let mut ctx = Ctx::new(
        Mode::Sweep,
        PathBuf::from("."),
        AcceptanceRule::default(),
        env!("CARGO_PKG_VERSION"),
    );
    ctx.catalog_path = Some(args.catalog);
    ctx.derived_path = args.derived;
    ctx.signals_path = args.signals;
    ctx.params = args.params;

    let pipeline = Pipeline::new(vec![
        Box::new(Stage1Catalog::new()),
        Box::new(Stage2Signals::new()),
    ]);
    pipeline.run(&mut ctx)?;

    print_validate_summary(&ctx)
}

fn acceptance_rule(args: &AcceptanceArgs) -> AcceptanceRule {
    AcceptanceRule {
        min_recall: args.min_recall,
        min_ratio: args.min_ratio,
    }
}

fn trigger_config(args: &TimingArgs) -> TriggerConfig {
    TriggerConfig {
        timing: LaunchTiming {
            latency: args.latency_minutes,
            prep: args.prep_minutes,
            launch: args.launch_minutes,
            ..LaunchTiming::default()
        },
        single_comparator: args.single_comparator.into(),
        joint_comparator: args.joint_comparator.into(),
    }
}

fn print_summary(ctx: &Ctx) -> Result<()> {
    let summary = io::summary::format_summary(ctx)?;
    print!("{}", summary);
    print_warnings(ctx);
    Ok(())
}

fn print_validate_summary(ctx: &Ctx) -> Result<()> {
    let catalog = ctx.catalog.as_ref().context("catalog not loaded")?;
    let samples: usize = catalog.flares().iter().map(|f| f.len()).sum();
    println!("flare-trigger-sweep validate ok");
    println!("flares: {}", catalog.len());
    println!("above_c5: {}", catalog.above_c5_count());
    println!("samples: {}", samples);
    for signal in &ctx.selection {
        println!(
            "signal: {}\t{}\t{} candidates",
            signal.key,
            signal.column,
            signal.values.len()
        );
    }
    print_warnings(ctx);
    Ok(())
}

fn print_warnings(ctx: &Ctx) {
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
}

fn print_signal_list(registry: &signals::SignalRegistry) {
    println!("signals (version {}):", registry.version);
    for def in &registry.defs {
        println!(
            "{}\t{}\t{}\t{}",
            def.key,
            def.column,
            def.units,
            def.values.len()
        );
    }
}
