pub mod grid;
pub mod partition;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info};

#[cfg(feature = "mt")]
use rayon::prelude::*;

use crate::catalog::Catalog;
use crate::io::launch_tsv::{LaunchTableMeta, write_launch_tsv};
use crate::scores::{Aggregation, ScoreRow, ScoreTable, aggregate};
use crate::signals::SignalSelection;
use crate::trigger::{ThresholdSpec, TriggerConfig, run_one_threshold};

pub use grid::{
    ThresholdGrid, launch_file_name, parse_threshold_key, split_shards, threshold_key,
    thresholds_from_file_name,
};
pub use partition::{AcceptanceRule, merge_tables, partition, sort_by_precision};

#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub trigger: TriggerConfig,
    pub threads: usize,
    pub launches_dir: Option<PathBuf>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            trigger: TriggerConfig::default(),
            threads: 0,
            launches_dir: None,
        }
    }
}

pub fn evaluate_grid_point(
    catalog: &Catalog,
    columns: &[String],
    values: &[f64],
    trigger: &TriggerConfig,
) -> Result<Aggregation> {
    let spec = ThresholdSpec::for_grid_point(values);
    let observations = run_one_threshold(catalog, columns, &spec, trigger)?;
    aggregate(catalog, observations, &spec)
}

pub fn sweep(
    catalog: &Catalog,
    selection: &[SignalSelection],
    grid: &ThresholdGrid,
    config: &SweepConfig,
) -> Result<ScoreTable> {
    let columns: Vec<String> = selection.iter().map(|s| s.column.clone()).collect();
    let meta = LaunchTableMeta {
        keys: selection.iter().map(|s| s.key.clone()).collect(),
        units: selection.iter().map(|s| s.units.clone()).collect(),
    };

    let points = grid.points();
    let threads = worker_count(config.threads);
    let shards = split_shards(&points, threads.min(points.len()).max(1));
    info!(
        grid_points = points.len(),
        shards = shards.len(),
        threads,
        flares = catalog.len(),
        "sweep started"
    );
    let start = Instant::now();

    #[cfg(feature = "mt")]
    let per_shard: Vec<Vec<ScoreRow>> = {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build thread pool: {}", e))?;
        pool.install(|| {
            shards
                .par_iter()
                .map(|shard| run_shard(catalog, &columns, &meta, shard, config))
                .collect::<Result<Vec<_>>>()
        })?
    };

    #[cfg(not(feature = "mt"))]
    let per_shard: Vec<Vec<ScoreRow>> = shards
        .iter()
        .map(|shard| run_shard(catalog, &columns, &meta, shard, config))
        .collect::<Result<Vec<_>>>()?;

    let rows: Vec<ScoreRow> = per_shard.into_iter().flatten().collect();
    info!(
        rows = rows.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "sweep finished"
    );

    Ok(ScoreTable {
        keys: meta.keys,
        units: meta.units,
        rows,
    })
}

fn run_shard(
    catalog: &Catalog,
    columns: &[String],
    meta: &LaunchTableMeta,
    shard: &[Vec<f64>],
    config: &SweepConfig,
) -> Result<Vec<ScoreRow>> {
    let mut rows = Vec::with_capacity(shard.len());
    for values in shard {
        let key = threshold_key(values);
        let result = evaluate_grid_point(catalog, columns, values, &config.trigger)
            .with_context(|| format!("grid point {} failed", key))?;

        if let Some(dir) = &config.launches_dir {
            let path = dir.join(launch_file_name(values));
            write_launch_tsv(&path, meta, values, &result.launches)?;
        }
        debug!(
            thresholds = %key,
            launches = result.launches.len(),
            dropped = result.dropped,
            precision = result.score.precision,
            recall = result.score.recall,
            "grid point scored"
        );
        rows.push(result.score);
    }
    Ok(rows)
}

fn worker_count(requested: usize) -> usize {
    if requested > 0 {
        return requested;
    }
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
