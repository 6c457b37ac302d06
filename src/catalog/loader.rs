use std::collections::BTreeMap;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::{Catalog, FlareRecord};
use crate::io::open_maybe_gz;

#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct NullableSeries(Vec<Option<f64>>);

impl NullableSeries {
    fn into_values(self) -> Vec<f64> {
        self.0.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    flares: Vec<FlareEntry>,
}

#[derive(Debug, Deserialize)]
struct FlareEntry {
    flare_id: String,
    peak_time: String,
    #[serde(rename = "class")]
    flare_class: String,
    peak_flux: f64,
    background_flux: f64,
    start_to_peak_minutes: f64,
    above_c5: bool,
    above_c5_10min: bool,
    time: Vec<String>,
    xrsa: NullableSeries,
    xrsb: NullableSeries,
    #[serde(default)]
    signals: BTreeMap<String, NullableSeries>,
}

#[derive(Debug, Deserialize)]
struct DerivedFile {
    flares: Vec<DerivedEntry>,
}

#[derive(Debug, Deserialize)]
struct DerivedEntry {
    flare_id: String,
    #[serde(default)]
    signals: BTreeMap<String, NullableSeries>,
}

#[derive(Debug, Clone)]
pub struct DerivedSignals {
    pub flare_id: String,
    pub signals: BTreeMap<String, Vec<f64>>,
}

pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let reader = open_maybe_gz(path)
        .with_context(|| format!("failed to open catalog {}", path.display()))?;
    let file: CatalogFile = serde_json::from_reader(BufReader::new(reader))
        .with_context(|| format!("failed to parse catalog {}", path.display()))?;

    let flares = file
        .flares
        .into_iter()
        .map(|entry| FlareRecord {
            flare_id: entry.flare_id,
            peak_time: entry.peak_time,
            flare_class: entry.flare_class,
            peak_flux: entry.peak_flux,
            background_flux: entry.background_flux,
            start_to_peak_minutes: entry.start_to_peak_minutes,
            above_c5: entry.above_c5,
            above_c5_10min: entry.above_c5_10min,
            time: entry.time,
            xrsa: entry.xrsa.into_values(),
            xrsb: entry.xrsb.into_values(),
            derived: into_columns(entry.signals),
        })
        .collect();

    Catalog::new(flares).with_context(|| format!("invalid catalog {}", path.display()))
}

pub fn load_derived(path: &Path) -> Result<Vec<DerivedSignals>> {
    let reader = open_maybe_gz(path)
        .with_context(|| format!("failed to open derived signals {}", path.display()))?;
    let file: DerivedFile = serde_json::from_reader(BufReader::new(reader))
        .with_context(|| format!("failed to parse derived signals {}", path.display()))?;
    Ok(file
        .flares
        .into_iter()
        .map(|entry| DerivedSignals {
            flare_id: entry.flare_id,
            signals: into_columns(entry.signals),
        })
        .collect())
}

fn into_columns(signals: BTreeMap<String, NullableSeries>) -> BTreeMap<String, Vec<f64>> {
    signals
        .into_iter()
        .map(|(column, series)| (column, series.into_values()))
        .collect()
}
