use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::io::{check_text, fmt_threshold, parse_bool, parse_f64, parse_usize};
use crate::scores::{LaunchRecord, ObservedC5};
use crate::sweep::thresholds_from_file_name;

const FIXED_COLUMNS: [&str; 20] = [
    "Flare_Number",
    "Flare_ID",
    "Trigger_Time",
    "Cancelled",
    "Max_FOXSI",
    "Mean_FOXSI",
    "Max_HiC",
    "Mean_HiC",
    "Max_FOXSI_and_HiC_C5",
    "Max_FOXSI_C5",
    "Mean_FOXSI_C5",
    "Max_HiC_C5",
    "Mean_HiC_C5",
    "Flare_C5",
    "Flare_C5_10min",
    "Flare_Class",
    "Flare_Max_Flux",
    "Peak_Time",
    "Start_to_Peak",
    "Background_Flux",
];

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchTableMeta {
    pub keys: Vec<String>,
    pub units: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchTable {
    pub meta: LaunchTableMeta,
    pub thresholds: Vec<f64>,
    pub records: Vec<LaunchRecord>,
}

pub fn write_launch_tsv(
    path: &Path,
    meta: &LaunchTableMeta,
    thresholds: &[f64],
    records: &[LaunchRecord],
) -> Result<()> {
    if meta.keys.len() != thresholds.len() || meta.units.len() != thresholds.len() {
        bail!(
            "launch table has {} keys, {} units and {} thresholds",
            meta.keys.len(),
            meta.units.len(),
            thresholds.len()
        );
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);

    let mut header: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
    for key in &meta.keys {
        check_text(key, "signal key")?;
        header.push(key.clone());
        header.push(format!("{}_units", key));
    }
    writeln!(w, "{}", header.join("\t"))?;

    let mut suffix = String::new();
    for (value, units) in thresholds.iter().zip(&meta.units) {
        check_text(units, "units")?;
        suffix.push('\t');
        suffix.push_str(&fmt_threshold(*value));
        suffix.push('\t');
        suffix.push_str(units);
    }

    for r in records {
        check_text(&r.flare_id, "Flare_ID")?;
        check_text(&r.trigger_time, "Trigger_Time")?;
        check_text(&r.flare_class, "Flare_Class")?;
        check_text(&r.peak_time, "Peak_Time")?;
        let cancelled = match r.cancelled {
            Some(true) => "true",
            Some(false) => "false",
            None => "NaN",
        };
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{:e}\t{:e}\t{:e}\t{:e}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:e}\t{}\t{}\t{:e}{}",
            r.flare_number,
            r.flare_id,
            r.trigger_time,
            cancelled,
            r.max_foxsi,
            r.mean_foxsi,
            r.max_hic,
            r.mean_hic,
            r.observed_c5.both_instruments,
            r.observed_c5.max_foxsi,
            r.observed_c5.mean_foxsi,
            r.observed_c5.max_hic,
            r.observed_c5.mean_hic,
            r.above_c5,
            r.above_c5_10min,
            r.flare_class,
            r.peak_flux,
            r.peak_time,
            r.start_to_peak_minutes,
            r.background_flux,
            suffix
        )?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_launch_tsv(path: &Path) -> Result<LaunchTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read launch table {}", path.display()))?;
    let mut lines = content.lines();
    let header_line = lines
        .next()
        .with_context(|| format!("{} is empty", path.display()))?;
    let header: Vec<&str> = header_line.split('\t').collect();
    if header.len() < FIXED_COLUMNS.len() || header[..FIXED_COLUMNS.len()] != FIXED_COLUMNS {
        bail!("{}: unexpected launch table header", path.display());
    }
    let extra = &header[FIXED_COLUMNS.len()..];
    if extra.len() % 2 != 0 {
        bail!("{}: threshold columns must come in key/units pairs", path.display());
    }
    let mut keys = Vec::with_capacity(extra.len() / 2);
    for pair in extra.chunks(2) {
        if pair[1] != format!("{}_units", pair[0]) {
            bail!("{}: expected '{}_units' column", path.display(), pair[0]);
        }
        keys.push(pair[0].to_string());
    }

    let mut units: Option<Vec<String>> = None;
    let mut thresholds: Option<Vec<f64>> = None;
    let mut records = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line_no = idx + 2;
        if line.is_empty() {
            continue;
        }
        let f: Vec<&str> = line.split('\t').collect();
        if f.len() != header.len() {
            bail!(
                "{}:{} expected {} columns, found {}",
                path.display(),
                line_no,
                header.len(),
                f.len()
            );
        }
        let (record, row_thresholds, row_units) = parse_row(&f, line_no)
            .with_context(|| format!("{}: malformed launch row", path.display()))?;
        match &thresholds {
            Some(t) if *t != row_thresholds => {
                bail!("{}:{} thresholds differ from earlier rows", path.display(), line_no)
            }
            Some(_) => {}
            None => thresholds = Some(row_thresholds),
        }
        if units.is_none() {
            units = Some(row_units);
        }
        records.push(record);
    }

    let thresholds = match thresholds {
        Some(t) => t,
        None => {
            let name = path
                .file_name()
                .and_then(|s| s.to_str())
                .with_context(|| format!("{}: unreadable file name", path.display()))?;
            thresholds_from_file_name(name)?
        }
    };
    if thresholds.len() != keys.len() {
        bail!(
            "{}: {} thresholds for {} signal columns",
            path.display(),
            thresholds.len(),
            keys.len()
        );
    }

    Ok(LaunchTable {
        meta: LaunchTableMeta {
            units: units.unwrap_or_else(|| vec![String::new(); keys.len()]),
            keys,
        },
        thresholds,
        records,
    })
}

fn parse_row(f: &[&str], line_no: usize) -> Result<(LaunchRecord, Vec<f64>, Vec<String>)> {
    let cancelled = match f[3] {
        "true" => Some(true),
        "false" => Some(false),
        "NaN" => None,
        other => bail!("line {}: invalid Cancelled value '{}'", line_no, other),
    };
    let record = LaunchRecord {
        flare_number: parse_usize(f[0], "Flare_Number", line_no)?,
        flare_id: f[1].to_string(),
        trigger_time: f[2].to_string(),
        cancelled,
        max_foxsi: parse_f64(f[4], "Max_FOXSI", line_no)?,
        mean_foxsi: parse_f64(f[5], "Mean_FOXSI", line_no)?,
        max_hic: parse_f64(f[6], "Max_HiC", line_no)?,
        mean_hic: parse_f64(f[7], "Mean_HiC", line_no)?,
        observed_c5: ObservedC5 {
            both_instruments: parse_bool(f[8], "Max_FOXSI_and_HiC_C5", line_no)?,
            max_foxsi: parse_bool(f[9], "Max_FOXSI_C5", line_no)?,
            mean_foxsi: parse_bool(f[10], "Mean_FOXSI_C5", line_no)?,
            max_hic: parse_bool(f[11], "Max_HiC_C5", line_no)?,
            mean_hic: parse_bool(f[12], "Mean_HiC_C5", line_no)?,
        },
        above_c5: parse_bool(f[13], "Flare_C5", line_no)?,
        above_c5_10min: parse_bool(f[14], "Flare_C5_10min", line_no)?,
        flare_class: f[15].to_string(),
        peak_flux: parse_f64(f[16], "Flare_Max_Flux", line_no)?,
        peak_time: f[17].to_string(),
        start_to_peak_minutes: parse_f64(f[18], "Start_to_Peak", line_no)?,
        background_flux: parse_f64(f[19], "Background_Flux", line_no)?,
    };

    let mut thresholds = Vec::new();
    let mut units = Vec::new();
    for pair in f[FIXED_COLUMNS.len()..].chunks(2) {
        thresholds.push(parse_f64(pair[0], "threshold", line_no)?);
        units.push(pair[1].to_string());
    }
    Ok((record, thresholds, units))
}
