use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use flate2::read::GzDecoder;

use crate::schema::v1::SweepReportV1;

pub mod json_writer;
pub mod launch_tsv;
pub mod score_tsv;
pub mod summary;

pub fn write_json(path: &Path, report: &SweepReportV1) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

pub(crate) fn open_maybe_gz(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path)?;
    if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        let decoder = GzDecoder::new(file);
        Ok(Box::new(decoder))
    } else {
        Ok(Box::new(file))
    }
}

pub(crate) fn fmt_threshold(v: f64) -> String {
    format!("{:e}", v)
}

pub(crate) fn parse_f64(field: &str, column: &str, line_no: usize) -> Result<f64> {
    field
        .trim()
        .parse::<f64>()
        .with_context(|| format!("line {}: invalid number '{}' in {}", line_no, field, column))
}

pub(crate) fn parse_usize(field: &str, column: &str, line_no: usize) -> Result<usize> {
    field
        .trim()
        .parse::<usize>()
        .with_context(|| format!("line {}: invalid integer '{}' in {}", line_no, field, column))
}

pub(crate) fn parse_bool(field: &str, column: &str, line_no: usize) -> Result<bool> {
    match field.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => bail!("line {}: invalid boolean '{}' in {}", line_no, other, column),
    }
}

pub(crate) fn check_text(value: &str, column: &str) -> Result<()> {
    if value.contains('\t') || value.contains('\n') || value.contains('\r') {
        bail!("{} value '{}' contains a tab or newline", column, value.escape_debug());
    }
    Ok(())
}
