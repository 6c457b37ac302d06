use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::io::{check_text, fmt_threshold, parse_f64, parse_usize};
use crate::scores::{ConfusionCounts, ScoreRow, ScoreTable};

const COUNT_COLUMNS: [&str; 8] = [
    "TN",
    "TN_cancelled",
    "TP",
    "TP_noC5_observed",
    "FN",
    "FN_cancelled",
    "FP_c5_notObserved",
    "FP_noC5_notObserved",
];

const SCORE_COLUMNS: [&str; 3] = ["Precision", "Recall", "TriggerToLaunch"];

const TRAILING: usize = COUNT_COLUMNS.len() + SCORE_COLUMNS.len();

pub fn write_score_tsv(path: &Path, table: &ScoreTable) -> Result<()> {
    if table.keys.len() != table.units.len() {
        bail!(
            "score table has {} keys but {} units",
            table.keys.len(),
            table.units.len()
        );
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);

    let mut header: Vec<String> = Vec::with_capacity(table.keys.len() * 2 + TRAILING);
    for key in &table.keys {
        check_text(key, "signal key")?;
        header.push(key.clone());
    }
    for key in &table.keys {
        header.push(format!("{}_units", key));
    }
    header.extend(COUNT_COLUMNS.iter().map(|c| c.to_string()));
    header.extend(SCORE_COLUMNS.iter().map(|c| c.to_string()));
    writeln!(w, "{}", header.join("\t"))?;

    let mut units = String::new();
    for u in &table.units {
        check_text(u, "units")?;
        units.push_str(u);
        units.push('\t');
    }

    for row in &table.rows {
        if row.thresholds.len() != table.keys.len() {
            bail!(
                "score row has {} thresholds for {} signals",
                row.thresholds.len(),
                table.keys.len()
            );
        }
        let thresholds: Vec<String> = row.thresholds.iter().map(|v| fmt_threshold(*v)).collect();
        let c = &row.counts;
        writeln!(
            w,
            "{}\t{}{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            thresholds.join("\t"),
            units,
            c.tn,
            c.tn_cancelled,
            c.tp,
            c.tp_noc5_observed,
            c.fn_,
            c.fn_cancelled,
            c.fp_c5_not_observed,
            c.fp_noc5_not_observed,
            row.precision,
            row.recall,
            row.trigger_to_launch
        )?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_score_tsv(path: &Path) -> Result<ScoreTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read score table {}", path.display()))?;
    let mut lines = content.lines();
    let header_line = lines
        .next()
        .with_context(|| format!("{} is empty", path.display()))?;
    let header: Vec<&str> = header_line.split('\t').collect();
    if header.len() <= TRAILING || (header.len() - TRAILING) % 2 != 0 {
        bail!(
            "{}: expected signal, units, count and score columns, found {} columns",
            path.display(),
            header.len()
        );
    }
    let nkeys = (header.len() - TRAILING) / 2;
    let keys: Vec<String> = header[..nkeys].iter().map(|k| k.to_string()).collect();
    for (key, units_col) in keys.iter().zip(&header[nkeys..2 * nkeys]) {
        if *units_col != format!("{}_units", key) {
            bail!("{}: expected '{}_units' column", path.display(), key);
        }
    }
    let trailing = &header[2 * nkeys..];
    if trailing[..COUNT_COLUMNS.len()] != COUNT_COLUMNS
        || trailing[COUNT_COLUMNS.len()..] != SCORE_COLUMNS
    {
        bail!("{}: unexpected count or score columns", path.display());
    }

    let mut units: Option<Vec<String>> = None;
    let mut rows = Vec::new();
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
        let thresholds = f[..nkeys]
            .iter()
            .map(|v| parse_f64(v, "threshold", line_no))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("{}: malformed score row", path.display()))?;
        let row_units: Vec<String> = f[nkeys..2 * nkeys].iter().map(|u| u.to_string()).collect();
        match &units {
            Some(u) if *u != row_units => {
                bail!("{}:{} units differ from earlier rows", path.display(), line_no)
            }
            Some(_) => {}
            None => units = Some(row_units),
        }
        let row = parse_counts_and_scores(&f[2 * nkeys..], thresholds, line_no)
            .with_context(|| format!("{}: malformed score row", path.display()))?;
        rows.push(row);
    }

    Ok(ScoreTable {
        units: units.unwrap_or_else(|| vec![String::new(); nkeys]),
        keys,
        rows,
    })
}

fn parse_counts_and_scores(f: &[&str], thresholds: Vec<f64>, line_no: usize) -> Result<ScoreRow> {
    let n = |i: usize| parse_usize(f[i], COUNT_COLUMNS[i], line_no);
    let counts = ConfusionCounts {
        tn: n(0)?,
        tn_cancelled: n(1)?,
        tp: n(2)?,
        tp_noc5_observed: n(3)?,
        fn_: n(4)?,
        fn_cancelled: n(5)?,
        fp_c5_not_observed: n(6)?,
        fp_noc5_not_observed: n(7)?,
    };
    let base = COUNT_COLUMNS.len();
    Ok(ScoreRow {
        thresholds,
        counts,
        precision: parse_f64(f[base], SCORE_COLUMNS[0], line_no)?,
        recall: parse_f64(f[base + 1], SCORE_COLUMNS[1], line_no)?,
        trigger_to_launch: parse_f64(f[base + 2], SCORE_COLUMNS[2], line_no)?,
    })
}
