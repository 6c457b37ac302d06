use std::cmp::Ordering;

use anyhow::{Result, bail};

use crate::scores::{ScoreRow, ScoreTable};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptanceRule {
    pub min_recall: f64,
    pub min_ratio: f64,
}

impl Default for AcceptanceRule {
    fn default() -> Self {
        Self {
            min_recall: 0.4,
            min_ratio: 0.4,
        }
    }
}

impl AcceptanceRule {
    pub fn accepts(&self, row: &ScoreRow) -> bool {
        row.recall > self.min_recall && row.trigger_to_launch > self.min_ratio
    }
}

pub fn partition(table: &ScoreTable, rule: &AcceptanceRule) -> (ScoreTable, ScoreTable) {
    let (mut accepted, mut rejected): (Vec<ScoreRow>, Vec<ScoreRow>) =
        table.rows.iter().cloned().partition(|row| rule.accepts(row));
    sort_by_precision(&mut accepted);
    sort_by_precision(&mut rejected);
    (table.with_rows(accepted), table.with_rows(rejected))
}

/// Descending precision, NaN last; ties keep threshold order.
pub fn sort_by_precision(rows: &mut [ScoreRow]) {
    rows.sort_by(|a, b| match (a.precision.is_nan(), b.precision.is_nan()) {
        (true, true) => compare_thresholds(&a.thresholds, &b.thresholds),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b
            .precision
            .total_cmp(&a.precision)
            .then_with(|| compare_thresholds(&a.thresholds, &b.thresholds)),
    });
}

pub fn sort_by_thresholds(rows: &mut [ScoreRow]) {
    rows.sort_by(|a, b| compare_thresholds(&a.thresholds, &b.thresholds));
}

fn compare_thresholds(a: &[f64], b: &[f64]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        let ord = x.total_cmp(y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

pub fn merge_tables(tables: Vec<ScoreTable>) -> Result<ScoreTable> {
    let mut iter = tables.into_iter();
    let Some(mut merged) = iter.next() else {
        bail!("no score tables to merge");
    };
    for table in iter {
        if table.keys != merged.keys {
            bail!(
                "cannot merge score tables with different signals: [{}] vs [{}]",
                merged.keys.join(", "),
                table.keys.join(", ")
            );
        }
        merged.rows.extend(table.rows);
    }
    sort_by_thresholds(&mut merged.rows);
    Ok(merged)
}
