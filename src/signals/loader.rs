use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::signals::SignalDef;

pub fn load_builtin_v1() -> Result<Vec<SignalDef>> {
    let content = include_str!("../../assets/signals/goes_signals_v1.tsv");
    parse_signal_tsv(content, "built-in v1")
}

pub fn load_signal_tsv(path: &Path) -> Result<Vec<SignalDef>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read signal TSV {}", path.display()))?;
    parse_signal_tsv(&content, &path.display().to_string())
}

pub fn merge_defs(mut builtin: Vec<SignalDef>, user: Vec<SignalDef>) -> Vec<SignalDef> {
    if user.is_empty() {
        return builtin;
    }
    let mut order = Vec::with_capacity(user.len());
    let mut user_map: HashMap<String, SignalDef> = HashMap::new();
    for def in user {
        if !user_map.contains_key(&def.key) {
            order.push(def.key.clone());
        }
        user_map.insert(def.key.clone(), def);
    }

    let mut merged = Vec::with_capacity(builtin.len() + user_map.len());
    for def in builtin.drain(..) {
        if let Some(user_def) = user_map.remove(&def.key) {
            merged.push(user_def);
        } else {
            merged.push(def);
        }
    }
    for key in order {
        if let Some(def) = user_map.remove(&key) {
            merged.push(def);
        }
    }
    merged
}

pub fn parse_values(raw: &str) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let v: f64 = part
            .parse()
            .with_context(|| format!("invalid threshold value '{}'", part))?;
        if !v.is_finite() {
            bail!("threshold value '{}' is not finite", part);
        }
        values.push(v);
    }
    if values.is_empty() {
        bail!("empty threshold list");
    }
    Ok(values)
}

fn parse_signal_tsv(content: &str, source: &str) -> Result<Vec<SignalDef>> {
    let mut defs: Vec<SignalDef> = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() != 4 {
            bail!("{}:{} malformed TSV (expected 4 columns)", source, line_no);
        }
        let key = parts[0].trim();
        let column = parts[1].trim();
        let units = parts[2].trim();
        if key.is_empty() || column.is_empty() {
            bail!("{}:{} empty key or column in TSV", source, line_no);
        }
        if key.contains('=') || key.contains(',') {
            bail!("{}:{} key '{}' may not contain '=' or ','", source, line_no, key);
        }
        let values = parse_values(parts[3])
            .with_context(|| format!("{}:{} bad threshold list", source, line_no))?;

        if defs.iter().any(|d| d.key == key) {
            bail!("{}:{} duplicate signal key '{}'", source, line_no, key);
        }
        defs.push(SignalDef {
            key: key.to_string(),
            column: column.to_string(),
            units: units.to_string(),
            values,
        });
    }

    Ok(defs)
}
