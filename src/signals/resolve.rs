use std::str::FromStr;

use anyhow::{Context, Result, bail};

use crate::catalog::Catalog;
use crate::signals::{SignalRegistry, parse_values};

#[derive(Debug, Clone, PartialEq)]
pub struct ParamArg {
    pub key: String,
    pub values: Option<Vec<f64>>,
}

impl FromStr for ParamArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (key, values) = match s.split_once('=') {
            Some((key, raw)) => (key.trim(), Some(parse_values(raw)?)),
            None => (s.trim(), None),
        };
        if key.is_empty() {
            bail!("empty signal key in '{}'", s);
        }
        Ok(Self {
            key: key.to_string(),
            values,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalSelection {
    pub key: String,
    pub column: String,
    pub units: String,
    pub values: Vec<f64>,
}

pub fn resolve_selection(registry: &SignalRegistry, params: &[ParamArg]) -> Result<Vec<SignalSelection>> {
    if params.is_empty() {
        bail!("at least one --param is required");
    }
    let mut out: Vec<SignalSelection> = Vec::with_capacity(params.len());
    for param in params {
        if out.iter().any(|s| s.key == param.key) {
            bail!("signal '{}' selected more than once", param.key);
        }
        let def = registry.get(&param.key).with_context(|| {
            format!(
                "unknown signal '{}' (registry {})",
                param.key, registry.version
            )
        })?;
        out.push(SignalSelection {
            key: def.key.clone(),
            column: def.column.clone(),
            units: def.units.clone(),
            values: param.values.clone().unwrap_or_else(|| def.values.clone()),
        });
    }
    Ok(out)
}

impl SignalSelection {
    pub fn check_catalog(&self, catalog: &Catalog) -> Result<()> {
        catalog
            .require_column(&self.column)
            .with_context(|| format!("signal '{}' is unavailable", self.key))
    }
}
