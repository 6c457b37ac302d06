mod loader;
mod resolve;

use std::path::Path;

use anyhow::Result;

pub use loader::{load_builtin_v1, load_signal_tsv, merge_defs, parse_values};
pub use resolve::{ParamArg, SignalSelection, resolve_selection};

#[derive(Debug, Clone, PartialEq)]
pub struct SignalDef {
    pub key: String,
    pub column: String,
    pub units: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct SignalRegistry {
    pub version: String,
    pub defs: Vec<SignalDef>,
}

impl SignalRegistry {
    pub fn get(&self, key: &str) -> Option<&SignalDef> {
        self.defs.iter().find(|d| d.key == key)
    }
}

pub fn load_builtin() -> Result<SignalRegistry> {
    let defs = load_builtin_v1()?;
    Ok(SignalRegistry {
        version: "v1".to_string(),
        defs,
    })
}

pub fn load_user(path: &Path) -> Result<Vec<SignalDef>> {
    load_signal_tsv(path)
}

pub fn load_registry(user: Option<&Path>) -> Result<SignalRegistry> {
    let mut registry = load_builtin()?;
    if let Some(path) = user {
        let user_defs = load_user(path)?;
        registry.defs = merge_defs(registry.defs, user_defs);
    }
    Ok(registry)
}
