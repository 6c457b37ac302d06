mod loader;

use std::collections::{BTreeMap, HashMap};

use anyhow::{Result, bail};

pub use loader::{DerivedSignals, load_catalog, load_derived};

pub const C5_FLUX: f64 = 5e-6;

pub const XRSA_COLUMN: &str = "xrsa";
pub const XRSB_COLUMN: &str = "xrsb";

#[derive(Debug, Clone)]
pub struct FlareRecord {
    pub flare_id: String,
    pub peak_time: String,
    pub flare_class: String,
    pub peak_flux: f64,
    pub background_flux: f64,
    pub start_to_peak_minutes: f64,
    pub above_c5: bool,
    pub above_c5_10min: bool,
    pub time: Vec<String>,
    pub xrsa: Vec<f64>,
    pub xrsb: Vec<f64>,
    pub derived: BTreeMap<String, Vec<f64>>,
}

impl FlareRecord {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn series(&self, column: &str) -> Option<&[f64]> {
        match column {
            XRSA_COLUMN => Some(&self.xrsa),
            XRSB_COLUMN => Some(&self.xrsb),
            other => self.derived.get(other).map(|v| v.as_slice()),
        }
    }

    fn check_alignment(&self) -> Result<()> {
        let n = self.time.len();
        ensure_aligned(&self.flare_id, XRSA_COLUMN, self.xrsa.len(), n)?;
        ensure_aligned(&self.flare_id, XRSB_COLUMN, self.xrsb.len(), n)?;
        for (column, values) in &self.derived {
            ensure_aligned(&self.flare_id, column, values.len(), n)?;
        }
        Ok(())
    }
}

fn ensure_aligned(flare_id: &str, column: &str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        bail!(
            "flare '{}': column '{}' has {} samples but time has {}",
            flare_id,
            column,
            got,
            expected
        );
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    flares: Vec<FlareRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(flares: Vec<FlareRecord>) -> Result<Self> {
        let mut index = HashMap::with_capacity(flares.len());
        for (i, flare) in flares.iter().enumerate() {
            flare.check_alignment()?;
            if let Some(first) = index.insert(flare.flare_id.clone(), i) {
                bail!(
                    "duplicate flare id '{}' at position {} (first seen at {})",
                    flare.flare_id,
                    i,
                    first
                );
            }
        }
        Ok(Self { flares, index })
    }

    pub fn len(&self) -> usize {
        self.flares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flares.is_empty()
    }

    pub fn flares(&self) -> &[FlareRecord] {
        &self.flares
    }

    pub fn get(&self, position: usize) -> Option<&FlareRecord> {
        self.flares.get(position)
    }

    pub fn position(&self, flare_id: &str) -> Option<usize> {
        self.index.get(flare_id).copied()
    }

    pub fn above_c5_count(&self) -> usize {
        self.flares.iter().filter(|f| f.above_c5).count()
    }

    pub fn attach_derived(&mut self, rows: Vec<DerivedSignals>) -> Result<()> {
        for row in rows {
            let Some(position) = self.position(&row.flare_id) else {
                bail!(
                    "derived signals reference flare id '{}' absent from the catalog",
                    row.flare_id
                );
            };
            let flare = &mut self.flares[position];
            for (column, values) in row.signals {
                ensure_aligned(&flare.flare_id, &column, values.len(), flare.time.len())?;
                flare.derived.insert(column, values);
            }
        }
        Ok(())
    }

    pub fn require_column(&self, column: &str) -> Result<()> {
        for flare in &self.flares {
            if flare.series(column).is_none() {
                bail!("flare '{}' has no signal column '{}'", flare.flare_id, column);
            }
        }
        Ok(())
    }
}
