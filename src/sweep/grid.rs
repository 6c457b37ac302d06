use anyhow::{Context, Result, bail};

const KEY_DELIMITER: char = '_';

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdGrid {
    pub keys: Vec<String>,
    pub axes: Vec<Vec<f64>>,
}

impl ThresholdGrid {
    pub fn new(keys: Vec<String>, axes: Vec<Vec<f64>>) -> Result<Self> {
        if keys.is_empty() {
            bail!("threshold grid needs at least one signal");
        }
        if keys.len() != axes.len() {
            bail!("{} signal keys but {} threshold axes", keys.len(), axes.len());
        }
        for (key, axis) in keys.iter().zip(&axes) {
            if axis.is_empty() {
                bail!("signal '{}' has no candidate thresholds", key);
            }
            let mut sorted = axis.clone();
            sorted.sort_by(|a, b| a.total_cmp(b));
            if let Some(pair) = sorted.windows(2).find(|w| w[0].total_cmp(&w[1]).is_eq()) {
                bail!("signal '{}' lists threshold {:e} more than once", key, pair[0]);
            }
        }
        Ok(Self { keys, axes })
    }

    pub fn len(&self) -> usize {
        self.axes.iter().map(|a| a.len()).product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn points(&self) -> Vec<Vec<f64>> {
        let total = self.len();
        let mut out = Vec::with_capacity(total);
        let mut idx = vec![0usize; self.axes.len()];
        for _ in 0..total {
            out.push(
                idx.iter()
                    .zip(&self.axes)
                    .map(|(&i, axis)| axis[i])
                    .collect(),
            );
            for d in (0..idx.len()).rev() {
                idx[d] += 1;
                if idx[d] < self.axes[d].len() {
                    break;
                }
                idx[d] = 0;
            }
        }
        out
    }
}

pub fn split_shards<T: Clone>(items: &[T], n: usize) -> Vec<Vec<T>> {
    let n = n.max(1);
    let base = items.len() / n;
    let extra = items.len() % n;
    let mut out = Vec::with_capacity(n);
    let mut start = 0;
    for shard in 0..n {
        let len = base + usize::from(shard < extra);
        out.push(items[start..start + len].to_vec());
        start += len;
    }
    out
}

pub fn threshold_key(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{:e}", v))
        .collect::<Vec<_>>()
        .join(&KEY_DELIMITER.to_string())
}

pub fn parse_threshold_key(key: &str) -> Result<Vec<f64>> {
    if key.is_empty() {
        bail!("empty threshold key");
    }
    key.split(KEY_DELIMITER)
        .map(|part| {
            part.parse::<f64>()
                .with_context(|| format!("invalid threshold '{}' in key '{}'", part, key))
        })
        .collect()
}

pub fn launch_file_name(values: &[f64]) -> String {
    format!("{}_results.tsv", threshold_key(values))
}

pub fn thresholds_from_file_name(name: &str) -> Result<Vec<f64>> {
    let Some(key) = name.strip_suffix("_results.tsv") else {
        bail!("'{}' is not a launch table file name", name);
    };
    parse_threshold_key(key)
}
