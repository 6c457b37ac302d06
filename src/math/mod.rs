pub mod stats;

pub use stats::{ratio, window_max, window_mean};
