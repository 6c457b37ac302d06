pub mod catalog;
pub mod cli;
pub mod ctx;
pub mod io;
pub mod math;
pub mod pipeline;
pub mod schema;
pub mod scores;
pub mod signals;
pub mod sweep;
pub mod trigger;
