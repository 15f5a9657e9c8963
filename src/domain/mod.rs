pub mod errors;
pub mod flatten;
pub mod metric;
pub mod outcome;
pub mod ports;
pub mod snapshot;
