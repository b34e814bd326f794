mod accumulator;
mod errors;
mod outcome;
mod scan_engine;

pub use outcome::Outcome;
pub use scan_engine::ScanEngine;
