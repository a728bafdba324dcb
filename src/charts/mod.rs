pub mod distribution;
pub mod trend;
