//! Trend statistics over cleaned series.

pub mod trend;

pub use trend::{fit_trend, TrendResult};
