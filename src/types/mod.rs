//! Data types for band configuration and host charts.

mod band;
mod chart;

pub use band::*;
pub use chart::*;
