pub mod config;
pub mod engine;
pub mod indicators;

pub use config::{Indicator, IndicatorConfig, RunConfig, RunSpec};
pub use engine::{EngineSettings, IndicatorEngine, IndicatorValue};
pub use indicators::{EmaClose, RsiSmoothing};
