use serde::{Deserialize, Serialize};

use common::{Error, Result, TickInterval};

use crate::indicators::{EmaClose, RsiSmoothing};

/// Indicator settings file (TOML).
///
/// Every field is optional; defaults are listed on each field. Example
/// `config/indicators.toml`:
/// ```toml
/// pair = "BTC-ETH"
/// period = 14
/// unit = "fiveMin"
/// ema_close = "latest"
/// rsi_smoothing = "reference"
///
/// [[run]]
/// indicator = "rsi"
///
/// [[run]]
/// indicator = "breakout"
/// unit = "oneMin"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IndicatorConfig {
    /// Market name, e.g. "BTC-ETH". Default "BTC-ETH".
    #[serde(default = "default_pair")]
    pub pair: String,
    /// Lookback count used by SMA, EMA, RSI and breakout. Default 5.
    #[serde(default = "default_period")]
    pub period: usize,
    /// Candle width. Default `hour`.
    #[serde(default)]
    pub unit: TickInterval,
    /// Default `latest`.
    #[serde(default)]
    pub ema_close: EmaClose,
    /// Default `reference`.
    #[serde(default)]
    pub rsi_smoothing: RsiSmoothing,
    /// Turn a `success: false` tick response into an error instead of an
    /// empty series. Default false.
    #[serde(default)]
    pub strict_envelope: bool,
    /// Indicators evaluated by the binary, in order.
    #[serde(default, rename = "run")]
    pub runs: Vec<RunConfig>,
}

/// One indicator evaluation. Unset fields fall back to the top-level values.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub indicator: Indicator,
    pub pair: Option<String>,
    pub period: Option<usize>,
    pub unit: Option<TickInterval>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Sma,
    Ema,
    Rsi,
    BaseLine,
    ConversionLine,
    LeadingSpanA,
    LeadingSpanB,
    Breakout,
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Indicator::Sma => "SMA",
            Indicator::Ema => "EMA",
            Indicator::Rsi => "RSI",
            Indicator::BaseLine => "Base line",
            Indicator::ConversionLine => "Conversion line",
            Indicator::LeadingSpanA => "Leading span A",
            Indicator::LeadingSpanB => "Leading span B",
            Indicator::Breakout => "Breakout",
        };
        f.write_str(name)
    }
}

/// A run with every field resolved against the file defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSpec {
    pub indicator: Indicator,
    pub pair: String,
    pub period: usize,
    pub unit: TickInterval,
}

fn default_pair() -> String {
    "BTC-ETH".to_string()
}

fn default_period() -> usize {
    5
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            pair: default_pair(),
            period: default_period(),
            unit: TickInterval::default(),
            ema_close: EmaClose::default(),
            rsi_smoothing: RsiSmoothing::default(),
            strict_envelope: false,
            runs: Vec::new(),
        }
    }
}

impl IndicatorConfig {
    /// Read, parse and validate a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config(msg) => {
                Error::Config(format!("invalid indicator config at '{path}': {msg}"))
            }
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values every indicator would choke on.
    pub fn validate(&self) -> Result<()> {
        validate_pair(&self.pair)?;
        validate_period(self.period)?;
        for run in &self.runs {
            if let Some(pair) = &run.pair {
                validate_pair(pair)?;
            }
            if let Some(period) = run.period {
                validate_period(period)?;
            }
        }
        Ok(())
    }

    /// Resolve every `[[run]]` entry against the top-level defaults.
    pub fn run_specs(&self) -> Vec<RunSpec> {
        self.runs
            .iter()
            .map(|run| RunSpec {
                indicator: run.indicator,
                pair: run.pair.clone().unwrap_or_else(|| self.pair.clone()),
                period: run.period.unwrap_or(self.period),
                unit: run.unit.unwrap_or(self.unit),
            })
            .collect()
    }
}

fn validate_pair(pair: &str) -> Result<()> {
    if pair.trim().is_empty() {
        return Err(Error::Config("pair must not be empty".into()));
    }
    Ok(())
}

pub(crate) fn validate_period(period: usize) -> Result<()> {
    if period == 0 {
        return Err(Error::Config("period must be greater than zero".into()));
    }
    Ok(())
}
