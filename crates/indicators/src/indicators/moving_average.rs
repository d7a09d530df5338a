use serde::{Deserialize, Serialize};

/// Simple moving average over `closes`, divided by the *requested* period.
///
/// When fewer than `period` closes are available the result is diluted
/// proportionally (`sum / period`, not `sum / closes.len()`). Callers that
/// need an undiluted mean must check the window length themselves.
pub fn sma(closes: &[f64], period: usize) -> f64 {
    closes.iter().sum::<f64>() / period as f64
}

/// Which close the EMA step weights by `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmaClose {
    /// The most recent close in the window.
    #[default]
    Latest,
    /// No close at all, so the result is always `NaN`.
    Undefined,
}

/// Single-step exponential moving average seeded from the SMA.
///
/// Computes `close * k + seed * (1 - k)` with `k = 2 / (period + 1)`.
#[derive(Debug, Clone)]
pub struct EmaIndicator {
    pub period: usize,
    pub close: EmaClose,
}

impl EmaIndicator {
    pub fn new(period: usize, close: EmaClose) -> Self {
        assert!(period > 0, "EMA period must be > 0");
        Self { period, close }
    }

    pub fn smoothing(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }

    /// `closes` is oldest first; `seed` is the SMA of the same window.
    /// An empty window yields `NaN`.
    pub fn compute(&self, closes: &[f64], seed: f64) -> f64 {
        let close = match self.close {
            EmaClose::Latest => closes.last().copied().unwrap_or(f64::NAN),
            EmaClose::Undefined => f64::NAN,
        };
        let k = self.smoothing();
        close * k + seed * (1.0 - k)
    }
}
