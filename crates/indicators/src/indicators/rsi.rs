use serde::{Deserialize, Serialize};

/// Closes consumed by the seed window (yielding `SEED_CLOSES - 1` changes).
const SEED_CLOSES: usize = 15;
/// Divisor and weight used by the Wilder averages.
const WILDER_PERIOD: f64 = 14.0;

/// How changes after the seed window are folded into the averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RsiSmoothing {
    /// Walk forward only while each new change is a loss; stop at the first
    /// gain or flat bar. Gains after the seed window never raise the average
    /// gain.
    #[default]
    Reference,
    /// Fold every remaining change, gains and losses alike.
    Wilder,
}

/// RSI (Relative Strength Index) over a closing-price window.
///
/// The seed averages come from the changes between the first 15 closes, each
/// divided by 14. Remaining closes are folded with Wilder's recursion
/// `avg = (avg * 13 + new) / 14` according to [`RsiSmoothing`].
///
/// No guard for a zero average loss: an all-gain window gives 100 and a flat
/// window gives `NaN`.
#[derive(Debug, Clone, Default)]
pub struct RsiIndicator {
    pub smoothing: RsiSmoothing,
}

impl RsiIndicator {
    pub fn new(smoothing: RsiSmoothing) -> Self {
        Self { smoothing }
    }

    /// Compute RSI from a slice of close prices (oldest first).
    pub fn compute(&self, closes: &[f64]) -> f64 {
        let seed = &closes[..closes.len().min(SEED_CLOSES)];
        let changes: Vec<f64> = seed.windows(2).map(|w| w[1] - w[0]).collect();

        let mut avg_gain = changes.iter().filter(|&&c| c > 0.0).sum::<f64>() / WILDER_PERIOD;
        let mut avg_loss = changes
            .iter()
            .filter(|&&c| c < 0.0)
            .map(|c| c.abs())
            .sum::<f64>()
            / WILDER_PERIOD;

        // Empty when the series fits inside the seed window.
        for w in closes.windows(2).skip(SEED_CLOSES - 1) {
            let change = w[1] - w[0];
            if self.smoothing == RsiSmoothing::Reference && change >= 0.0 {
                break;
            }
            let gain = if change > 0.0 { change } else { 0.0 };
            let loss = if change < 0.0 { change.abs() } else { 0.0 };
            avg_gain = (avg_gain * (WILDER_PERIOD - 1.0) + gain) / WILDER_PERIOD;
            avg_loss = (avg_loss * (WILDER_PERIOD - 1.0) + loss) / WILDER_PERIOD;
        }

        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}
