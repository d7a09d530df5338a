pub mod breakout;
pub mod ichimoku;
pub mod moving_average;
pub mod rsi;

pub use breakout::{is_breakout, BREAKOUT_RATIO};
pub use ichimoku::{
    leading_span_a, midpoint, BASE_LINE_PERIOD, CONVERSION_LINE_PERIOD, LEADING_SPAN_B_PERIOD,
};
pub use moving_average::{sma, EmaClose, EmaIndicator};
pub use rsi::{RsiIndicator, RsiSmoothing};

use common::Tick;

/// Closes of the last `period` ticks, oldest first. Shorter input is returned
/// whole.
pub fn last_closes(ticks: &[Tick], period: usize) -> Vec<f64> {
    last_n(ticks, period).iter().map(|t| t.close).collect()
}

/// The trailing `n` elements of `items` (all of them if there are fewer).
pub fn last_n<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}
