use common::Tick;

use super::last_n;

/// Share of full-range bullish candles needed to call a breakout.
pub const BREAKOUT_RATIO: f64 = 0.75;

/// True when at least 75% of the last `period` ticks closed at their high
/// after opening at their low.
///
/// The ratio is taken against `period`, so a short series needs
/// proportionally more hits.
pub fn is_breakout(ticks: &[Tick], period: usize) -> bool {
    let hits = last_n(ticks, period)
        .iter()
        .filter(|t| t.is_full_range_bullish())
        .count();
    hits as f64 / period as f64 >= BREAKOUT_RATIO
}
