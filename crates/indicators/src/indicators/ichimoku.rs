//! Ichimoku lines. Each is the midpoint of the closing range over a fixed
//! window, so every line here is computed from closes rather than highs/lows.

/// Kijun-sen window.
pub const BASE_LINE_PERIOD: usize = 26;
/// Tenkan-sen window.
pub const CONVERSION_LINE_PERIOD: usize = 9;
/// Senkou Span B window.
pub const LEADING_SPAN_B_PERIOD: usize = 52;

/// `(max + min) / 2` over `closes`. An empty window counts max and min as 0.
pub fn midpoint(closes: &[f64]) -> f64 {
    let high = closes.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let low = closes.iter().copied().reduce(f64::min).unwrap_or(0.0);
    (high + low) / 2.0
}

/// Senkou Span A: mean of the base and conversion lines.
pub fn leading_span_a(base_line: f64, conversion_line: f64) -> f64 {
    (base_line + conversion_line) / 2.0
}
