use std::sync::Arc;

use tracing::{debug, warn};

use common::{ApiResponse, Error, Result, Tick, TickInterval, TickSource};

use crate::config::{validate_period, Indicator, IndicatorConfig, RunSpec};
use crate::indicators::{
    is_breakout, last_closes, leading_span_a, midpoint, sma, EmaClose, EmaIndicator,
    RsiIndicator, RsiSmoothing, BASE_LINE_PERIOD, CONVERSION_LINE_PERIOD, LEADING_SPAN_B_PERIOD,
};

/// Behaviour switches for the engine, taken from [`IndicatorConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineSettings {
    pub ema_close: EmaClose,
    pub rsi_smoothing: RsiSmoothing,
    pub strict_envelope: bool,
}

impl From<&IndicatorConfig> for EngineSettings {
    fn from(cfg: &IndicatorConfig) -> Self {
        Self {
            ema_close: cfg.ema_close,
            rsi_smoothing: cfg.rsi_smoothing,
            strict_envelope: cfg.strict_envelope,
        }
    }
}

/// Result of one indicator evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    Number(f64),
    Flag(bool),
}

impl std::fmt::Display for IndicatorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndicatorValue::Number(v) => write!(f, "{v}"),
            IndicatorValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// Fetches ticks through a [`TickSource`] and derives indicators from them.
///
/// Every call fetches fresh data; nothing is cached between calls. Fetches
/// within one calculation are awaited one after another.
#[derive(Clone)]
pub struct IndicatorEngine {
    source: Arc<dyn TickSource>,
    settings: EngineSettings,
}

impl IndicatorEngine {
    pub fn new(source: Arc<dyn TickSource>, settings: EngineSettings) -> Self {
        Self { source, settings }
    }

    /// Raw tick envelope, exactly as the exchange returned it.
    pub async fn get_ticks(&self, pair: &str, unit: TickInterval) -> Result<ApiResponse<Vec<Tick>>> {
        self.source.get_ticks(pair, unit).await
    }

    /// Closes of the last `period` ticks, oldest first.
    pub async fn get_closing_prices(
        &self,
        pair: &str,
        period: usize,
        unit: TickInterval,
    ) -> Result<Vec<f64>> {
        let ticks = self.tick_series(pair, unit).await?;
        Ok(last_closes(&ticks, period))
    }

    /// `sum(closes) / period`. Diluted when fewer than `period` ticks exist.
    pub async fn calculate_sma(&self, pair: &str, period: usize, unit: TickInterval) -> Result<f64> {
        validate_period(period)?;
        let closes = self.get_closing_prices(pair, period, unit).await?;
        Ok(sma(&closes, period))
    }

    pub async fn calculate_ema(&self, pair: &str, period: usize, unit: TickInterval) -> Result<f64> {
        validate_period(period)?;
        let closes = self.get_closing_prices(pair, period, unit).await?;
        let previous_sma = self.calculate_sma(pair, period, unit).await?;
        Ok(EmaIndicator::new(period, self.settings.ema_close).compute(&closes, previous_sma))
    }

    /// RSI over `3 * period` closes. See [`RsiIndicator`] for the windowing.
    pub async fn calculate_rsi(&self, pair: &str, period: usize, unit: TickInterval) -> Result<f64> {
        validate_period(period)?;
        let closes = self
            .get_closing_prices(pair, period.saturating_mul(3), unit)
            .await?;
        Ok(RsiIndicator::new(self.settings.rsi_smoothing).compute(&closes))
    }

    /// Kijun-sen: midpoint of the last 26 closes.
    pub async fn calculate_base_line(&self, pair: &str, unit: TickInterval) -> Result<f64> {
        self.midpoint_over(pair, BASE_LINE_PERIOD, unit).await
    }

    /// Tenkan-sen: midpoint of the last 9 closes.
    pub async fn calculate_conversion_line(&self, pair: &str, unit: TickInterval) -> Result<f64> {
        self.midpoint_over(pair, CONVERSION_LINE_PERIOD, unit).await
    }

    /// Senkou Span A. Fetches the base line, then the conversion line.
    pub async fn calculate_leading_span_a(&self, pair: &str, unit: TickInterval) -> Result<f64> {
        let base_line = self.calculate_base_line(pair, unit).await?;
        let conversion_line = self.calculate_conversion_line(pair, unit).await?;
        Ok(leading_span_a(base_line, conversion_line))
    }

    /// Senkou Span B: midpoint of the last 52 closes.
    pub async fn calculate_leading_span_b(&self, pair: &str, unit: TickInterval) -> Result<f64> {
        self.midpoint_over(pair, LEADING_SPAN_B_PERIOD, unit).await
    }

    pub async fn find_breakout(&self, pair: &str, period: usize, unit: TickInterval) -> Result<bool> {
        validate_period(period)?;
        let ticks = self.tick_series(pair, unit).await?;
        Ok(is_breakout(&ticks, period))
    }

    /// Evaluate one configured run.
    pub async fn evaluate(&self, run: &RunSpec) -> Result<IndicatorValue> {
        let RunSpec {
            indicator,
            pair,
            period,
            unit,
        } = run;
        let (pair, period, unit) = (pair.as_str(), *period, *unit);

        let value = match indicator {
            Indicator::Sma => IndicatorValue::Number(self.calculate_sma(pair, period, unit).await?),
            Indicator::Ema => IndicatorValue::Number(self.calculate_ema(pair, period, unit).await?),
            Indicator::Rsi => IndicatorValue::Number(self.calculate_rsi(pair, period, unit).await?),
            Indicator::BaseLine => IndicatorValue::Number(self.calculate_base_line(pair, unit).await?),
            Indicator::ConversionLine => {
                IndicatorValue::Number(self.calculate_conversion_line(pair, unit).await?)
            }
            Indicator::LeadingSpanA => {
                IndicatorValue::Number(self.calculate_leading_span_a(pair, unit).await?)
            }
            Indicator::LeadingSpanB => {
                IndicatorValue::Number(self.calculate_leading_span_b(pair, unit).await?)
            }
            Indicator::Breakout => IndicatorValue::Flag(self.find_breakout(pair, period, unit).await?),
        };
        debug!(%indicator, pair, period, %unit, %value, "Indicator evaluated");
        Ok(value)
    }

    async fn midpoint_over(&self, pair: &str, period: usize, unit: TickInterval) -> Result<f64> {
        let closes = self.get_closing_prices(pair, period, unit).await?;
        Ok(midpoint(&closes))
    }

    /// Tick list from the envelope. A failed envelope becomes an empty series,
    /// or `Error::Exchange` when `strict_envelope` is set.
    async fn tick_series(&self, pair: &str, unit: TickInterval) -> Result<Vec<Tick>> {
        let resp = self.source.get_ticks(pair, unit).await?;
        if !resp.success {
            if self.settings.strict_envelope {
                return Err(Error::Exchange(resp.message));
            }
            warn!(pair, %unit, message = %resp.message, "Tick request failed; using empty series");
            return Ok(Vec::new());
        }
        Ok(resp.result.unwrap_or_default())
    }
}
