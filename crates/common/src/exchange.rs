use async_trait::async_trait;

use crate::{ApiResponse, Result, Tick, TickInterval};

/// Source of historical candles for the indicator engine.
///
/// `BittrexClient` implements this against the live REST API. Tests supply
/// canned series. The indicator engine only ever reaches the network through
/// this trait.
#[async_trait]
pub trait TickSource: Send + Sync {
    /// Fetch the full tick history for a market, oldest first.
    ///
    /// A `success: false` envelope is returned as `Ok`, unchanged.
    async fn get_ticks(&self, market: &str, unit: TickInterval) -> Result<ApiResponse<Vec<Tick>>>;
}
