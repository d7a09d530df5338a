use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use common::{ApiResponse, BookSide, Result, Tick, TickInterval, TickSource};

use super::paths;
use super::rest::{BittrexClient, RequestParams};

/// Typed wrappers for the endpoints the bot uses. Response bodies are passed
/// through untouched; only the envelope is decoded.
impl BittrexClient {
    /// Balance of one currency on the account.
    pub async fn get_balance(&self, currency: &str) -> Result<ApiResponse<Value>> {
        let params = self.authenticated(RequestParams::new().with("currency", currency));
        self.request_envelope(paths::GET_BALANCE, &params).await
    }

    /// Place a limit buy. Order semantics are the exchange's; parameters are
    /// forwarded verbatim.
    pub async fn buy_limit(
        &self,
        market: &str,
        quantity: f64,
        rate: f64,
    ) -> Result<ApiResponse<Value>> {
        debug!(market, quantity, rate, "Placing limit buy");
        let params = self.authenticated(
            RequestParams::new()
                .with("market", market)
                .with("quantity", quantity)
                .with("rate", rate),
        );
        self.request_envelope(paths::BUY_LIMIT, &params).await
    }

    pub async fn sell_limit(
        &self,
        market: &str,
        quantity: f64,
        rate: f64,
    ) -> Result<ApiResponse<Value>> {
        debug!(market, quantity, rate, "Placing limit sell");
        let params = self.authenticated(
            RequestParams::new()
                .with("market", market)
                .with("quantity", quantity)
                .with("rate", rate),
        );
        self.request_envelope(paths::SELL_LIMIT, &params).await
    }

    pub async fn cancel(&self, order_id: Uuid) -> Result<ApiResponse<Value>> {
        debug!(%order_id, "Cancelling order");
        let params = self.authenticated(RequestParams::new().with("uuid", order_id));
        self.request_envelope(paths::CANCEL, &params).await
    }

    pub async fn get_open_orders(&self, market: &str) -> Result<ApiResponse<Value>> {
        let params = self.authenticated(RequestParams::new().with("market", market));
        self.request_envelope(paths::GET_OPEN_ORDERS, &params).await
    }

    /// Public: last 24h summary for one market.
    pub async fn get_market_summary(&self, market: &str) -> Result<ApiResponse<Value>> {
        let params = RequestParams::new().with("market", market);
        self.request_envelope(paths::GET_MARKET_SUMMARY, &params).await
    }

    /// Public: order book for one market.
    pub async fn get_order_book(&self, market: &str, side: BookSide) -> Result<ApiResponse<Value>> {
        let params = RequestParams::new()
            .with("market", market)
            .with("type", side);
        self.request_envelope(paths::GET_ORDER_BOOK, &params).await
    }
}

#[async_trait]
impl TickSource for BittrexClient {
    async fn get_ticks(&self, market: &str, unit: TickInterval) -> Result<ApiResponse<Vec<Tick>>> {
        let params = RequestParams::new()
            .with("marketName", market)
            .with("tickInterval", unit);
        self.request_envelope(paths::GET_TICKS, &params).await
    }
}
