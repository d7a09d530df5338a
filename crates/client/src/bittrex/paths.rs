//! REST paths served by the exchange.

pub const GET_BALANCE: &str = "/api/v1.1/account/getbalance";
pub const BUY_LIMIT: &str = "/api/v1.1/market/buylimit";
pub const SELL_LIMIT: &str = "/api/v1.1/market/selllimit";
pub const CANCEL: &str = "/api/v1.1/market/cancel";
pub const GET_OPEN_ORDERS: &str = "/api/v1.1/market/getopenorders";
pub const GET_MARKET_SUMMARY: &str = "/api/v1.1/public/getmarketsummary";
pub const GET_ORDER_BOOK: &str = "/api/v1.1/public/getorderbook";
pub const GET_TICKS: &str = "/api/v2.0/pub/market/GetTicks";
