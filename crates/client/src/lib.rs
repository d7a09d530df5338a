pub mod bittrex;

pub use bittrex::{BittrexClient, RequestParams};
