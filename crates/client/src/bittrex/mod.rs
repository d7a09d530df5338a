mod endpoints;
pub mod paths;
mod rest;

pub use rest::{BittrexClient, RequestParams};
