//! Outbound HTTP adapters.

mod reqwest_asset_fetcher;

pub use reqwest_asset_fetcher::{
    DEFAULT_RELAY_MAX_BYTES, DEFAULT_RELAY_TIMEOUT, ReqwestAssetFetcher,
};
