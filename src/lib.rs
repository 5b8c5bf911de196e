pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FileCacheStore, MemoryCacheStore, UpsRateClient};
pub use app::RateEngine;
pub use config::{MethodSettings, TomlConfig};
pub use crate::core::{
    events::{CartEvent, CartEventKind, EventDispatcher},
    package_hooks::PackageHookRegistry,
    quote_builder::{select_price, QuoteBuilder},
    rate_cache::RateCacheManager,
    shipping_method::CarrierShippingMethod,
};
pub use domain::services::list_available_services;
pub use utils::error::{RateError, Result, Unavailable};
