//! Wires configuration, adapters and the rate core into a ready shipping
//! method plus the cart event subscriptions that keep its cache honest.

use crate::adapters::{FileCacheStore, MemoryCacheStore, UpsRateClient};
use crate::config::TomlConfig;
use crate::core::events::EventDispatcher;
use crate::core::package_hooks::PackageHookRegistry;
use crate::core::quote_builder::QuoteBuilder;
use crate::core::rate_cache::RateCacheManager;
use crate::core::shipping_method::CarrierShippingMethod;
use crate::domain::ports::{CacheStore, RateApi};
use crate::utils::error::{RateError, Result};
use std::sync::Arc;
use std::time::Duration;

pub struct RateEngine {
    pub rates: Arc<RateCacheManager>,
    pub method: CarrierShippingMethod,
    pub events: EventDispatcher,
}

impl RateEngine {
    pub fn from_config(config: &TomlConfig, hooks: PackageHookRegistry) -> Result<Self> {
        let api: Arc<dyn RateApi> = Arc::new(match config.timeout_seconds() {
            Some(seconds) => UpsRateClient::with_timeout(
                config.carrier.endpoint.clone(),
                config.credentials(),
                Duration::from_secs(seconds),
            )?,
            None => UpsRateClient::new(config.carrier.endpoint.clone(), config.credentials()),
        });

        Self::with_parts(config, cache_store(config)?, api, hooks)
    }

    /// Builds the engine around externally supplied store and carrier API.
    pub fn with_parts(
        config: &TomlConfig,
        store: Arc<dyn CacheStore>,
        api: Arc<dyn RateApi>,
        hooks: PackageHookRegistry,
    ) -> Result<Self> {
        let settings = config.method_settings()?;

        if let Some(name) = &settings.package_calculation {
            if hooks.get(name).is_none() {
                return Err(RateError::InvalidConfigValueError {
                    field: "method.package_calculation".to_string(),
                    value: name.clone(),
                    reason: format!("No such hook. Registered hooks: {}", hooks.names().join(", ")),
                });
            }
        }

        let quotes = QuoteBuilder::new(api, settings).with_hooks(hooks);
        let rates = Arc::new(
            RateCacheManager::new(store, quotes).with_namespace(config.cache_namespace()),
        );
        let events = EventDispatcher::default().subscribe_all(rates.clone());
        let method = CarrierShippingMethod::new(rates.clone());

        tracing::debug!(
            "Rate engine ready: service {}, {} cache, {} event subscription(s)",
            method.service_code(),
            config.cache_backend(),
            events.len()
        );

        Ok(Self {
            rates,
            method,
            events,
        })
    }
}

pub fn cache_store(config: &TomlConfig) -> Result<Arc<dyn CacheStore>> {
    match config.cache_backend() {
        "file" => {
            let path = config.cache_path().ok_or_else(|| RateError::MissingConfigError {
                field: "cache.path".to_string(),
            })?;
            Ok(Arc::new(FileCacheStore::new(path)))
        }
        "memory" => Ok(Arc::new(MemoryCacheStore::new())),
        other => Err(RateError::InvalidConfigValueError {
            field: "cache.backend".to_string(),
            value: other.to_string(),
            reason: "Unsupported cache backend".to_string(),
        }),
    }
}
