use crate::core::events::{CartEvent, CartEventListener};
use crate::core::quote_builder::QuoteBuilder;
use crate::domain::model::{CachedRates, Order, OrderShipment, RateQuoteSet};
use crate::domain::ports::CacheStore;
use crate::utils::error::Unavailable;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_NAMESPACE: &str = "carrier_rates";
pub const RATE_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Per-order cache of carrier quotes in front of a [`QuoteBuilder`].
///
/// Keys depend on the order id only, so anything that changes the packages
/// of an order must call [`RateCacheManager::clear_rate_cache`]. Two
/// concurrent misses for the same order both reach the carrier; the later
/// write wins.
pub struct RateCacheManager {
    store: Arc<dyn CacheStore>,
    quotes: QuoteBuilder,
    namespace: String,
    ttl: Duration,
}

impl RateCacheManager {
    pub fn new(store: Arc<dyn CacheStore>, quotes: QuoteBuilder) -> Self {
        Self {
            store,
            quotes,
            namespace: DEFAULT_NAMESPACE.to_string(),
            ttl: RATE_CACHE_TTL,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn quote_builder(&self) -> &QuoteBuilder {
        &self.quotes
    }

    pub fn cache_key(&self, order_id: &str) -> String {
        format!("{}-rate{}", self.namespace, order_id)
    }

    pub async fn get_rates(
        &self,
        order: &Order,
        order_shipment: &OrderShipment,
        force_bypass_cache: bool,
    ) -> Result<RateQuoteSet, Unavailable> {
        let key = self.cache_key(&order.id);

        if !force_bypass_cache {
            match self.read(&key).await {
                Some(CachedRates::Quoted(rates)) => {
                    tracing::debug!("Rate cache hit for order {}", order.id);
                    return Ok(rates);
                }
                Some(CachedRates::Unavailable) => {
                    tracing::debug!("Cached no-rate marker for order {}", order.id);
                    return Err(Unavailable::NotQuoted);
                }
                None => {}
            }
        }

        let outcome = self.quotes.build_rates(order, order_shipment).await;
        let entry = match &outcome {
            Ok(rates) => CachedRates::Quoted(rates.clone()),
            Err(reason) => {
                tracing::info!("No rates for order {}: {}", order.id, reason);
                CachedRates::Unavailable
            }
        };

        if let Err(e) = self.write(&key, &entry).await {
            tracing::error!("An error occurred saving rates to cache for order {}: {}", order.id, e);
            return Err(Unavailable::CachePersist(e.to_string()));
        }

        outcome
    }

    /// Removes the order's entry. Absent entries and store errors are not
    /// reported to the caller.
    pub async fn clear_rate_cache(&self, order_id: &str) {
        let key = self.cache_key(order_id);
        match self.store.delete(&key).await {
            Ok(()) => tracing::debug!("Cleared rate cache for order {}", order_id),
            Err(e) => tracing::warn!("Could not clear rate cache for order {}: {}", order_id, e),
        }
    }

    async fn read(&self, key: &str) -> Option<CachedRates> {
        let bytes = match self.store.get(key).await {
            Ok(bytes) => bytes?,
            Err(e) => {
                tracing::warn!("Rate cache read failed for {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Discarding undecodable rate cache entry {}: {}", key, e);
                None
            }
        }
    }

    async fn write(&self, key: &str, entry: &CachedRates) -> crate::utils::error::Result<()> {
        let bytes = serde_json::to_vec(entry)?;
        self.store.set(key, &bytes, self.ttl).await
    }
}

#[async_trait]
impl CartEventListener for RateCacheManager {
    async fn on_event(&self, event: &CartEvent) {
        self.clear_rate_cache(&event.order_id).await;
    }
}
