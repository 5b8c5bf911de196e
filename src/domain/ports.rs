use crate::domain::model::{Cents, Order, OrderShipment, RateQuoteSet, RateRequest};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Shared keyed store with per-entry expiry.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns `None` for absent or expired keys.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()>;
    /// Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// External rate-quotation API in "shop all services" mode.
#[async_trait]
pub trait RateApi: Send + Sync {
    async fn shop_rates(&self, request: &RateRequest) -> Result<RateQuoteSet>;
}

/// Custom package calculation. Receives the request skeleton and returns it
/// with packages added, or `None` when the shipment cannot be quoted.
pub trait PackageCalculator: Send + Sync {
    fn calculate(
        &self,
        request: RateRequest,
        order: &Order,
        order_shipment: &OrderShipment,
    ) -> Option<RateRequest>;
}

impl<F> PackageCalculator for F
where
    F: Fn(RateRequest, &Order, &OrderShipment) -> Option<RateRequest> + Send + Sync,
{
    fn calculate(
        &self,
        request: RateRequest,
        order: &Order,
        order_shipment: &OrderShipment,
    ) -> Option<RateRequest> {
        self(request, order, order_shipment)
    }
}

/// Pricing strategy the host checkout consults for a shipping method.
#[async_trait]
pub trait ShippingPricing: Send + Sync {
    async fn compute_price(&self, order: &Order, shipment: &OrderShipment) -> Cents;
    async fn is_available(&self, order: &Order, shipment: &OrderShipment) -> bool;
}
