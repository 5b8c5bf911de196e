use crate::core::quote_builder::select_price;
use crate::core::rate_cache::RateCacheManager;
use crate::domain::model::{Cents, Order, OrderShipment};
use crate::domain::ports::ShippingPricing;
use async_trait::async_trait;
use std::sync::Arc;

/// Shipping method priced by one carrier service on top of a base price.
pub struct CarrierShippingMethod {
    rates: Arc<RateCacheManager>,
    service_code: String,
    base_price: Cents,
}

impl CarrierShippingMethod {
    pub fn new(rates: Arc<RateCacheManager>) -> Self {
        let settings = rates.quote_builder().settings();
        let service_code = settings.service_code.clone();
        let base_price = settings.base_price;
        Self {
            rates,
            service_code,
            base_price,
        }
    }

    pub fn service_code(&self) -> &str {
        &self.service_code
    }
}

#[async_trait]
impl ShippingPricing for CarrierShippingMethod {
    async fn compute_price(&self, order: &Order, shipment: &OrderShipment) -> Cents {
        let rates = match self.rates.get_rates(order, shipment, false).await {
            Ok(rates) => rates,
            Err(reason) => {
                // Drop the no-rate marker so the next page load asks again.
                tracing::debug!("Falling back to base price for order {}: {}", order.id, reason);
                self.rates.clear_rate_cache(&order.id).await;
                return self.base_price;
            }
        };

        match select_price(&rates, &self.service_code) {
            Some(price) => self.base_price + price,
            None => {
                tracing::warn!(
                    "Service {} was not quoted for order {}, charging base price only",
                    self.service_code,
                    order.id
                );
                self.base_price
            }
        }
    }

    async fn is_available(&self, order: &Order, shipment: &OrderShipment) -> bool {
        match self.rates.get_rates(order, shipment, false).await {
            Ok(rates) => rates.offers(&self.service_code),
            Err(_) => false,
        }
    }
}
