pub mod events;
pub mod package_hooks;
pub mod quote_builder;
pub mod rate_cache;
pub mod shipping_method;

pub use crate::domain::model::{Cents, Order, OrderShipment, RateQuoteSet, RateRequest};
pub use crate::domain::ports::{CacheStore, PackageCalculator, RateApi, ShippingPricing};
pub use crate::utils::error::{Result, Unavailable};
