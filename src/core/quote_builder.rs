use crate::config::MethodSettings;
use crate::core::package_hooks::PackageHookRegistry;
use crate::domain::model::{
    Cents, Dimensions, LengthUnit, MassUnit, Order, OrderShipment, Package, Pickup, RateQuoteSet,
    RateRequest, ShipTo,
};
use crate::domain::ports::RateApi;
use crate::utils::error::Unavailable;
use crate::utils::validation::parse_pickup_time;
use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};
use chrono::{Local, NaiveDate};
use std::sync::Arc;

/// Customer supplied package.
pub const PACKAGING_TYPE_PACKAGE: &str = "02";
pub const PACKAGE_BILL_TYPE_NON_DOCUMENT: &str = "03";
/// Placeholder side length of the default package, in inches.
pub const DEFAULT_PACKAGE_SIDE: f64 = 10.0;

/// Builds carrier rate requests for order shipments and asks the carrier to
/// price every service it offers.
pub struct QuoteBuilder {
    api: Arc<dyn RateApi>,
    settings: MethodSettings,
    hooks: PackageHookRegistry,
}

impl QuoteBuilder {
    pub fn new(api: Arc<dyn RateApi>, settings: MethodSettings) -> Self {
        Self {
            api,
            settings,
            hooks: PackageHookRegistry::default(),
        }
    }

    pub fn with_hooks(mut self, hooks: PackageHookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn settings(&self) -> &MethodSettings {
        &self.settings
    }

    pub async fn build_rates(
        &self,
        order: &Order,
        order_shipment: &OrderShipment,
    ) -> Result<RateQuoteSet, Unavailable> {
        let request = self.build_request(order, order_shipment, Local::now().date_naive())?;

        tracing::debug!(
            "Shopping rates for order {} with {} package(s)",
            order.id,
            request.packages.len()
        );

        self.api.shop_rates(&request).await.map_err(|e| {
            tracing::warn!("Rate request for order {} failed: {}", order.id, e);
            Unavailable::Carrier(e.to_string())
        })
    }

    /// Assembles the full request for a pickup on `pickup_date`.
    pub fn build_request(
        &self,
        order: &Order,
        order_shipment: &OrderShipment,
        pickup_date: NaiveDate,
    ) -> Result<RateRequest, Unavailable> {
        let skeleton = self.request_skeleton(order);
        let mut request = self.add_packages(skeleton, order, order_shipment)?;

        let (hour, minute) = parse_pickup_time(&self.settings.pickup_time).ok_or_else(|| {
            Unavailable::InvalidRequest(format!(
                "invalid pickup time '{}'",
                self.settings.pickup_time
            ))
        })?;

        request.package_bill_type = Some(PACKAGE_BILL_TYPE_NON_DOCUMENT.to_string());
        request.pickup = Some(Pickup {
            date: pickup_date.format("%Y%m%d").to_string(),
            time: format!("{:02}{:02}00", hour, minute),
        });

        Ok(request)
    }

    fn request_skeleton(&self, order: &Order) -> RateRequest {
        let address = &order.shipping_address;
        let company = address
            .company
            .as_ref()
            .filter(|company| !company.trim().is_empty());

        let ship_to = ShipTo {
            company_name: company.cloned(),
            attention_name: match company {
                Some(_) => None,
                None => Some(address.fullname.clone()),
            },
            postal_code: address.postal_code.clone(),
            country_code: address.country_code.clone(),
        };

        RateRequest {
            shipper_postal_code: self.settings.ship_from_postal_code.clone(),
            ship_from_postal_code: self.settings.ship_from_postal_code.clone(),
            ship_to,
            ..RateRequest::default()
        }
    }

    fn add_packages(
        &self,
        request: RateRequest,
        order: &Order,
        order_shipment: &OrderShipment,
    ) -> Result<RateRequest, Unavailable> {
        let Some(hook_name) = &self.settings.package_calculation else {
            return default_packages(request, order_shipment);
        };

        let hook = self.hooks.get(hook_name).ok_or_else(|| {
            tracing::warn!("Package calculation hook '{}' is not registered", hook_name);
            Unavailable::InvalidRequest(format!("unknown package calculation '{}'", hook_name))
        })?;

        hook.calculate(request, order, order_shipment).ok_or_else(|| {
            tracing::debug!("Package calculation '{}' declined order {}", hook_name, order.id);
            Unavailable::PackagesDeclined
        })
    }
}

/// Single package policy: the whole shipment weight in pounds in one
/// placeholder 10x10x10 inch box.
pub fn default_packages(
    mut request: RateRequest,
    order_shipment: &OrderShipment,
) -> Result<RateRequest, Unavailable> {
    let weight = order_shipment.weight.to_pounds();
    // The carrier rejects weightless packages.
    if weight <= 0.0 || !weight.is_finite() {
        return Err(Unavailable::ZeroWeight);
    }

    request.add_package(Package {
        packaging_type: PACKAGING_TYPE_PACKAGE.to_string(),
        weight,
        weight_unit: MassUnit::Lbs,
        dimensions: Some(Dimensions {
            height: DEFAULT_PACKAGE_SIDE,
            width: DEFAULT_PACKAGE_SIDE,
            length: DEFAULT_PACKAGE_SIDE,
            unit: LengthUnit::In,
        }),
    });

    Ok(request)
}

/// Whole cents of a charge, rounded down.
pub fn charge_to_cents(value: &BigDecimal) -> Option<Cents> {
    (value.clone() * BigDecimal::from(100))
        .with_scale_round(0, RoundingMode::Floor)
        .to_i64()
}

/// Price of `service_code` in cents: the sum of its package charges, each
/// floored to whole cents. Only the first entry for the service counts.
/// `None` when the carrier did not quote the service at all.
pub fn select_price(rates: &RateQuoteSet, service_code: &str) -> Option<Cents> {
    let shipment = rates
        .rated_shipments
        .iter()
        .find(|shipment| shipment.service_code == service_code)?;

    let price = shipment
        .rated_packages
        .iter()
        .filter_map(|package| {
            let cents = charge_to_cents(&package.total_charges);
            if cents.is_none() {
                tracing::warn!("Ignoring unrepresentable charge {}", package.total_charges);
            }
            cents
        })
        .sum();

    Some(price)
}
