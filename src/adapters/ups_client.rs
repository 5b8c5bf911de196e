//! HTTP client for the carrier's JSON rating endpoint.
//!
//! The carrier collapses single-element arrays into plain objects, so list
//! fields in the response go through [`OneOrMany`].

use crate::config::CarrierCredentials;
use crate::domain::model::{Package, RateQuoteSet, RateRequest, RatedPackage, RatedShipment};
use crate::domain::ports::RateApi;
use crate::utils::error::{RateError, Result};
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

pub const REQUEST_OPTION_SHOP_TIME_IN_TRANSIT: &str = "Shoptimeintransit";

pub struct UpsRateClient {
    endpoint: String,
    credentials: CarrierCredentials,
    client: Client,
}

impl UpsRateClient {
    pub fn new(endpoint: impl Into<String>, credentials: CarrierCredentials) -> Self {
        Self {
            endpoint: endpoint.into(),
            credentials,
            client: Client::new(),
        }
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        credentials: CarrierCredentials,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            credentials,
            client,
        })
    }
}

fn package_json(package: &Package) -> Value {
    let mut body = json!({
        "PackagingType": {"Code": package.packaging_type},
        "PackageWeight": {
            "UnitOfMeasurement": {"Code": package.weight_unit.code()},
            "Weight": package.weight.to_string(),
        },
    });

    if let Some(dimensions) = &package.dimensions {
        body["Dimensions"] = json!({
            "UnitOfMeasurement": {"Code": dimensions.unit.code()},
            "Length": dimensions.length.to_string(),
            "Width": dimensions.width.to_string(),
            "Height": dimensions.height.to_string(),
        });
    }

    body
}

/// Wire body of a shop-all-services request.
pub fn request_body(request: &RateRequest) -> Value {
    let mut ship_to = json!({
        "Address": {"PostalCode": request.ship_to.postal_code},
    });
    if let Some(company) = &request.ship_to.company_name {
        ship_to["Name"] = json!(company);
    }
    if let Some(attention) = &request.ship_to.attention_name {
        ship_to["AttentionName"] = json!(attention);
    }
    if let Some(country) = &request.ship_to.country_code {
        ship_to["Address"]["CountryCode"] = json!(country);
    }

    let mut shipment = json!({
        "Shipper": {"Address": {"PostalCode": request.shipper_postal_code}},
        "ShipFrom": {"Address": {"PostalCode": request.ship_from_postal_code}},
        "ShipTo": ship_to,
        "Package": request.packages.iter().map(package_json).collect::<Vec<_>>(),
    });

    let mut delivery = json!({});
    if let Some(bill_type) = &request.package_bill_type {
        delivery["PackageBillType"] = json!(bill_type);
    }
    if let Some(pickup) = &request.pickup {
        delivery["Pickup"] = json!({"Date": pickup.date, "Time": pickup.time});
    }
    if delivery.as_object().is_some_and(|o| !o.is_empty()) {
        shipment["DeliveryTimeInformation"] = delivery;
    }

    json!({
        "RateRequest": {
            "Request": {"RequestOption": REQUEST_OPTION_SHOP_TIME_IN_TRANSIT},
            "Shipment": shipment,
        }
    })
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RateEnvelope {
    #[serde(rename = "RateResponse")]
    rate_response: Option<RateResponse>,
    #[serde(rename = "Fault")]
    fault: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RateResponse {
    #[serde(rename = "RatedShipment")]
    rated_shipment: Option<OneOrMany<WireRatedShipment>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireRatedShipment {
    service: WireCode,
    rated_package: Option<OneOrMany<WireRatedPackage>>,
    total_charges: Option<WireCharges>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireCode {
    code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireRatedPackage {
    total_charges: WireCharges,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireCharges {
    monetary_value: BigDecimal,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    response: ErrorResponse,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    errors: Vec<WireError>,
}

#[derive(Debug, Deserialize)]
struct WireError {
    code: String,
    message: String,
}

/// Decodes a successful rating response body.
pub fn parse_rate_response(body: &str) -> Result<RateQuoteSet> {
    let envelope: RateEnvelope = serde_json::from_str(body)?;

    if let Some(fault) = envelope.fault {
        return Err(RateError::carrier(format!("Carrier fault: {}", fault)));
    }

    let response = envelope
        .rate_response
        .ok_or_else(|| RateError::carrier("Response has no RateResponse"))?;

    let rated_shipments = response
        .rated_shipment
        .map(OneOrMany::into_vec)
        .unwrap_or_default()
        .into_iter()
        .map(|shipment| RatedShipment {
            service_code: shipment.service.code,
            rated_packages: shipment
                .rated_package
                .map(OneOrMany::into_vec)
                .unwrap_or_default()
                .into_iter()
                .map(|package| RatedPackage {
                    total_charges: package.total_charges.monetary_value,
                })
                .collect(),
            total_charges: shipment.total_charges.map(|c| c.monetary_value),
        })
        .collect();

    Ok(RateQuoteSet { rated_shipments })
}

fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.response.errors.is_empty() => envelope
            .response
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.code, e.message))
            .collect::<Vec<_>>()
            .join("; "),
        _ => format!("HTTP {}", status),
    }
}

#[async_trait]
impl RateApi for UpsRateClient {
    async fn shop_rates(&self, request: &RateRequest) -> Result<RateQuoteSet> {
        tracing::debug!("Requesting rates from: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header("AccessLicenseNumber", &self.credentials.api_key)
            .header("Username", &self.credentials.user)
            .header("Password", &self.credentials.password)
            .json(&request_body(request))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Rate API response status: {}", status);
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RateError::carrier(error_message(status, &body)));
        }

        parse_rate_response(&body)
    }
}
