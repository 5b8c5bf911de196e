use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Monetary amount in minor currency units.
pub type Cents = i64;

/// Renders cents as a decimal amount, e.g. `-150` as `-1.50`.
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

const LB_PER_KG: f64 = 2.204_622_621_85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Lb,
    Oz,
    Kg,
    G,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    pub value: f64,
    pub unit: WeightUnit,
}

impl Weight {
    pub fn new(value: f64, unit: WeightUnit) -> Self {
        Self { value, unit }
    }

    pub fn to_pounds(&self) -> f64 {
        match self.unit {
            WeightUnit::Lb => self.value,
            WeightUnit::Oz => self.value / 16.0,
            WeightUnit::Kg => self.value * LB_PER_KG,
            WeightUnit::G => self.value * LB_PER_KG / 1000.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub fullname: String,
    pub postal_code: String,
    #[serde(default)]
    pub country_code: Option<String>,
}

/// Read-only view of the host's order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub shipping_address: Address,
}

/// Read-only view of one shipment of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderShipment {
    pub id: String,
    pub order_id: String,
    pub weight: Weight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MassUnit {
    Lbs,
    Kgs,
}

impl MassUnit {
    pub fn code(&self) -> &'static str {
        match self {
            MassUnit::Lbs => "LBS",
            MassUnit::Kgs => "KGS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    In,
    Cm,
}

impl LengthUnit {
    pub fn code(&self) -> &'static str {
        match self {
            LengthUnit::In => "IN",
            LengthUnit::Cm => "CM",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: f64,
    pub width: f64,
    pub length: f64,
    pub unit: LengthUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Carrier packaging type code, "02" is a customer supplied package.
    pub packaging_type: String,
    pub weight: f64,
    pub weight_unit: MassUnit,
    pub dimensions: Option<Dimensions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipTo {
    pub company_name: Option<String>,
    pub attention_name: Option<String>,
    pub postal_code: String,
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    /// `YYYYMMDD`
    pub date: String,
    /// `HHMMSS`
    pub time: String,
}

/// A shop-all-services rate request, built fresh for each quote attempt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateRequest {
    pub shipper_postal_code: String,
    pub ship_from_postal_code: String,
    pub ship_to: ShipTo,
    pub packages: Vec<Package>,
    pub package_bill_type: Option<String>,
    pub pickup: Option<Pickup>,
}

impl RateRequest {
    pub fn add_package(&mut self, package: Package) {
        self.packages.push(package);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedPackage {
    pub total_charges: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedShipment {
    pub service_code: String,
    pub rated_packages: Vec<RatedPackage>,
    #[serde(default)]
    pub total_charges: Option<BigDecimal>,
}

/// Carrier response covering every service it can offer for the shipment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateQuoteSet {
    pub rated_shipments: Vec<RatedShipment>,
}

impl RateQuoteSet {
    pub fn offers(&self, service_code: &str) -> bool {
        self.rated_shipments
            .iter()
            .any(|shipment| shipment.service_code == service_code)
    }
}

/// What gets written to the cache for an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "rates", rename_all = "snake_case")]
pub enum CachedRates {
    Quoted(RateQuoteSet),
    Unavailable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(1234), "12.34");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(-50), "-0.50");
        assert_eq!(format_cents(-150), "-1.50");
    }

    #[test]
    fn test_weight_to_pounds() {
        assert_eq!(Weight::new(3.0, WeightUnit::Lb).to_pounds(), 3.0);
        assert_eq!(Weight::new(8.0, WeightUnit::Oz).to_pounds(), 0.5);
        assert!((Weight::new(1.0, WeightUnit::Kg).to_pounds() - 2.2046).abs() < 1e-3);
        assert!((Weight::new(500.0, WeightUnit::G).to_pounds() - 1.1023).abs() < 1e-3);
        assert_eq!(Weight::new(0.0, WeightUnit::Kg).to_pounds(), 0.0);
    }

    #[test]
    fn test_cached_rates_json_shape() {
        let quoted = CachedRates::Quoted(RateQuoteSet {
            rated_shipments: vec![RatedShipment {
                service_code: "03".to_string(),
                rated_packages: vec![RatedPackage {
                    total_charges: BigDecimal::from_str("12.345").unwrap(),
                }],
                total_charges: None,
            }],
        });

        let json = serde_json::to_value(&quoted).unwrap();
        assert_eq!(json["status"], "quoted");
        assert_eq!(json["rates"]["rated_shipments"][0]["service_code"], "03");

        let sentinel = serde_json::to_value(CachedRates::Unavailable).unwrap();
        assert_eq!(sentinel["status"], "unavailable");

        let decoded: CachedRates = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, quoted);
    }

    #[test]
    fn test_offers() {
        let set = RateQuoteSet {
            rated_shipments: vec![RatedShipment {
                service_code: "01".to_string(),
                rated_packages: vec![],
                total_charges: None,
            }],
        };
        assert!(set.offers("01"));
        assert!(!set.offers("03"));
    }
}
