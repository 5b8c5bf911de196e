use carrier_rates::domain::model::{Address, Order, OrderShipment, Weight, WeightUnit};
use carrier_rates::domain::ports::ShippingPricing;
use carrier_rates::{
    CartEvent, CartEventKind, FileCacheStore, PackageHookRegistry, RateEngine, TomlConfig,
    Unavailable,
};
use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

fn config_for(endpoint: &str, cache_dir: &str) -> TomlConfig {
    let content = format!(
        r#"
[carrier]
endpoint = "{}"
api_key = "license"
user = "shipper"
password = "secret"
timeout_seconds = 5

[method]
service = "03"
pickup_time = "14:00"
zip = "18301"
base_price = 100

[cache]
backend = "file"
path = "{}"
namespace = "shop"
"#,
        endpoint,
        cache_dir.replace('\\', "/")
    );
    TomlConfig::from_toml_str(&content).unwrap()
}

fn order(id: &str) -> Order {
    Order {
        id: id.to_string(),
        shipping_address: Address {
            company: Some("Initech".to_string()),
            fullname: "Peter Gibbons".to_string(),
            postal_code: "78701".to_string(),
            country_code: Some("US".to_string()),
        },
    }
}

fn shipment(order_id: &str, ounces: f64) -> OrderShipment {
    OrderShipment {
        id: format!("{}-1", order_id),
        order_id: order_id.to_string(),
        weight: Weight::new(ounces, WeightUnit::Oz),
    }
}

fn rate_response() -> serde_json::Value {
    json!({
        "RateResponse": {
            "Response": {"ResponseStatus": {"Code": "1", "Description": "Success"}},
            "RatedShipment": [
                {
                    "Service": {"Code": "03"},
                    "TotalCharges": {"CurrencyCode": "USD", "MonetaryValue": "12.345"},
                    "RatedPackage": {"TotalCharges": {"CurrencyCode": "USD", "MonetaryValue": "12.345"}}
                },
                {
                    "Service": {"Code": "01"},
                    "TotalCharges": {"CurrencyCode": "USD", "MonetaryValue": "9.99"},
                    "RatedPackage": [{"TotalCharges": {"CurrencyCode": "USD", "MonetaryValue": "9.99"}}]
                }
            ]
        }
    })
}

#[tokio::test]
async fn test_end_to_end_pricing_uses_cache() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/rating")
            .header("AccessLicenseNumber", "license")
            .body_contains("\"Name\":\"Initech\"")
            .body_contains("\"PostalCode\":\"78701\"")
            .body_contains("\"Time\":\"140000\"");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(rate_response());
    });

    let config = config_for(&server.url("/rating"), temp_dir.path().to_str().unwrap());
    let engine = RateEngine::from_config(&config, PackageHookRegistry::default()).unwrap();

    assert!(engine.method.is_available(&order("1001"), &shipment("1001", 24.0)).await);
    assert_eq!(
        engine.method.compute_price(&order("1001"), &shipment("1001", 24.0)).await,
        100 + 1234
    );

    api_mock.assert_hits(1);
    assert!(temp_dir.path().join("shop-rate1001.json").exists());
}

#[tokio::test]
async fn test_cache_survives_engine_restart() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/rating");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(rate_response());
    });

    let config = config_for(&server.url("/rating"), temp_dir.path().to_str().unwrap());

    let first = RateEngine::from_config(&config, PackageHookRegistry::default()).unwrap();
    let rates = first.rates.get_rates(&order("7"), &shipment("7", 16.0), false).await.unwrap();
    drop(first);

    let second = RateEngine::from_config(&config, PackageHookRegistry::default()).unwrap();
    let cached = second.rates.get_rates(&order("7"), &shipment("7", 16.0), false).await.unwrap();

    assert_eq!(rates, cached);
    api_mock.assert_hits(1);
}

#[tokio::test]
async fn test_cart_events_trigger_requote() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/rating");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(rate_response());
    });

    let config = config_for(&server.url("/rating"), temp_dir.path().to_str().unwrap());
    let engine = RateEngine::from_config(&config, PackageHookRegistry::default()).unwrap();

    engine.rates.get_rates(&order("A"), &shipment("A", 10.0), false).await.unwrap();
    engine.rates.get_rates(&order("B"), &shipment("B", 10.0), false).await.unwrap();
    api_mock.assert_hits(2);

    let handled = engine
        .events
        .dispatch(&CartEvent::new(CartEventKind::OrderItemUpdated, "A"))
        .await;
    assert_eq!(handled, 1);
    assert!(!temp_dir.path().join("shop-rate_41.json").exists());
    assert!(temp_dir.path().join("shop-rate_42.json").exists());

    engine.rates.get_rates(&order("A"), &shipment("A", 20.0), false).await.unwrap();
    engine.rates.get_rates(&order("B"), &shipment("B", 10.0), false).await.unwrap();
    api_mock.assert_hits(3);
}

#[tokio::test]
async fn test_carrier_error_marks_method_unavailable() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/rating");
        then.status(401)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "response": {"errors": [{"code": "250002", "message": "Invalid Authentication Information."}]}
            }));
    });

    let config = config_for(&server.url("/rating"), temp_dir.path().to_str().unwrap());
    let engine = RateEngine::from_config(&config, PackageHookRegistry::default()).unwrap();

    let result = engine.rates.get_rates(&order("9"), &shipment("9", 8.0), false).await;
    assert!(matches!(result, Err(Unavailable::Carrier(ref message)) if message.contains("250002")));

    assert!(!engine.method.is_available(&order("9"), &shipment("9", 8.0)).await);
    assert_eq!(engine.method.compute_price(&order("9"), &shipment("9", 8.0)).await, 100);
    api_mock.assert_hits(1);
}

#[tokio::test]
async fn test_zero_weight_never_reaches_carrier() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/rating");
        then.status(200).json_body(rate_response());
    });

    let config = config_for(&server.url("/rating"), temp_dir.path().to_str().unwrap());
    let engine = RateEngine::from_config(&config, PackageHookRegistry::default()).unwrap();

    let result = engine.rates.get_rates(&order("0"), &shipment("0", 0.0), false).await;
    assert_eq!(result, Err(Unavailable::ZeroWeight));
    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_unregistered_hook_is_rejected_at_startup() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = config_for("https://rates.example.com", temp_dir.path().to_str().unwrap());
    config.method.package_calculation = Some("by_volume".to_string());

    let store = Arc::new(FileCacheStore::new(temp_dir.path()));
    let api = Arc::new(carrier_rates::UpsRateClient::new(
        "https://rates.example.com",
        config.credentials(),
    ));

    assert!(RateEngine::with_parts(&config, store.clone(), api.clone(), PackageHookRegistry::default()).is_err());

    let hooks = PackageHookRegistry::new().register(
        "by_volume",
        |request: carrier_rates::domain::model::RateRequest, _: &Order, _: &OrderShipment| Some(request),
    );
    assert!(RateEngine::with_parts(&config, store, api, hooks).is_ok());
}

#[tokio::test]
async fn test_lookalike_order_ids_are_quoted_separately() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/rating");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(rate_response());
    });

    let config = config_for(&server.url("/rating"), temp_dir.path().to_str().unwrap());
    let engine = RateEngine::from_config(&config, PackageHookRegistry::default()).unwrap();

    engine.rates.get_rates(&order("A.1"), &shipment("A.1", 10.0), false).await.unwrap();
    engine.rates.get_rates(&order("A_1"), &shipment("A_1", 10.0), false).await.unwrap();
    api_mock.assert_hits(2);

    engine.rates.clear_rate_cache("A_1").await;
    engine.rates.get_rates(&order("A.1"), &shipment("A.1", 10.0), false).await.unwrap();
    api_mock.assert_hits(2);
}
