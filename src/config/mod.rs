#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, QuoteInput};
pub use toml_config::TomlConfig;

use crate::domain::model::Cents;

/// Resolved settings of one carrier shipping method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSettings {
    pub service_code: String,
    /// Name of a registered package calculation hook.
    pub package_calculation: Option<String>,
    /// `HH:MM` or `HHMM`, 24 hour clock.
    pub pickup_time: String,
    pub ship_from_postal_code: String,
    /// Charged on top of the carrier quote.
    pub base_price: Cents,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarrierCredentials {
    pub api_key: String,
    pub user: String,
    pub password: String,
}
