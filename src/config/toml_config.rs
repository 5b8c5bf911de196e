use crate::config::{CarrierCredentials, MethodSettings};
use crate::domain::model::Cents;
use crate::domain::services;
use crate::utils::error::{RateError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

pub const CACHE_BACKENDS: &[&str] = &["memory", "file"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub carrier: CarrierConfig,
    pub method: MethodConfig,
    pub cache: Option<CacheConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarrierConfig {
    pub endpoint: String,
    pub api_key: String,
    pub user: String,
    pub password: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodConfig {
    pub service: Option<String>,
    pub package_calculation: Option<String>,
    pub pickup_time: Option<String>,
    pub zip: Option<String>,
    pub base_price: Option<Cents>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub backend: Option<String>,
    pub path: Option<String>,
    pub namespace: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RateError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RateError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left as written so validation can point at them.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("carrier.endpoint", &self.carrier.endpoint)?;
        validation::validate_non_empty_string("carrier.api_key", &self.carrier.api_key)?;
        validation::validate_non_empty_string("carrier.user", &self.carrier.user)?;
        validation::validate_non_empty_string("carrier.password", &self.carrier.password)?;

        let service = validation::validate_required_field("method.service", &self.method.service)?;
        validation::validate_one_of("method.service", service, &services::service_codes())?;

        let pickup_time =
            validation::validate_required_field("method.pickup_time", &self.method.pickup_time)?;
        validation::validate_pickup_time("method.pickup_time", pickup_time)?;

        let zip = validation::validate_required_field("method.zip", &self.method.zip)?;
        validation::validate_non_empty_string("method.zip", zip)?;

        if let Some(base_price) = self.method.base_price {
            if base_price < 0 {
                return Err(RateError::InvalidConfigValueError {
                    field: "method.base_price".to_string(),
                    value: base_price.to_string(),
                    reason: "Base price cannot be negative".to_string(),
                });
            }
        }

        if let Some(cache) = &self.cache {
            if let Some(backend) = &cache.backend {
                validation::validate_one_of("cache.backend", backend, CACHE_BACKENDS)?;
            }
            if self.cache_backend() == "file" {
                validation::validate_required_field("cache.path", &cache.path)?;
            }
        }

        Ok(())
    }

    pub fn method_settings(&self) -> Result<MethodSettings> {
        self.validate_config()?;

        Ok(MethodSettings {
            service_code: validation::validate_required_field("method.service", &self.method.service)?
                .clone(),
            package_calculation: self
                .method
                .package_calculation
                .clone()
                .filter(|name| !name.trim().is_empty()),
            pickup_time: validation::validate_required_field(
                "method.pickup_time",
                &self.method.pickup_time,
            )?
            .clone(),
            ship_from_postal_code: validation::validate_required_field("method.zip", &self.method.zip)?
                .clone(),
            base_price: self.method.base_price.unwrap_or(0),
        })
    }

    pub fn credentials(&self) -> CarrierCredentials {
        CarrierCredentials {
            api_key: self.carrier.api_key.clone(),
            user: self.carrier.user.clone(),
            password: self.carrier.password.clone(),
        }
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.carrier.timeout_seconds
    }

    pub fn cache_backend(&self) -> &str {
        self.cache
            .as_ref()
            .and_then(|c| c.backend.as_deref())
            .unwrap_or("memory")
    }

    pub fn cache_path(&self) -> Option<&str> {
        self.cache.as_ref().and_then(|c| c.path.as_deref())
    }

    pub fn cache_namespace(&self) -> &str {
        self.cache
            .as_ref()
            .and_then(|c| c.namespace.as_deref())
            .unwrap_or(crate::core::rate_cache::DEFAULT_NAMESPACE)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
