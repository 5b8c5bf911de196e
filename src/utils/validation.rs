use crate::utils::error::{RateError, Result};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// 24 hour clock, colon optional ("09:30" or "0930").
pub const PICKUP_TIME_PATTERN: &str = r"^([01]\d|2[0-3]):?([0-5]\d)$";

static PICKUP_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PICKUP_TIME_PATTERN).expect("pickup time pattern is valid"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(RateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(RateError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(RateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| RateError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_pattern(field_name: &str, value: &str, pattern: &Regex, message: &str) -> Result<()> {
    if !pattern.is_match(value) {
        return Err(RateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: message.to_string(),
        });
    }
    Ok(())
}

pub fn validate_pickup_time(field_name: &str, value: &str) -> Result<()> {
    validate_pattern(
        field_name,
        value,
        &PICKUP_TIME_RE,
        "Incorrect time. Requires 24 hour HH:MM format.",
    )
}

/// Splits a validated pickup time into hour and minute.
pub fn parse_pickup_time(value: &str) -> Option<(u32, u32)> {
    let caps = PICKUP_TIME_RE.captures(value)?;
    let hour = caps.get(1)?.as_str().parse().ok()?;
    let minute = caps.get(2)?.as_str().parse().ok()?;
    Some((hour, minute))
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(RateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("carrier.endpoint", "https://example.com").is_ok());
        assert!(validate_url("carrier.endpoint", "http://example.com").is_ok());
        assert!(validate_url("carrier.endpoint", "").is_err());
        assert!(validate_url("carrier.endpoint", "invalid-url").is_err());
        assert!(validate_url("carrier.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_pickup_time() {
        assert!(validate_pickup_time("pickup_time", "09:30").is_ok());
        assert!(validate_pickup_time("pickup_time", "0930").is_ok());
        assert!(validate_pickup_time("pickup_time", "23:59").is_ok());
        assert!(validate_pickup_time("pickup_time", "00:00").is_ok());
        assert!(validate_pickup_time("pickup_time", "25:00").is_err());
        assert!(validate_pickup_time("pickup_time", "9:3").is_err());
        assert!(validate_pickup_time("pickup_time", "12:60").is_err());
        assert!(validate_pickup_time("pickup_time", "").is_err());
    }

    #[test]
    fn test_parse_pickup_time() {
        assert_eq!(parse_pickup_time("09:30"), Some((9, 30)));
        assert_eq!(parse_pickup_time("1745"), Some((17, 45)));
        assert_eq!(parse_pickup_time("24:00"), None);
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("method.zip", "90210").is_ok());
        assert!(validate_non_empty_string("method.zip", "   ").is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("cache.backend", "memory", &["memory", "file"]).is_ok());
        assert!(validate_one_of("cache.backend", "redis", &["memory", "file"]).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("03".to_string());
        let absent: Option<String> = None;
        assert_eq!(validate_required_field("method.service", &present).unwrap(), "03");
        assert!(matches!(
            validate_required_field("method.service", &absent),
            Err(RateError::MissingConfigError { .. })
        ));
    }
}
