use crate::utils::error::{DiagnosisError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(DiagnosisError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(DiagnosisError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(DiagnosisError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| DiagnosisError::MissingConfig {
        field: field_name.to_string(),
    })
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(DiagnosisError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("backend.base_url", "https://example.com").is_ok());
        assert!(validate_url("backend.base_url", "http://192.168.1.20:8000").is_ok());
        assert!(validate_url("backend.base_url", "").is_err());
        assert!(validate_url("backend.base_url", "invalid-url").is_err());
        assert!(validate_url("backend.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("backend.timeout_seconds", 30u64, 1, 600).is_ok());
        assert!(validate_range("backend.timeout_seconds", 0u64, 1, 600).is_err());
        assert!(validate_range("backend.timeout_seconds", 601u64, 1, 600).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("http://localhost:8000".to_string());
        assert!(validate_required_field("backend.base_url", &present).is_ok());

        let missing: Option<String> = None;
        match validate_required_field("backend.base_url", &missing) {
            Err(DiagnosisError::MissingConfig { field }) => assert_eq!(field, "backend.base_url"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
