use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DiagnosisError, Result};
use crate::utils::validation::{validate_range, validate_required_field, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "crop-health.toml";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECONDS: u64 = 10;
const MAX_TIMEOUT_SECONDS: u64 = 600;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub connect_timeout_seconds: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DiagnosisError::Config {
            message: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DiagnosisError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// Fills defaults and validates; the base URL has no default.
    pub fn resolve(self) -> Result<AppConfig> {
        let base_url = validate_required_field("backend.base_url", &self.backend.base_url)?;
        let config = AppConfig {
            base_url: base_url.clone(),
            timeout_seconds: self
                .backend
                .timeout_seconds
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            connect_timeout_seconds: self
                .backend
                .connect_timeout_seconds
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECONDS),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Resolved settings handed to the HTTP client at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
}

impl AppConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            connect_timeout_seconds: DEFAULT_CONNECT_TIMEOUT_SECONDS,
        }
    }
}

impl ConfigProvider for AppConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("backend.base_url", &self.base_url)?;
        validate_range(
            "backend.timeout_seconds",
            self.timeout_seconds,
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        validate_range(
            "backend.connect_timeout_seconds",
            self.connect_timeout_seconds,
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_backend_section() {
        let toml_content = r#"
[backend]
base_url = "http://192.168.1.20:8000"
timeout_seconds = 45
"#;

        let config = TomlConfig::from_toml_str(toml_content)
            .unwrap()
            .resolve()
            .unwrap();

        assert_eq!(config.base_url, "http://192.168.1.20:8000");
        assert_eq!(config.request_timeout(), Duration::from_secs(45));
        assert_eq!(
            config.connect_timeout(),
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECONDS)
        );
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CROP_HEALTH_TEST_BASE_URL", "https://diagnose.example.com");

        let toml_content = r#"
[backend]
base_url = "${CROP_HEALTH_TEST_BASE_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.backend.base_url.as_deref(),
            Some("https://diagnose.example.com")
        );

        std::env::remove_var("CROP_HEALTH_TEST_BASE_URL");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = r#"
[backend]
base_url = "${CROP_HEALTH_NEVER_SET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.resolve(),
            Err(DiagnosisError::InvalidConfigValue { .. })
        ));
    }

    #[test]
    fn test_missing_base_url() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(matches!(
            config.resolve(),
            Err(DiagnosisError::MissingConfig { .. })
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let toml_content = r#"
[backend]
base_url = "http://localhost:8000"
timeout_seconds = 0
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.resolve().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let result = TomlConfig::from_toml_str("[backend\nbase_url = ");
        assert!(matches!(result, Err(DiagnosisError::Config { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[backend]
base_url = "https://api.example.com"
connect_timeout_seconds = 3
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.backend.connect_timeout_seconds, Some(3));
    }
}
