// crates/docbridge-config/src/config.rs
// ============================================================================
// Module: Docbridge Configuration
// Description: Configuration loading and validation for the connector.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: docbridge-core, docbridge-discovery, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path
//! limits. Missing or invalid configuration fails closed: the connector
//! refuses to start rather than dispatch with a partially resolved setup.
//! The test-only static endpoint selector is rejected at load time unless
//! an explicit opt-in flag is set.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use docbridge_core::Endpoint;
use docbridge_core::TransportId;
use docbridge_core::TransportProfileId;
use docbridge_discovery::DEFAULT_MAX_RESPONSE_BYTES;
use docbridge_discovery::DEFAULT_TIMEOUT_MS;
use docbridge_discovery::DEFAULT_USER_AGENT;
use docbridge_discovery::DirectoryEndpointSelector;
use docbridge_discovery::EndpointSelector;
use docbridge_discovery::LookupConfig;
use docbridge_discovery::StaticEndpointSelector;
use rustls_pki_types::CertificateDer;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "docbridge.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "DOCBRIDGE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Minimum allowed lookup timeout in milliseconds.
pub(crate) const MIN_LOOKUP_TIMEOUT_MS: u64 = 100;
/// Maximum allowed lookup timeout in milliseconds.
pub(crate) const MAX_LOOKUP_TIMEOUT_MS: u64 = 60_000;
/// Minimum allowed lookup response size in bytes.
pub(crate) const MIN_LOOKUP_RESPONSE_BYTES: usize = 1024;
/// Maximum allowed lookup response size in bytes.
pub(crate) const MAX_LOOKUP_RESPONSE_BYTES: usize = 10 * 1024 * 1024;
/// Maximum length of the configured transport implementation id.
pub(crate) const MAX_TRANSPORT_ID_LENGTH: usize = 256;
/// Maximum length of the configured user agent string.
pub(crate) const MAX_USER_AGENT_LENGTH: usize = 256;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Docbridge connector configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectorConfig {
    /// Outgoing transport configuration.
    pub transport: TransportConfig,
    /// Directory (SMP) lookup configuration.
    pub directory: LookupSectionConfig,
    /// Dataset discovery (DSD) lookup configuration.
    pub dsd: LookupSectionConfig,
    /// Endpoint selection configuration.
    #[serde(default)]
    pub endpoint_selection: EndpointSelectionConfig,
    /// Optional diagnostic dump configuration.
    #[serde(default)]
    pub dump: Option<DumpConfig>,
}

impl ConnectorConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from TOML text without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.transport.validate()?;
        self.directory.validate("directory")?;
        self.dsd.validate("dsd")?;
        self.endpoint_selection.validate()?;
        if let Some(dump) = &self.dump {
            dump.validate()?;
        }
        Ok(())
    }
}

/// Outgoing transport configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportConfig {
    /// Identifier of the transport implementation used for dispatch.
    pub implementation_id: String,
}

impl TransportConfig {
    /// Validates the transport section.
    fn validate(&self) -> Result<(), ConfigError> {
        let trimmed = self.implementation_id.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::Invalid(
                "transport.implementation_id must be non-empty".to_string(),
            ));
        }
        if trimmed.len() > MAX_TRANSPORT_ID_LENGTH {
            return Err(ConfigError::Invalid(
                "transport.implementation_id exceeds max length".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the configured transport identifier.
    #[must_use]
    pub fn transport_id(&self) -> TransportId {
        TransportId::new(self.implementation_id.trim())
    }
}

/// One lookup service section (shared by directory and dsd).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LookupSectionConfig {
    /// Base URL of the lookup service.
    pub base_url: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
    /// User agent string for outbound requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl LookupSectionConfig {
    /// Validates one lookup section.
    fn validate(&self, section: &str) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|err| {
            ConfigError::Invalid(format!("{section}.base_url is not a valid url: {err}"))
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::Invalid(format!(
                "{section}.base_url cannot be a base url"
            )));
        }
        if !(MIN_LOOKUP_TIMEOUT_MS..=MAX_LOOKUP_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "{section}.timeout_ms must be within {MIN_LOOKUP_TIMEOUT_MS}..={MAX_LOOKUP_TIMEOUT_MS}"
            )));
        }
        if !(MIN_LOOKUP_RESPONSE_BYTES..=MAX_LOOKUP_RESPONSE_BYTES)
            .contains(&self.max_response_bytes)
        {
            return Err(ConfigError::Invalid(format!(
                "{section}.max_response_bytes must be within \
                 {MIN_LOOKUP_RESPONSE_BYTES}..={MAX_LOOKUP_RESPONSE_BYTES}"
            )));
        }
        if self.user_agent.trim().is_empty() || self.user_agent.len() > MAX_USER_AGENT_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "{section}.user_agent must be non-empty and at most \
                 {MAX_USER_AGENT_LENGTH} bytes"
            )));
        }
        Ok(())
    }

    /// Converts a validated section into lookup client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the base URL does not parse.
    pub fn lookup_config(&self) -> Result<LookupConfig, ConfigError> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|err| ConfigError::Invalid(format!("base_url is not a valid url: {err}")))?;
        let mut config = LookupConfig::new(base_url);
        config.timeout_ms = self.timeout_ms;
        config.max_response_bytes = self.max_response_bytes;
        config.user_agent = self.user_agent.clone();
        Ok(config)
    }
}

/// Endpoint selection mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorMode {
    /// Production directory-backed selection.
    #[default]
    Directory,
    /// Test-only static endpoint; requires explicit opt-in.
    Static,
}

/// Endpoint selection configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointSelectionConfig {
    /// Selection mode.
    #[serde(default)]
    pub mode: SelectorMode,
    /// Explicit opt-in required before `mode = "static"` is accepted.
    #[serde(default)]
    pub allow_static_selector: bool,
    /// Endpoint returned by the static selector.
    #[serde(default)]
    pub static_endpoint: Option<StaticEndpointConfig>,
}

impl EndpointSelectionConfig {
    /// Validates the endpoint selection section.
    fn validate(&self) -> Result<(), ConfigError> {
        match self.mode {
            SelectorMode::Directory => {
                if self.static_endpoint.is_some() {
                    return Err(ConfigError::Invalid(
                        "endpoint_selection.static_endpoint requires mode = \"static\""
                            .to_string(),
                    ));
                }
                Ok(())
            }
            SelectorMode::Static => {
                if !self.allow_static_selector {
                    return Err(ConfigError::Invalid(
                        "endpoint_selection.mode = \"static\" is test-only and requires \
                         allow_static_selector = true"
                            .to_string(),
                    ));
                }
                let endpoint = self.static_endpoint.as_ref().ok_or_else(|| {
                    ConfigError::Invalid(
                        "endpoint_selection.static_endpoint is required for mode = \"static\""
                            .to_string(),
                    )
                })?;
                endpoint.validate()
            }
        }
    }

    /// Builds the configured endpoint selector.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the section is invalid or the static
    /// endpoint cannot be materialized.
    pub fn build_selector(&self) -> Result<Box<dyn EndpointSelector>, ConfigError> {
        self.validate()?;
        match self.mode {
            SelectorMode::Directory => Ok(Box::new(DirectoryEndpointSelector::new())),
            SelectorMode::Static => {
                let endpoint = self.static_endpoint.as_ref().ok_or_else(|| {
                    ConfigError::Invalid(
                        "endpoint_selection.static_endpoint is required for mode = \"static\""
                            .to_string(),
                    )
                })?;
                Ok(Box::new(StaticEndpointSelector::new(endpoint.endpoint()?)))
            }
        }
    }
}

/// Static endpoint description for the test-only selector.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticEndpointConfig {
    /// Transport profile identifier of the endpoint.
    pub transport_profile: String,
    /// Endpoint address.
    pub url: String,
    /// Base64-encoded DER certificate of the endpoint.
    pub certificate_b64: String,
    /// Optional human-readable service description.
    #[serde(default)]
    pub service_description: Option<String>,
}

impl StaticEndpointConfig {
    /// Validates the static endpoint fields.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.transport_profile.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "endpoint_selection.static_endpoint.transport_profile must be non-empty"
                    .to_string(),
            ));
        }
        self.endpoint().map(|_| ())
    }

    /// Materializes the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the URL or certificate does
    /// not parse.
    pub fn endpoint(&self) -> Result<Endpoint, ConfigError> {
        let url = Url::parse(&self.url).map_err(|err| {
            ConfigError::Invalid(format!(
                "endpoint_selection.static_endpoint.url is not a valid url: {err}"
            ))
        })?;
        let der = BASE64.decode(&self.certificate_b64).map_err(|err| {
            ConfigError::Invalid(format!(
                "endpoint_selection.static_endpoint.certificate_b64 is not valid base64: {err}"
            ))
        })?;
        if der.is_empty() {
            return Err(ConfigError::Invalid(
                "endpoint_selection.static_endpoint.certificate_b64 decodes to empty"
                    .to_string(),
            ));
        }
        Ok(Endpoint::new(
            TransportProfileId::new(self.transport_profile.trim()),
            url,
            CertificateDer::from(der),
            self.service_description.clone(),
        ))
    }
}

/// Diagnostic dump configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DumpConfig {
    /// Directory receiving one JSON record per dispatched message.
    pub directory: String,
}

impl DumpConfig {
    /// Validates the dump section.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("dump.directory", &self.directory)
    }

    /// Returns the configured dump directory.
    #[must_use]
    pub fn directory(&self) -> PathBuf {
        PathBuf::from(self.directory.trim())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from caller or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    let path = Path::new(trimmed);
    for component in path.components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Default lookup timeout in milliseconds.
const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Default maximum lookup response size in bytes.
const fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}

/// Default lookup user agent string.
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
