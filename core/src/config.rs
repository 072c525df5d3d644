//! Client configuration and credentials.
//!
//! # Design
//! EveryAction authenticates with HTTP Basic auth: the application name as
//! user and `apiKey|mode` as password, where the mode digit selects the
//! VoterFile (0) or MyCampaign (1) database. The mode may be given either as
//! a `|N` suffix on the key or separately, but never both.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use serde::Deserialize;

use crate::error::ApiError;

/// Environment variable read for the application name.
pub const APP_NAME_ENV: &str = "EVERYACTION_APP_NAME";
/// Environment variable read for the API key.
pub const API_KEY_ENV: &str = "EVERYACTION_API_KEY";

pub const US_ENDPOINT: &str = "https://api.securevan.com/v4";
pub const INTL_ENDPOINT: &str = "https://intlapi.securevan.com/v4";

/// Page size used when a paginated call gives no `limit`.
pub const DEFAULT_LIMIT: u32 = 50;

/// Which EveryAction database a key addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum DatabaseMode {
    VoterFile,
    MyCampaign,
}

impl DatabaseMode {
    pub fn digit(self) -> char {
        match self {
            DatabaseMode::VoterFile => '0',
            DatabaseMode::MyCampaign => '1',
        }
    }
}

impl FromStr for DatabaseMode {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "voterfile" | "voter_file" => Ok(DatabaseMode::VoterFile),
            "1" | "mycampaign" | "my_campaign" => Ok(DatabaseMode::MyCampaign),
            other => Err(ApiError::Config(format!("unknown database mode `{other}`"))),
        }
    }
}

impl TryFrom<String> for DatabaseMode {
    type Error = ApiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn default_endpoint() -> String {
    "US".to_string()
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Settings a client is built from.
///
/// `endpoint` is `US`, `INTL`, or a full base URL starting with `http`.
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    pub app_name: String,
    pub api_key: String,
    #[serde(default)]
    pub mode: Option<DatabaseMode>,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("app_name", &self.app_name)
            .field("api_key", &"<redacted>")
            .field("mode", &self.mode)
            .field("endpoint", &self.endpoint)
            .field("default_limit", &self.default_limit)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(app_name: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            api_key: api_key.into(),
            mode: None,
            endpoint: default_endpoint(),
            default_limit: DEFAULT_LIMIT,
        }
    }

    /// Read the app name and key from `EVERYACTION_APP_NAME` and `EVERYACTION_API_KEY`.
    pub fn from_env() -> Result<Self, ApiError> {
        let read = |name: &str| {
            std::env::var(name)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ApiError::Config(format!("environment variable {name} is not set")))
        };
        Ok(Self::new(read(APP_NAME_ENV)?, read(API_KEY_ENV)?))
    }

    pub fn with_mode(mut self, mode: DatabaseMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit;
        self
    }

    /// API root without a trailing slash.
    pub fn base_url(&self) -> Result<String, ApiError> {
        let endpoint = self.endpoint.trim();
        let url = if endpoint.starts_with("http") {
            endpoint
        } else if endpoint.eq_ignore_ascii_case("us") {
            US_ENDPOINT
        } else if endpoint.eq_ignore_ascii_case("intl") {
            INTL_ENDPOINT
        } else {
            return Err(ApiError::Config(format!(
                "endpoint must be US, INTL or a URL, got `{endpoint}`"
            )));
        };
        Ok(url.trim_end_matches('/').to_string())
    }

    /// Validate the key and mode and produce credentials.
    pub fn credentials(&self) -> Result<Credentials, ApiError> {
        if self.app_name.is_empty() {
            return Err(ApiError::Config("app name is empty".into()));
        }
        let (key, suffix) = split_key(&self.api_key)?;
        let mode = match (suffix, self.mode) {
            (Some(_), Some(_)) => {
                return Err(ApiError::Config(
                    "database mode given both in the API key and separately".into(),
                ))
            }
            (Some(mode), None) | (None, Some(mode)) => mode,
            (None, None) => {
                return Err(ApiError::Config(
                    "database mode missing: append |0 or |1 to the API key or set a mode".into(),
                ))
            }
        };
        Ok(Credentials {
            app_name: self.app_name.clone(),
            api_key: key.to_string(),
            mode,
        })
    }
}

/// Split an optional `|N` mode suffix off an API key.
fn split_key(api_key: &str) -> Result<(&str, Option<DatabaseMode>), ApiError> {
    match api_key.matches('|').count() {
        0 => Ok((api_key, None)),
        1 => {
            let (key, mode) = api_key.split_once('|').unwrap_or((api_key, ""));
            if key.is_empty() || mode.len() != 1 {
                return Err(ApiError::Config("API key mode suffix must be a single digit after `|`".into()));
            }
            Ok((key, Some(mode.parse()?)))
        }
        _ => Err(ApiError::Config("API key contains more than one `|`".into())),
    }
}

/// Validated credentials for one database.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub app_name: String,
    api_key: String,
    pub mode: DatabaseMode,
}

impl Credentials {
    /// Password half of the Basic credentials: `key|mode`.
    pub fn password(&self) -> String {
        format!("{}|{}", self.api_key, self.mode.digit())
    }

    /// Value of the `Authorization` header.
    pub fn authorization(&self) -> String {
        let token = base64::engine::general_purpose::STANDARD.encode(format!("{}:{}", self.app_name, self.password()));
        format!("Basic {token}")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_name", &self.app_name)
            .field("api_key", &"<redacted>")
            .field("mode", &self.mode)
            .finish()
    }
}
