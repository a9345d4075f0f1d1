//! Server configuration
//!
//! Read from the environment, optionally overridden on the command line.
//! The browser runtime gets the subset in [`ClientEnv`] through `/env.js`.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_API_ENDPOINT: &str = "http://localhost:3000/graphql";
pub const DEFAULT_AUTH_ENDPOINT: &str = "http://localhost:3000/auth";
pub const DEFAULT_PORT: u16 = 8000;

/// UI server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Backend endpoint used by the browser
    pub api_endpoint: String,
    /// Backend endpoint used by server-side renders
    pub server_api_endpoint: String,
    /// Auth endpoint (`/signin`, `/signout` live under it)
    pub auth_endpoint: String,
    /// Identity-provider client id for the sign-in widget
    pub google_client_id: String,
    pub port: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            server_api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            auth_endpoint: DEFAULT_AUTH_ENDPOINT.to_string(),
            google_client_id: String::new(),
            port: DEFAULT_PORT,
        }
    }
}

impl UiConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `UI_API_ENDPOINT`, `UI_SERVER_API_ENDPOINT`, `UI_AUTH_ENDPOINT`,
    /// `GOOGLE_CLIENT_ID` and `PORT`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`UiConfig::from_env`] over an arbitrary variable source
    ///
    /// The server-side endpoint falls back to the browser endpoint.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(api) = get("UI_API_ENDPOINT") {
            config.api_endpoint = api;
        }
        config.server_api_endpoint =
            get("UI_SERVER_API_ENDPOINT").unwrap_or_else(|| config.api_endpoint.clone());
        if let Some(auth) = get("UI_AUTH_ENDPOINT") {
            config.auth_endpoint = auth;
        }
        if let Some(client_id) = get("GOOGLE_CLIENT_ID") {
            config.google_client_id = client_id;
        }
        if let Some(port) = get("PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                name: "PORT",
                value: port.clone(),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    #[inline]
    #[must_use]
    pub fn with_api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = endpoint.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_server_api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.server_api_endpoint = endpoint.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_auth_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.auth_endpoint = endpoint.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_google_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.google_client_id = client_id.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Every endpoint must be an absolute http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_endpoint("api", &self.api_endpoint)?;
        check_endpoint("server api", &self.server_api_endpoint)?;
        check_endpoint("auth", &self.auth_endpoint)?;
        Ok(())
    }

    /// Settings the browser runtime needs
    #[must_use]
    pub fn client_env(&self) -> ClientEnv {
        ClientEnv {
            ui_api_endpoint: self.api_endpoint.clone(),
            ui_auth_endpoint: self.auth_endpoint.clone(),
            google_client_id: self.google_client_id.clone(),
        }
    }
}

fn check_endpoint(name: &'static str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|err| ConfigError::invalid_endpoint(name, value, err))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::invalid_endpoint(
            name,
            value,
            format!("unsupported scheme '{other}'"),
        )),
    }
}

/// Browser-visible configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ClientEnv {
    pub ui_api_endpoint: String,
    pub ui_auth_endpoint: String,
    pub google_client_id: String,
}

impl ClientEnv {
    /// Body of `/env.js`
    #[must_use]
    pub fn to_script(&self) -> String {
        let json = serde_json::to_value(self).unwrap_or_default();
        format!("window.ENV = {}", tracker_hydrate::script_safe_json(&json))
    }
}
