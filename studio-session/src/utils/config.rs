use std::collections::HashMap;
use std::env as std_env;
use std::path::{Path, PathBuf};

use dotenvy::dotenv;
use thiserror::Error;
use url::Url;

use super::consts::{self, env};

/// Relative paths of the backend endpoints the session layer talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub login: String,
    pub social_login: String,
    pub refresh: String,
    pub logout: String,
    pub me: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: consts::LOGIN_ENDPOINT.to_owned(),
            social_login: consts::SOCIAL_LOGIN_ENDPOINT.to_owned(),
            refresh: consts::REFRESH_ENDPOINT.to_owned(),
            logout: consts::LOGOUT_ENDPOINT.to_owned(),
            me: consts::ME_ENDPOINT.to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    api_origin: String,
    api_prefix: String,
    token_store_path: PathBuf,
    login_page_path: String,
    endpoints: Endpoints,
    group_names: HashMap<String, String>,
}

impl Config {
    /// Build a config programmatically, every optional setting at its default.
    pub fn new(api_origin: impl Into<String>) -> Self {
        Self {
            api_origin: api_origin.into(),
            api_prefix: consts::DEFAULT_API_PREFIX.to_owned(),
            token_store_path: PathBuf::from(consts::DEFAULT_TOKEN_STORE_PATH),
            login_page_path: consts::DEFAULT_LOGIN_PAGE_PATH.to_owned(),
            endpoints: Endpoints::default(),
            group_names: HashMap::new(),
        }
    }

    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    pub fn with_token_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_store_path = path.into();
        self
    }

    pub fn with_login_page_path(mut self, path: impl Into<String>) -> Self {
        self.login_page_path = path.into();
        self
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_group_names(mut self, names: HashMap<String, String>) -> Self {
        self.group_names = names;
        self
    }

    pub fn api_origin(&self) -> &str {
        &self.api_origin
    }
    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }
    pub fn token_store_path(&self) -> &Path {
        &self.token_store_path
    }
    pub fn login_page_path(&self) -> &str {
        &self.login_page_path
    }
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
    pub fn group_names(&self) -> &HashMap<String, String> {
        &self.group_names
    }

    /// `{API_ORIGIN}{API_PREFIX}`, always ending in `/` so relative endpoint paths join
    /// underneath it.
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        let origin = self.api_origin.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        let raw = if prefix.is_empty() {
            format!("{origin}/")
        } else {
            format!("{origin}/{prefix}/")
        };
        Url::parse(&raw).map_err(|_| ConfigError::Invalid(env::API_ORIGIN_ENV_VAR))
    }

    pub fn default() -> Result<Self, ConfigError> {
        // Load .env in dev; no-op in prod if not present.
        let _ = dotenv();
        Self::from_env()
    }

    fn from_env() -> Result<Self, ConfigError> {
        let api_origin = req_var(env::API_ORIGIN_ENV_VAR)?;
        let mut config = Self::new(api_origin);

        if let Some(prefix) = opt_var(env::API_PREFIX_ENV_VAR) {
            config.api_prefix = prefix;
        }
        if let Some(path) = opt_var(env::TOKEN_STORE_PATH_ENV_VAR) {
            config.token_store_path = PathBuf::from(path);
        }
        if let Some(path) = opt_var(env::LOGIN_PAGE_PATH_ENV_VAR) {
            config.login_page_path = path;
        }

        let defaults = Endpoints::default();
        config.endpoints = Endpoints {
            login: opt_var(env::LOGIN_ENDPOINT_ENV_VAR).unwrap_or(defaults.login),
            social_login: opt_var(env::SOCIAL_LOGIN_ENDPOINT_ENV_VAR)
                .unwrap_or(defaults.social_login),
            refresh: opt_var(env::REFRESH_ENDPOINT_ENV_VAR).unwrap_or(defaults.refresh),
            logout: opt_var(env::LOGOUT_ENDPOINT_ENV_VAR).unwrap_or(defaults.logout),
            me: opt_var(env::ME_ENDPOINT_ENV_VAR).unwrap_or(defaults.me),
        };

        if let Some(raw) = opt_var(env::GROUP_NAMES_JSON_ENV_VAR) {
            config.group_names = serde_json::from_str(&raw)
                .map_err(|_| ConfigError::Invalid(env::GROUP_NAMES_JSON_ENV_VAR))?;
        }

        // Fail early rather than on the first request.
        config.api_base_url()?;

        Ok(config)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing env var {0}")]
    Missing(&'static str),
    #[error("invalid env var {0}")]
    Invalid(&'static str),
}

fn req_var(key: &'static str) -> Result<String, ConfigError> {
    std_env::var(key).map_err(|_| ConfigError::Missing(key))
}

fn opt_var(key: &str) -> Option<String> {
    std_env::var(key).ok().filter(|v| !v.is_empty())
}
