//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database_url: String,
    /// HMAC secret for signing JWTs.
    pub secret: String,
    /// Secret from which the portal-credential encryption key is derived.
    pub encryption_key: String,
    /// Catalogue of billing portals available to MAC-address search.
    #[serde(default)]
    pub portals: Vec<PortalConfig>,
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// One scrapeable billing portal.
#[derive(Clone, Debug, Deserialize)]
pub struct PortalConfig {
    pub id: String,
    pub name: String,
    /// Base URL without trailing slash, e.g. `https://billing.example.com`.
    pub base_url: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_users_path")]
    pub users_path: String,
    /// Login form field names; portals rarely agree on these.
    #[serde(default = "default_username_field")]
    pub username_field: String,
    #[serde(default = "default_password_field")]
    pub password_field: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub table: PortalTableConfig,
}

/// Which cells of a matching table row hold the interesting values.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PortalTableConfig {
    #[serde(default = "default_name_column")]
    pub name_column: usize,
    #[serde(default = "default_status_column")]
    pub status_column: usize,
    #[serde(default = "default_expiry_column")]
    pub expiry_column: usize,
}

impl Default for PortalTableConfig {
    fn default() -> Self {
        Self {
            name_column: default_name_column(),
            status_column: default_status_column(),
            expiry_column: default_expiry_column(),
        }
    }
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_users_path() -> String {
    "/users".to_string()
}

fn default_username_field() -> String {
    "username".to_string()
}

fn default_password_field() -> String {
    "password".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_name_column() -> usize {
    1
}

fn default_status_column() -> usize {
    2
}

fn default_expiry_column() -> usize {
    3
}

impl PortalConfig {
    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url, self.login_path)
    }

    pub fn users_url(&self) -> String {
        format!("{}{}", self.base_url, self.users_path)
    }
}
