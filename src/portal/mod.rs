//! HTTP client for querying billing portals during a MAC-address search.
//!
//! Each portal exposes a session-cookie login form and an HTML subscriber
//! list. The client logs in, fetches the list page and scans its table rows
//! for the searched MAC address.

pub mod parse;

use std::time::Duration;

use thiserror::Error;

use crate::domain::portal::PortalMatch;
use crate::domain::types::MacAddress;
use crate::models::config::PortalConfig;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("login rejected with status {0}")]
    LoginRejected(u16),
    #[error("users page returned status {0}")]
    FetchFailed(u16),
}

/// One portal session. Construction builds the cookie-holding client; the
/// session is dropped after a single search.
pub struct PortalClient<'a> {
    config: &'a PortalConfig,
    http: reqwest::Client,
}

impl<'a> PortalClient<'a> {
    pub fn new(config: &'a PortalConfig) -> Result<Self, PortalError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PortalError::Client(e.to_string()))?;
        Ok(Self { config, http })
    }

    /// Logs in with the portal's form field names. The session cookie is kept
    /// in the client's cookie store.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), PortalError> {
        let url = self.config.login_url();
        let form = [
            (self.config.username_field.as_str(), username),
            (self.config.password_field.as_str(), password),
        ];
        let response = self
            .http
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|source| PortalError::Request { url, source })?;

        // Portals answer a good login with 200 or a redirect to the
        // dashboard; 4xx means bad credentials.
        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(PortalError::LoginRejected(status.as_u16()));
        }
        Ok(())
    }

    /// Fetches the subscriber list and returns the rows containing the MAC
    /// address, mapped through the portal's column layout.
    pub async fn search_mac(&self, mac: &MacAddress) -> Result<Vec<PortalMatch>, PortalError> {
        let url = self.config.users_url();
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| PortalError::Request { url, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortalError::FetchFailed(status.as_u16()));
        }

        let url = self.config.users_url();
        let body = response
            .text()
            .await
            .map_err(|source| PortalError::Request { url, source })?;

        Ok(self.matches_in_page(&body, mac))
    }

    fn matches_in_page(&self, html: &str, mac: &MacAddress) -> Vec<PortalMatch> {
        let table = &self.config.table;
        parse::extract_rows(html)
            .into_iter()
            .filter(|row| mac.matches_text(&row.text()))
            .map(|row| PortalMatch {
                portal_id: self.config.id.clone(),
                portal_name: self.config.name.clone(),
                mac_address: mac.as_str().to_string(),
                account_name: row.cell(table.name_column).to_string(),
                status: row.cell(table.status_column).to_string(),
                expiry_date: row.cell(table.expiry_column).to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::PortalTableConfig;

    fn test_config() -> PortalConfig {
        PortalConfig {
            id: "alpha".to_string(),
            name: "Alpha Billing".to_string(),
            base_url: "https://alpha.example".to_string(),
            login_path: "/login".to_string(),
            users_path: "/users".to_string(),
            username_field: "username".to_string(),
            password_field: "password".to_string(),
            enabled: true,
            timeout_secs: 5,
            table: PortalTableConfig::default(),
        }
    }

    #[test]
    fn finds_matching_rows_in_either_mac_form() {
        let config = test_config();
        let client = PortalClient::new(&config).unwrap();
        let mac = MacAddress::new("aa:bb:cc:dd:ee:ff").unwrap();
        let html = "\
            <tr><td>1</td><td>Jane Doe</td><td>active</td><td>2026-12-01</td>\
            <td>AA-BB-CC-DD-EE-FF</td></tr>\
            <tr><td>2</td><td>John Roe</td><td>expired</td><td>2025-01-01</td>\
            <td>11:22:33:44:55:66</td></tr>";

        let matches = client.matches_in_page(html, &mac);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].account_name, "Jane Doe");
        assert_eq!(matches[0].status, "active");
        assert_eq!(matches[0].expiry_date, "2026-12-01");
        assert_eq!(matches[0].mac_address, "AA:BB:CC:DD:EE:FF");
    }

    #[test]
    fn no_matches_in_unrelated_page() {
        let config = test_config();
        let client = PortalClient::new(&config).unwrap();
        let mac = MacAddress::new("AA:BB:CC:DD:EE:FF").unwrap();
        assert!(client.matches_in_page("<tr><td>nothing here</td></tr>", &mac).is_empty());
    }

    #[test]
    fn urls_are_joined_from_base() {
        let config = test_config();
        assert_eq!(config.login_url(), "https://alpha.example/login");
        assert_eq!(config.users_url(), "https://alpha.example/users");
    }
}
