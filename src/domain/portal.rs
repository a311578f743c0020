//! Domain types for the MAC-address portal lookup.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored credentials for one billing portal. The password field holds the
/// encrypted value as persisted; decryption happens only in the search
/// service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PortalCredentials {
    pub id: i32,
    pub organization_id: i32,
    pub portal_id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewPortalCredentials {
    pub organization_id: i32,
    pub portal_id: String,
    pub username: String,
    /// Already encrypted; repositories never see plaintext passwords.
    pub password: String,
}

/// A single table row on a portal that contained the searched MAC address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PortalMatch {
    pub portal_id: String,
    pub portal_name: String,
    pub mac_address: String,
    pub account_name: String,
    pub status: String,
    pub expiry_date: String,
}

/// Outcome of searching one portal. Failures are captured here instead of
/// failing the whole search.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PortalSearchOutcome {
    pub portal_id: String,
    pub portal_name: String,
    pub success: bool,
    pub found: bool,
    pub matches: Vec<PortalMatch>,
    pub error: Option<String>,
}

impl PortalSearchOutcome {
    pub fn failure(portal_id: &str, portal_name: &str, error: impl Into<String>) -> Self {
        Self {
            portal_id: portal_id.to_string(),
            portal_name: portal_name.to_string(),
            success: false,
            found: false,
            matches: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn success(portal_id: &str, portal_name: &str, matches: Vec<PortalMatch>) -> Self {
        Self {
            portal_id: portal_id.to_string(),
            portal_name: portal_name.to_string(),
            success: true,
            found: !matches.is_empty(),
            matches,
            error: None,
        }
    }
}

/// Aggregate report over all portals for one search.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MacSearchReport {
    pub search_id: Uuid,
    pub mac_address: String,
    pub total_found: usize,
    pub portals: Vec<PortalSearchOutcome>,
    pub started_at: NaiveDateTime,
    pub completed_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchHistoryEntry {
    pub id: i32,
    pub organization_id: i32,
    pub search_id: Uuid,
    pub mac_address: String,
    pub results: serde_json::Value,
    pub total_found: i32,
    pub searched_at: NaiveDateTime,
    pub started_at: NaiveDateTime,
    pub completed_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewSearchHistoryEntry {
    pub organization_id: i32,
    pub search_id: Uuid,
    pub mac_address: String,
    pub results: serde_json::Value,
    pub total_found: i32,
    pub started_at: NaiveDateTime,
    pub completed_at: NaiveDateTime,
}
