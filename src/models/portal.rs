use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::portal::{
    NewPortalCredentials as DomainNewPortalCredentials, NewSearchHistoryEntry as DomainNewHistory,
    PortalCredentials as DomainPortalCredentials, SearchHistoryEntry as DomainHistory,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::portal_credentials)]
pub struct PortalCredentials {
    pub id: i32,
    pub organization_id: i32,
    pub portal_id: String,
    pub username: String,
    pub password: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::portal_credentials)]
pub struct NewPortalCredentials<'a> {
    pub organization_id: i32,
    pub portal_id: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::mac_search_history)]
pub struct SearchHistoryEntry {
    pub id: i32,
    pub organization_id: i32,
    pub search_id: String,
    pub mac_address: String,
    pub results: String, // JSON text in the DB
    pub total_found: i32,
    pub searched_at: NaiveDateTime,
    pub started_at: NaiveDateTime,
    pub completed_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::mac_search_history)]
pub struct NewSearchHistoryEntry<'a> {
    pub organization_id: i32,
    pub search_id: String,
    pub mac_address: &'a str,
    pub results: String,
    pub total_found: i32,
    pub started_at: NaiveDateTime,
    pub completed_at: NaiveDateTime,
}

impl From<PortalCredentials> for DomainPortalCredentials {
    fn from(creds: PortalCredentials) -> Self {
        Self {
            id: creds.id,
            organization_id: creds.organization_id,
            portal_id: creds.portal_id,
            username: creds.username,
            password: creds.password,
            updated_at: creds.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewPortalCredentials> for NewPortalCredentials<'a> {
    fn from(creds: &'a DomainNewPortalCredentials) -> Self {
        Self {
            organization_id: creds.organization_id,
            portal_id: creds.portal_id.as_str(),
            username: creds.username.as_str(),
            password: creds.password.as_str(),
        }
    }
}

impl From<SearchHistoryEntry> for DomainHistory {
    fn from(entry: SearchHistoryEntry) -> Self {
        let results = serde_json::from_str(&entry.results).unwrap_or_default();
        let search_id = Uuid::parse_str(&entry.search_id).unwrap_or_default();
        Self {
            id: entry.id,
            organization_id: entry.organization_id,
            search_id,
            mac_address: entry.mac_address,
            results,
            total_found: entry.total_found,
            searched_at: entry.searched_at,
            started_at: entry.started_at,
            completed_at: entry.completed_at,
        }
    }
}

impl<'a> From<&'a DomainNewHistory> for NewSearchHistoryEntry<'a> {
    fn from(entry: &'a DomainNewHistory) -> Self {
        Self {
            organization_id: entry.organization_id,
            search_id: entry.search_id.to_string(),
            mac_address: entry.mac_address.as_str(),
            results: entry.results.to_string(),
            total_found: entry.total_found,
            started_at: entry.started_at,
            completed_at: entry.completed_at,
        }
    }
}
