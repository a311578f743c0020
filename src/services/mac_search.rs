//! MAC-address search across configured billing portals.
//!
//! Every enabled portal yields exactly one [`PortalSearchOutcome`]; a portal
//! that cannot be reached, rejects its login or has no stored credentials is
//! reported as a failed outcome instead of failing the whole search. Each
//! completed search is appended to the organization's history.

use chrono::Utc;
use futures::future::join_all;
use uuid::Uuid;

use crate::crypto;
use crate::domain::portal::{
    MacSearchReport, NewPortalCredentials, NewSearchHistoryEntry, PortalCredentials,
    PortalSearchOutcome, SearchHistoryEntry,
};
use crate::domain::types::MacAddress;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::{PortalConfig, ServerConfig};
use crate::portal::PortalClient;
use crate::repository::{
    OrganizationReader, Pagination, PortalCredentialReader, PortalCredentialWriter,
    SearchHistoryReader, SearchHistoryWriter,
};
use crate::services::{ServiceError, ServiceResult};

fn check_search_enabled<R>(repo: &R, actor: &AuthenticatedUser) -> ServiceResult<()>
where
    R: OrganizationReader + ?Sized,
{
    let org = repo
        .get_organization_by_id(actor.organization_id)?
        .ok_or(ServiceError::NotFound)?;
    if !org.mac_search_enabled {
        return Err(ServiceError::Forbidden(
            "MAC-address search is not enabled for this organization".to_string(),
        ));
    }
    Ok(())
}

async fn search_one_portal(
    portal: &PortalConfig,
    credentials: Option<PortalCredentials>,
    key: &[u8; 32],
    mac: &MacAddress,
) -> PortalSearchOutcome {
    let Some(credentials) = credentials else {
        return PortalSearchOutcome::failure(&portal.id, &portal.name, "no credentials configured");
    };

    let password = match crypto::decrypt_if_encrypted(&credentials.password, key) {
        Ok(password) => password,
        Err(e) => {
            log::error!("Cannot decrypt credentials for portal {}: {e}", portal.id);
            return PortalSearchOutcome::failure(
                &portal.id,
                &portal.name,
                "stored credentials could not be decrypted",
            );
        }
    };

    let client = match PortalClient::new(portal) {
        Ok(client) => client,
        Err(e) => return PortalSearchOutcome::failure(&portal.id, &portal.name, e.to_string()),
    };

    if let Err(e) = client.login(&credentials.username, &password).await {
        return PortalSearchOutcome::failure(&portal.id, &portal.name, e.to_string());
    }

    match client.search_mac(mac).await {
        Ok(matches) => PortalSearchOutcome::success(&portal.id, &portal.name, matches),
        Err(e) => PortalSearchOutcome::failure(&portal.id, &portal.name, e.to_string()),
    }
}

/// Runs the search against every enabled portal concurrently and records the
/// aggregate report in the search history.
pub async fn search<R>(
    repo: &R,
    config: &ServerConfig,
    actor: &AuthenticatedUser,
    mac_text: &str,
) -> ServiceResult<MacSearchReport>
where
    R: OrganizationReader
        + PortalCredentialReader
        + SearchHistoryWriter
        + ?Sized,
{
    check_search_enabled(repo, actor)?;
    let mac = MacAddress::new(mac_text)?;
    let key = crypto::derive_key(&config.encryption_key);

    let started_at = Utc::now().naive_utc();

    let portals: Vec<&PortalConfig> = config.portals.iter().filter(|p| p.enabled).collect();
    let mut lookups = Vec::with_capacity(portals.len());
    for portal in &portals {
        let credentials = repo.get_portal_credentials(actor.organization_id, &portal.id)?;
        lookups.push(search_one_portal(portal, credentials, &key, &mac));
    }
    let outcomes = join_all(lookups).await;

    let total_found = outcomes.iter().map(|o| o.matches.len()).sum();
    let report = MacSearchReport {
        search_id: Uuid::new_v4(),
        mac_address: mac.as_str().to_string(),
        total_found,
        portals: outcomes,
        started_at,
        completed_at: Utc::now().naive_utc(),
    };

    let entry = NewSearchHistoryEntry {
        organization_id: actor.organization_id,
        search_id: report.search_id,
        mac_address: report.mac_address.clone(),
        results: serde_json::to_value(&report.portals)
            .map_err(|e| ServiceError::Internal(e.to_string()))?,
        total_found: report.total_found as i32,
        started_at: report.started_at,
        completed_at: report.completed_at,
    };
    repo.record_search(&entry)?;

    Ok(report)
}

pub fn list_history<R>(
    repo: &R,
    actor: &AuthenticatedUser,
    pagination: Option<Pagination>,
) -> ServiceResult<(usize, Vec<SearchHistoryEntry>)>
where
    R: OrganizationReader + SearchHistoryReader + ?Sized,
{
    check_search_enabled(repo, actor)?;
    repo.list_search_history(actor.organization_id, pagination)
        .map_err(ServiceError::from)
}

/// Fetches one past search by its public id.
pub fn get_search_result<R>(
    repo: &R,
    actor: &AuthenticatedUser,
    search_id: &Uuid,
) -> ServiceResult<SearchHistoryEntry>
where
    R: OrganizationReader + SearchHistoryReader + ?Sized,
{
    check_search_enabled(repo, actor)?;
    repo.get_search(actor.organization_id, search_id)?
        .ok_or(ServiceError::NotFound)
}

/// The portal catalogue with a per-organization flag telling whether
/// credentials are stored for each portal.
pub fn list_portals<R>(
    repo: &R,
    config: &ServerConfig,
    actor: &AuthenticatedUser,
) -> ServiceResult<Vec<(PortalConfig, bool)>>
where
    R: OrganizationReader + PortalCredentialReader + ?Sized,
{
    check_search_enabled(repo, actor)?;
    let stored = repo.list_portal_credentials(actor.organization_id)?;
    Ok(config
        .portals
        .iter()
        .filter(|p| p.enabled)
        .map(|p| {
            let configured = stored.iter().any(|c| c.portal_id == p.id);
            (p.clone(), configured)
        })
        .collect())
}

/// Stores or replaces credentials for one portal. The password is encrypted
/// before it reaches the repository.
pub fn save_credentials<R>(
    repo: &R,
    config: &ServerConfig,
    actor: &AuthenticatedUser,
    portal_id: &str,
    username: &str,
    password: &str,
) -> ServiceResult<PortalCredentials>
where
    R: OrganizationReader + PortalCredentialWriter + ?Sized,
{
    check_search_enabled(repo, actor)?;
    if !actor.is_admin() {
        return Err(ServiceError::Forbidden(
            "administrator role required".to_string(),
        ));
    }
    if !config.portals.iter().any(|p| p.id == portal_id && p.enabled) {
        return Err(ServiceError::Validation(format!(
            "unknown portal: {portal_id}"
        )));
    }
    if username.trim().is_empty() || password.is_empty() {
        return Err(ServiceError::Validation(
            "username and password must not be empty".to_string(),
        ));
    }

    let key = crypto::derive_key(&config.encryption_key);
    let encrypted = crypto::encrypt(password, &key)
        .map_err(|e| ServiceError::Internal(e.to_string()))?;

    let new_creds = NewPortalCredentials {
        organization_id: actor.organization_id,
        portal_id: portal_id.to_string(),
        username: username.trim().to_string(),
        password: encrypted,
    };
    repo.upsert_portal_credentials(&new_creds)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::organization::Organization;
    use crate::domain::user::UserRole;
    use crate::models::config::PortalTableConfig;
    use crate::repository::mock::MockRepository;

    fn actor(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 1,
            organization_id: 10,
            email: "admin@acme.test".to_string(),
            role,
        }
    }

    fn org(enabled: bool) -> Organization {
        let now = Utc::now().naive_utc();
        Organization {
            id: 10,
            name: "Acme".to_string(),
            slug: "acme".to_string(),
            mac_search_enabled: enabled,
            created_at: now,
            updated_at: now,
        }
    }

    fn config() -> ServerConfig {
        ServerConfig {
            address: "127.0.0.1".to_string(),
            port: 8080,
            database_url: ":memory:".to_string(),
            secret: "secret".to_string(),
            encryption_key: "enc-key".to_string(),
            portals: vec![PortalConfig {
                id: "alpha".to_string(),
                name: "Alpha Billing".to_string(),
                base_url: "https://alpha.example".to_string(),
                login_path: "/login".to_string(),
                users_path: "/users".to_string(),
                username_field: "username".to_string(),
                password_field: "password".to_string(),
                enabled: true,
                timeout_secs: 1,
                table: PortalTableConfig::default(),
            }],
        }
    }

    #[test]
    fn search_is_forbidden_when_disabled() {
        let mut repo = MockRepository::new();
        repo.expect_get_organization_by_id()
            .returning(|_| Ok(Some(org(false))));
        let result = list_history(&repo, &actor(UserRole::User), None);
        assert!(matches!(result, Err(ServiceError::Forbidden(_))));
    }

    #[test]
    fn saving_credentials_requires_admin() {
        let mut repo = MockRepository::new();
        repo.expect_get_organization_by_id()
            .returning(|_| Ok(Some(org(true))));
        let result = save_credentials(
            &repo,
            &config(),
            &actor(UserRole::User),
            "alpha",
            "user",
            "pw",
        );
        assert!(matches!(result, Err(ServiceError::Forbidden(_))));
    }

    #[test]
    fn unknown_portal_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_get_organization_by_id()
            .returning(|_| Ok(Some(org(true))));
        let result = save_credentials(
            &repo,
            &config(),
            &actor(UserRole::Admin),
            "beta",
            "user",
            "pw",
        );
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn stored_password_is_encrypted() {
        let mut repo = MockRepository::new();
        repo.expect_get_organization_by_id()
            .returning(|_| Ok(Some(org(true))));
        repo.expect_upsert_portal_credentials()
            .withf(|creds| crypto::is_encrypted(&creds.password))
            .returning(|creds| {
                Ok(PortalCredentials {
                    id: 1,
                    organization_id: creds.organization_id,
                    portal_id: creds.portal_id.clone(),
                    username: creds.username.clone(),
                    password: creds.password.clone(),
                    updated_at: Utc::now().naive_utc(),
                })
            });

        let saved = save_credentials(
            &repo,
            &config(),
            &actor(UserRole::Admin),
            "alpha",
            "user",
            "hunter2",
        )
        .unwrap();
        assert_ne!(saved.password, "hunter2");
    }

    #[actix_web::test]
    async fn missing_credentials_become_a_failed_outcome() {
        let mut repo = MockRepository::new();
        repo.expect_get_organization_by_id()
            .returning(|_| Ok(Some(org(true))));
        repo.expect_get_portal_credentials().returning(|_, _| Ok(None));
        repo.expect_record_search()
            .withf(|entry| entry.started_at <= entry.completed_at)
            .returning(|entry| {
                Ok(SearchHistoryEntry {
                    id: 1,
                    organization_id: entry.organization_id,
                    search_id: entry.search_id,
                    mac_address: entry.mac_address.clone(),
                    results: entry.results.clone(),
                    total_found: entry.total_found,
                    searched_at: Utc::now().naive_utc(),
                    started_at: entry.started_at,
                    completed_at: entry.completed_at,
                })
            });

        let report = search(&repo, &config(), &actor(UserRole::User), "AA:BB:CC:DD:EE:FF")
            .await
            .unwrap();
        assert_eq!(report.total_found, 0);
        assert_eq!(report.portals.len(), 1);
        assert!(!report.portals[0].success);
        assert_eq!(
            report.portals[0].error.as_deref(),
            Some("no credentials configured")
        );
    }

    #[test]
    fn unknown_search_id_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_organization_by_id()
            .returning(|_| Ok(Some(org(true))));
        repo.expect_get_search()
            .withf(|org_id, _| *org_id == 10)
            .returning(|_, _| Ok(None));

        let result = get_search_result(&repo, &actor(UserRole::User), &Uuid::new_v4());
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[actix_web::test]
    async fn invalid_mac_is_a_validation_error() {
        let mut repo = MockRepository::new();
        repo.expect_get_organization_by_id()
            .returning(|_| Ok(Some(org(true))));
        let result = search(&repo, &config(), &actor(UserRole::User), "not-a-mac").await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }
}
