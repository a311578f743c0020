use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct MacSearchRequest {
    #[validate(length(min = 1))]
    pub mac_address: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SaveCredentialsRequest {
    #[validate(length(min = 1))]
    pub portal_id: String,
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// One portal in the catalogue listing; credentials never leave the server.
#[derive(Debug, Serialize)]
pub struct PortalSummary {
    pub id: String,
    pub name: String,
    pub base_url: String,
    /// Whether this organization has credentials stored for the portal.
    pub credentials_configured: bool,
}
