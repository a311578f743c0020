use serde::Deserialize;
use validator::Validate;

use crate::domain::account::{NewAccount, UpdateAccount};

#[derive(Debug, Deserialize)]
pub struct AccountListParams {
    pub search: Option<String>,
    #[serde(flatten)]
    pub page: super::PageParams,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(length(min = 1))]
    pub name: String,
    pub industry: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    pub phone: Option<String>,
}

impl CreateAccountRequest {
    pub fn into_new_account(self) -> NewAccount {
        NewAccount {
            organization_id: 0,
            name: self.name,
            industry: self.industry,
            website: self.website,
            phone: self.phone,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    #[validate(length(min = 1))]
    pub name: String,
    pub industry: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    pub phone: Option<String>,
}

impl UpdateAccountRequest {
    pub fn into_update(self) -> UpdateAccount {
        UpdateAccount {
            name: self.name,
            industry: self.industry,
            website: self.website,
            phone: self.phone,
        }
    }
}
