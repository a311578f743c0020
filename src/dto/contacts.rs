use std::collections::HashMap;

use serde::Deserialize;
use validator::Validate;

use crate::domain::contact::{NewContact, UpdateContact};

#[derive(Debug, Deserialize)]
pub struct ContactListParams {
    pub search: Option<String>,
    #[serde(default, deserialize_with = "super::de_opt_i32")]
    pub account_id: Option<i32>,
    #[serde(flatten)]
    pub page: super::PageParams,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateContactRequest {
    pub account_id: Option<i32>,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub title: Option<String>,
    pub custom_fields: Option<HashMap<String, String>>,
}

impl CreateContactRequest {
    pub fn into_new_contact(self) -> NewContact {
        NewContact {
            organization_id: 0,
            account_id: self.account_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            title: self.title,
            custom_fields: self.custom_fields,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateContactRequest {
    pub account_id: Option<i32>,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub title: Option<String>,
    pub custom_fields: Option<HashMap<String, String>>,
}

impl UpdateContactRequest {
    pub fn into_update(self) -> UpdateContact {
        UpdateContact {
            account_id: self.account_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            title: self.title,
            custom_fields: self.custom_fields,
        }
    }
}
