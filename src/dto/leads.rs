use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::account::Account;
use crate::domain::contact::Contact;
use crate::domain::lead::{Lead, LeadPriority, LeadStatus, NewLead, UpdateLead};
use crate::domain::lead_event::LeadEvent;

#[derive(Debug, Deserialize)]
pub struct LeadListParams {
    pub search: Option<String>,
    pub status: Option<LeadStatus>,
    #[serde(default, deserialize_with = "super::de_opt_i32")]
    pub assigned_to: Option<i32>,
    #[serde(flatten)]
    pub page: super::PageParams,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLeadRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    #[serde(default = "default_status")]
    pub status: LeadStatus,
    #[serde(default = "default_priority")]
    pub priority: LeadPriority,
    #[serde(default)]
    pub value: f64,
    pub notes: Option<String>,
    pub assigned_to: Option<i32>,
    pub next_follow_up: Option<NaiveDateTime>,
    pub custom_fields: Option<HashMap<String, String>>,
}

fn default_status() -> LeadStatus {
    LeadStatus::New
}

fn default_priority() -> LeadPriority {
    LeadPriority::Medium
}

impl CreateLeadRequest {
    /// The organization and creator are filled in by the service from the
    /// authenticated caller.
    pub fn into_new_lead(self) -> NewLead {
        NewLead {
            organization_id: 0,
            title: self.title,
            company: self.company,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            source: self.source,
            status: self.status,
            priority: self.priority,
            value: self.value,
            notes: self.notes,
            assigned_to: self.assigned_to,
            created_by: None,
            next_follow_up: self.next_follow_up,
            custom_fields: self.custom_fields,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLeadRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub status: LeadStatus,
    pub priority: LeadPriority,
    #[serde(default)]
    pub value: f64,
    pub notes: Option<String>,
    pub assigned_to: Option<i32>,
    pub next_follow_up: Option<NaiveDateTime>,
    pub custom_fields: Option<HashMap<String, String>>,
}

impl UpdateLeadRequest {
    pub fn into_update(self) -> UpdateLead {
        UpdateLead {
            title: self.title,
            company: self.company,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            source: self.source,
            status: self.status,
            priority: self.priority,
            value: self.value,
            notes: self.notes,
            assigned_to: self.assigned_to,
            next_follow_up: self.next_follow_up,
            custom_fields: self.custom_fields,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConvertLeadResponse {
    pub lead: Lead,
    pub account: Account,
    pub contact: Contact,
}

#[derive(Debug, Deserialize)]
pub struct LeadEventListParams {
    pub event_type: Option<String>,
    #[serde(flatten)]
    pub page: super::PageParams,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLeadEventRequest {
    /// `note`, `call` or `email`.
    pub event_type: String,
    #[validate(length(min = 1))]
    pub text: String,
}

/// A timeline entry with the author's display name resolved.
#[derive(Debug, Serialize)]
pub struct LeadEventResponse {
    #[serde(flatten)]
    pub event: LeadEvent,
    pub user_name: String,
}
