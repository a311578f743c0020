use std::collections::HashMap;
use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Converted,
    Lost,
}

impl Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Converted => "converted",
            LeadStatus::Lost => "lost",
        };
        write!(f, "{s}")
    }
}

impl From<&str> for LeadStatus {
    fn from(s: &str) -> Self {
        match s {
            "contacted" => LeadStatus::Contacted,
            "qualified" => LeadStatus::Qualified,
            "converted" => LeadStatus::Converted,
            "lost" => LeadStatus::Lost,
            _ => LeadStatus::New,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LeadPriority {
    Low,
    Medium,
    High,
}

impl Display for LeadPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LeadPriority::Low => "low",
            LeadPriority::Medium => "medium",
            LeadPriority::High => "high",
        };
        write!(f, "{s}")
    }
}

impl From<&str> for LeadPriority {
    fn from(s: &str) -> Self {
        match s {
            "low" => LeadPriority::Low,
            "high" => LeadPriority::High,
            _ => LeadPriority::Medium,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    pub id: i32,
    pub organization_id: i32,
    pub title: Option<String>,
    pub company: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub status: LeadStatus,
    pub priority: LeadPriority,
    pub value: f64,
    pub notes: Option<String>,
    pub assigned_to: Option<i32>,
    pub created_by: Option<i32>,
    pub next_follow_up: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Optional map of per-organization custom field values.
    pub custom_fields: Option<HashMap<String, String>>,
}

impl Lead {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Clone, Debug)]
pub struct NewLead {
    pub organization_id: i32,
    pub title: Option<String>,
    pub company: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub status: LeadStatus,
    pub priority: LeadPriority,
    pub value: f64,
    pub notes: Option<String>,
    pub assigned_to: Option<i32>,
    pub created_by: Option<i32>,
    pub next_follow_up: Option<NaiveDateTime>,
    pub custom_fields: Option<HashMap<String, String>>,
}

#[derive(Clone, Debug)]
pub struct UpdateLead {
    pub title: Option<String>,
    pub company: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub status: LeadStatus,
    pub priority: LeadPriority,
    pub value: f64,
    pub notes: Option<String>,
    pub assigned_to: Option<i32>,
    pub next_follow_up: Option<NaiveDateTime>,
    pub custom_fields: Option<HashMap<String, String>>,
}
