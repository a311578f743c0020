use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::lead::{
    Lead as DomainLead, NewLead as DomainNewLead, UpdateLead as DomainUpdateLead,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::leads)]
/// Diesel model for [`crate::domain::lead::Lead`].
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
    pub status: String,
    pub priority: String,
    pub value: f64,
    pub notes: Option<String>,
    pub assigned_to: Option<i32>,
    pub created_by: Option<i32>,
    pub next_follow_up: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::leads)]
pub struct NewLead<'a> {
    pub organization_id: i32,
    pub title: Option<&'a str>,
    pub company: Option<&'a str>,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub source: Option<&'a str>,
    pub status: String,
    pub priority: String,
    pub value: f64,
    pub notes: Option<&'a str>,
    pub assigned_to: Option<i32>,
    pub created_by: Option<i32>,
    pub next_follow_up: Option<NaiveDateTime>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::leads)]
pub struct UpdateLead<'a> {
    pub title: Option<&'a str>,
    pub company: Option<&'a str>,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub source: Option<&'a str>,
    pub status: String,
    pub priority: String,
    pub value: f64,
    pub notes: Option<&'a str>,
    pub assigned_to: Option<i32>,
    pub next_follow_up: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}

impl From<Lead> for DomainLead {
    fn from(lead: Lead) -> Self {
        Self {
            id: lead.id,
            organization_id: lead.organization_id,
            title: lead.title,
            company: lead.company,
            first_name: lead.first_name,
            last_name: lead.last_name,
            email: lead.email,
            phone: lead.phone,
            source: lead.source,
            status: lead.status.as_str().into(),
            priority: lead.priority.as_str().into(),
            value: lead.value,
            notes: lead.notes,
            assigned_to: lead.assigned_to,
            created_by: lead.created_by,
            next_follow_up: lead.next_follow_up,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
            custom_fields: None,
        }
    }
}

impl<'a> From<&'a DomainNewLead> for NewLead<'a> {
    fn from(lead: &'a DomainNewLead) -> Self {
        Self {
            organization_id: lead.organization_id,
            title: lead.title.as_deref(),
            company: lead.company.as_deref(),
            first_name: lead.first_name.as_str(),
            last_name: lead.last_name.as_str(),
            email: lead.email.as_deref(),
            phone: lead.phone.as_deref(),
            source: lead.source.as_deref(),
            status: lead.status.to_string(),
            priority: lead.priority.to_string(),
            value: lead.value,
            notes: lead.notes.as_deref(),
            assigned_to: lead.assigned_to,
            created_by: lead.created_by,
            next_follow_up: lead.next_follow_up,
        }
    }
}

impl<'a> From<&'a DomainUpdateLead> for UpdateLead<'a> {
    fn from(lead: &'a DomainUpdateLead) -> Self {
        Self {
            title: lead.title.as_deref(),
            company: lead.company.as_deref(),
            first_name: lead.first_name.as_str(),
            last_name: lead.last_name.as_str(),
            email: lead.email.as_deref(),
            phone: lead.phone.as_deref(),
            source: lead.source.as_deref(),
            status: lead.status.to_string(),
            priority: lead.priority.to_string(),
            value: lead.value,
            notes: lead.notes.as_deref(),
            assigned_to: lead.assigned_to,
            next_follow_up: lead.next_follow_up,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lead::{LeadPriority, LeadStatus};
    use chrono::Utc;

    #[test]
    fn lead_row_converts_to_domain() {
        let now = Utc::now().naive_utc();
        let row = Lead {
            id: 7,
            organization_id: 2,
            title: None,
            company: Some("Acme".to_string()),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: Some("ada@acme.test".to_string()),
            phone: None,
            source: Some("referral".to_string()),
            status: "qualified".to_string(),
            priority: "high".to_string(),
            value: 1200.0,
            notes: None,
            assigned_to: Some(3),
            created_by: Some(1),
            next_follow_up: None,
            created_at: now,
            updated_at: now,
        };
        let lead: DomainLead = row.into();
        assert_eq!(lead.status, LeadStatus::Qualified);
        assert_eq!(lead.priority, LeadPriority::High);
        assert_eq!(lead.full_name(), "Ada Lovelace");
        assert!(lead.custom_fields.is_none());
    }
}
