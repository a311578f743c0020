//! Diesel models for the lead activity log.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::lead_event::{LeadEvent as DomainLeadEvent, NewLeadEvent as DomainNewLeadEvent};
use crate::models::lead::Lead;
use crate::models::user::User;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Lead, foreign_key = lead_id))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(table_name = crate::schema::lead_events)]
pub struct LeadEvent {
    pub id: i32,
    pub lead_id: i32,
    pub user_id: i32,
    pub event_type: String,
    pub event_data: String, // JSON text in the DB
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::lead_events)]
pub struct NewLeadEvent {
    pub lead_id: i32,
    pub user_id: i32,
    pub event_type: String,
    pub event_data: String,
    pub created_at: NaiveDateTime,
}

impl From<LeadEvent> for DomainLeadEvent {
    fn from(event: LeadEvent) -> Self {
        let event_data = serde_json::from_str(&event.event_data).unwrap_or_default();
        Self {
            id: event.id,
            lead_id: event.lead_id,
            user_id: event.user_id,
            event_type: event.event_type.as_str().into(),
            event_data,
            created_at: event.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewLeadEvent> for NewLeadEvent {
    fn from(event: &'a DomainNewLeadEvent) -> Self {
        Self {
            lead_id: event.lead_id,
            user_id: event.user_id,
            event_type: event.event_type.to_string(),
            event_data: event.event_data.to_string(),
            created_at: event.created_at,
        }
    }
}
