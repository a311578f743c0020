//! Lead management: CRUD, the activity timeline and conversion.

use serde_json::json;

use crate::domain::account::Account;
use crate::domain::contact::Contact;
use crate::domain::lead::{Lead, NewLead, UpdateLead};
use crate::domain::lead_event::{LeadEvent, LeadEventType, NewLeadEvent};
use crate::domain::user::User;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{
    LeadEventListQuery, LeadEventReader, LeadEventWriter, LeadListQuery, LeadReader, LeadWriter,
};
use crate::services::{ServiceError, ServiceResult};

pub fn get_lead<R>(repo: &R, actor: &AuthenticatedUser, lead_id: i32) -> ServiceResult<Lead>
where
    R: LeadReader + ?Sized,
{
    repo.get_lead_by_id(lead_id, actor.organization_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn list_leads<R>(repo: &R, query: LeadListQuery) -> ServiceResult<(usize, Vec<Lead>)>
where
    R: LeadReader + ?Sized,
{
    repo.list_leads(query).map_err(ServiceError::from)
}

pub fn create_lead<R>(
    repo: &R,
    actor: &AuthenticatedUser,
    mut new_lead: NewLead,
) -> ServiceResult<Lead>
where
    R: LeadWriter + ?Sized,
{
    if new_lead.value < 0.0 {
        return Err(ServiceError::Validation(
            "lead value must not be negative".to_string(),
        ));
    }
    new_lead.organization_id = actor.organization_id;
    new_lead.created_by = Some(actor.user_id);
    new_lead.phone = super::normalize_phone(new_lead.phone.take());
    repo.create_lead(&new_lead).map_err(ServiceError::from)
}

/// Updates a lead. A status transition is recorded on the lead's timeline
/// with the old and new value.
pub fn update_lead<R>(
    repo: &R,
    actor: &AuthenticatedUser,
    lead_id: i32,
    updates: &UpdateLead,
) -> ServiceResult<Lead>
where
    R: LeadReader + LeadWriter + LeadEventWriter + ?Sized,
{
    if updates.value < 0.0 {
        return Err(ServiceError::Validation(
            "lead value must not be negative".to_string(),
        ));
    }

    let before = repo
        .get_lead_by_id(lead_id, actor.organization_id)?
        .ok_or(ServiceError::NotFound)?;

    let lead = repo.update_lead(lead_id, actor.organization_id, updates)?;

    if before.status != lead.status {
        let event = NewLeadEvent {
            lead_id,
            user_id: actor.user_id,
            event_type: LeadEventType::StatusChange,
            event_data: json!({
                "from": before.status.to_string(),
                "to": lead.status.to_string(),
            }),
            created_at: chrono::Utc::now().naive_utc(),
        };
        repo.create_lead_event(&event)?;
    }

    Ok(lead)
}

pub fn delete_lead<R>(repo: &R, actor: &AuthenticatedUser, lead_id: i32) -> ServiceResult<()>
where
    R: LeadWriter + ?Sized,
{
    repo.delete_lead(lead_id, actor.organization_id)
        .map_err(ServiceError::from)
}

/// Converts a qualified lead into an account and a contact.
pub fn convert_lead<R>(
    repo: &R,
    actor: &AuthenticatedUser,
    lead_id: i32,
) -> ServiceResult<(Lead, Account, Contact)>
where
    R: LeadWriter + LeadEventWriter + ?Sized,
{
    let (lead, account, contact) = repo.convert_lead(lead_id, actor.organization_id)?;

    let event = NewLeadEvent {
        lead_id,
        user_id: actor.user_id,
        event_type: LeadEventType::StatusChange,
        event_data: json!({
            "to": lead.status.to_string(),
            "account_id": account.id,
            "contact_id": contact.id,
        }),
        created_at: chrono::Utc::now().naive_utc(),
    };
    repo.create_lead_event(&event)?;

    Ok((lead, account, contact))
}

pub fn list_lead_events<R>(
    repo: &R,
    actor: &AuthenticatedUser,
    query: LeadEventListQuery,
) -> ServiceResult<(usize, Vec<(LeadEvent, User)>)>
where
    R: LeadReader + LeadEventReader + ?Sized,
{
    // The query itself is keyed by lead id only; confirm tenant ownership
    // before touching the timeline.
    repo.get_lead_by_id(query.lead_id, actor.organization_id)?
        .ok_or(ServiceError::NotFound)?;
    repo.list_lead_events(query).map_err(ServiceError::from)
}

/// Appends a note, call or email record to the lead's timeline. Free text is
/// sanitized before it is stored.
pub fn add_lead_event<R>(
    repo: &R,
    actor: &AuthenticatedUser,
    lead_id: i32,
    event_type: LeadEventType,
    text: &str,
) -> ServiceResult<LeadEvent>
where
    R: LeadReader + LeadEventWriter + ?Sized,
{
    if event_type == LeadEventType::StatusChange {
        return Err(ServiceError::Validation(
            "status events are recorded automatically".to_string(),
        ));
    }
    repo.get_lead_by_id(lead_id, actor.organization_id)?
        .ok_or(ServiceError::NotFound)?;

    let clean = ammonia::clean(text);
    let event = NewLeadEvent {
        lead_id,
        user_id: actor.user_id,
        event_type,
        event_data: json!({ "text": clean }),
        created_at: chrono::Utc::now().naive_utc(),
    };
    repo.create_lead_event(&event).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lead::{LeadPriority, LeadStatus};
    use crate::domain::user::UserRole;
    use crate::repository::mock::MockRepository;

    fn actor() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 3,
            organization_id: 10,
            email: "rep@acme.test".to_string(),
            role: UserRole::User,
        }
    }

    fn sample_lead(status: LeadStatus) -> Lead {
        let now = chrono::Utc::now().naive_utc();
        Lead {
            id: 7,
            organization_id: 10,
            title: None,
            company: Some("Acme".to_string()),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: None,
            phone: None,
            source: None,
            status,
            priority: LeadPriority::Medium,
            value: 100.0,
            notes: None,
            assigned_to: None,
            created_by: Some(3),
            next_follow_up: None,
            created_at: now,
            updated_at: now,
            custom_fields: None,
        }
    }

    fn sample_update(status: LeadStatus) -> UpdateLead {
        UpdateLead {
            title: None,
            company: Some("Acme".to_string()),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: None,
            phone: None,
            source: None,
            status,
            priority: LeadPriority::Medium,
            value: 100.0,
            notes: None,
            assigned_to: None,
            next_follow_up: None,
            custom_fields: None,
        }
    }

    #[test]
    fn status_change_is_recorded_on_the_timeline() {
        let mut repo = MockRepository::new();
        repo.expect_get_lead_by_id()
            .returning(|_, _| Ok(Some(sample_lead(LeadStatus::New))));
        repo.expect_update_lead()
            .returning(|_, _, _| Ok(sample_lead(LeadStatus::Contacted)));
        repo.expect_create_lead_event()
            .times(1)
            .withf(|event| {
                event.event_type == LeadEventType::StatusChange
                    && event.event_data["from"] == "new"
                    && event.event_data["to"] == "contacted"
            })
            .returning(|event| {
                Ok(LeadEvent {
                    id: 1,
                    lead_id: event.lead_id,
                    user_id: event.user_id,
                    event_type: event.event_type.clone(),
                    event_data: event.event_data.clone(),
                    created_at: event.created_at,
                })
            });

        let lead = update_lead(&repo, &actor(), 7, &sample_update(LeadStatus::Contacted)).unwrap();
        assert_eq!(lead.status, LeadStatus::Contacted);
    }

    #[test]
    fn unchanged_status_records_no_event() {
        let mut repo = MockRepository::new();
        repo.expect_get_lead_by_id()
            .returning(|_, _| Ok(Some(sample_lead(LeadStatus::New))));
        repo.expect_update_lead()
            .returning(|_, _, _| Ok(sample_lead(LeadStatus::New)));
        repo.expect_create_lead_event().times(0);

        update_lead(&repo, &actor(), 7, &sample_update(LeadStatus::New)).unwrap();
    }

    #[test]
    fn negative_value_is_rejected() {
        let repo = MockRepository::new();
        let mut update = sample_update(LeadStatus::New);
        update.value = -1.0;
        let result = update_lead(&repo, &actor(), 7, &update);
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn note_text_is_sanitized() {
        let mut repo = MockRepository::new();
        repo.expect_get_lead_by_id()
            .returning(|_, _| Ok(Some(sample_lead(LeadStatus::New))));
        repo.expect_create_lead_event()
            .withf(|event| {
                let text = event.event_data["text"].as_str().unwrap();
                !text.contains("<script>")
            })
            .returning(|event| {
                Ok(LeadEvent {
                    id: 1,
                    lead_id: event.lead_id,
                    user_id: event.user_id,
                    event_type: event.event_type.clone(),
                    event_data: event.event_data.clone(),
                    created_at: event.created_at,
                })
            });

        add_lead_event(
            &repo,
            &actor(),
            7,
            LeadEventType::Note,
            "call went well <script>alert(1)</script>",
        )
        .unwrap();
    }

    #[test]
    fn manual_status_events_are_rejected() {
        let repo = MockRepository::new();
        let result = add_lead_event(&repo, &actor(), 7, LeadEventType::StatusChange, "x");
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }
}
