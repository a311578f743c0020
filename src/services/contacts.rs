//! Contact management.

use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{AccountReader, ContactListQuery, ContactReader, ContactWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn get_contact<R>(repo: &R, actor: &AuthenticatedUser, contact_id: i32) -> ServiceResult<Contact>
where
    R: ContactReader + ?Sized,
{
    repo.get_contact_by_id(contact_id, actor.organization_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn list_contacts<R>(repo: &R, query: ContactListQuery) -> ServiceResult<(usize, Vec<Contact>)>
where
    R: ContactReader + ?Sized,
{
    repo.list_contacts(query).map_err(ServiceError::from)
}

/// A contact may link to an account; the link target must belong to the same
/// organization.
fn check_account_link<R>(
    repo: &R,
    organization_id: i32,
    account_id: Option<i32>,
) -> ServiceResult<()>
where
    R: AccountReader + ?Sized,
{
    if let Some(account_id) = account_id
        && repo.get_account_by_id(account_id, organization_id)?.is_none()
    {
        return Err(ServiceError::Validation(format!(
            "account {account_id} does not exist"
        )));
    }
    Ok(())
}

pub fn create_contact<R>(
    repo: &R,
    actor: &AuthenticatedUser,
    mut new_contact: NewContact,
) -> ServiceResult<Contact>
where
    R: ContactWriter + AccountReader + ?Sized,
{
    new_contact.organization_id = actor.organization_id;
    new_contact.phone = super::normalize_phone(new_contact.phone.take());
    check_account_link(repo, actor.organization_id, new_contact.account_id)?;
    repo.create_contact(&new_contact).map_err(ServiceError::from)
}

pub fn update_contact<R>(
    repo: &R,
    actor: &AuthenticatedUser,
    contact_id: i32,
    updates: &UpdateContact,
) -> ServiceResult<Contact>
where
    R: ContactWriter + AccountReader + ?Sized,
{
    check_account_link(repo, actor.organization_id, updates.account_id)?;
    repo.update_contact(contact_id, actor.organization_id, updates)
        .map_err(ServiceError::from)
}

pub fn delete_contact<R>(repo: &R, actor: &AuthenticatedUser, contact_id: i32) -> ServiceResult<()>
where
    R: ContactWriter + ?Sized,
{
    repo.delete_contact(contact_id, actor.organization_id)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserRole;
    use crate::repository::mock::MockRepository;

    fn actor() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 1,
            organization_id: 10,
            email: "rep@acme.test".to_string(),
            role: UserRole::User,
        }
    }

    #[test]
    fn linking_to_a_foreign_account_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_get_account_by_id().returning(|_, _| Ok(None));

        let result = create_contact(
            &repo,
            &actor(),
            NewContact {
                organization_id: 0,
                account_id: Some(99),
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: None,
                phone: None,
                title: None,
                custom_fields: None,
            },
        );
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn phone_numbers_are_normalized_on_create() {
        let mut repo = MockRepository::new();
        repo.expect_create_contact()
            .withf(|c| c.phone.as_deref() == Some("+14155552671"))
            .returning(|c| {
                let now = chrono::Utc::now().naive_utc();
                Ok(Contact {
                    id: 1,
                    organization_id: c.organization_id,
                    account_id: c.account_id,
                    first_name: c.first_name.clone(),
                    last_name: c.last_name.clone(),
                    email: c.email.clone(),
                    phone: c.phone.clone(),
                    title: c.title.clone(),
                    created_at: now,
                    updated_at: now,
                    custom_fields: None,
                })
            });

        create_contact(
            &repo,
            &actor(),
            NewContact {
                organization_id: 0,
                account_id: None,
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: None,
                phone: Some("+1 (415) 555-2671".to_string()),
                title: None,
                custom_fields: None,
            },
        )
        .unwrap();
    }
}
