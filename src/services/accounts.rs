//! Account management.

use crate::domain::account::{Account, NewAccount, UpdateAccount};
use crate::domain::types::NonEmptyString;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{AccountListQuery, AccountReader, AccountWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn get_account<R>(repo: &R, actor: &AuthenticatedUser, account_id: i32) -> ServiceResult<Account>
where
    R: AccountReader + ?Sized,
{
    repo.get_account_by_id(account_id, actor.organization_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn list_accounts<R>(repo: &R, query: AccountListQuery) -> ServiceResult<(usize, Vec<Account>)>
where
    R: AccountReader + ?Sized,
{
    repo.list_accounts(query).map_err(ServiceError::from)
}

pub fn create_account<R>(
    repo: &R,
    actor: &AuthenticatedUser,
    mut new_account: NewAccount,
) -> ServiceResult<Account>
where
    R: AccountWriter + ?Sized,
{
    new_account.name = NonEmptyString::new(new_account.name)?.into_inner();
    new_account.organization_id = actor.organization_id;
    new_account.phone = super::normalize_phone(new_account.phone.take());
    repo.create_account(&new_account).map_err(ServiceError::from)
}

pub fn update_account<R>(
    repo: &R,
    actor: &AuthenticatedUser,
    account_id: i32,
    updates: &UpdateAccount,
) -> ServiceResult<Account>
where
    R: AccountWriter + ?Sized,
{
    NonEmptyString::new(updates.name.as_str())?;
    repo.update_account(account_id, actor.organization_id, updates)
        .map_err(ServiceError::from)
}

/// Deletes the account; its contacts survive with the link cleared.
pub fn delete_account<R>(repo: &R, actor: &AuthenticatedUser, account_id: i32) -> ServiceResult<()>
where
    R: AccountWriter + ?Sized,
{
    repo.delete_account(account_id, actor.organization_id)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserRole;
    use crate::repository::mock::MockRepository;

    #[test]
    fn blank_name_is_rejected() {
        let repo = MockRepository::new();
        let actor = AuthenticatedUser {
            user_id: 1,
            organization_id: 10,
            email: "rep@acme.test".to_string(),
            role: UserRole::User,
        };
        let result = create_account(
            &repo,
            &actor,
            NewAccount {
                organization_id: 0,
                name: "   ".to_string(),
                industry: None,
                website: None,
                phone: None,
            },
        );
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }
}
