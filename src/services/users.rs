//! Admin-only user management within one organization.

use crate::domain::types::Email;
use crate::domain::user::{NewUser, UpdateUser, User, UserRole};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{UserReader, UserWriter};
use crate::services::auth::hash_password;
use crate::services::{ServiceError, ServiceResult};

fn require_admin(actor: &AuthenticatedUser) -> ServiceResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(
            "administrator role required".to_string(),
        ))
    }
}

pub fn list_users<R>(repo: &R, actor: &AuthenticatedUser) -> ServiceResult<Vec<User>>
where
    R: UserReader + ?Sized,
{
    require_admin(actor)?;
    repo.list_users(actor.organization_id)
        .map_err(ServiceError::from)
}

pub fn get_user<R>(repo: &R, actor: &AuthenticatedUser, user_id: i32) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    require_admin(actor)?;
    repo.get_user_by_id(user_id, actor.organization_id)?
        .ok_or(ServiceError::NotFound)
}

pub struct CreateUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

pub fn create_user<R>(
    repo: &R,
    actor: &AuthenticatedUser,
    request: CreateUser,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    require_admin(actor)?;
    let email = Email::new(request.email)?;

    if repo
        .get_user_by_email(email.as_str(), actor.organization_id)?
        .is_some()
    {
        return Err(ServiceError::Conflict(format!(
            "a user with email {} already exists",
            email.as_str()
        )));
    }

    let new_user = NewUser {
        organization_id: actor.organization_id,
        email: email.into_inner(),
        password_hash: hash_password(&request.password)?,
        first_name: request.first_name,
        last_name: request.last_name,
        role: request.role,
    };
    repo.create_user(&new_user).map_err(ServiceError::from)
}

pub fn update_user<R>(
    repo: &R,
    actor: &AuthenticatedUser,
    user_id: i32,
    updates: &UpdateUser,
) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    require_admin(actor)?;
    repo.update_user(user_id, actor.organization_id, updates)
        .map_err(ServiceError::from)
}

pub fn delete_user<R>(repo: &R, actor: &AuthenticatedUser, user_id: i32) -> ServiceResult<()>
where
    R: UserWriter + ?Sized,
{
    require_admin(actor)?;
    if user_id == actor.user_id {
        return Err(ServiceError::Forbidden(
            "administrators cannot delete their own account".to_string(),
        ));
    }
    repo.delete_user(user_id, actor.organization_id)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 1,
            organization_id: 10,
            email: "admin@acme.test".to_string(),
            role: UserRole::Admin,
        }
    }

    fn member() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 2,
            organization_id: 10,
            email: "user@acme.test".to_string(),
            role: UserRole::User,
        }
    }

    #[test]
    fn non_admin_cannot_list_users() {
        let repo = MockRepository::new();
        let result = list_users(&repo, &member());
        assert!(matches!(result, Err(ServiceError::Forbidden(_))));
    }

    #[test]
    fn admin_cannot_delete_self() {
        let repo = MockRepository::new();
        let result = delete_user(&repo, &admin(), 1);
        assert!(matches!(result, Err(ServiceError::Forbidden(_))));
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email().returning(|email, org_id| {
            Ok(Some(User {
                id: 5,
                organization_id: org_id,
                email: email.to_string(),
                password_hash: "x".to_string(),
                first_name: "E".to_string(),
                last_name: "Xists".to_string(),
                role: UserRole::User,
                created_at: chrono::Utc::now().naive_utc(),
                updated_at: chrono::Utc::now().naive_utc(),
            }))
        });
        let result = create_user(
            &repo,
            &admin(),
            CreateUser {
                email: "user@acme.test".to_string(),
                password: "long enough".to_string(),
                first_name: "New".to_string(),
                last_name: "User".to_string(),
                role: UserRole::User,
            },
        );
        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }
}
