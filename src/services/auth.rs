//! Registration and login.
//!
//! Login failures never reveal whether the email or the password was wrong;
//! both paths return [`ServiceError::Unauthorized`].

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::domain::organization::{NewOrganization, Organization};
use crate::domain::types::Email;
use crate::domain::user::{NewUser, User, UserRole};
use crate::repository::{OrganizationReader, OrganizationWriter, UserReader};
use crate::services::{ServiceError, ServiceResult};

const MIN_PASSWORD_LENGTH: usize = 8;

pub struct RegisterOrganization {
    pub organization_name: String,
    pub slug: Option<String>,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

pub fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::Internal(format!("password hashing failed: {e}")))
}

pub fn verify_password(hash: &str, password: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Creates an organization together with its first admin user, atomically.
pub fn register_organization<R>(
    repo: &R,
    request: RegisterOrganization,
) -> ServiceResult<(Organization, User)>
where
    R: OrganizationReader + OrganizationWriter + ?Sized,
{
    if request.password.len() < MIN_PASSWORD_LENGTH {
        return Err(ServiceError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    let email = Email::new(request.email)?;
    let new_org = NewOrganization::new(request.organization_name, request.slug);
    if new_org.name.is_empty() || new_org.slug.is_empty() {
        return Err(ServiceError::Validation(
            "organization name must not be empty".to_string(),
        ));
    }

    if repo.get_organization_by_slug(&new_org.slug)?.is_some() {
        return Err(ServiceError::Conflict(format!(
            "organization slug '{}' is already taken",
            new_org.slug
        )));
    }

    let admin = NewUser {
        // Replaced by the actual id inside the transaction.
        organization_id: 0,
        email: email.into_inner(),
        password_hash: hash_password(&request.password)?,
        first_name: request.first_name,
        last_name: request.last_name,
        role: UserRole::Admin,
    };

    repo.create_organization_with_admin(&new_org, &admin)
        .map_err(ServiceError::from)
}

/// Authenticates a user within the organization identified by `slug`.
pub fn login<R>(repo: &R, slug: &str, email: &str, password: &str) -> ServiceResult<User>
where
    R: OrganizationReader + UserReader + ?Sized,
{
    let email = Email::new(email).map_err(|_| ServiceError::Unauthorized)?;
    let org = repo
        .get_organization_by_slug(slug)?
        .ok_or(ServiceError::Unauthorized)?;
    let user = repo
        .get_user_by_email(email.as_str(), org.id)?
        .ok_or(ServiceError::Unauthorized)?;

    if !verify_password(&user.password_hash, password) {
        return Err(ServiceError::Unauthorized);
    }
    Ok(user)
}

/// Loads the authenticated user's own record.
pub fn current_user<R>(repo: &R, user_id: i32, organization_id: i32) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    repo.get_user_by_id(user_id, organization_id)?
        .ok_or(ServiceError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    #[test]
    fn password_round_trip() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password(&hash, "correct horse"));
        assert!(!verify_password(&hash, "wrong horse"));
        assert!(!verify_password("not-a-phc-string", "anything"));
    }

    #[test]
    fn short_passwords_are_rejected() {
        let repo = MockRepository::new();
        let result = register_organization(
            &repo,
            RegisterOrganization {
                organization_name: "Acme".to_string(),
                slug: None,
                email: "admin@acme.test".to_string(),
                password: "short".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Admin".to_string(),
            },
        );
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn taken_slug_is_a_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_get_organization_by_slug()
            .returning(|slug| {
                Ok(Some(crate::domain::organization::Organization {
                    id: 1,
                    name: "Acme".to_string(),
                    slug: slug.to_string(),
                    mac_search_enabled: false,
                    created_at: chrono::Utc::now().naive_utc(),
                    updated_at: chrono::Utc::now().naive_utc(),
                }))
            });
        let result = register_organization(
            &repo,
            RegisterOrganization {
                organization_name: "Acme".to_string(),
                slug: Some("acme".to_string()),
                email: "admin@acme.test".to_string(),
                password: "long enough".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Admin".to_string(),
            },
        );
        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn unknown_slug_and_unknown_email_look_identical() {
        let mut repo = MockRepository::new();
        repo.expect_get_organization_by_slug().returning(|_| Ok(None));
        let unknown_org = login(&repo, "nope", "a@b.test", "pw").unwrap_err();

        let mut repo = MockRepository::new();
        repo.expect_get_organization_by_slug().returning(|slug| {
            Ok(Some(crate::domain::organization::Organization {
                id: 1,
                name: "Acme".to_string(),
                slug: slug.to_string(),
                mac_search_enabled: false,
                created_at: chrono::Utc::now().naive_utc(),
                updated_at: chrono::Utc::now().naive_utc(),
            }))
        });
        repo.expect_get_user_by_email().returning(|_, _| Ok(None));
        let unknown_user = login(&repo, "acme", "a@b.test", "pw").unwrap_err();

        assert!(matches!(unknown_org, ServiceError::Unauthorized));
        assert!(matches!(unknown_user, ServiceError::Unauthorized));
    }
}
