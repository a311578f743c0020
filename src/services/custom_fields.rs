//! Custom field configuration per organization and entity type.

use crate::domain::custom_field::{
    EntityType, FieldContext, FieldDefinition, NewFieldDefinition, UpdateFieldDefinition,
    normalize_field_name,
};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{CustomFieldReader, CustomFieldWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists field definitions, optionally narrowed to those visible in one UI
/// context. The master override is applied before the context filter, so a
/// hidden field never slips through.
pub fn list_fields<R>(
    repo: &R,
    actor: &AuthenticatedUser,
    entity_type: EntityType,
    context: Option<FieldContext>,
    include_inactive: bool,
) -> ServiceResult<Vec<FieldDefinition>>
where
    R: CustomFieldReader + ?Sized,
{
    let fields =
        repo.list_field_definitions(actor.organization_id, entity_type, !include_inactive)?;
    Ok(match context {
        Some(context) => fields
            .into_iter()
            .filter(|f| f.is_visible_in(context))
            .collect(),
        None => fields,
    })
}

fn require_admin(actor: &AuthenticatedUser) -> ServiceResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(
            "administrator role required".to_string(),
        ))
    }
}

pub fn create_field<R>(
    repo: &R,
    actor: &AuthenticatedUser,
    mut new_field: NewFieldDefinition,
) -> ServiceResult<FieldDefinition>
where
    R: CustomFieldWriter + ?Sized,
{
    require_admin(actor)?;

    if new_field.field_label.trim().is_empty() {
        return Err(ServiceError::Validation(
            "field label must not be empty".to_string(),
        ));
    }
    if new_field.field_name.trim().is_empty() {
        new_field.field_name = normalize_field_name(&new_field.field_label);
    } else {
        new_field.field_name = normalize_field_name(&new_field.field_name);
    }
    if new_field.field_name.is_empty() {
        return Err(ServiceError::Validation(
            "field label yields an empty field name".to_string(),
        ));
    }
    new_field.organization_id = actor.organization_id;
    repo.create_field_definition(&new_field)
        .map_err(ServiceError::from)
}

pub fn update_field<R>(
    repo: &R,
    actor: &AuthenticatedUser,
    field_id: i32,
    updates: UpdateFieldDefinition,
) -> ServiceResult<FieldDefinition>
where
    R: CustomFieldWriter + ?Sized,
{
    require_admin(actor)?;
    let updates = updates.normalized();
    repo.update_field_definition(field_id, actor.organization_id, &updates)
        .map_err(ServiceError::from)
}

pub fn deactivate_field<R>(
    repo: &R,
    actor: &AuthenticatedUser,
    field_id: i32,
) -> ServiceResult<()>
where
    R: CustomFieldWriter + ?Sized,
{
    require_admin(actor)?;
    repo.deactivate_field_definition(field_id, actor.organization_id)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::custom_field::{ContextFlags, FieldType, FieldVisibility};
    use crate::domain::user::UserRole;
    use crate::repository::mock::MockRepository;

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 1,
            organization_id: 10,
            email: "admin@acme.test".to_string(),
            role: UserRole::Admin,
        }
    }

    fn field(
        id: i32,
        visibility: FieldVisibility,
        contexts: ContextFlags,
    ) -> FieldDefinition {
        let now = chrono::Utc::now().naive_utc();
        FieldDefinition {
            id,
            organization_id: 10,
            entity_type: EntityType::Lead,
            field_name: format!("field_{id}"),
            field_label: format!("Field {id}"),
            field_type: FieldType::Text,
            is_required: false,
            display_order: id,
            overall_visibility: visibility,
            contexts,
            field_options: None,
            default_value: None,
            placeholder: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn hidden_fields_are_filtered_even_with_context_flags_set() {
        let mut repo = MockRepository::new();
        repo.expect_list_field_definitions().returning(|_, _, _| {
            Ok(vec![
                field(1, FieldVisibility::Visible, ContextFlags::ALL),
                field(2, FieldVisibility::Hidden, ContextFlags::ALL),
            ])
        });

        let visible = list_fields(
            &repo,
            &admin(),
            EntityType::Lead,
            Some(FieldContext::ListView),
            false,
        )
        .unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);
    }

    #[test]
    fn field_name_is_derived_from_label() {
        let mut repo = MockRepository::new();
        repo.expect_create_field_definition()
            .withf(|f| f.field_name == "install_state" && f.organization_id == 10)
            .returning(|f| {
                Ok(field(1, f.overall_visibility, f.contexts))
            });

        create_field(
            &repo,
            &admin(),
            NewFieldDefinition {
                organization_id: 0,
                entity_type: EntityType::Lead,
                field_name: String::new(),
                field_label: "Install State".to_string(),
                field_type: FieldType::Text,
                is_required: false,
                display_order: 0,
                overall_visibility: FieldVisibility::Visible,
                contexts: ContextFlags::ALL,
                field_options: None,
                default_value: None,
                placeholder: None,
            },
        )
        .unwrap();
    }

    #[test]
    fn non_admin_cannot_configure_fields() {
        let repo = MockRepository::new();
        let member = AuthenticatedUser {
            user_id: 2,
            organization_id: 10,
            email: "user@acme.test".to_string(),
            role: UserRole::User,
        };
        let result = deactivate_field(&repo, &member, 1);
        assert!(matches!(result, Err(ServiceError::Forbidden(_))));
    }
}
