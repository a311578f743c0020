use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

use crate::domain::custom_field::{
    ContextFlags, FieldDefinition as DomainFieldDefinition,
    NewFieldDefinition as DomainNewFieldDefinition,
    UpdateFieldDefinition as DomainUpdateFieldDefinition,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::custom_field_definitions)]
/// Diesel model for [`crate::domain::custom_field::FieldDefinition`].
pub struct FieldDefinition {
    pub id: i32,
    pub organization_id: i32,
    pub entity_type: String,
    pub field_name: String,
    pub field_label: String,
    pub field_type: String,
    pub is_required: bool,
    pub display_order: i32,
    pub overall_visibility: String,
    pub show_in_list_view: bool,
    pub show_in_detail_view: bool,
    pub show_in_create_form: bool,
    pub show_in_edit_form: bool,
    pub field_options: Option<String>,
    pub default_value: Option<String>,
    pub placeholder: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::custom_field_definitions)]
pub struct NewFieldDefinition<'a> {
    pub organization_id: i32,
    pub entity_type: String,
    pub field_name: &'a str,
    pub field_label: &'a str,
    pub field_type: String,
    pub is_required: bool,
    pub display_order: i32,
    pub overall_visibility: String,
    pub show_in_list_view: bool,
    pub show_in_detail_view: bool,
    pub show_in_create_form: bool,
    pub show_in_edit_form: bool,
    pub field_options: Option<String>,
    pub default_value: Option<&'a str>,
    pub placeholder: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::custom_field_definitions)]
pub struct UpdateFieldDefinition<'a> {
    pub field_label: &'a str,
    pub field_type: String,
    pub is_required: bool,
    pub display_order: i32,
    pub overall_visibility: String,
    pub show_in_list_view: bool,
    pub show_in_detail_view: bool,
    pub show_in_create_form: bool,
    pub show_in_edit_form: bool,
    pub field_options: Option<String>,
    pub default_value: Option<&'a str>,
    pub placeholder: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

/// One stored custom field value for a lead/contact/account/transaction.
#[derive(Debug, Clone, Queryable, Insertable, Serialize)]
#[diesel(table_name = crate::schema::custom_field_values)]
#[diesel(primary_key(entity_type, entity_id, field))]
pub struct FieldValue {
    pub entity_type: String,
    pub entity_id: i32,
    pub field: String,
    pub value: String,
}

impl TryFrom<FieldDefinition> for DomainFieldDefinition {
    type Error = crate::domain::types::TypeConstraintError;

    fn try_from(row: FieldDefinition) -> Result<Self, Self::Error> {
        let entity_type = row.entity_type.parse()?;
        let field_options = row
            .field_options
            .as_deref()
            .and_then(|s| serde_json::from_str(s).ok());
        Ok(Self {
            id: row.id,
            organization_id: row.organization_id,
            entity_type,
            field_name: row.field_name,
            field_label: row.field_label,
            field_type: row.field_type.as_str().into(),
            is_required: row.is_required,
            display_order: row.display_order,
            overall_visibility: row.overall_visibility.as_str().into(),
            contexts: ContextFlags {
                list_view: row.show_in_list_view,
                detail_view: row.show_in_detail_view,
                create_form: row.show_in_create_form,
                edit_form: row.show_in_edit_form,
            },
            field_options,
            default_value: row.default_value,
            placeholder: row.placeholder,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewFieldDefinition> for NewFieldDefinition<'a> {
    fn from(field: &'a DomainNewFieldDefinition) -> Self {
        Self {
            organization_id: field.organization_id,
            entity_type: field.entity_type.to_string(),
            field_name: field.field_name.as_str(),
            field_label: field.field_label.as_str(),
            field_type: field.field_type.to_string(),
            is_required: field.is_required,
            display_order: field.display_order,
            overall_visibility: field.overall_visibility.to_string(),
            show_in_list_view: field.contexts.list_view,
            show_in_detail_view: field.contexts.detail_view,
            show_in_create_form: field.contexts.create_form,
            show_in_edit_form: field.contexts.edit_form,
            field_options: field.field_options.as_ref().map(|v| v.to_string()),
            default_value: field.default_value.as_deref(),
            placeholder: field.placeholder.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateFieldDefinition> for UpdateFieldDefinition<'a> {
    fn from(field: &'a DomainUpdateFieldDefinition) -> Self {
        Self {
            field_label: field.field_label.as_str(),
            field_type: field.field_type.to_string(),
            is_required: field.is_required,
            display_order: field.display_order,
            overall_visibility: field.overall_visibility.to_string(),
            show_in_list_view: field.contexts.list_view,
            show_in_detail_view: field.contexts.detail_view,
            show_in_create_form: field.contexts.create_form,
            show_in_edit_form: field.contexts.edit_form,
            field_options: field.field_options.as_ref().map(|v| v.to_string()),
            default_value: field.default_value.as_deref(),
            placeholder: field.placeholder.as_deref(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
