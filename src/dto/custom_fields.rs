use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::domain::custom_field::{
    ContextFlags, FieldType, FieldVisibility, NewFieldDefinition, UpdateFieldDefinition,
};

#[derive(Debug, Deserialize)]
pub struct FieldListParams {
    /// Narrow to fields visible in one UI context (`list_view`,
    /// `detail_view`, `create_form`, `edit_form`).
    pub context: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

/// Context flags as sent over the wire; everything defaults to visible.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ContextFlagsPayload {
    #[serde(default = "yes")]
    pub list_view: bool,
    #[serde(default = "yes")]
    pub detail_view: bool,
    #[serde(default = "yes")]
    pub create_form: bool,
    #[serde(default = "yes")]
    pub edit_form: bool,
}

fn yes() -> bool {
    true
}

impl Default for ContextFlagsPayload {
    fn default() -> Self {
        Self {
            list_view: true,
            detail_view: true,
            create_form: true,
            edit_form: true,
        }
    }
}

impl From<ContextFlagsPayload> for ContextFlags {
    fn from(payload: ContextFlagsPayload) -> Self {
        ContextFlags {
            list_view: payload.list_view,
            detail_view: payload.detail_view,
            create_form: payload.create_form,
            edit_form: payload.edit_form,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFieldRequest {
    /// Snake_case name; derived from the label when omitted.
    pub field_name: Option<String>,
    #[validate(length(min = 1))]
    pub field_label: String,
    #[serde(default = "default_field_type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_visibility")]
    pub overall_visibility: FieldVisibility,
    #[serde(default)]
    pub contexts: ContextFlagsPayload,
    pub field_options: Option<Value>,
    pub default_value: Option<String>,
    pub placeholder: Option<String>,
}

fn default_field_type() -> FieldType {
    FieldType::Text
}

fn default_visibility() -> FieldVisibility {
    FieldVisibility::Visible
}

impl CreateFieldRequest {
    pub fn into_new_field(
        self,
        entity_type: crate::domain::custom_field::EntityType,
    ) -> NewFieldDefinition {
        NewFieldDefinition {
            organization_id: 0,
            entity_type,
            field_name: self.field_name.unwrap_or_default(),
            field_label: self.field_label,
            field_type: self.field_type,
            is_required: self.is_required,
            display_order: self.display_order,
            overall_visibility: self.overall_visibility,
            contexts: self.contexts.into(),
            field_options: self.field_options,
            default_value: self.default_value,
            placeholder: self.placeholder,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFieldRequest {
    #[validate(length(min = 1))]
    pub field_label: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub display_order: i32,
    pub overall_visibility: FieldVisibility,
    #[serde(default)]
    pub contexts: ContextFlagsPayload,
    pub field_options: Option<Value>,
    pub default_value: Option<String>,
    pub placeholder: Option<String>,
}

impl UpdateFieldRequest {
    pub fn into_update(self) -> UpdateFieldDefinition {
        UpdateFieldDefinition {
            field_label: self.field_label,
            field_type: self.field_type,
            is_required: self.is_required,
            display_order: self.display_order,
            overall_visibility: self.overall_visibility,
            contexts: self.contexts.into(),
            field_options: self.field_options,
            default_value: self.default_value,
            placeholder: self.placeholder,
        }
    }
}
