//! Per-organization, per-entity custom field configuration.
//!
//! Visibility follows a master-override rule: a field whose overall
//! visibility is `hidden` is never shown in any context, whatever its stored
//! per-context flags say.

use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::types::TypeConstraintError;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Lead,
    Contact,
    Account,
    Transaction,
}

impl Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EntityType::Lead => "lead",
            EntityType::Contact => "contact",
            EntityType::Account => "account",
            EntityType::Transaction => "transaction",
        };
        write!(f, "{s}")
    }
}

impl FromStr for EntityType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lead" | "leads" => Ok(EntityType::Lead),
            "contact" | "contacts" => Ok(EntityType::Contact),
            "account" | "accounts" => Ok(EntityType::Account),
            "transaction" | "transactions" => Ok(EntityType::Transaction),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown entity type: {other}"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Number,
    Date,
    Select,
    Checkbox,
}

impl Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
        };
        write!(f, "{s}")
    }
}

impl From<&str> for FieldType {
    fn from(s: &str) -> Self {
        match s {
            "number" => FieldType::Number,
            "date" => FieldType::Date,
            "select" => FieldType::Select,
            "checkbox" => FieldType::Checkbox,
            _ => FieldType::Text,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldVisibility {
    Visible,
    Hidden,
}

impl Display for FieldVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldVisibility::Visible => write!(f, "visible"),
            FieldVisibility::Hidden => write!(f, "hidden"),
        }
    }
}

impl From<&str> for FieldVisibility {
    fn from(s: &str) -> Self {
        match s {
            "hidden" => FieldVisibility::Hidden,
            _ => FieldVisibility::Visible,
        }
    }
}

/// UI context a field may be shown in.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldContext {
    ListView,
    DetailView,
    CreateForm,
    EditForm,
}

impl FromStr for FieldContext {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list_view" => Ok(FieldContext::ListView),
            "detail_view" => Ok(FieldContext::DetailView),
            "create_form" => Ok(FieldContext::CreateForm),
            "edit_form" => Ok(FieldContext::EditForm),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown field context: {other}"
            ))),
        }
    }
}

/// Per-context visibility flags.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContextFlags {
    pub list_view: bool,
    pub detail_view: bool,
    pub create_form: bool,
    pub edit_form: bool,
}

impl ContextFlags {
    pub const NONE: ContextFlags = ContextFlags {
        list_view: false,
        detail_view: false,
        create_form: false,
        edit_form: false,
    };

    pub const ALL: ContextFlags = ContextFlags {
        list_view: true,
        detail_view: true,
        create_form: true,
        edit_form: true,
    };

    pub fn contains(&self, context: FieldContext) -> bool {
        match context {
            FieldContext::ListView => self.list_view,
            FieldContext::DetailView => self.detail_view,
            FieldContext::CreateForm => self.create_form,
            FieldContext::EditForm => self.edit_form,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FieldDefinition {
    pub id: i32,
    pub organization_id: i32,
    pub entity_type: EntityType,
    pub field_name: String,
    pub field_label: String,
    pub field_type: FieldType,
    pub is_required: bool,
    pub display_order: i32,
    pub overall_visibility: FieldVisibility,
    pub contexts: ContextFlags,
    pub field_options: Option<Value>,
    pub default_value: Option<String>,
    pub placeholder: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl FieldDefinition {
    /// Context flags with the master override applied.
    pub fn effective_contexts(&self) -> ContextFlags {
        match self.overall_visibility {
            FieldVisibility::Hidden => ContextFlags::NONE,
            FieldVisibility::Visible => self.contexts,
        }
    }

    pub fn is_visible_in(&self, context: FieldContext) -> bool {
        self.effective_contexts().contains(context)
    }
}

#[derive(Clone, Debug)]
pub struct NewFieldDefinition {
    pub organization_id: i32,
    pub entity_type: EntityType,
    pub field_name: String,
    pub field_label: String,
    pub field_type: FieldType,
    pub is_required: bool,
    pub display_order: i32,
    pub overall_visibility: FieldVisibility,
    pub contexts: ContextFlags,
    pub field_options: Option<Value>,
    pub default_value: Option<String>,
    pub placeholder: Option<String>,
}

#[derive(Clone, Debug)]
pub struct UpdateFieldDefinition {
    pub field_label: String,
    pub field_type: FieldType,
    pub is_required: bool,
    pub display_order: i32,
    pub overall_visibility: FieldVisibility,
    pub contexts: ContextFlags,
    pub field_options: Option<Value>,
    pub default_value: Option<String>,
    pub placeholder: Option<String>,
}

impl UpdateFieldDefinition {
    /// Applies the master override at write time: hiding a field clears all
    /// of its context flags so stored state matches effective state.
    pub fn normalized(mut self) -> Self {
        if self.overall_visibility == FieldVisibility::Hidden {
            self.contexts = ContextFlags::NONE;
        }
        self
    }
}

/// Normalizes a user-supplied field label into a snake_case field name.
pub fn normalize_field_name(label: &str) -> String {
    let mut name = String::with_capacity(label.len());
    let mut prev_underscore = true;
    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            name.push(c.to_ascii_lowercase());
            prev_underscore = false;
        } else if !prev_underscore {
            name.push('_');
            prev_underscore = true;
        }
    }
    name.trim_end_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_field(visibility: FieldVisibility, contexts: ContextFlags) -> FieldDefinition {
        let now = Utc::now().naive_utc();
        FieldDefinition {
            id: 1,
            organization_id: 1,
            entity_type: EntityType::Lead,
            field_name: "install_state".to_string(),
            field_label: "Install State".to_string(),
            field_type: FieldType::Text,
            is_required: false,
            display_order: 0,
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
    fn hidden_field_is_invisible_everywhere() {
        let field = sample_field(FieldVisibility::Hidden, ContextFlags::ALL);
        assert_eq!(field.effective_contexts(), ContextFlags::NONE);
        assert!(!field.is_visible_in(FieldContext::ListView));
        assert!(!field.is_visible_in(FieldContext::EditForm));
    }

    #[test]
    fn visible_field_respects_context_flags() {
        let contexts = ContextFlags {
            list_view: true,
            detail_view: true,
            create_form: false,
            edit_form: false,
        };
        let field = sample_field(FieldVisibility::Visible, contexts);
        assert!(field.is_visible_in(FieldContext::ListView));
        assert!(!field.is_visible_in(FieldContext::CreateForm));
    }

    #[test]
    fn hiding_clears_context_flags_on_update() {
        let update = UpdateFieldDefinition {
            field_label: "X".to_string(),
            field_type: FieldType::Text,
            is_required: false,
            display_order: 0,
            overall_visibility: FieldVisibility::Hidden,
            contexts: ContextFlags::ALL,
            field_options: None,
            default_value: None,
            placeholder: None,
        }
        .normalized();
        assert_eq!(update.contexts, ContextFlags::NONE);
    }

    #[test]
    fn field_names_are_snake_cased() {
        assert_eq!(normalize_field_name("Install State"), "install_state");
        assert_eq!(normalize_field_name("MAC / Serial #"), "mac_serial");
        assert_eq!(normalize_field_name("already_snake"), "already_snake");
    }

    #[test]
    fn entity_type_accepts_plural_forms() {
        assert_eq!("leads".parse::<EntityType>().unwrap(), EntityType::Lead);
        assert_eq!(
            "contact".parse::<EntityType>().unwrap(),
            EntityType::Contact
        );
        assert!("widgets".parse::<EntityType>().is_err());
    }
}
