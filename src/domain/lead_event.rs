use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LeadEvent {
    pub id: i32,
    pub lead_id: i32,
    pub user_id: i32,
    pub event_type: LeadEventType,
    pub event_data: Value,
    pub created_at: NaiveDateTime,
}

/// Activity recorded against a lead. Status transitions are logged with the
/// old and new value in `event_data`.
///
/// On the wire and in the database this is always the lowercase form
/// (`note`, `call`, `email`, `status`), so a type read from a timeline
/// response can be fed back into the `?event_type=` filter as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LeadEventType {
    Note,
    Call,
    Email,
    StatusChange,
    Other(String),
}

impl Serialize for LeadEventType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for LeadEventType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(String::deserialize(deserializer)?.into())
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewLeadEvent {
    pub lead_id: i32,
    pub user_id: i32,
    pub event_type: LeadEventType,
    pub event_data: Value,
    pub created_at: NaiveDateTime,
}

impl Display for LeadEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadEventType::Note => write!(f, "note"),
            LeadEventType::Call => write!(f, "call"),
            LeadEventType::Email => write!(f, "email"),
            LeadEventType::StatusChange => write!(f, "status"),
            LeadEventType::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for LeadEventType {
    fn from(s: &str) -> Self {
        match s {
            "note" => LeadEventType::Note,
            "call" => LeadEventType::Call,
            "email" => LeadEventType::Email,
            "status" => LeadEventType::StatusChange,
            _ => LeadEventType::Other(s.to_string()),
        }
    }
}

impl From<String> for LeadEventType {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_event_type_serializes_to_lowercase_wire_form() {
        let cases = [
            (LeadEventType::Note, "note"),
            (LeadEventType::Call, "call"),
            (LeadEventType::Email, "email"),
            (LeadEventType::StatusChange, "status"),
            (LeadEventType::Other("meeting".into()), "meeting"),
        ];
        for (event_type, wire) in cases {
            assert_eq!(serde_json::to_value(&event_type).unwrap(), json!(wire));
        }
    }

    #[test]
    fn test_event_type_round_trips_through_json() {
        let parsed: LeadEventType = serde_json::from_value(json!("status")).unwrap();
        assert_eq!(parsed, LeadEventType::StatusChange);

        let parsed: LeadEventType = serde_json::from_value(json!("meeting")).unwrap();
        assert_eq!(parsed, LeadEventType::Other("meeting".into()));
    }
}
