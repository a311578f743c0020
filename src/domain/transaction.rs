use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
    Refunded,
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TransactionStatus::Completed => "completed",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Refunded => "refunded",
        };
        write!(f, "{s}")
    }
}

impl From<&str> for TransactionStatus {
    fn from(s: &str) -> Self {
        match s {
            "pending" => TransactionStatus::Pending,
            "failed" => TransactionStatus::Failed,
            "refunded" => TransactionStatus::Refunded,
            _ => TransactionStatus::Completed,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: i32,
    pub organization_id: i32,
    pub account_id: Option<i32>,
    pub contact_id: Option<i32>,
    pub amount: f64,
    pub currency: String,
    pub payment_method: String,
    pub status: TransactionStatus,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub transaction_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A transaction joined with the display names of its linked contact and
/// account, as returned by list endpoints.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TransactionRecord {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub contact_name: Option<String>,
    pub account_name: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NewTransaction {
    pub organization_id: i32,
    pub account_id: Option<i32>,
    pub contact_id: Option<i32>,
    pub amount: f64,
    pub currency: String,
    pub payment_method: String,
    pub status: TransactionStatus,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub transaction_date: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct UpdateTransaction {
    pub amount: f64,
    pub currency: String,
    pub payment_method: String,
    pub status: TransactionStatus,
    pub reference: Option<String>,
    pub notes: Option<String>,
}
