use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::transaction::{NewTransaction, TransactionStatus, UpdateTransaction};

#[derive(Debug, Deserialize)]
pub struct TransactionListParams {
    pub status: Option<TransactionStatus>,
    #[serde(flatten)]
    pub page: super::PageParams,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTransactionRequest {
    pub account_id: Option<i32>,
    pub contact_id: Option<i32>,
    #[validate(range(min = 0.0))]
    pub amount: f64,
    #[validate(length(min = 1, max = 8))]
    pub currency: String,
    #[validate(length(min = 1))]
    pub payment_method: String,
    #[serde(default = "default_status")]
    pub status: TransactionStatus,
    pub reference: Option<String>,
    pub notes: Option<String>,
    /// Defaults to now when omitted.
    pub transaction_date: Option<NaiveDateTime>,
}

fn default_status() -> TransactionStatus {
    TransactionStatus::Completed
}

impl CreateTransactionRequest {
    pub fn into_new_transaction(self) -> NewTransaction {
        NewTransaction {
            organization_id: 0,
            account_id: self.account_id,
            contact_id: self.contact_id,
            amount: self.amount,
            currency: self.currency.to_uppercase(),
            payment_method: self.payment_method,
            status: self.status,
            reference: self.reference,
            notes: self.notes,
            transaction_date: self
                .transaction_date
                .unwrap_or_else(|| chrono::Utc::now().naive_utc()),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTransactionRequest {
    #[validate(range(min = 0.0))]
    pub amount: f64,
    #[validate(length(min = 1, max = 8))]
    pub currency: String,
    #[validate(length(min = 1))]
    pub payment_method: String,
    pub status: TransactionStatus,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

impl UpdateTransactionRequest {
    pub fn into_update(self) -> UpdateTransaction {
        UpdateTransaction {
            amount: self.amount,
            currency: self.currency.to_uppercase(),
            payment_method: self.payment_method,
            status: self.status,
            reference: self.reference,
            notes: self.notes,
        }
    }
}
