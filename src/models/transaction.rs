use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::transaction::{
    NewTransaction as DomainNewTransaction, Transaction as DomainTransaction,
    UpdateTransaction as DomainUpdateTransaction,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::transactions)]
/// Diesel model for [`crate::domain::transaction::Transaction`].
pub struct Transaction {
    pub id: i32,
    pub organization_id: i32,
    pub account_id: Option<i32>,
    pub contact_id: Option<i32>,
    pub amount: f64,
    pub currency: String,
    pub payment_method: String,
    pub status: String,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub transaction_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransaction<'a> {
    pub organization_id: i32,
    pub account_id: Option<i32>,
    pub contact_id: Option<i32>,
    pub amount: f64,
    pub currency: &'a str,
    pub payment_method: &'a str,
    pub status: String,
    pub reference: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub transaction_date: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::transactions)]
pub struct UpdateTransaction<'a> {
    pub amount: f64,
    pub currency: &'a str,
    pub payment_method: &'a str,
    pub status: String,
    pub reference: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<Transaction> for DomainTransaction {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            organization_id: tx.organization_id,
            account_id: tx.account_id,
            contact_id: tx.contact_id,
            amount: tx.amount,
            currency: tx.currency,
            payment_method: tx.payment_method,
            status: tx.status.as_str().into(),
            reference: tx.reference,
            notes: tx.notes,
            transaction_date: tx.transaction_date,
            created_at: tx.created_at,
            updated_at: tx.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewTransaction> for NewTransaction<'a> {
    fn from(tx: &'a DomainNewTransaction) -> Self {
        Self {
            organization_id: tx.organization_id,
            account_id: tx.account_id,
            contact_id: tx.contact_id,
            amount: tx.amount,
            currency: tx.currency.as_str(),
            payment_method: tx.payment_method.as_str(),
            status: tx.status.to_string(),
            reference: tx.reference.as_deref(),
            notes: tx.notes.as_deref(),
            transaction_date: tx.transaction_date,
        }
    }
}

impl<'a> From<&'a DomainUpdateTransaction> for UpdateTransaction<'a> {
    fn from(tx: &'a DomainUpdateTransaction) -> Self {
        Self {
            amount: tx.amount,
            currency: tx.currency.as_str(),
            payment_method: tx.payment_method.as_str(),
            status: tx.status.to_string(),
            reference: tx.reference.as_deref(),
            notes: tx.notes.as_deref(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
