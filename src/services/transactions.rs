//! Payment transaction records.

use crate::domain::transaction::{NewTransaction, TransactionRecord, UpdateTransaction};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{TransactionListQuery, TransactionReader, TransactionWriter};
use crate::services::{ServiceError, ServiceResult};

fn check_amount(amount: f64) -> ServiceResult<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ServiceError::Validation(
            "transaction amount must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

pub fn get_transaction<R>(
    repo: &R,
    actor: &AuthenticatedUser,
    transaction_id: i32,
) -> ServiceResult<TransactionRecord>
where
    R: TransactionReader + ?Sized,
{
    repo.get_transaction_by_id(transaction_id, actor.organization_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn list_transactions<R>(
    repo: &R,
    query: TransactionListQuery,
) -> ServiceResult<(usize, Vec<TransactionRecord>)>
where
    R: TransactionReader + ?Sized,
{
    repo.list_transactions(query).map_err(ServiceError::from)
}

pub fn create_transaction<R>(
    repo: &R,
    actor: &AuthenticatedUser,
    mut new_tx: NewTransaction,
) -> ServiceResult<TransactionRecord>
where
    R: TransactionWriter + ?Sized,
{
    check_amount(new_tx.amount)?;
    new_tx.organization_id = actor.organization_id;
    repo.create_transaction(&new_tx).map_err(ServiceError::from)
}

pub fn update_transaction<R>(
    repo: &R,
    actor: &AuthenticatedUser,
    transaction_id: i32,
    updates: &UpdateTransaction,
) -> ServiceResult<TransactionRecord>
where
    R: TransactionWriter + ?Sized,
{
    check_amount(updates.amount)?;
    repo.update_transaction(transaction_id, actor.organization_id, updates)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::TransactionStatus;
    use crate::domain::user::UserRole;
    use crate::repository::mock::MockRepository;

    #[test]
    fn negative_and_non_finite_amounts_are_rejected() {
        let repo = MockRepository::new();
        let actor = AuthenticatedUser {
            user_id: 1,
            organization_id: 10,
            email: "rep@acme.test".to_string(),
            role: UserRole::User,
        };
        for amount in [-5.0, f64::NAN, f64::INFINITY] {
            let result = create_transaction(
                &repo,
                &actor,
                NewTransaction {
                    organization_id: 0,
                    account_id: None,
                    contact_id: None,
                    amount,
                    currency: "USD".to_string(),
                    payment_method: "cash".to_string(),
                    status: TransactionStatus::Completed,
                    reference: None,
                    notes: None,
                    transaction_date: chrono::Utc::now().naive_utc(),
                },
            );
            assert!(matches!(result, Err(ServiceError::Validation(_))));
        }
    }
}
