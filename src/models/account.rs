use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::account::{
    Account as DomainAccount, NewAccount as DomainNewAccount, UpdateAccount as DomainUpdateAccount,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::accounts)]
/// Diesel model for [`crate::domain::account::Account`].
pub struct Account {
    pub id: i32,
    pub organization_id: i32,
    pub name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::accounts)]
pub struct NewAccount<'a> {
    pub organization_id: i32,
    pub name: &'a str,
    pub industry: Option<&'a str>,
    pub website: Option<&'a str>,
    pub phone: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::accounts)]
pub struct UpdateAccount<'a> {
    pub name: &'a str,
    pub industry: Option<&'a str>,
    pub website: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<Account> for DomainAccount {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            organization_id: account.organization_id,
            name: account.name,
            industry: account.industry,
            website: account.website,
            phone: account.phone,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewAccount> for NewAccount<'a> {
    fn from(account: &'a DomainNewAccount) -> Self {
        Self {
            organization_id: account.organization_id,
            name: account.name.as_str(),
            industry: account.industry.as_deref(),
            website: account.website.as_deref(),
            phone: account.phone.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateAccount> for UpdateAccount<'a> {
    fn from(account: &'a DomainUpdateAccount) -> Self {
        Self {
            name: account.name.as_str(),
            industry: account.industry.as_deref(),
            website: account.website.as_deref(),
            phone: account.phone.as_deref(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
