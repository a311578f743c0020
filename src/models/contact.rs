use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::contact::{
    Contact as DomainContact, NewContact as DomainNewContact, UpdateContact as DomainUpdateContact,
};
use crate::models::account::Account;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Account, foreign_key = account_id))]
#[diesel(table_name = crate::schema::contacts)]
/// Diesel model for [`crate::domain::contact::Contact`].
pub struct Contact {
    pub id: i32,
    pub organization_id: i32,
    pub account_id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub title: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::contacts)]
pub struct NewContact<'a> {
    pub organization_id: i32,
    pub account_id: Option<i32>,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub title: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::contacts)]
pub struct UpdateContact<'a> {
    pub account_id: Option<i32>,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub title: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<Contact> for DomainContact {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            organization_id: contact.organization_id,
            account_id: contact.account_id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
            title: contact.title,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
            custom_fields: None,
        }
    }
}

impl<'a> From<&'a DomainNewContact> for NewContact<'a> {
    fn from(contact: &'a DomainNewContact) -> Self {
        Self {
            organization_id: contact.organization_id,
            account_id: contact.account_id,
            first_name: contact.first_name.as_str(),
            last_name: contact.last_name.as_str(),
            email: contact.email.as_deref(),
            phone: contact.phone.as_deref(),
            title: contact.title.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateContact> for UpdateContact<'a> {
    fn from(contact: &'a DomainUpdateContact) -> Self {
        Self {
            account_id: contact.account_id,
            first_name: contact.first_name.as_str(),
            last_name: contact.last_name.as_str(),
            email: contact.email.as_deref(),
            phone: contact.phone.as_deref(),
            title: contact.title.as_deref(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
