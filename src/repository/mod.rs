use crate::db::{DbConnection, DbPool};
use crate::domain::account::{Account, NewAccount, UpdateAccount};
use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::custom_field::{
    EntityType, FieldDefinition, NewFieldDefinition, UpdateFieldDefinition,
};
use crate::domain::lead::{Lead, LeadStatus, NewLead, UpdateLead};
use crate::domain::lead_event::{LeadEvent, LeadEventType, NewLeadEvent};
use crate::domain::organization::{NewOrganization, Organization};
use crate::domain::portal::{
    NewPortalCredentials, NewSearchHistoryEntry, PortalCredentials, SearchHistoryEntry,
};
use crate::domain::transaction::{
    NewTransaction, TransactionRecord, TransactionStatus, UpdateTransaction,
};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod account;
pub mod contact;
pub mod custom_field;
pub mod errors;
pub mod lead;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod organization;
pub mod portal;
pub mod transaction;
pub mod user;

/// Diesel-backed implementation of every repository trait in this module.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<DbConnection> {
        self.pool.get().map_err(RepositoryError::from)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub(crate) fn limit(&self) -> i64 {
        self.per_page as i64
    }

    pub(crate) fn offset(&self) -> i64 {
        let page = self.page.max(1) as i64;
        (page - 1) * self.per_page as i64
    }
}

#[derive(Debug, Clone)]
pub struct LeadListQuery {
    pub organization_id: i32,
    pub search: Option<String>,
    pub status: Option<LeadStatus>,
    pub assigned_to: Option<i32>,
    pub pagination: Option<Pagination>,
}

impl LeadListQuery {
    pub fn new(organization_id: i32) -> Self {
        Self {
            organization_id,
            search: None,
            status: None,
            assigned_to: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn status(mut self, status: LeadStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn assigned_to(mut self, user_id: i32) -> Self {
        self.assigned_to = Some(user_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct ContactListQuery {
    pub organization_id: i32,
    pub search: Option<String>,
    pub account_id: Option<i32>,
    pub pagination: Option<Pagination>,
}

impl ContactListQuery {
    pub fn new(organization_id: i32) -> Self {
        Self {
            organization_id,
            search: None,
            account_id: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn account_id(mut self, account_id: i32) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct AccountListQuery {
    pub organization_id: i32,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl AccountListQuery {
    pub fn new(organization_id: i32) -> Self {
        Self {
            organization_id,
            search: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct TransactionListQuery {
    pub organization_id: i32,
    pub status: Option<TransactionStatus>,
    pub pagination: Option<Pagination>,
}

impl TransactionListQuery {
    pub fn new(organization_id: i32) -> Self {
        Self {
            organization_id,
            status: None,
            pagination: None,
        }
    }

    pub fn status(mut self, status: TransactionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct LeadEventListQuery {
    pub lead_id: i32,
    pub event_type: Option<LeadEventType>,
    pub pagination: Option<Pagination>,
}

impl LeadEventListQuery {
    pub fn new(lead_id: i32) -> Self {
        Self {
            lead_id,
            event_type: None,
            pagination: None,
        }
    }

    pub fn event_type(mut self, event_type: LeadEventType) -> Self {
        self.event_type = Some(event_type);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait OrganizationReader {
    fn get_organization_by_id(&self, id: i32) -> RepositoryResult<Option<Organization>>;
    fn get_organization_by_slug(&self, slug: &str) -> RepositoryResult<Option<Organization>>;
}

pub trait OrganizationWriter {
    /// Creates the organization and its first admin user atomically.
    fn create_organization_with_admin(
        &self,
        new_org: &NewOrganization,
        new_admin: &NewUser,
    ) -> RepositoryResult<(Organization, User)>;
    fn set_mac_search_enabled(&self, organization_id: i32, enabled: bool) -> RepositoryResult<()>;
}

pub trait UserReader {
    fn get_user_by_id(&self, id: i32, organization_id: i32) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(
        &self,
        email: &str,
        organization_id: i32,
    ) -> RepositoryResult<Option<User>>;
    fn list_users(&self, organization_id: i32) -> RepositoryResult<Vec<User>>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn update_user(
        &self,
        id: i32,
        organization_id: i32,
        updates: &UpdateUser,
    ) -> RepositoryResult<User>;
    fn delete_user(&self, id: i32, organization_id: i32) -> RepositoryResult<()>;
}

pub trait LeadReader {
    fn get_lead_by_id(&self, id: i32, organization_id: i32) -> RepositoryResult<Option<Lead>>;
    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
}

pub trait LeadWriter {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
    fn update_lead(
        &self,
        id: i32,
        organization_id: i32,
        updates: &UpdateLead,
    ) -> RepositoryResult<Lead>;
    fn delete_lead(&self, id: i32, organization_id: i32) -> RepositoryResult<()>;
    /// Converts a lead into an account plus a contact linked to it and marks
    /// the lead converted, all in one transaction.
    fn convert_lead(
        &self,
        id: i32,
        organization_id: i32,
    ) -> RepositoryResult<(Lead, Account, Contact)>;
}

pub trait LeadEventReader {
    fn list_lead_events(
        &self,
        query: LeadEventListQuery,
    ) -> RepositoryResult<(usize, Vec<(LeadEvent, User)>)>;
}

pub trait LeadEventWriter {
    fn create_lead_event(&self, event: &NewLeadEvent) -> RepositoryResult<LeadEvent>;
}

pub trait ContactReader {
    fn get_contact_by_id(&self, id: i32, organization_id: i32)
    -> RepositoryResult<Option<Contact>>;
    fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<(usize, Vec<Contact>)>;
}

pub trait ContactWriter {
    fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
    fn update_contact(
        &self,
        id: i32,
        organization_id: i32,
        updates: &UpdateContact,
    ) -> RepositoryResult<Contact>;
    fn delete_contact(&self, id: i32, organization_id: i32) -> RepositoryResult<()>;
}

pub trait AccountReader {
    fn get_account_by_id(&self, id: i32, organization_id: i32)
    -> RepositoryResult<Option<Account>>;
    fn list_accounts(&self, query: AccountListQuery) -> RepositoryResult<(usize, Vec<Account>)>;
}

pub trait AccountWriter {
    fn create_account(&self, new_account: &NewAccount) -> RepositoryResult<Account>;
    fn update_account(
        &self,
        id: i32,
        organization_id: i32,
        updates: &UpdateAccount,
    ) -> RepositoryResult<Account>;
    /// Deletes the account, detaching any contacts that point at it.
    fn delete_account(&self, id: i32, organization_id: i32) -> RepositoryResult<()>;
}

pub trait TransactionReader {
    fn get_transaction_by_id(
        &self,
        id: i32,
        organization_id: i32,
    ) -> RepositoryResult<Option<TransactionRecord>>;
    fn list_transactions(
        &self,
        query: TransactionListQuery,
    ) -> RepositoryResult<(usize, Vec<TransactionRecord>)>;
}

pub trait TransactionWriter {
    fn create_transaction(&self, new_tx: &NewTransaction) -> RepositoryResult<TransactionRecord>;
    fn update_transaction(
        &self,
        id: i32,
        organization_id: i32,
        updates: &UpdateTransaction,
    ) -> RepositoryResult<TransactionRecord>;
}

pub trait CustomFieldReader {
    fn get_field_definition(
        &self,
        id: i32,
        organization_id: i32,
    ) -> RepositoryResult<Option<FieldDefinition>>;
    fn list_field_definitions(
        &self,
        organization_id: i32,
        entity_type: EntityType,
        active_only: bool,
    ) -> RepositoryResult<Vec<FieldDefinition>>;
}

pub trait CustomFieldWriter {
    fn create_field_definition(
        &self,
        new_field: &NewFieldDefinition,
    ) -> RepositoryResult<FieldDefinition>;
    fn update_field_definition(
        &self,
        id: i32,
        organization_id: i32,
        updates: &UpdateFieldDefinition,
    ) -> RepositoryResult<FieldDefinition>;
    /// Soft delete; stored values stay behind for reactivation.
    fn deactivate_field_definition(&self, id: i32, organization_id: i32) -> RepositoryResult<()>;
}

pub trait PortalCredentialReader {
    fn get_portal_credentials(
        &self,
        organization_id: i32,
        portal_id: &str,
    ) -> RepositoryResult<Option<PortalCredentials>>;
    fn list_portal_credentials(
        &self,
        organization_id: i32,
    ) -> RepositoryResult<Vec<PortalCredentials>>;
}

pub trait PortalCredentialWriter {
    fn upsert_portal_credentials(
        &self,
        new_creds: &NewPortalCredentials,
    ) -> RepositoryResult<PortalCredentials>;
}

pub trait SearchHistoryReader {
    fn list_search_history(
        &self,
        organization_id: i32,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<(usize, Vec<SearchHistoryEntry>)>;
    fn get_search(
        &self,
        organization_id: i32,
        search_id: &uuid::Uuid,
    ) -> RepositoryResult<Option<SearchHistoryEntry>>;
}

pub trait SearchHistoryWriter {
    fn record_search(&self, entry: &NewSearchHistoryEntry) -> RepositoryResult<SearchHistoryEntry>;
}
