//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::account::{Account, NewAccount, UpdateAccount};
use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::custom_field::{
    EntityType, FieldDefinition, NewFieldDefinition, UpdateFieldDefinition,
};
use crate::domain::lead::{Lead, NewLead, UpdateLead};
use crate::domain::lead_event::{LeadEvent, NewLeadEvent};
use crate::domain::organization::{NewOrganization, Organization};
use crate::domain::portal::{
    NewPortalCredentials, NewSearchHistoryEntry, PortalCredentials, SearchHistoryEntry,
};
use crate::domain::transaction::{NewTransaction, TransactionRecord, UpdateTransaction};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AccountListQuery, AccountReader, AccountWriter, ContactListQuery, ContactReader,
    ContactWriter, CustomFieldReader, CustomFieldWriter, LeadEventListQuery, LeadEventReader,
    LeadEventWriter, LeadListQuery, LeadReader, LeadWriter, OrganizationReader,
    OrganizationWriter, Pagination, PortalCredentialReader, PortalCredentialWriter,
    SearchHistoryReader, SearchHistoryWriter, TransactionListQuery, TransactionReader,
    TransactionWriter, UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl OrganizationReader for Repository {
        fn get_organization_by_id(&self, id: i32) -> RepositoryResult<Option<Organization>>;
        fn get_organization_by_slug(&self, slug: &str) -> RepositoryResult<Option<Organization>>;
    }

    impl OrganizationWriter for Repository {
        fn create_organization_with_admin(
            &self,
            new_organization: &NewOrganization,
            admin: &NewUser,
        ) -> RepositoryResult<(Organization, User)>;
        fn set_mac_search_enabled(&self, organization_id: i32, enabled: bool) -> RepositoryResult<()>;
    }

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: i32, organization_id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(
            &self,
            email: &str,
            organization_id: i32,
        ) -> RepositoryResult<Option<User>>;
        fn list_users(&self, organization_id: i32) -> RepositoryResult<Vec<User>>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(
            &self,
            id: i32,
            organization_id: i32,
            updates: &UpdateUser,
        ) -> RepositoryResult<User>;
        fn delete_user(&self, id: i32, organization_id: i32) -> RepositoryResult<()>;
    }

    impl LeadReader for Repository {
        fn get_lead_by_id(&self, id: i32, organization_id: i32) -> RepositoryResult<Option<Lead>>;
        fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
    }

    impl LeadWriter for Repository {
        fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
        fn update_lead(
            &self,
            id: i32,
            organization_id: i32,
            updates: &UpdateLead,
        ) -> RepositoryResult<Lead>;
        fn delete_lead(&self, id: i32, organization_id: i32) -> RepositoryResult<()>;
        fn convert_lead(
            &self,
            id: i32,
            organization_id: i32,
        ) -> RepositoryResult<(Lead, Account, Contact)>;
    }

    impl LeadEventReader for Repository {
        fn list_lead_events(
            &self,
            query: LeadEventListQuery,
        ) -> RepositoryResult<(usize, Vec<(LeadEvent, User)>)>;
    }

    impl LeadEventWriter for Repository {
        fn create_lead_event(&self, event: &NewLeadEvent) -> RepositoryResult<LeadEvent>;
    }

    impl ContactReader for Repository {
        fn get_contact_by_id(&self, id: i32, organization_id: i32)
        -> RepositoryResult<Option<Contact>>;
        fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<(usize, Vec<Contact>)>;
    }

    impl ContactWriter for Repository {
        fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
        fn update_contact(
            &self,
            id: i32,
            organization_id: i32,
            updates: &UpdateContact,
        ) -> RepositoryResult<Contact>;
        fn delete_contact(&self, id: i32, organization_id: i32) -> RepositoryResult<()>;
    }

    impl AccountReader for Repository {
        fn get_account_by_id(&self, id: i32, organization_id: i32)
        -> RepositoryResult<Option<Account>>;
        fn list_accounts(&self, query: AccountListQuery) -> RepositoryResult<(usize, Vec<Account>)>;
    }

    impl AccountWriter for Repository {
        fn create_account(&self, new_account: &NewAccount) -> RepositoryResult<Account>;
        fn update_account(
            &self,
            id: i32,
            organization_id: i32,
            updates: &UpdateAccount,
        ) -> RepositoryResult<Account>;
        fn delete_account(&self, id: i32, organization_id: i32) -> RepositoryResult<()>;
    }

    impl TransactionReader for Repository {
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

    impl TransactionWriter for Repository {
        fn create_transaction(&self, new_tx: &NewTransaction) -> RepositoryResult<TransactionRecord>;
        fn update_transaction(
            &self,
            id: i32,
            organization_id: i32,
            updates: &UpdateTransaction,
        ) -> RepositoryResult<TransactionRecord>;
    }

    impl CustomFieldReader for Repository {
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

    impl CustomFieldWriter for Repository {
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
        fn deactivate_field_definition(&self, id: i32, organization_id: i32) -> RepositoryResult<()>;
    }

    impl PortalCredentialReader for Repository {
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

    impl PortalCredentialWriter for Repository {
        fn upsert_portal_credentials(
            &self,
            new_creds: &NewPortalCredentials,
        ) -> RepositoryResult<PortalCredentials>;
    }

    impl SearchHistoryReader for Repository {
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

    impl SearchHistoryWriter for Repository {
        fn record_search(&self, entry: &NewSearchHistoryEntry) -> RepositoryResult<SearchHistoryEntry>;
    }
}
