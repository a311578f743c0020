use std::collections::HashMap;

use chrono::Utc;
use serde_json::json;
use tenant_crm::domain::account::{NewAccount, UpdateAccount};
use tenant_crm::domain::contact::{NewContact, UpdateContact};
use tenant_crm::domain::custom_field::{
    ContextFlags, EntityType, FieldType, FieldVisibility, NewFieldDefinition,
    UpdateFieldDefinition,
};
use tenant_crm::domain::lead::{LeadPriority, LeadStatus, NewLead, UpdateLead};
use tenant_crm::domain::lead_event::{LeadEventType, NewLeadEvent};
use tenant_crm::domain::organization::NewOrganization;
use tenant_crm::domain::portal::{NewPortalCredentials, NewSearchHistoryEntry};
use tenant_crm::domain::transaction::{NewTransaction, TransactionStatus};
use tenant_crm::domain::organization::Organization;
use tenant_crm::domain::user::{NewUser, UpdateUser, User, UserRole};
use tenant_crm::repository::errors::RepositoryError;
use tenant_crm::repository::{
    AccountListQuery, AccountReader, AccountWriter, ContactListQuery, ContactReader,
    ContactWriter, CustomFieldReader, CustomFieldWriter, DieselRepository, LeadEventListQuery,
    LeadEventReader, LeadEventWriter, LeadListQuery, LeadReader, LeadWriter, OrganizationReader,
    OrganizationWriter, PortalCredentialReader, PortalCredentialWriter, SearchHistoryReader,
    SearchHistoryWriter, TransactionListQuery, TransactionReader, TransactionWriter, UserReader,
    UserWriter,
};
use uuid::Uuid;

mod common;

fn seed_org(repo: &DieselRepository, name: &str, slug: &str) -> (Organization, User) {
    let new_org = NewOrganization::new(name.to_string(), Some(slug.to_string()));
    let new_admin = NewUser {
        organization_id: 0,
        email: format!("admin@{slug}.example.com"),
        password_hash: "hash".to_string(),
        first_name: "Admin".to_string(),
        last_name: "User".to_string(),
        role: UserRole::Admin,
    };
    repo.create_organization_with_admin(&new_org, &new_admin)
        .unwrap()
}

fn sample_lead(organization_id: i32, first_name: &str, last_name: &str) -> NewLead {
    NewLead {
        organization_id,
        title: None,
        company: None,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: None,
        phone: None,
        source: None,
        status: LeadStatus::New,
        priority: LeadPriority::Medium,
        value: 0.0,
        notes: None,
        assigned_to: None,
        created_by: None,
        next_follow_up: None,
        custom_fields: None,
    }
}

#[test]
fn test_organization_and_admin_created_atomically() {
    let test_db = common::TestDb::new("test_org_admin.db");
    let repo = DieselRepository::new(test_db.pool());

    let (org, admin) = seed_org(&repo, "Acme Corp", "acme");
    assert_eq!(org.slug, "acme");
    assert!(!org.mac_search_enabled);
    assert_eq!(admin.organization_id, org.id);
    assert!(admin.is_admin());

    let by_slug = repo.get_organization_by_slug("acme").unwrap().unwrap();
    assert_eq!(by_slug.id, org.id);
    assert!(repo.get_organization_by_slug("missing").unwrap().is_none());

    // Slug is unique across tenants.
    let result = repo.create_organization_with_admin(
        &NewOrganization::new("Other".to_string(), Some("acme".to_string())),
        &NewUser {
            organization_id: 0,
            email: "other@example.com".to_string(),
            password_hash: "hash".to_string(),
            first_name: "Other".to_string(),
            last_name: "Admin".to_string(),
            role: UserRole::Admin,
        },
    );
    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));

    repo.set_mac_search_enabled(org.id, true).unwrap();
    let org = repo.get_organization_by_id(org.id).unwrap().unwrap();
    assert!(org.mac_search_enabled);
}

#[test]
fn test_user_repository_scoped_to_organization() {
    let test_db = common::TestDb::new("test_user_repository.db");
    let repo = DieselRepository::new(test_db.pool());
    let (org1, _) = seed_org(&repo, "First", "first");
    let (org2, _) = seed_org(&repo, "Second", "second");

    let user = repo
        .create_user(&NewUser {
            organization_id: org1.id,
            email: "alice@first.example.com".to_string(),
            password_hash: "hash".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            role: UserRole::User,
        })
        .unwrap();

    // Same address is fine in another tenant, a duplicate within the tenant is not.
    repo.create_user(&NewUser {
        organization_id: org2.id,
        email: "alice@first.example.com".to_string(),
        password_hash: "hash".to_string(),
        first_name: "Alice".to_string(),
        last_name: "Jones".to_string(),
        role: UserRole::User,
    })
    .unwrap();
    let duplicate = repo.create_user(&NewUser {
        organization_id: org1.id,
        email: "alice@first.example.com".to_string(),
        password_hash: "hash".to_string(),
        first_name: "Alice".to_string(),
        last_name: "Twice".to_string(),
        role: UserRole::User,
    });
    assert!(matches!(
        duplicate,
        Err(RepositoryError::ConstraintViolation(_))
    ));

    assert!(repo.get_user_by_id(user.id, org2.id).unwrap().is_none());
    let found = repo
        .get_user_by_email("alice@first.example.com", org1.id)
        .unwrap()
        .unwrap();
    assert_eq!(found.id, user.id);

    let updated = repo
        .update_user(
            user.id,
            org1.id,
            &UpdateUser {
                first_name: "Alicia".to_string(),
                last_name: "Smith".to_string(),
                role: UserRole::Admin,
            },
        )
        .unwrap();
    assert_eq!(updated.first_name, "Alicia");
    assert!(updated.is_admin());

    let users = repo.list_users(org1.id).unwrap();
    assert_eq!(users.len(), 2);

    repo.delete_user(user.id, org1.id).unwrap();
    assert!(repo.get_user_by_id(user.id, org1.id).unwrap().is_none());
    assert!(matches!(
        repo.delete_user(user.id, org1.id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_lead_repository_crud_with_custom_values() {
    let test_db = common::TestDb::new("test_lead_repository.db");
    let repo = DieselRepository::new(test_db.pool());
    let (org, admin) = seed_org(&repo, "Acme", "acme");

    let mut new_lead = sample_lead(org.id, "Bob", "Brown");
    new_lead.company = Some("Brown Ltd".to_string());
    new_lead.value = 1500.0;
    new_lead.created_by = Some(admin.id);
    new_lead.custom_fields = Some(HashMap::from([(
        "referral".to_string(),
        "trade show".to_string(),
    )]));
    let lead = repo.create_lead(&new_lead).unwrap();
    assert_eq!(lead.status, LeadStatus::New);
    assert_eq!(
        lead.custom_fields.as_ref().unwrap().get("referral").unwrap(),
        "trade show"
    );

    repo.create_lead(&sample_lead(org.id, "Carol", "Green")).unwrap();

    let fetched = repo.get_lead_by_id(lead.id, org.id).unwrap().unwrap();
    assert_eq!(
        fetched.custom_fields.as_ref().unwrap().get("referral").unwrap(),
        "trade show"
    );

    let (total, items) = repo
        .list_leads(LeadListQuery::new(org.id).search("Brown"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].last_name, "Brown");

    let (paged_total, paged) = repo
        .list_leads(LeadListQuery::new(org.id).paginate(1, 1))
        .unwrap();
    assert_eq!(paged_total, 2);
    assert_eq!(paged.len(), 1);

    let updated = repo
        .update_lead(
            lead.id,
            org.id,
            &UpdateLead {
                title: None,
                company: Some("Brown Ltd".to_string()),
                first_name: "Bob".to_string(),
                last_name: "Brown".to_string(),
                email: Some("bob@brown.example.com".to_string()),
                phone: None,
                source: None,
                status: LeadStatus::Qualified,
                priority: LeadPriority::High,
                value: 2000.0,
                notes: None,
                assigned_to: Some(admin.id),
                next_follow_up: None,
                custom_fields: Some(HashMap::from([(
                    "referral".to_string(),
                    "partner".to_string(),
                )])),
            },
        )
        .unwrap();
    assert_eq!(updated.status, LeadStatus::Qualified);
    assert_eq!(
        updated.custom_fields.as_ref().unwrap().get("referral").unwrap(),
        "partner"
    );

    let (qualified_total, _) = repo
        .list_leads(LeadListQuery::new(org.id).status(LeadStatus::Qualified))
        .unwrap();
    assert_eq!(qualified_total, 1);

    repo.delete_lead(lead.id, org.id).unwrap();
    assert!(repo.get_lead_by_id(lead.id, org.id).unwrap().is_none());
}

#[test]
fn test_convert_lead_creates_account_and_contact() {
    let test_db = common::TestDb::new("test_convert_lead.db");
    let repo = DieselRepository::new(test_db.pool());
    let (org, _) = seed_org(&repo, "Acme", "acme");

    let mut new_lead = sample_lead(org.id, "Dana", "White");
    new_lead.company = Some("White Industries".to_string());
    new_lead.email = Some("dana@white.example.com".to_string());
    let lead = repo.create_lead(&new_lead).unwrap();

    let (converted, account, contact) = repo.convert_lead(lead.id, org.id).unwrap();
    assert_eq!(converted.status, LeadStatus::Converted);
    assert_eq!(account.name, "White Industries");
    assert_eq!(contact.account_id, Some(account.id));
    assert_eq!(contact.email.as_deref(), Some("dana@white.example.com"));

    // A lead without a company falls back to the person's name.
    let bare = repo.create_lead(&sample_lead(org.id, "Eve", "Black")).unwrap();
    let (_, account, _) = repo.convert_lead(bare.id, org.id).unwrap();
    assert_eq!(account.name, "Eve Black");

    // Converting for the wrong tenant must fail.
    let other = repo.create_lead(&sample_lead(org.id, "Finn", "Gray")).unwrap();
    assert!(matches!(
        repo.convert_lead(other.id, org.id + 1),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_lead_event_timeline() {
    let test_db = common::TestDb::new("test_lead_events.db");
    let repo = DieselRepository::new(test_db.pool());
    let (org, admin) = seed_org(&repo, "Acme", "acme");
    let lead = repo.create_lead(&sample_lead(org.id, "Gina", "Hill")).unwrap();

    repo.create_lead_event(&NewLeadEvent {
        lead_id: lead.id,
        user_id: admin.id,
        event_type: LeadEventType::Note,
        event_data: json!({"text": "left a voicemail"}),
        created_at: Utc::now().naive_utc(),
    })
    .unwrap();
    repo.create_lead_event(&NewLeadEvent {
        lead_id: lead.id,
        user_id: admin.id,
        event_type: LeadEventType::StatusChange,
        event_data: json!({"from": "new", "to": "contacted"}),
        created_at: Utc::now().naive_utc(),
    })
    .unwrap();

    let (total, events) = repo
        .list_lead_events(LeadEventListQuery::new(lead.id))
        .unwrap();
    assert_eq!(total, 2);
    let (_, user) = &events[0];
    assert_eq!(user.id, admin.id);

    let (notes_total, notes) = repo
        .list_lead_events(LeadEventListQuery::new(lead.id).event_type(LeadEventType::Note))
        .unwrap();
    assert_eq!(notes_total, 1);
    assert_eq!(notes[0].0.event_data["text"], "left a voicemail");
}

#[test]
fn test_account_delete_detaches_contacts() {
    let test_db = common::TestDb::new("test_account_delete.db");
    let repo = DieselRepository::new(test_db.pool());
    let (org, _) = seed_org(&repo, "Acme", "acme");

    let account = repo
        .create_account(&NewAccount {
            organization_id: org.id,
            name: "Globex".to_string(),
            industry: Some("Manufacturing".to_string()),
            website: None,
            phone: None,
        })
        .unwrap();
    let contact = repo
        .create_contact(&NewContact {
            organization_id: org.id,
            account_id: Some(account.id),
            first_name: "Hank".to_string(),
            last_name: "Scorpio".to_string(),
            email: None,
            phone: None,
            title: Some("CEO".to_string()),
            custom_fields: None,
        })
        .unwrap();

    let renamed = repo
        .update_account(
            account.id,
            org.id,
            &UpdateAccount {
                name: "Globex Corp".to_string(),
                industry: Some("Manufacturing".to_string()),
                website: None,
                phone: None,
            },
        )
        .unwrap();
    assert_eq!(renamed.name, "Globex Corp");

    let (by_account_total, _) = repo
        .list_contacts(ContactListQuery::new(org.id).account_id(account.id))
        .unwrap();
    assert_eq!(by_account_total, 1);

    repo.delete_account(account.id, org.id).unwrap();
    assert!(repo.get_account_by_id(account.id, org.id).unwrap().is_none());

    let orphan = repo.get_contact_by_id(contact.id, org.id).unwrap().unwrap();
    assert_eq!(orphan.account_id, None);

    let (accounts_total, _) = repo.list_accounts(AccountListQuery::new(org.id)).unwrap();
    assert_eq!(accounts_total, 0);
}

#[test]
fn test_contact_update_and_delete() {
    let test_db = common::TestDb::new("test_contact_repository.db");
    let repo = DieselRepository::new(test_db.pool());
    let (org, _) = seed_org(&repo, "Acme", "acme");

    let contact = repo
        .create_contact(&NewContact {
            organization_id: org.id,
            account_id: None,
            first_name: "Ivy".to_string(),
            last_name: "Stone".to_string(),
            email: Some("ivy@example.com".to_string()),
            phone: None,
            title: None,
            custom_fields: Some(HashMap::from([(
                "birthday".to_string(),
                "1990-04-01".to_string(),
            )])),
        })
        .unwrap();
    assert_eq!(
        contact.custom_fields.as_ref().unwrap().get("birthday").unwrap(),
        "1990-04-01"
    );

    let updated = repo
        .update_contact(
            contact.id,
            org.id,
            &UpdateContact {
                account_id: None,
                first_name: "Ivy".to_string(),
                last_name: "Stone".to_string(),
                email: Some("ivy@example.com".to_string()),
                phone: Some("555-0100".to_string()),
                title: Some("CTO".to_string()),
                custom_fields: None,
            },
        )
        .unwrap();
    assert_eq!(updated.title.as_deref(), Some("CTO"));

    let (search_total, found) = repo
        .list_contacts(ContactListQuery::new(org.id).search("Stone"))
        .unwrap();
    assert_eq!(search_total, 1);
    assert_eq!(found[0].id, contact.id);

    repo.delete_contact(contact.id, org.id).unwrap();
    assert!(repo.get_contact_by_id(contact.id, org.id).unwrap().is_none());
}

#[test]
fn test_transaction_records_carry_joined_names() {
    let test_db = common::TestDb::new("test_transaction_repository.db");
    let repo = DieselRepository::new(test_db.pool());
    let (org, _) = seed_org(&repo, "Acme", "acme");

    let account = repo
        .create_account(&NewAccount {
            organization_id: org.id,
            name: "Initech".to_string(),
            industry: None,
            website: None,
            phone: None,
        })
        .unwrap();
    let contact = repo
        .create_contact(&NewContact {
            organization_id: org.id,
            account_id: Some(account.id),
            first_name: "Peter".to_string(),
            last_name: "Gibbons".to_string(),
            email: None,
            phone: None,
            title: None,
            custom_fields: None,
        })
        .unwrap();

    let record = repo
        .create_transaction(&NewTransaction {
            organization_id: org.id,
            account_id: Some(account.id),
            contact_id: Some(contact.id),
            amount: 249.99,
            currency: "USD".to_string(),
            payment_method: "Credit Card".to_string(),
            status: TransactionStatus::Completed,
            reference: Some("INV-1001".to_string()),
            notes: None,
            transaction_date: Utc::now().naive_utc(),
        })
        .unwrap();
    assert_eq!(record.account_name.as_deref(), Some("Initech"));
    assert_eq!(record.contact_name.as_deref(), Some("Peter Gibbons"));

    let pending = repo
        .create_transaction(&NewTransaction {
            organization_id: org.id,
            account_id: None,
            contact_id: None,
            amount: 10.0,
            currency: "USD".to_string(),
            payment_method: "Cash".to_string(),
            status: TransactionStatus::Pending,
            reference: None,
            notes: None,
            transaction_date: Utc::now().naive_utc(),
        })
        .unwrap();
    assert!(pending.account_name.is_none());

    let (completed_total, completed) = repo
        .list_transactions(TransactionListQuery::new(org.id).status(TransactionStatus::Completed))
        .unwrap();
    assert_eq!(completed_total, 1);
    assert_eq!(completed[0].transaction.id, record.transaction.id);

    let refunded = repo
        .update_transaction(
            record.transaction.id,
            org.id,
            &tenant_crm::domain::transaction::UpdateTransaction {
                amount: 249.99,
                currency: "USD".to_string(),
                payment_method: "Credit Card".to_string(),
                status: TransactionStatus::Refunded,
                reference: Some("INV-1001".to_string()),
                notes: Some("customer returned the device".to_string()),
            },
        )
        .unwrap();
    assert_eq!(refunded.transaction.status, TransactionStatus::Refunded);
    assert_eq!(refunded.account_name.as_deref(), Some("Initech"));
}

#[test]
fn test_custom_field_definitions_lifecycle() {
    let test_db = common::TestDb::new("test_custom_fields.db");
    let repo = DieselRepository::new(test_db.pool());
    let (org, _) = seed_org(&repo, "Acme", "acme");

    let field = repo
        .create_field_definition(&NewFieldDefinition {
            organization_id: org.id,
            entity_type: EntityType::Lead,
            field_name: "referral".to_string(),
            field_label: "Referral".to_string(),
            field_type: FieldType::Text,
            is_required: false,
            display_order: 1,
            overall_visibility: FieldVisibility::Visible,
            contexts: ContextFlags::ALL,
            field_options: None,
            default_value: None,
            placeholder: None,
        })
        .unwrap();
    assert!(field.is_active);

    // Field names are unique per tenant and entity type.
    let duplicate = repo.create_field_definition(&NewFieldDefinition {
        organization_id: org.id,
        entity_type: EntityType::Lead,
        field_name: "referral".to_string(),
        field_label: "Referral again".to_string(),
        field_type: FieldType::Text,
        is_required: false,
        display_order: 2,
        overall_visibility: FieldVisibility::Visible,
        contexts: ContextFlags::ALL,
        field_options: None,
        default_value: None,
        placeholder: None,
    });
    assert!(matches!(
        duplicate,
        Err(RepositoryError::ConstraintViolation(_))
    ));

    let hidden = repo
        .update_field_definition(
            field.id,
            org.id,
            &UpdateFieldDefinition {
                field_label: "Referral".to_string(),
                field_type: FieldType::Text,
                is_required: false,
                display_order: 1,
                overall_visibility: FieldVisibility::Hidden,
                contexts: ContextFlags::ALL,
                field_options: None,
                default_value: None,
                placeholder: None,
            }
            .normalized(),
        )
        .unwrap();
    assert_eq!(hidden.overall_visibility, FieldVisibility::Hidden);
    assert_eq!(hidden.contexts, ContextFlags::NONE);
    assert_eq!(hidden.effective_contexts(), ContextFlags::NONE);

    repo.deactivate_field_definition(field.id, org.id).unwrap();
    let fetched = repo
        .get_field_definition(field.id, org.id)
        .unwrap()
        .unwrap();
    assert!(!fetched.is_active);
    assert!(repo.get_field_definition(field.id, org.id + 1).unwrap().is_none());
    let active = repo
        .list_field_definitions(org.id, EntityType::Lead, true)
        .unwrap();
    assert!(active.is_empty());
    let all = repo
        .list_field_definitions(org.id, EntityType::Lead, false)
        .unwrap();
    assert_eq!(all.len(), 1);
    assert!(!all[0].is_active);
}

#[test]
fn test_portal_credentials_upsert() {
    let test_db = common::TestDb::new("test_portal_credentials.db");
    let repo = DieselRepository::new(test_db.pool());
    let (org, _) = seed_org(&repo, "Acme", "acme");

    let creds = repo
        .upsert_portal_credentials(&NewPortalCredentials {
            organization_id: org.id,
            portal_id: "northfiber".to_string(),
            username: "acme-billing".to_string(),
            password: "ENC:first".to_string(),
        })
        .unwrap();
    assert_eq!(creds.username, "acme-billing");

    let replaced = repo
        .upsert_portal_credentials(&NewPortalCredentials {
            organization_id: org.id,
            portal_id: "northfiber".to_string(),
            username: "acme-billing".to_string(),
            password: "ENC:second".to_string(),
        })
        .unwrap();
    assert_eq!(replaced.id, creds.id);
    assert_eq!(replaced.password, "ENC:second");

    let fetched = repo
        .get_portal_credentials(org.id, "northfiber")
        .unwrap()
        .unwrap();
    assert_eq!(fetched.password, "ENC:second");
    assert!(repo.get_portal_credentials(org.id, "other").unwrap().is_none());
    assert_eq!(repo.list_portal_credentials(org.id).unwrap().len(), 1);
}

#[test]
fn test_search_history_ordered_newest_first() {
    let test_db = common::TestDb::new("test_search_history.db");
    let repo = DieselRepository::new(test_db.pool());
    let (org, _) = seed_org(&repo, "Acme", "acme");

    let started = Utc::now().naive_utc();
    let completed = started + chrono::Duration::seconds(3);
    let first = repo
        .record_search(&NewSearchHistoryEntry {
            organization_id: org.id,
            search_id: Uuid::new_v4(),
            mac_address: "AA:BB:CC:DD:EE:01".to_string(),
            results: json!([]),
            total_found: 0,
            started_at: started,
            completed_at: completed,
        })
        .unwrap();
    let second = repo
        .record_search(&NewSearchHistoryEntry {
            organization_id: org.id,
            search_id: Uuid::new_v4(),
            mac_address: "AA:BB:CC:DD:EE:02".to_string(),
            results: json!([{"portal_id": "northfiber", "found": true}]),
            total_found: 1,
            started_at: started,
            completed_at: completed,
        })
        .unwrap();

    let (total, entries) = repo.list_search_history(org.id, None).unwrap();
    assert_eq!(total, 2);
    assert_eq!(entries[0].id, second.id);
    assert_eq!(entries[1].id, first.id);

    let (paged_total, paged) = repo
        .list_search_history(
            org.id,
            Some(tenant_crm::repository::Pagination {
                page: 1,
                per_page: 1,
            }),
        )
        .unwrap();
    assert_eq!(paged_total, 2);
    assert_eq!(paged.len(), 1);
    assert_eq!(paged[0].mac_address, "AA:BB:CC:DD:EE:02");
}

#[test]
fn test_search_fetched_by_public_id_with_timestamps() {
    let test_db = common::TestDb::new("test_search_by_id.db");
    let repo = DieselRepository::new(test_db.pool());
    let (org, _) = seed_org(&repo, "Acme", "acme");
    let (other_org, _) = seed_org(&repo, "Globex", "globex");

    let started = Utc::now().naive_utc();
    let completed = started + chrono::Duration::seconds(2);
    let recorded = repo
        .record_search(&NewSearchHistoryEntry {
            organization_id: org.id,
            search_id: Uuid::new_v4(),
            mac_address: "AA:BB:CC:DD:EE:03".to_string(),
            results: json!([{"portal_id": "northfiber", "found": false}]),
            total_found: 0,
            started_at: started,
            completed_at: completed,
        })
        .unwrap();

    let found = repo.get_search(org.id, &recorded.search_id).unwrap().unwrap();
    assert_eq!(found.id, recorded.id);
    assert_eq!(found.mac_address, "AA:BB:CC:DD:EE:03");
    assert_eq!(found.started_at, started);
    assert_eq!(found.completed_at, completed);

    // Another tenant cannot see the search, and unknown ids come back empty.
    assert!(repo.get_search(other_org.id, &recorded.search_id).unwrap().is_none());
    assert!(repo.get_search(org.id, &Uuid::new_v4()).unwrap().is_none());
}
