use diesel::prelude::*;

use crate::domain::account::Account;
use crate::domain::contact::Contact;
use crate::domain::custom_field::EntityType;
use crate::domain::lead::{Lead, LeadStatus, NewLead, UpdateLead};
use crate::domain::lead_event::{LeadEvent, NewLeadEvent};
use crate::domain::user::User;
use crate::repository::custom_field::{delete_field_values, load_field_values, replace_field_values};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, LeadEventListQuery, LeadEventReader, LeadEventWriter, LeadListQuery,
    LeadReader, LeadWriter,
};

impl LeadReader for DieselRepository {
    fn get_lead_by_id(&self, id: i32, organization_id: i32) -> RepositoryResult<Option<Lead>> {
        use crate::models::lead::Lead as DbLead;
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let row = leads::table
            .find(id)
            .filter(leads::organization_id.eq(organization_id))
            .first::<DbLead>(&mut conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut lead: Lead = row.into();
        let fields = load_field_values(&mut conn, EntityType::Lead, lead.id)?;
        if !fields.is_empty() {
            lead.custom_fields = Some(fields);
        }

        Ok(Some(lead))
    }

    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)> {
        use crate::models::lead::Lead as DbLead;
        use crate::schema::leads;

        let mut conn = self.conn()?;

        let build = |query: &LeadListQuery| {
            let mut stmt = leads::table
                .filter(leads::organization_id.eq(query.organization_id))
                .into_boxed();

            if let Some(status) = query.status {
                stmt = stmt.filter(leads::status.eq(status.to_string()));
            }
            if let Some(user_id) = query.assigned_to {
                stmt = stmt.filter(leads::assigned_to.eq(user_id));
            }
            if let Some(term) = &query.search {
                let pattern = format!("%{term}%");
                stmt = stmt.filter(
                    leads::first_name
                        .like(pattern.clone())
                        .or(leads::last_name.like(pattern.clone()))
                        .or(leads::company.like(pattern.clone()))
                        .or(leads::email.like(pattern)),
                );
            }
            stmt
        };

        let total: i64 = build(&query).count().get_result(&mut conn)?;

        let mut stmt = build(&query).order(leads::id.asc());
        if let Some(p) = query.pagination {
            stmt = stmt.limit(p.limit()).offset(p.offset());
        }

        let items = stmt
            .load::<DbLead>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect::<Vec<Lead>>();

        Ok((total as usize, items))
    }
}

impl LeadWriter for DieselRepository {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead> {
        use crate::models::lead::{Lead as DbLead, NewLead as DbNewLead};
        use crate::schema::leads;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let insertable: DbNewLead = new_lead.into();
            let row = diesel::insert_into(leads::table)
                .values(&insertable)
                .get_result::<DbLead>(conn)?;

            let mut lead: Lead = row.into();
            if let Some(fields) = &new_lead.custom_fields {
                replace_field_values(conn, EntityType::Lead, lead.id, fields)?;
                lead.custom_fields = Some(fields.clone());
            }
            Ok(lead)
        })
    }

    fn update_lead(
        &self,
        id: i32,
        organization_id: i32,
        updates: &UpdateLead,
    ) -> RepositoryResult<Lead> {
        use crate::models::lead::{Lead as DbLead, UpdateLead as DbUpdateLead};
        use crate::schema::leads;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let db_updates: DbUpdateLead = updates.into();

            let row = diesel::update(
                leads::table
                    .find(id)
                    .filter(leads::organization_id.eq(organization_id)),
            )
            .set(&db_updates)
            .get_result::<DbLead>(conn)?;

            let mut lead: Lead = row.into();
            if let Some(fields) = &updates.custom_fields {
                replace_field_values(conn, EntityType::Lead, lead.id, fields)?;
            }
            let fields = load_field_values(conn, EntityType::Lead, lead.id)?;
            if !fields.is_empty() {
                lead.custom_fields = Some(fields);
            }
            Ok(lead)
        })
    }

    fn delete_lead(&self, id: i32, organization_id: i32) -> RepositoryResult<()> {
        use crate::schema::{lead_events, leads};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(lead_events::table.filter(lead_events::lead_id.eq(id))).execute(conn)?;
            delete_field_values(conn, EntityType::Lead, id)?;

            let affected = diesel::delete(
                leads::table
                    .find(id)
                    .filter(leads::organization_id.eq(organization_id)),
            )
            .execute(conn)?;

            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        })
    }

    fn convert_lead(
        &self,
        id: i32,
        organization_id: i32,
    ) -> RepositoryResult<(Lead, Account, Contact)> {
        use crate::models::account::Account as DbAccount;
        use crate::models::contact::Contact as DbContact;
        use crate::models::lead::Lead as DbLead;
        use crate::schema::{accounts, contacts, leads};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let row = leads::table
                .find(id)
                .filter(leads::organization_id.eq(organization_id))
                .first::<DbLead>(conn)?;

            let account_name = row
                .company
                .clone()
                .unwrap_or_else(|| format!("{} {}", row.first_name, row.last_name));

            let account = diesel::insert_into(accounts::table)
                .values((
                    accounts::organization_id.eq(organization_id),
                    accounts::name.eq(&account_name),
                    accounts::phone.eq(&row.phone),
                ))
                .get_result::<DbAccount>(conn)?;

            let contact = diesel::insert_into(contacts::table)
                .values((
                    contacts::organization_id.eq(organization_id),
                    contacts::account_id.eq(account.id),
                    contacts::first_name.eq(&row.first_name),
                    contacts::last_name.eq(&row.last_name),
                    contacts::email.eq(&row.email),
                    contacts::phone.eq(&row.phone),
                    contacts::title.eq(&row.title),
                ))
                .get_result::<DbContact>(conn)?;

            let updated = diesel::update(leads::table.find(id))
                .set((
                    leads::status.eq(LeadStatus::Converted.to_string()),
                    leads::updated_at.eq(chrono::Utc::now().naive_utc()),
                ))
                .get_result::<DbLead>(conn)?;

            Ok((updated.into(), account.into(), contact.into()))
        })
    }
}

impl LeadEventReader for DieselRepository {
    fn list_lead_events(
        &self,
        query: LeadEventListQuery,
    ) -> RepositoryResult<(usize, Vec<(LeadEvent, User)>)> {
        use crate::models::lead_event::LeadEvent as DbLeadEvent;
        use crate::models::user::User as DbUser;
        use crate::schema::{lead_events, users};

        let mut conn = self.conn()?;

        let build = |query: &LeadEventListQuery| {
            let mut stmt = lead_events::table
                .inner_join(users::table)
                .filter(lead_events::lead_id.eq(query.lead_id))
                .into_boxed();
            if let Some(event_type) = &query.event_type {
                stmt = stmt.filter(lead_events::event_type.eq(event_type.to_string()));
            }
            stmt
        };

        let total: i64 = build(&query).count().get_result(&mut conn)?;

        let mut stmt = build(&query).order(lead_events::created_at.desc());
        if let Some(p) = query.pagination {
            stmt = stmt.limit(p.limit()).offset(p.offset());
        }

        let rows = stmt
            .select((lead_events::all_columns, users::all_columns))
            .load::<(DbLeadEvent, DbUser)>(&mut conn)?
            .into_iter()
            .map(|(event, user)| (event.into(), user.into()))
            .collect();

        Ok((total as usize, rows))
    }
}

impl LeadEventWriter for DieselRepository {
    fn create_lead_event(&self, event: &NewLeadEvent) -> RepositoryResult<LeadEvent> {
        use crate::models::lead_event::{LeadEvent as DbLeadEvent, NewLeadEvent as DbNewLeadEvent};
        use crate::schema::lead_events;

        let mut conn = self.conn()?;
        let insertable: DbNewLeadEvent = event.into();
        let row = diesel::insert_into(lead_events::table)
            .values(&insertable)
            .get_result::<DbLeadEvent>(&mut conn)?;

        Ok(row.into())
    }
}
