use diesel::prelude::*;

use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::custom_field::EntityType;
use crate::repository::custom_field::{delete_field_values, load_field_values, replace_field_values};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ContactListQuery, ContactReader, ContactWriter, DieselRepository};

impl ContactReader for DieselRepository {
    fn get_contact_by_id(
        &self,
        id: i32,
        organization_id: i32,
    ) -> RepositoryResult<Option<Contact>> {
        use crate::models::contact::Contact as DbContact;
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let row = contacts::table
            .find(id)
            .filter(contacts::organization_id.eq(organization_id))
            .first::<DbContact>(&mut conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut contact: Contact = row.into();
        let fields = load_field_values(&mut conn, EntityType::Contact, contact.id)?;
        if !fields.is_empty() {
            contact.custom_fields = Some(fields);
        }

        Ok(Some(contact))
    }

    fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<(usize, Vec<Contact>)> {
        use crate::models::contact::Contact as DbContact;
        use crate::schema::contacts;

        let mut conn = self.conn()?;

        let build = |query: &ContactListQuery| {
            let mut stmt = contacts::table
                .filter(contacts::organization_id.eq(query.organization_id))
                .into_boxed();

            if let Some(account_id) = query.account_id {
                stmt = stmt.filter(contacts::account_id.eq(account_id));
            }
            if let Some(term) = &query.search {
                let pattern = format!("%{term}%");
                stmt = stmt.filter(
                    contacts::first_name
                        .like(pattern.clone())
                        .or(contacts::last_name.like(pattern.clone()))
                        .or(contacts::email.like(pattern)),
                );
            }
            stmt
        };

        let total: i64 = build(&query).count().get_result(&mut conn)?;

        let mut stmt = build(&query).order(contacts::id.asc());
        if let Some(p) = query.pagination {
            stmt = stmt.limit(p.limit()).offset(p.offset());
        }

        let items = stmt
            .load::<DbContact>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect::<Vec<Contact>>();

        Ok((total as usize, items))
    }
}

impl ContactWriter for DieselRepository {
    fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact> {
        use crate::models::contact::{Contact as DbContact, NewContact as DbNewContact};
        use crate::schema::contacts;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let insertable: DbNewContact = new_contact.into();
            let row = diesel::insert_into(contacts::table)
                .values(&insertable)
                .get_result::<DbContact>(conn)?;

            let mut contact: Contact = row.into();
            if let Some(fields) = &new_contact.custom_fields {
                replace_field_values(conn, EntityType::Contact, contact.id, fields)?;
                contact.custom_fields = Some(fields.clone());
            }
            Ok(contact)
        })
    }

    fn update_contact(
        &self,
        id: i32,
        organization_id: i32,
        updates: &UpdateContact,
    ) -> RepositoryResult<Contact> {
        use crate::models::contact::{Contact as DbContact, UpdateContact as DbUpdateContact};
        use crate::schema::contacts;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let db_updates: DbUpdateContact = updates.into();

            let row = diesel::update(
                contacts::table
                    .find(id)
                    .filter(contacts::organization_id.eq(organization_id)),
            )
            .set(&db_updates)
            .get_result::<DbContact>(conn)?;

            let mut contact: Contact = row.into();
            if let Some(fields) = &updates.custom_fields {
                replace_field_values(conn, EntityType::Contact, contact.id, fields)?;
            }
            let fields = load_field_values(conn, EntityType::Contact, contact.id)?;
            if !fields.is_empty() {
                contact.custom_fields = Some(fields);
            }
            Ok(contact)
        })
    }

    fn delete_contact(&self, id: i32, organization_id: i32) -> RepositoryResult<()> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            delete_field_values(conn, EntityType::Contact, id)?;

            let affected = diesel::delete(
                contacts::table
                    .find(id)
                    .filter(contacts::organization_id.eq(organization_id)),
            )
            .execute(conn)?;

            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        })
    }
}
