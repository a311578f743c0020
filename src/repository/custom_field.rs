use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::custom_field::{
    EntityType, FieldDefinition, NewFieldDefinition, UpdateFieldDefinition,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{CustomFieldReader, CustomFieldWriter, DieselRepository};

impl CustomFieldReader for DieselRepository {
    fn get_field_definition(
        &self,
        id: i32,
        organization_id: i32,
    ) -> RepositoryResult<Option<FieldDefinition>> {
        use crate::models::custom_field::FieldDefinition as DbFieldDefinition;
        use crate::schema::custom_field_definitions as defs;

        let mut conn = self.conn()?;
        let row = defs::table
            .find(id)
            .filter(defs::organization_id.eq(organization_id))
            .first::<DbFieldDefinition>(&mut conn)
            .optional()?;

        row.map(|r| r.try_into().map_err(Into::into)).transpose()
    }

    fn list_field_definitions(
        &self,
        organization_id: i32,
        entity_type: EntityType,
        active_only: bool,
    ) -> RepositoryResult<Vec<FieldDefinition>> {
        use crate::models::custom_field::FieldDefinition as DbFieldDefinition;
        use crate::schema::custom_field_definitions as defs;

        let mut conn = self.conn()?;
        let mut query = defs::table
            .filter(defs::organization_id.eq(organization_id))
            .filter(defs::entity_type.eq(entity_type.to_string()))
            .into_boxed();

        if active_only {
            query = query.filter(defs::is_active.eq(true));
        }

        let rows = query
            .order((defs::display_order.asc(), defs::created_at.asc()))
            .load::<DbFieldDefinition>(&mut conn)?;

        rows.into_iter()
            .map(|r| r.try_into().map_err(Into::into))
            .collect()
    }
}

impl CustomFieldWriter for DieselRepository {
    fn create_field_definition(
        &self,
        new_field: &NewFieldDefinition,
    ) -> RepositoryResult<FieldDefinition> {
        use crate::models::custom_field::{
            FieldDefinition as DbFieldDefinition, NewFieldDefinition as DbNewFieldDefinition,
        };
        use crate::schema::custom_field_definitions as defs;

        let mut conn = self.conn()?;
        let insertable: DbNewFieldDefinition = new_field.into();
        let row = diesel::insert_into(defs::table)
            .values(&insertable)
            .get_result::<DbFieldDefinition>(&mut conn)?;

        row.try_into().map_err(Into::into)
    }

    fn update_field_definition(
        &self,
        id: i32,
        organization_id: i32,
        updates: &UpdateFieldDefinition,
    ) -> RepositoryResult<FieldDefinition> {
        use crate::models::custom_field::{
            FieldDefinition as DbFieldDefinition, UpdateFieldDefinition as DbUpdateFieldDefinition,
        };
        use crate::schema::custom_field_definitions as defs;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateFieldDefinition = updates.into();

        let row = diesel::update(
            defs::table
                .find(id)
                .filter(defs::organization_id.eq(organization_id)),
        )
        .set(&db_updates)
        .get_result::<DbFieldDefinition>(&mut conn)?;

        row.try_into().map_err(Into::into)
    }

    fn deactivate_field_definition(&self, id: i32, organization_id: i32) -> RepositoryResult<()> {
        use crate::schema::custom_field_definitions as defs;

        let mut conn = self.conn()?;
        let affected = diesel::update(
            defs::table
                .find(id)
                .filter(defs::organization_id.eq(organization_id)),
        )
        .set(defs::is_active.eq(false))
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(crate::repository::errors::RepositoryError::NotFound);
        }
        Ok(())
    }
}

/// Loads all stored custom field values for one entity.
pub(crate) fn load_field_values(
    conn: &mut SqliteConnection,
    entity_type: EntityType,
    entity_id: i32,
) -> QueryResult<HashMap<String, String>> {
    use crate::schema::custom_field_values as vals;

    let rows = vals::table
        .filter(vals::entity_type.eq(entity_type.to_string()))
        .filter(vals::entity_id.eq(entity_id))
        .select((vals::field, vals::value))
        .load::<(String, String)>(conn)?;

    Ok(rows.into_iter().collect())
}

/// Replaces the stored custom field values for one entity wholesale.
pub(crate) fn replace_field_values(
    conn: &mut SqliteConnection,
    entity_type: EntityType,
    entity_id: i32,
    values: &HashMap<String, String>,
) -> QueryResult<()> {
    use crate::models::custom_field::FieldValue;
    use crate::schema::custom_field_values as vals;

    delete_field_values(conn, entity_type, entity_id)?;

    let rows: Vec<FieldValue> = values
        .iter()
        .map(|(field, value)| FieldValue {
            entity_type: entity_type.to_string(),
            entity_id,
            field: field.clone(),
            value: value.clone(),
        })
        .collect();

    diesel::insert_into(vals::table).values(&rows).execute(conn)?;
    Ok(())
}

pub(crate) fn delete_field_values(
    conn: &mut SqliteConnection,
    entity_type: EntityType,
    entity_id: i32,
) -> QueryResult<()> {
    use crate::schema::custom_field_values as vals;

    diesel::delete(
        vals::table
            .filter(vals::entity_type.eq(entity_type.to_string()))
            .filter(vals::entity_id.eq(entity_id)),
    )
    .execute(conn)?;
    Ok(())
}
