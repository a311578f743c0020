use diesel::prelude::*;

use crate::domain::portal::{
    NewPortalCredentials, NewSearchHistoryEntry, PortalCredentials, SearchHistoryEntry,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    DieselRepository, Pagination, PortalCredentialReader, PortalCredentialWriter,
    SearchHistoryReader, SearchHistoryWriter,
};

impl PortalCredentialReader for DieselRepository {
    fn get_portal_credentials(
        &self,
        organization_id: i32,
        portal_id: &str,
    ) -> RepositoryResult<Option<PortalCredentials>> {
        use crate::models::portal::PortalCredentials as DbCredentials;
        use crate::schema::portal_credentials;

        let mut conn = self.conn()?;
        let row = portal_credentials::table
            .filter(portal_credentials::organization_id.eq(organization_id))
            .filter(portal_credentials::portal_id.eq(portal_id))
            .first::<DbCredentials>(&mut conn)
            .optional()?;

        Ok(row.map(Into::into))
    }

    fn list_portal_credentials(
        &self,
        organization_id: i32,
    ) -> RepositoryResult<Vec<PortalCredentials>> {
        use crate::models::portal::PortalCredentials as DbCredentials;
        use crate::schema::portal_credentials;

        let mut conn = self.conn()?;
        let rows = portal_credentials::table
            .filter(portal_credentials::organization_id.eq(organization_id))
            .order(portal_credentials::portal_id.asc())
            .load::<DbCredentials>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl PortalCredentialWriter for DieselRepository {
    fn upsert_portal_credentials(
        &self,
        new_creds: &NewPortalCredentials,
    ) -> RepositoryResult<PortalCredentials> {
        use crate::models::portal::{
            NewPortalCredentials as DbNewCredentials, PortalCredentials as DbCredentials,
        };
        use crate::schema::portal_credentials;

        let mut conn = self.conn()?;
        let insertable: DbNewCredentials = new_creds.into();

        let row = diesel::insert_into(portal_credentials::table)
            .values(&insertable)
            .on_conflict((
                portal_credentials::organization_id,
                portal_credentials::portal_id,
            ))
            .do_update()
            .set((
                portal_credentials::username.eq(new_creds.username.as_str()),
                portal_credentials::password.eq(new_creds.password.as_str()),
                portal_credentials::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .get_result::<DbCredentials>(&mut conn)?;

        Ok(row.into())
    }
}

impl SearchHistoryReader for DieselRepository {
    fn list_search_history(
        &self,
        organization_id: i32,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<(usize, Vec<SearchHistoryEntry>)> {
        use crate::models::portal::SearchHistoryEntry as DbEntry;
        use crate::schema::mac_search_history;

        let mut conn = self.conn()?;

        let total: i64 = mac_search_history::table
            .filter(mac_search_history::organization_id.eq(organization_id))
            .count()
            .get_result(&mut conn)?;

        let mut stmt = mac_search_history::table
            .filter(mac_search_history::organization_id.eq(organization_id))
            .order((
                mac_search_history::searched_at.desc(),
                mac_search_history::id.desc(),
            ))
            .into_boxed();
        if let Some(p) = pagination {
            stmt = stmt.limit(p.limit()).offset(p.offset());
        }

        let rows = stmt
            .load::<DbEntry>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total as usize, rows))
    }

    fn get_search(
        &self,
        organization_id: i32,
        search_id: &uuid::Uuid,
    ) -> RepositoryResult<Option<SearchHistoryEntry>> {
        use crate::models::portal::SearchHistoryEntry as DbEntry;
        use crate::schema::mac_search_history;

        let mut conn = self.conn()?;
        let row = mac_search_history::table
            .filter(mac_search_history::organization_id.eq(organization_id))
            .filter(mac_search_history::search_id.eq(search_id.to_string()))
            .first::<DbEntry>(&mut conn)
            .optional()?;

        Ok(row.map(Into::into))
    }
}

impl SearchHistoryWriter for DieselRepository {
    fn record_search(&self, entry: &NewSearchHistoryEntry) -> RepositoryResult<SearchHistoryEntry> {
        use crate::models::portal::{NewSearchHistoryEntry as DbNewEntry, SearchHistoryEntry as DbEntry};
        use crate::schema::mac_search_history;

        let mut conn = self.conn()?;
        let insertable: DbNewEntry = entry.into();
        let row = diesel::insert_into(mac_search_history::table)
            .values(&insertable)
            .get_result::<DbEntry>(&mut conn)?;

        Ok(row.into())
    }
}
