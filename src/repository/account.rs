use diesel::prelude::*;

use crate::domain::account::{Account, NewAccount, UpdateAccount};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AccountListQuery, AccountReader, AccountWriter, DieselRepository};

impl AccountReader for DieselRepository {
    fn get_account_by_id(
        &self,
        id: i32,
        organization_id: i32,
    ) -> RepositoryResult<Option<Account>> {
        use crate::models::account::Account as DbAccount;
        use crate::schema::accounts;

        let mut conn = self.conn()?;
        let row = accounts::table
            .find(id)
            .filter(accounts::organization_id.eq(organization_id))
            .first::<DbAccount>(&mut conn)
            .optional()?;

        Ok(row.map(Into::into))
    }

    fn list_accounts(&self, query: AccountListQuery) -> RepositoryResult<(usize, Vec<Account>)> {
        use crate::models::account::Account as DbAccount;
        use crate::schema::accounts;

        let mut conn = self.conn()?;

        let build = |query: &AccountListQuery| {
            let mut stmt = accounts::table
                .filter(accounts::organization_id.eq(query.organization_id))
                .into_boxed();
            if let Some(term) = &query.search {
                let pattern = format!("%{term}%");
                stmt = stmt.filter(
                    accounts::name
                        .like(pattern.clone())
                        .or(accounts::industry.like(pattern)),
                );
            }
            stmt
        };

        let total: i64 = build(&query).count().get_result(&mut conn)?;

        let mut stmt = build(&query).order(accounts::name.asc());
        if let Some(p) = query.pagination {
            stmt = stmt.limit(p.limit()).offset(p.offset());
        }

        let items = stmt
            .load::<DbAccount>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect::<Vec<Account>>();

        Ok((total as usize, items))
    }
}

impl AccountWriter for DieselRepository {
    fn create_account(&self, new_account: &NewAccount) -> RepositoryResult<Account> {
        use crate::models::account::{Account as DbAccount, NewAccount as DbNewAccount};
        use crate::schema::accounts;

        let mut conn = self.conn()?;
        let insertable: DbNewAccount = new_account.into();
        let row = diesel::insert_into(accounts::table)
            .values(&insertable)
            .get_result::<DbAccount>(&mut conn)?;

        Ok(row.into())
    }

    fn update_account(
        &self,
        id: i32,
        organization_id: i32,
        updates: &UpdateAccount,
    ) -> RepositoryResult<Account> {
        use crate::models::account::{Account as DbAccount, UpdateAccount as DbUpdateAccount};
        use crate::schema::accounts;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateAccount = updates.into();

        let row = diesel::update(
            accounts::table
                .find(id)
                .filter(accounts::organization_id.eq(organization_id)),
        )
        .set(&db_updates)
        .get_result::<DbAccount>(&mut conn)?;

        Ok(row.into())
    }

    fn delete_account(&self, id: i32, organization_id: i32) -> RepositoryResult<()> {
        use crate::schema::{accounts, contacts};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::update(
                contacts::table
                    .filter(contacts::account_id.eq(id))
                    .filter(contacts::organization_id.eq(organization_id)),
            )
            .set(contacts::account_id.eq(None::<i32>))
            .execute(conn)?;

            let affected = diesel::delete(
                accounts::table
                    .find(id)
                    .filter(accounts::organization_id.eq(organization_id)),
            )
            .execute(conn)?;

            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        })
    }
}
