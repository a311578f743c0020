use diesel::prelude::*;

use crate::domain::transaction::{
    NewTransaction, Transaction, TransactionRecord, UpdateTransaction,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    DieselRepository, TransactionListQuery, TransactionReader, TransactionWriter,
};

type JoinedRow = (
    crate::models::transaction::Transaction,
    Option<(String, String)>,
    Option<String>,
);

fn into_record((tx, contact, account_name): JoinedRow) -> TransactionRecord {
    let transaction: Transaction = tx.into();
    TransactionRecord {
        transaction,
        contact_name: contact.map(|(first, last)| format!("{first} {last}")),
        account_name,
    }
}

impl TransactionReader for DieselRepository {
    fn get_transaction_by_id(
        &self,
        id: i32,
        organization_id: i32,
    ) -> RepositoryResult<Option<TransactionRecord>> {
        use crate::schema::{accounts, contacts, transactions};

        let mut conn = self.conn()?;
        let row = transactions::table
            .left_join(contacts::table)
            .left_join(accounts::table)
            .filter(transactions::id.eq(id))
            .filter(transactions::organization_id.eq(organization_id))
            .select((
                transactions::all_columns,
                (contacts::first_name, contacts::last_name).nullable(),
                accounts::name.nullable(),
            ))
            .first::<JoinedRow>(&mut conn)
            .optional()?;

        Ok(row.map(into_record))
    }

    fn list_transactions(
        &self,
        query: TransactionListQuery,
    ) -> RepositoryResult<(usize, Vec<TransactionRecord>)> {
        use crate::schema::{accounts, contacts, transactions};

        let mut conn = self.conn()?;

        let build = |query: &TransactionListQuery| {
            let mut stmt = transactions::table
                .left_join(contacts::table)
                .left_join(accounts::table)
                .filter(transactions::organization_id.eq(query.organization_id))
                .into_boxed();
            if let Some(status) = query.status {
                stmt = stmt.filter(transactions::status.eq(status.to_string()));
            }
            stmt
        };

        let total: i64 = build(&query).count().get_result(&mut conn)?;

        let mut stmt = build(&query).order(transactions::transaction_date.desc());
        if let Some(p) = query.pagination {
            stmt = stmt.limit(p.limit()).offset(p.offset());
        }

        let rows = stmt
            .select((
                transactions::all_columns,
                (contacts::first_name, contacts::last_name).nullable(),
                accounts::name.nullable(),
            ))
            .load::<JoinedRow>(&mut conn)?
            .into_iter()
            .map(into_record)
            .collect();

        Ok((total as usize, rows))
    }
}

impl TransactionWriter for DieselRepository {
    fn create_transaction(&self, new_tx: &NewTransaction) -> RepositoryResult<TransactionRecord> {
        use crate::models::transaction::{
            NewTransaction as DbNewTransaction, Transaction as DbTransaction,
        };
        use crate::schema::transactions;

        let mut conn = self.conn()?;
        let insertable: DbNewTransaction = new_tx.into();
        let row = diesel::insert_into(transactions::table)
            .values(&insertable)
            .get_result::<DbTransaction>(&mut conn)?;

        self.load_record(&mut conn, row)
    }

    fn update_transaction(
        &self,
        id: i32,
        organization_id: i32,
        updates: &UpdateTransaction,
    ) -> RepositoryResult<TransactionRecord> {
        use crate::models::transaction::{
            Transaction as DbTransaction, UpdateTransaction as DbUpdateTransaction,
        };
        use crate::schema::transactions;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateTransaction = updates.into();

        let row = diesel::update(
            transactions::table
                .find(id)
                .filter(transactions::organization_id.eq(organization_id)),
        )
        .set(&db_updates)
        .get_result::<DbTransaction>(&mut conn)?;

        self.load_record(&mut conn, row)
    }
}

impl DieselRepository {
    fn load_record(
        &self,
        conn: &mut crate::db::DbConnection,
        row: crate::models::transaction::Transaction,
    ) -> RepositoryResult<TransactionRecord> {
        use crate::schema::{accounts, contacts};

        let contact = match row.contact_id {
            Some(contact_id) => contacts::table
                .find(contact_id)
                .select((contacts::first_name, contacts::last_name))
                .first::<(String, String)>(conn)
                .optional()?,
            None => None,
        };
        let account_name = match row.account_id {
            Some(account_id) => accounts::table
                .find(account_id)
                .select(accounts::name)
                .first::<String>(conn)
                .optional()?,
            None => None,
        };

        Ok(into_record((row, contact, account_name)))
    }
}
