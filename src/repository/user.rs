use diesel::prelude::*;

use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, UserReader, UserWriter};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: i32, organization_id: i32) -> RepositoryResult<Option<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .find(id)
            .filter(users::organization_id.eq(organization_id))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn get_user_by_email(
        &self,
        email: &str,
        organization_id: i32,
    ) -> RepositoryResult<Option<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::email.eq(email))
            .filter(users::organization_id.eq(organization_id))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn list_users(&self, organization_id: i32) -> RepositoryResult<Vec<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.conn()?;
        let users = users::table
            .filter(users::organization_id.eq(organization_id))
            .order(users::id.asc())
            .load::<DbUser>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(users)
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        use crate::models::user::{NewUser as DbNewUser, User as DbUser};
        use crate::schema::users;

        let mut conn = self.conn()?;
        let insertable: DbNewUser = new_user.into();
        let user = diesel::insert_into(users::table)
            .values(&insertable)
            .get_result::<DbUser>(&mut conn)?;

        Ok(user.into())
    }

    fn update_user(
        &self,
        id: i32,
        organization_id: i32,
        updates: &UpdateUser,
    ) -> RepositoryResult<User> {
        use crate::models::user::{UpdateUser as DbUpdateUser, User as DbUser};
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateUser = updates.into();

        let updated = diesel::update(
            users::table
                .find(id)
                .filter(users::organization_id.eq(organization_id)),
        )
        .set(&db_updates)
        .get_result::<DbUser>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_user(&self, id: i32, organization_id: i32) -> RepositoryResult<()> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let affected = diesel::delete(
            users::table
                .find(id)
                .filter(users::organization_id.eq(organization_id)),
        )
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
