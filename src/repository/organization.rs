use diesel::prelude::*;

use crate::domain::organization::{NewOrganization, Organization};
use crate::domain::user::{NewUser, User};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, OrganizationReader, OrganizationWriter};

impl OrganizationReader for DieselRepository {
    fn get_organization_by_id(&self, id: i32) -> RepositoryResult<Option<Organization>> {
        use crate::models::organization::Organization as DbOrganization;
        use crate::schema::organizations;

        let mut conn = self.conn()?;
        let org = organizations::table
            .find(id)
            .first::<DbOrganization>(&mut conn)
            .optional()?;

        Ok(org.map(Into::into))
    }

    fn get_organization_by_slug(&self, slug: &str) -> RepositoryResult<Option<Organization>> {
        use crate::models::organization::Organization as DbOrganization;
        use crate::schema::organizations;

        let mut conn = self.conn()?;
        let org = organizations::table
            .filter(organizations::slug.eq(slug))
            .first::<DbOrganization>(&mut conn)
            .optional()?;

        Ok(org.map(Into::into))
    }
}

impl OrganizationWriter for DieselRepository {
    fn create_organization_with_admin(
        &self,
        new_org: &NewOrganization,
        new_admin: &NewUser,
    ) -> RepositoryResult<(Organization, User)> {
        use crate::models::organization::{
            NewOrganization as DbNewOrganization, Organization as DbOrganization,
        };
        use crate::models::user::{NewUser as DbNewUser, User as DbUser};
        use crate::schema::{organizations, users};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let insertable: DbNewOrganization = new_org.into();
            let org = diesel::insert_into(organizations::table)
                .values(&insertable)
                .get_result::<DbOrganization>(conn)?;

            // The admin payload is built before the organization id exists.
            let mut admin: DbNewUser = new_admin.into();
            admin.organization_id = org.id;

            let user = diesel::insert_into(users::table)
                .values(&admin)
                .get_result::<DbUser>(conn)?;

            Ok((org.into(), user.into()))
        })
    }

    fn set_mac_search_enabled(&self, organization_id: i32, enabled: bool) -> RepositoryResult<()> {
        use crate::schema::organizations;

        let mut conn = self.conn()?;
        let affected = diesel::update(organizations::table.find(organization_id))
            .set(organizations::mac_search_enabled.eq(enabled))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
