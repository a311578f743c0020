use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::organization::{
    NewOrganization as DomainNewOrganization, Organization as DomainOrganization,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::organizations)]
/// Diesel model for [`crate::domain::organization::Organization`].
pub struct Organization {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub mac_search_enabled: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::organizations)]
pub struct NewOrganization<'a> {
    pub name: &'a str,
    pub slug: &'a str,
}

impl From<Organization> for DomainOrganization {
    fn from(org: Organization) -> Self {
        Self {
            id: org.id,
            name: org.name,
            slug: org.slug,
            mac_search_enabled: org.mac_search_enabled,
            created_at: org.created_at,
            updated_at: org.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewOrganization> for NewOrganization<'a> {
    fn from(org: &'a DomainNewOrganization) -> Self {
        Self {
            name: org.name.as_str(),
            slug: org.slug.as_str(),
        }
    }
}
