use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Organization {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub mac_search_enabled: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewOrganization {
    pub name: String,
    pub slug: String,
}

impl NewOrganization {
    /// Builds a new organization, deriving the slug from the name when no
    /// explicit slug is provided.
    #[must_use]
    pub fn new(name: String, slug: Option<String>) -> Self {
        let slug = slug
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slugify(&name));
        Self {
            name: name.trim().to_string(),
            slug,
        }
    }
}

/// Collapses a display name into a URL-safe tenant slug.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut prev_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Acme Cable & Fiber"), "acme-cable-fiber");
        assert_eq!(slugify("  Nord/West ISP  "), "nord-west-isp");
        assert_eq!(slugify("ACME"), "acme");
    }

    #[test]
    fn new_organization_prefers_explicit_slug() {
        let org = NewOrganization::new("Acme ISP".to_string(), Some("acme".to_string()));
        assert_eq!(org.slug, "acme");
        let org = NewOrganization::new("Acme ISP".to_string(), None);
        assert_eq!(org.slug, "acme-isp");
    }
}
