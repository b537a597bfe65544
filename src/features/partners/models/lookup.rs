use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// The lookup tables of the partner family. They all share one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum LookupKind {
    PartnerTiers,
    PartnerTypes,
    ContributorRoles,
    SponsorLevels,
}

impl LookupKind {
    pub const ALL: [LookupKind; 4] = [
        LookupKind::PartnerTiers,
        LookupKind::PartnerTypes,
        LookupKind::ContributorRoles,
        LookupKind::SponsorLevels,
    ];

    pub fn table(self) -> &'static str {
        match self {
            LookupKind::PartnerTiers => "partner_tiers",
            LookupKind::PartnerTypes => "partner_types",
            LookupKind::ContributorRoles => "contributor_roles",
            LookupKind::SponsorLevels => "sponsor_levels",
        }
    }

    /// Collection route, e.g. `/api/partner-tiers`
    pub fn collection_path(self) -> &'static str {
        match self {
            LookupKind::PartnerTiers => "/api/partner-tiers",
            LookupKind::PartnerTypes => "/api/partner-types",
            LookupKind::ContributorRoles => "/api/contributor-roles",
            LookupKind::SponsorLevels => "/api/sponsor-levels",
        }
    }

    pub fn item_path(self) -> String {
        format!("{}/{{id}}", self.collection_path())
    }

    /// Human label used in messages
    pub fn label(self) -> &'static str {
        match self {
            LookupKind::PartnerTiers => "Partner tier",
            LookupKind::PartnerTypes => "Partner type",
            LookupKind::ContributorRoles => "Contributor role",
            LookupKind::SponsorLevels => "Sponsor level",
        }
    }
}

/// Row of any lookup table
#[derive(Debug, Clone, FromRow)]
pub struct LookupEntry {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub badge_color: Option<String>,
    pub display_order: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_follow_serde_names() {
        for kind in LookupKind::ALL {
            let slug = serde_json::to_value(kind).unwrap();
            let slug = slug.as_str().unwrap();
            assert_eq!(kind.collection_path(), format!("/api/{}", slug));
            assert_eq!(kind.table(), slug.replace('-', "_"));
        }
        assert_eq!(
            LookupKind::SponsorLevels.item_path(),
            "/api/sponsor-levels/{id}"
        );
    }
}
