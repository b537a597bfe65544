use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Social platform (maps to PostgreSQL enum `social_platform`)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "social_platform", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Linkedin,
    Twitter,
    Github,
    Instagram,
    Facebook,
    Portfolio,
    Email,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 7] = [
        SocialPlatform::Linkedin,
        SocialPlatform::Twitter,
        SocialPlatform::Github,
        SocialPlatform::Instagram,
        SocialPlatform::Facebook,
        SocialPlatform::Portfolio,
        SocialPlatform::Email,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SocialPlatform::Linkedin => "linkedin",
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Github => "github",
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Portfolio => "portfolio",
            SocialPlatform::Email => "email",
        }
    }

    /// Display name, e.g. "LinkedIn"
    pub fn label(&self) -> &'static str {
        match self {
            SocialPlatform::Linkedin => "LinkedIn",
            SocialPlatform::Twitter => "Twitter",
            SocialPlatform::Github => "GitHub",
            SocialPlatform::Instagram => "Instagram",
            SocialPlatform::Facebook => "Facebook",
            SocialPlatform::Portfolio => "Portfolio",
            SocialPlatform::Email => "Email",
        }
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Social link of a team member
#[derive(Debug, Clone, FromRow)]
pub struct Social {
    pub id: i64,
    pub team_id: i64,
    pub platform: SocialPlatform,
    pub url: String,
    pub is_primary: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_serde_is_lowercase() {
        for platform in SocialPlatform::ALL {
            assert_eq!(
                serde_json::to_value(platform).unwrap(),
                serde_json::json!(platform.as_str())
            );
        }
        let parsed: SocialPlatform = serde_json::from_str("\"github\"").unwrap();
        assert_eq!(parsed, SocialPlatform::Github);
        assert!(serde_json::from_str::<SocialPlatform>("\"myspace\"").is_err());
    }
}
