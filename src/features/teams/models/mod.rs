mod social;
mod team_member;

pub use social::{Social, SocialPlatform};
pub use team_member::TeamMember;
