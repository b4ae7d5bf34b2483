//! Well-known role and tier name constants.
//!
//! These match the values carried in JWT claims.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

pub const TIER_FREE: &str = "free";
pub const TIER_PREMIUM: &str = "premium";
