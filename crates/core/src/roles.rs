//! Well-known role name constants.
//!
//! These must match the `user_role` enum values seeded by the database
//! migrations and the `role` claim embedded in access tokens.

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_EDITOR: &str = "EDITOR";
