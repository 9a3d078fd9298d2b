//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- HS256 access/refresh token generation and validation.
//! - [`csrf`] -- double-submit CSRF token derivation.

pub mod csrf;
pub mod jwt;
pub mod password;
