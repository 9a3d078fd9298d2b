//! Domain logic shared by the data and API layers.
//!
//! This crate has no internal dependencies so the availability engine and
//! error taxonomy can be used from repositories, handlers, and any future
//! CLI tooling alike.

pub mod availability;
pub mod csv;
pub mod error;
pub mod locale;
pub mod roles;
pub mod types;
