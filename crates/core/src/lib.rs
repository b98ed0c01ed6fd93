//! Shared domain types for the developer portal backend.
//!
//! - [`error`] -- The domain error taxonomy used by every crate.
//! - [`roles`] -- The flat two-value [`roles::Role`] model.
//! - [`types`] -- Id and timestamp aliases.
//! - [`validation`] -- Input checks for registration data.

pub mod error;
pub mod roles;
pub mod types;
pub mod validation;
