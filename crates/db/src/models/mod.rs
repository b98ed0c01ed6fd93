//! Entity structs and create DTOs.
//!
//! Each submodule contains:
//! - The stored entity struct
//! - A create DTO consumed by the matching repository

pub mod session;
pub mod user;
