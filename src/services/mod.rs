//! Service helpers layered over the database module.

pub mod cache;
pub mod preferences;
