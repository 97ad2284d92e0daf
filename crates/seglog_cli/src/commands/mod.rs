//! CLI command implementations.

pub mod append;
pub mod inspect;
pub mod read;
pub mod truncate;
