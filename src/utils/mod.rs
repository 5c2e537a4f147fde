//! Helpers shared by services and HTTP extractors.

pub mod jwt;
pub mod password;
pub mod validate;

pub use validate::{ValidatedJson, ValidatedQuery};
