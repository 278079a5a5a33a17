//! Domains module containing business logic organized by bounded contexts.

pub mod infakt;
pub mod tools;
