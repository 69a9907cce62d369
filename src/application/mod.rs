//! Application Layer
//!
//! Contains the schema lifecycle and diagnostic use cases.
//! Use cases depend on the domain gateway (abstraction), not the sqlx adapter.

pub mod use_cases;
