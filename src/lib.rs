//! Churn API Database Bootstrap
//!
//! Connection handle, session factory, schema lifecycle helpers and
//! health checks for the churn API backend, laid out following
//! Clean/Hexagonal Architecture principles.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
