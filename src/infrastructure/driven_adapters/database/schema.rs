//! Churn API Schema
//!
//! Tables the churn API expects at startup.

use crate::domain::models::schema::{SchemaError, SchemaRegistry, TableDefinition};

/// Registry of the churn API tables, in dependency order
///
/// # Errors
///
/// Returns `SchemaError` if a definition is malformed.
pub fn churn_schema() -> Result<SchemaRegistry, SchemaError> {
    SchemaRegistry::new()
        .with_table(TableDefinition::new(
            "customers",
            "id BIGINT PRIMARY KEY, \
             external_id TEXT NOT NULL UNIQUE, \
             tenure_months INTEGER NOT NULL, \
             monthly_charges REAL NOT NULL, \
             contract_type TEXT NOT NULL, \
             created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP",
        )?)?
        .with_table(TableDefinition::new(
            "predictions",
            "id BIGINT PRIMARY KEY, \
             customer_id BIGINT NOT NULL REFERENCES customers(id), \
             model_version TEXT NOT NULL, \
             churn_probability REAL NOT NULL, \
             will_churn BOOLEAN NOT NULL, \
             created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP",
        )?)
}
