//! Schema Registry Domain Model
//!
//! Explicit, ordered list of the tables the database is expected to hold.

use thiserror::Error;

use super::backend::BackendKind;

/// Errors raised while building a schema registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),

    #[error("Table {0} is already registered")]
    DuplicateTable(String),

    #[error("Table {0} has no column definitions")]
    EmptyColumns(String),
}

/// A single table: its name and the column list used in `CREATE TABLE`.
///
/// Column definitions are emitted verbatim, so they should stick to types
/// understood by both Postgres and SQLite (`TEXT`, `INTEGER`, `BIGINT`,
/// `REAL`, `BOOLEAN`, `TIMESTAMP`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    name: String,
    columns: String,
}

impl TableDefinition {
    /// Create a table definition
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidTableName` if `name` is not a plain SQL
    /// identifier, or `SchemaError::EmptyColumns` if `columns` is blank.
    pub fn new(name: impl Into<String>, columns: impl Into<String>) -> Result<Self, SchemaError> {
        let name = name.into();
        let columns = columns.into();

        if !is_identifier(&name) {
            return Err(SchemaError::InvalidTableName(name));
        }
        if columns.trim().is_empty() {
            return Err(SchemaError::EmptyColumns(name));
        }

        Ok(Self { name, columns })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn create_statement(&self) -> String {
        format!("CREATE TABLE IF NOT EXISTS {} ({})", self.name, self.columns.trim())
    }

    #[must_use]
    pub fn drop_statement(&self, backend: BackendKind) -> String {
        match backend {
            BackendKind::ManagedPostgres | BackendKind::Postgres => {
                format!("DROP TABLE IF EXISTS {} CASCADE", self.name)
            }
            BackendKind::Sqlite => format!("DROP TABLE IF EXISTS {}", self.name),
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Ordered set of tables.
///
/// Tables are created in registration order and dropped in reverse, so a
/// table referencing another must be registered after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaRegistry {
    tables: Vec<TableDefinition>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table to the registry
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::DuplicateTable` if a table with the same name
    /// (case-insensitive) is already registered.
    pub fn register(&mut self, table: TableDefinition) -> Result<&mut Self, SchemaError> {
        if self
            .tables
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case(&table.name))
        {
            return Err(SchemaError::DuplicateTable(table.name));
        }

        self.tables.push(table);
        Ok(self)
    }

    /// Builder-style variant of [`register`](Self::register)
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register).
    pub fn with_table(mut self, table: TableDefinition) -> Result<Self, SchemaError> {
        self.register(table)?;
        Ok(self)
    }

    /// Tables in creation order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &TableDefinition> {
        self.tables.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    #[must_use]
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(TableDefinition::name).collect()
    }
}
