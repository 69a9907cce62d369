//! Schema Lifecycle Use Cases
//!
//! Create, drop and reset the registered tables.

mod drop_db;
mod init_db;
mod reset_db;

pub use drop_db::DropDbUseCase;
pub use init_db::InitDbUseCase;
pub use reset_db::ResetDbUseCase;
