//! Use Cases
//!
//! Schema lifecycle and diagnostic operations.
//! Each use case is a single-purpose struct with an execute() method.

pub mod diagnostics;
pub mod lifecycle;

#[cfg(test)]
pub(crate) mod mock;

pub use diagnostics::{CheckConnectionUseCase, PoolStatusUseCase};
pub use lifecycle::{DropDbUseCase, InitDbUseCase, ResetDbUseCase};
