//! Session Extractor
//!
//! Opens one database session per request. The session is released when
//! the handler returns, on success or failure. Connection errors surface on
//! the handler's first statement.

use std::convert::Infallible;
use std::ops::{Deref, DerefMut};

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::infrastructure::driven_adapters::database::Session;
use crate::infrastructure::driving_adapters::api_rest::AppState;

/// Per-request database session
pub struct DbSession(pub Session);

impl Deref for DbSession {
    type Target = Session;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DbSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromRequestParts<AppState> for DbSession {
    type Rejection = Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        _parts: &'life0 mut Parts,
        state: &'life1 AppState,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>>
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        let session = state.sessions.session();
        Box::pin(async move { Ok(DbSession(session)) })
    }
}
