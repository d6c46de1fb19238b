//! Reusable collection-view plumbing shared by every list page.
//!
//! A list page is the combination of a [`query::QueryState`] (what the user
//! wants to see), a [`coordinator::Controller`] that turns state changes into
//! race-safe fetches against a [`source::DataSource`], and a
//! [`cache::ResultCache`] holding the last committed page. Mutations
//! (delete, status toggle) patch the cache locally instead of refetching.
//! Catalog pages that fetch once and filter in memory use [`catalog`].

use thiserror::Error;

pub mod cache;
pub mod catalog;
pub mod coordinator;
pub mod query;
pub mod source;

pub use cache::{ListRecord, PageResult, ResultCache};
pub use catalog::{CatalogRecord, FilterSet, SortKey};
pub use coordinator::{Controller, FetchOutcome, SessionGate};
pub use query::{QueryState, SortMode};
pub use source::{DataSource, RestDataSource, SourceError};

/// Transient, user-facing feedback emitted by the controller.
///
/// Mirrors the flash-message flow of the server-rendered pages: the view
/// drains these and renders them as dismissible alerts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListViewError {
    /// The session is missing or its roles do not cover this view. The
    /// caller is expected to redirect to the login flow.
    #[error("not authorized for this view")]
    Unauthorized,
}
