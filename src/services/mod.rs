//! Business logic, kept free of Actix types.
//!
//! Every function takes the repository as a generic trait object so tests
//! can substitute mocks, checks the caller's roles first, and returns
//! [`ServiceResult`].

use thiserror::Error;

use crate::auth::AuthenticatedUser;
use crate::repository::errors::RepositoryError;

pub mod announcements;
pub mod api;
pub mod catalog;
pub mod jobs;
pub mod products;
pub mod trainings;
pub mod users;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::Form(err.to_string())
    }
}

pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}

pub fn ensure_role(user: &AuthenticatedUser, role: &str) -> ServiceResult<()> {
    if check_role(role, &user.roles) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Search and page parameters shared by the admin list pages.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub search: Option<String>,
    pub page: usize,
}

impl ListParams {
    pub fn new(search: Option<String>, page: Option<usize>) -> Self {
        let search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Self {
            search,
            page: page.unwrap_or(1).max(1),
        }
    }
}
