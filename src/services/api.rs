//! Services behind the `/api/v1` list endpoints.
//!
//! These return [`ApiPage`] values ready to wrap in the response envelope.
//! Filters apply only when the caller sent them; an absent `status` or
//! `active` parameter means no constraint.

use crate::SERVICE_ACCESS_ROLE;
use crate::auth::AuthenticatedUser;
use crate::domain::announcement::Announcement;
use crate::domain::job::{Job, JobKind, JobStatus};
use crate::domain::product::Product;
use crate::domain::training::Training;
use crate::domain::user::User;
use crate::dto::api::ApiPage;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{
    AnnouncementListQuery, AnnouncementReader, JobListQuery, JobReader, ProductListQuery,
    ProductReader, TrainingListQuery, TrainingReader, UserListQuery, UserReader,
};
use crate::services::{ServiceResult, ensure_role};

const MAX_PAGE_SIZE: usize = 100;

/// Query parameters accepted by every list endpoint. Collections ignore
/// the keys that do not apply to them.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ApiListParams {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub location_type: Option<String>,
    pub kind: Option<String>,
    pub status: Option<String>,
    pub active: Option<bool>,
    pub role: Option<String>,
}

impl ApiListParams {
    fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    fn limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    fn search(&self) -> Option<String> {
        self.search
            .as_ref()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

pub fn list_trainings<R>(repo: &R, params: &ApiListParams) -> ServiceResult<ApiPage<Training>>
where
    R: TrainingReader + ?Sized,
{
    let mut query = TrainingListQuery::new().paginate(params.page(), params.limit());
    if let Some(category) = &params.category {
        query = query.category(category.clone());
    }
    if let Some(level) = &params.level {
        query = query.level(level.clone());
    }
    if let Some(active) = params.active {
        query = query.active(active);
    }
    if let Some(search) = params.search() {
        query = query.search(search);
    }

    let (total, trainings) = repo.list_trainings(query)?;
    Ok(ApiPage::new(trainings, params.page(), params.limit(), total))
}

pub fn list_jobs<R>(repo: &R, params: &ApiListParams) -> ServiceResult<ApiPage<Job>>
where
    R: JobReader + ?Sized,
{
    let mut query = JobListQuery::new().paginate(params.page(), params.limit());
    if let Some(kind) = params.kind.as_deref() {
        query = query.kind(JobKind::from(kind));
    }
    if let Some(status) = params.status.as_deref() {
        query = query.status(JobStatus::from(status));
    }
    if let Some(category) = &params.category {
        query = query.category(category.clone());
    }
    if let Some(location_type) = &params.location_type {
        query = query.location_type(location_type.clone());
    }
    if let Some(level) = &params.level {
        query = query.level(level.clone());
    }
    if let Some(search) = params.search() {
        query = query.search(search);
    }

    let (total, jobs) = repo.list_jobs(query)?;
    Ok(ApiPage::new(jobs, params.page(), params.limit(), total))
}

pub fn list_products<R>(repo: &R, params: &ApiListParams) -> ServiceResult<ApiPage<Product>>
where
    R: ProductReader + ?Sized,
{
    let mut query = ProductListQuery::new().paginate(params.page(), params.limit());
    if let Some(category) = &params.category {
        query = query.category(category.clone());
    }
    if let Some(active) = params.active {
        query = query.active(active);
    }
    if let Some(search) = params.search() {
        query = query.search(search);
    }

    let (total, products) = repo.list_products(query)?;
    Ok(ApiPage::new(products, params.page(), params.limit(), total))
}

pub fn list_users<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &ApiListParams,
) -> ServiceResult<ApiPage<User>>
where
    R: UserReader + ?Sized,
{
    ensure_role(user, crate::SERVICE_ADMIN_ROLE)?;

    let mut query = UserListQuery::new().paginate(params.page(), params.limit());
    if let Some(role) = &params.role {
        query = query.role(role.clone());
    }
    if let Some(active) = params.active {
        query = query.active(active);
    }
    if let Some(search) = params.search() {
        query = query.search(search);
    }

    let (total, users) = repo.list_users(query)?;
    Ok(ApiPage::new(users, params.page(), params.limit(), total))
}

pub fn list_announcements<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &ApiListParams,
) -> ServiceResult<ApiPage<Announcement>>
where
    R: AnnouncementReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut query = AnnouncementListQuery::new().paginate(params.page(), params.limit());
    if let Some(active) = params.active {
        query = query.active(active);
    }
    if let Some(search) = params.search() {
        query = query.search(search);
    }

    let (total, announcements) = repo.list_announcements(query)?;
    Ok(ApiPage::new(
        announcements,
        params.page(),
        params.limit(),
        total,
    ))
}
