//! Repository traits and the Diesel-backed implementation.
//!
//! List queries follow one convention: a builder struct per collection, and
//! `(total, items)` results where `total` counts every match before
//! pagination is applied. Filters are only ever applied when set; no
//! collection carries a hidden default.

use crate::db::{DbConnection, DbPool};
use crate::domain::announcement::{Announcement, NewAnnouncement, UpdateAnnouncement};
use crate::domain::job::{Job, JobKind, JobStatus, NewJob, UpdateJob};
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::training::{NewTraining, Training, UpdateTraining};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::errors::RepositoryResult;

pub mod announcement;
pub mod errors;
pub mod job;
pub mod product;
pub mod training;
pub mod user;

/// Diesel implementation of every repository trait in this module.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub(crate) fn limit(&self) -> i64 {
        self.per_page as i64
    }

    pub(crate) fn offset(&self) -> i64 {
        let page = self.page.max(1) as i64;
        (page - 1) * self.limit()
    }
}

macro_rules! builder_field {
    ($name:ident, String) => {
        pub fn $name(mut self, value: impl Into<String>) -> Self {
            self.$name = Some(value.into());
            self
        }
    };
    ($name:ident, $ty:ty) => {
        pub fn $name(mut self, value: $ty) -> Self {
            self.$name = Some(value);
            self
        }
    };
}

#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub role: Option<String>,
    pub active: Option<bool>,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl UserListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    builder_field!(role, String);
    builder_field!(active, bool);
    builder_field!(search, String);

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrainingListQuery {
    pub category: Option<String>,
    pub level: Option<String>,
    pub active: Option<bool>,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl TrainingListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    builder_field!(category, String);
    builder_field!(level, String);
    builder_field!(active, bool);
    builder_field!(search, String);

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct JobListQuery {
    pub kind: Option<JobKind>,
    pub status: Option<JobStatus>,
    pub category: Option<String>,
    pub location_type: Option<String>,
    pub level: Option<String>,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl JobListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    builder_field!(kind, JobKind);
    builder_field!(status, JobStatus);
    builder_field!(category, String);
    builder_field!(location_type, String);
    builder_field!(level, String);
    builder_field!(search, String);

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    pub category: Option<String>,
    pub active: Option<bool>,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    builder_field!(category, String);
    builder_field!(active, bool);
    builder_field!(search, String);

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnnouncementListQuery {
    pub active: Option<bool>,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl AnnouncementListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    builder_field!(active, bool);
    builder_field!(search, String);

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
    fn delete_user(&self, user_id: i32) -> RepositoryResult<()>;
}

pub trait TrainingReader {
    fn get_training_by_id(&self, id: i32) -> RepositoryResult<Option<Training>>;
    fn list_trainings(&self, query: TrainingListQuery) -> RepositoryResult<(usize, Vec<Training>)>;
}

pub trait TrainingWriter {
    fn create_training(&self, new_training: &NewTraining) -> RepositoryResult<Training>;
    fn update_training(
        &self,
        training_id: i32,
        updates: &UpdateTraining,
    ) -> RepositoryResult<Training>;
    fn delete_training(&self, training_id: i32) -> RepositoryResult<()>;
}

pub trait JobReader {
    fn get_job_by_id(&self, id: i32) -> RepositoryResult<Option<Job>>;
    fn list_jobs(&self, query: JobListQuery) -> RepositoryResult<(usize, Vec<Job>)>;
}

pub trait JobWriter {
    fn create_job(&self, new_job: &NewJob) -> RepositoryResult<Job>;
    fn update_job(&self, job_id: i32, updates: &UpdateJob) -> RepositoryResult<Job>;
    fn delete_job(&self, job_id: i32) -> RepositoryResult<()>;
}

pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, product_id: i32, updates: &UpdateProduct)
    -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
}

pub trait AnnouncementReader {
    fn get_announcement_by_id(&self, id: i32) -> RepositoryResult<Option<Announcement>>;
    fn list_announcements(
        &self,
        query: AnnouncementListQuery,
    ) -> RepositoryResult<(usize, Vec<Announcement>)>;
}

pub trait AnnouncementWriter {
    fn create_announcement(
        &self,
        new_announcement: &NewAnnouncement,
    ) -> RepositoryResult<Announcement>;
    fn update_announcement(
        &self,
        announcement_id: i32,
        updates: &UpdateAnnouncement,
    ) -> RepositoryResult<Announcement>;
    fn delete_announcement(&self, announcement_id: i32) -> RepositoryResult<()>;
}
