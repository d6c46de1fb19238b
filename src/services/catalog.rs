//! Public catalog pages: one repository fetch, then in-memory filter/sort.

use crate::domain::announcement::Announcement;
use crate::domain::job::{Job, JobKind, JobStatus};
use crate::domain::product::Product;
use crate::domain::training::Training;
use crate::listview::catalog::{self, FilterSet, SortKey};
use crate::repository::{
    AnnouncementListQuery, AnnouncementReader, JobListQuery, JobReader, ProductListQuery,
    ProductReader, TrainingListQuery, TrainingReader,
};
use crate::services::ServiceResult;

/// Filter inputs coming off the catalog page query string.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub location_type: Option<String>,
    pub level: Option<String>,
    pub sort: Option<String>,
}

impl CatalogQuery {
    fn filter_set(&self) -> FilterSet {
        let mut filters = FilterSet::default();
        if let Some(search) = &self.search {
            filters = filters.search(search.clone());
        }
        if let Some(category) = &self.category {
            filters = filters.category(category.clone());
        }
        if let Some(location_type) = &self.location_type {
            filters = filters.location_type(location_type.clone());
        }
        if let Some(level) = &self.level {
            filters = filters.level(level.clone());
        }
        filters
    }

    fn sort_key(&self, default: SortKey) -> SortKey {
        self.sort
            .as_deref()
            .and_then(SortKey::parse)
            .unwrap_or(default)
    }
}

/// Active trainings matching the query, featured courses first.
pub fn load_trainings<R>(repo: &R, params: &CatalogQuery) -> ServiceResult<Vec<Training>>
where
    R: TrainingReader + ?Sized,
{
    let (_, trainings) = repo.list_trainings(TrainingListQuery::new().active(true))?;
    let filtered = catalog::filter(&trainings, &params.filter_set());
    Ok(catalog::sort(&filtered, params.sort_key(SortKey::Featured)))
}

/// Active postings of the given kind. The internships page is this with
/// `JobKind::Internship`; the status filter is explicit, not a hidden
/// default.
pub fn load_jobs<R>(repo: &R, kind: JobKind, params: &CatalogQuery) -> ServiceResult<Vec<Job>>
where
    R: JobReader + ?Sized,
{
    let (_, jobs) = repo.list_jobs(JobListQuery::new().kind(kind).status(JobStatus::Active))?;
    let filtered = catalog::filter(&jobs, &params.filter_set());
    Ok(catalog::sort(&filtered, params.sort_key(SortKey::Featured)))
}

/// Active products matching the query, newest first by default.
pub fn load_products<R>(repo: &R, params: &CatalogQuery) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    let (_, products) = repo.list_products(ProductListQuery::new().active(true))?;
    let filtered = catalog::filter(&products, &params.filter_set());
    Ok(catalog::sort(&filtered, params.sort_key(SortKey::Latest)))
}

/// Published announcements for the front page, newest first as stored.
pub fn load_announcements<R>(repo: &R) -> ServiceResult<Vec<Announcement>>
where
    R: AnnouncementReader + ?Sized,
{
    let (_, announcements) = repo.list_announcements(AnnouncementListQuery::new().active(true))?;
    Ok(announcements)
}
