//! Job and internship posting administration services.

use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::job::{Job, JobKind, JobStatus, NewJob, UpdateJob};
use crate::dto::pages::JobsPageData;
use crate::forms::jobs::AddJobForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{JobListQuery, JobReader, JobWriter};
use crate::services::{ListParams, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Loads one page of postings. Kind and status narrow the list only when
/// the caller passes them; the admin index shows drafts and closed
/// postings by default.
pub fn list_jobs<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: ListParams,
    kind: Option<JobKind>,
    status: Option<JobStatus>,
) -> ServiceResult<JobsPageData>
where
    R: JobReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut query = JobListQuery::new().paginate(params.page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(kind) = kind {
        query = query.kind(kind);
    }
    if let Some(status) = status {
        query = query.status(status);
    }
    if let Some(search) = &params.search {
        query = query.search(search.clone());
    }

    let (total, jobs) = repo.list_jobs(query)?;
    let jobs = Paginated::new(
        jobs,
        params.page,
        total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
        total,
    );

    Ok(JobsPageData {
        jobs,
        search: params.search,
    })
}

pub fn add_job<R>(repo: &R, user: &AuthenticatedUser, form: AddJobForm) -> ServiceResult<()>
where
    R: JobWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    form.validate()?;

    let new_job: NewJob = form.into();
    repo.create_job(&new_job)?;

    Ok(())
}

pub fn patch_job<R>(
    repo: &R,
    user: &AuthenticatedUser,
    job_id: i32,
    updates: UpdateJob,
) -> ServiceResult<Job>
where
    R: JobWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    Ok(repo.update_job(job_id, &updates)?)
}

/// Toggling a posting flips it between `Active` and `Closed`.
pub fn set_job_active<R>(
    repo: &R,
    user: &AuthenticatedUser,
    job_id: i32,
    active: bool,
) -> ServiceResult<Job>
where
    R: JobWriter + ?Sized,
{
    let status = if active {
        JobStatus::Active
    } else {
        JobStatus::Closed
    };
    patch_job(
        repo,
        user,
        job_id,
        UpdateJob {
            status: Some(status),
            ..UpdateJob::default()
        },
    )
}

pub fn delete_job<R>(repo: &R, user: &AuthenticatedUser, job_id: i32) -> ServiceResult<()>
where
    R: JobWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    repo.delete_job(job_id)?;
    Ok(())
}
