use diesel::prelude::*;

use crate::domain::job::{Job, NewJob, UpdateJob};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, JobListQuery, JobReader, JobWriter};

impl JobReader for DieselRepository {
    fn get_job_by_id(&self, id: i32) -> RepositoryResult<Option<Job>> {
        use crate::models::job::Job as DbJob;
        use crate::schema::jobs;

        let mut conn = self.conn()?;
        let job = jobs::table.find(id).first::<DbJob>(&mut conn).optional()?;

        Ok(job.map(Into::into))
    }

    fn list_jobs(&self, query: JobListQuery) -> RepositoryResult<(usize, Vec<Job>)> {
        use crate::models::job::Job as DbJob;
        use crate::schema::jobs;

        let mut conn = self.conn()?;
        let pattern = query.search.as_ref().map(|s| format!("%{s}%"));

        let mut items = jobs::table.into_boxed();
        let mut count = jobs::table.into_boxed();

        if let Some(kind) = query.kind {
            items = items.filter(jobs::kind.eq(kind.as_str()));
            count = count.filter(jobs::kind.eq(kind.as_str()));
        }
        if let Some(status) = query.status {
            items = items.filter(jobs::status.eq(status.as_str()));
            count = count.filter(jobs::status.eq(status.as_str()));
        }
        if let Some(category) = &query.category {
            items = items.filter(jobs::category.eq(category.clone()));
            count = count.filter(jobs::category.eq(category.clone()));
        }
        if let Some(location_type) = &query.location_type {
            items = items.filter(jobs::location_type.eq(location_type.clone()));
            count = count.filter(jobs::location_type.eq(location_type.clone()));
        }
        if let Some(level) = &query.level {
            items = items.filter(jobs::level.eq(level.clone()));
            count = count.filter(jobs::level.eq(level.clone()));
        }
        if let Some(pattern) = &pattern {
            items = items.filter(
                jobs::title
                    .like(pattern.clone())
                    .or(jobs::description.like(pattern.clone()))
                    .or(jobs::company.like(pattern.clone()))
                    .or(jobs::location.like(pattern.clone())),
            );
            count = count.filter(
                jobs::title
                    .like(pattern.clone())
                    .or(jobs::description.like(pattern.clone()))
                    .or(jobs::company.like(pattern.clone()))
                    .or(jobs::location.like(pattern.clone())),
            );
        }

        let total: i64 = count.count().get_result(&mut conn)?;

        items = items.order((
            jobs::featured.desc(),
            jobs::urgent.desc(),
            jobs::created_at.desc(),
        ));
        if let Some(pagination) = &query.pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }

        let jobs = items
            .load::<DbJob>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total as usize, jobs))
    }
}

impl JobWriter for DieselRepository {
    fn create_job(&self, new_job: &NewJob) -> RepositoryResult<Job> {
        use crate::models::job::{Job as DbJob, NewJob as DbNewJob};
        use crate::schema::jobs;

        let mut conn = self.conn()?;
        let insertable: DbNewJob = new_job.into();
        let created = diesel::insert_into(jobs::table)
            .values(&insertable)
            .get_result::<DbJob>(&mut conn)?;

        Ok(created.into())
    }

    fn update_job(&self, job_id: i32, updates: &UpdateJob) -> RepositoryResult<Job> {
        use crate::models::job::{Job as DbJob, UpdateJob as DbUpdateJob};
        use crate::schema::jobs;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateJob = updates.into();

        let updated = diesel::update(jobs::table.find(job_id))
            .set((&db_updates, jobs::updated_at.eq(diesel::dsl::now)))
            .get_result::<DbJob>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_job(&self, job_id: i32) -> RepositoryResult<()> {
        use crate::schema::jobs;

        let mut conn = self.conn()?;
        let affected = diesel::delete(jobs::table.find(job_id)).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
