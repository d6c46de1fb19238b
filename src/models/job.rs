use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::job::{
    Job as DomainJob, NewJob as DomainNewJob, UpdateJob as DomainUpdateJob,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::jobs)]
/// Diesel model for [`crate::domain::job::Job`]. Kind and status are stored
/// as lowercase strings.
pub struct Job {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub location_type: String,
    pub level: String,
    pub kind: String,
    pub featured: bool,
    pub urgent: bool,
    pub deadline: Option<NaiveDate>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::jobs)]
pub struct NewJob<'a> {
    pub title: &'a str,
    pub company: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub location: &'a str,
    pub location_type: &'a str,
    pub level: &'a str,
    pub kind: &'a str,
    pub featured: bool,
    pub urgent: bool,
    pub deadline: Option<NaiveDate>,
    pub status: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::jobs)]
pub struct UpdateJob<'a> {
    pub title: Option<&'a str>,
    pub company: Option<&'a str>,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub location: Option<&'a str>,
    pub location_type: Option<&'a str>,
    pub level: Option<&'a str>,
    pub kind: Option<&'a str>,
    pub featured: Option<bool>,
    pub urgent: Option<bool>,
    pub deadline: Option<NaiveDate>,
    pub status: Option<&'a str>,
}

impl From<Job> for DomainJob {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            company: job.company,
            description: job.description,
            category: job.category,
            location: job.location,
            location_type: job.location_type,
            level: job.level,
            kind: job.kind.into(),
            featured: job.featured,
            urgent: job.urgent,
            deadline: job.deadline,
            status: job.status.into(),
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewJob> for NewJob<'a> {
    fn from(job: &'a DomainNewJob) -> Self {
        Self {
            title: job.title.as_str(),
            company: job.company.as_str(),
            description: job.description.as_str(),
            category: job.category.as_str(),
            location: job.location.as_str(),
            location_type: job.location_type.as_str(),
            level: job.level.as_str(),
            kind: job.kind.as_str(),
            featured: job.featured,
            urgent: job.urgent,
            deadline: job.deadline,
            status: job.status.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateJob> for UpdateJob<'a> {
    fn from(updates: &'a DomainUpdateJob) -> Self {
        Self {
            title: updates.title.as_deref(),
            company: updates.company.as_deref(),
            description: updates.description.as_deref(),
            category: updates.category.as_deref(),
            location: updates.location.as_deref(),
            location_type: updates.location_type.as_deref(),
            level: updates.level.as_deref(),
            kind: updates.kind.map(|kind| kind.as_str()),
            featured: updates.featured,
            urgent: updates.urgent,
            deadline: updates.deadline,
            status: updates.status.map(|status| status.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::job::{JobKind, JobStatus};

    use super::*;

    #[test]
    fn db_job_converts_kind_and_status() {
        let now = chrono::Utc::now().naive_utc();
        let db_job = Job {
            id: 1,
            title: "t".into(),
            company: "c".into(),
            description: "d".into(),
            category: "Web".into(),
            location: "Cairo".into(),
            location_type: "Remote".into(),
            level: "Junior".into(),
            kind: "internship".into(),
            featured: false,
            urgent: true,
            deadline: None,
            status: "draft".into(),
            created_at: now,
            updated_at: now,
        };
        let domain: DomainJob = db_job.into();
        assert_eq!(domain.kind, JobKind::Internship);
        assert_eq!(domain.status, JobStatus::Draft);
    }
}
