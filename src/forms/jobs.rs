use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::job::{JobKind, JobStatus, NewJob};

#[derive(Deserialize, Validate)]
/// Form data for adding a job or internship posting.
pub struct AddJobForm {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub company: String,
    pub description: String,
    #[validate(length(min = 1))]
    pub category: String,
    pub location: String,
    pub location_type: String,
    pub level: String,
    pub kind: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub urgent: bool,
    pub deadline: Option<NaiveDate>,
    pub status: String,
}

impl From<AddJobForm> for NewJob {
    fn from(form: AddJobForm) -> Self {
        NewJob {
            title: form.title.trim().to_string(),
            company: form.company.trim().to_string(),
            description: form.description.trim().to_string(),
            category: form.category.trim().to_string(),
            location: form.location.trim().to_string(),
            location_type: form.location_type,
            level: form.level,
            kind: JobKind::from(form.kind),
            featured: form.featured,
            urgent: form.urgent,
            deadline: form.deadline,
            status: JobStatus::from(form.status),
        }
    }
}
