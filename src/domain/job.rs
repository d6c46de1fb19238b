use std::fmt::Display;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::listview::{CatalogRecord, ListRecord};

pub const LOCATION_TYPES: [&str; 3] = ["Remote", "On-site", "Hybrid"];

/// Whether the posting is a regular job or an internship. The public
/// internships page is the jobs catalog narrowed to `Internship`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    Job,
    Internship,
}

impl JobKind {
    pub fn as_str(self) -> &'static str {
        match self {
            JobKind::Job => "job",
            JobKind::Internship => "internship",
        }
    }
}

impl Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for JobKind {
    fn from(s: &str) -> Self {
        match s {
            "internship" => JobKind::Internship,
            _ => JobKind::Job,
        }
    }
}

impl From<String> for JobKind {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Active,
    Closed,
    Draft,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Closed => "closed",
            JobStatus::Draft => "draft",
        }
    }
}

impl Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for JobStatus {
    fn from(s: &str) -> Self {
        match s {
            "closed" => JobStatus::Closed,
            "draft" => JobStatus::Draft,
            _ => JobStatus::Active,
        }
    }
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub location_type: String,
    pub level: String,
    pub kind: JobKind,
    pub featured: bool,
    pub urgent: bool,
    pub deadline: Option<NaiveDate>,
    pub status: JobStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub location_type: String,
    pub level: String,
    pub kind: JobKind,
    pub featured: bool,
    pub urgent: bool,
    pub deadline: Option<NaiveDate>,
    pub status: JobStatus,
}

/// Partial update; `None` fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub location_type: Option<String>,
    pub level: Option<String>,
    pub kind: Option<JobKind>,
    pub featured: Option<bool>,
    pub urgent: Option<bool>,
    pub deadline: Option<NaiveDate>,
    pub status: Option<JobStatus>,
}

impl ListRecord for Job {
    fn record_id(&self) -> i32 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.status == JobStatus::Active
    }
}

impl CatalogRecord for Job {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            &self.title,
            &self.description,
            &self.company,
            &self.location,
        ]
    }

    fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn location_type(&self) -> Option<&str> {
        Some(&self.location_type)
    }

    fn level(&self) -> Option<&str> {
        Some(&self.level)
    }

    fn kind(&self) -> Option<&str> {
        Some(self.kind.as_str())
    }

    fn company(&self) -> Option<&str> {
        Some(&self.company)
    }

    fn featured(&self) -> bool {
        self.featured
    }

    fn urgent(&self) -> bool {
        self.urgent
    }

    fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [JobStatus::Active, JobStatus::Closed, JobStatus::Draft] {
            assert_eq!(JobStatus::from(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_kind_defaults_to_job() {
        assert_eq!(JobKind::from("volunteer"), JobKind::Job);
        assert_eq!(JobKind::from("internship"), JobKind::Internship);
    }
}
