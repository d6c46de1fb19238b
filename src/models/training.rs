use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::training::{
    NewTraining as DomainNewTraining, Training as DomainTraining,
    UpdateTraining as DomainUpdateTraining,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::trainings)]
/// Diesel model for [`crate::domain::training::Training`].
pub struct Training {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: String,
    pub price: f64,
    pub rating: f64,
    pub featured: bool,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::trainings)]
pub struct NewTraining<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub level: &'a str,
    pub price: f64,
    pub featured: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::trainings)]
pub struct UpdateTraining<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub level: Option<&'a str>,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub featured: Option<bool>,
    pub active: Option<bool>,
}

impl From<Training> for DomainTraining {
    fn from(training: Training) -> Self {
        Self {
            id: training.id,
            title: training.title,
            description: training.description,
            category: training.category,
            level: training.level,
            price: training.price,
            rating: training.rating,
            featured: training.featured,
            active: training.active,
            created_at: training.created_at,
            updated_at: training.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewTraining> for NewTraining<'a> {
    fn from(training: &'a DomainNewTraining) -> Self {
        Self {
            title: training.title.as_str(),
            description: training.description.as_str(),
            category: training.category.as_str(),
            level: training.level.as_str(),
            price: training.price,
            featured: training.featured,
        }
    }
}

impl<'a> From<&'a DomainUpdateTraining> for UpdateTraining<'a> {
    fn from(updates: &'a DomainUpdateTraining) -> Self {
        Self {
            title: updates.title.as_deref(),
            description: updates.description.as_deref(),
            category: updates.category.as_deref(),
            level: updates.level.as_deref(),
            price: updates.price,
            rating: updates.rating,
            featured: updates.featured,
            active: updates.active,
        }
    }
}
