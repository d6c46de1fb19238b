use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::listview::{CatalogRecord, ListRecord};

pub const TRAINING_LEVELS: [&str; 3] = ["Beginner", "Intermediate", "Advanced"];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
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

#[derive(Clone, Debug, Deserialize)]
pub struct NewTraining {
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: String,
    pub price: f64,
    pub featured: bool,
}

impl NewTraining {
    #[must_use]
    pub fn new(
        title: String,
        description: String,
        category: String,
        level: String,
        price: f64,
        featured: bool,
    ) -> Self {
        Self {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            category: category.trim().to_string(),
            level,
            price: price.max(0.0),
            featured,
        }
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateTraining {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub featured: Option<bool>,
    pub active: Option<bool>,
}

impl ListRecord for Training {
    fn record_id(&self) -> i32 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl CatalogRecord for Training {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.description, &self.category]
    }

    fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn level(&self) -> Option<&str> {
        Some(&self.level)
    }

    fn featured(&self) -> bool {
        self.featured
    }

    fn price(&self) -> Option<f64> {
        Some(self.price)
    }

    fn rating(&self) -> Option<f64> {
        Some(self.rating)
    }
}
