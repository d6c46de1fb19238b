use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::listview::{CatalogRecord, ListRecord};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub rating: f64,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
}

impl NewProduct {
    #[must_use]
    pub fn new(name: String, description: String, category: String, price: f64) -> Self {
        Self {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            category: category.trim().to_string(),
            price: price.max(0.0),
        }
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub active: Option<bool>,
}

impl ListRecord for Product {
    fn record_id(&self) -> i32 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl CatalogRecord for Product {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.description, &self.category]
    }

    fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn price(&self) -> Option<f64> {
        Some(self.price)
    }

    fn rating(&self) -> Option<f64> {
        Some(self.rating)
    }
}
