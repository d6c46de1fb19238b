use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::listview::ListRecord;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Announcement {
    pub id: i32,
    pub title: String,
    /// Sanitized HTML; raw input never reaches storage.
    pub body: String,
    pub active: bool,
    pub published_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewAnnouncement {
    pub title: String,
    pub body: String,
    pub published_at: NaiveDateTime,
}

impl NewAnnouncement {
    /// Trims the title and strips unsafe markup from the body.
    #[must_use]
    pub fn new(title: String, body: String, published_at: NaiveDateTime) -> Self {
        Self {
            title: title.trim().to_string(),
            body: ammonia::clean(&body),
            published_at,
        }
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateAnnouncement {
    pub title: Option<String>,
    pub body: Option<String>,
    pub active: Option<bool>,
    pub published_at: Option<NaiveDateTime>,
}

impl UpdateAnnouncement {
    /// Applies the same sanitizing rules as [`NewAnnouncement::new`].
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.title = self.title.map(|t| t.trim().to_string());
        self.body = self.body.map(|b| ammonia::clean(&b));
        self
    }
}

impl ListRecord for Announcement {
    fn record_id(&self) -> i32 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn new_announcement_strips_markup() {
        let announcement = NewAnnouncement::new(
            " Launch ".to_string(),
            "<p>Hello</p><script>alert(1)</script>".to_string(),
            Utc::now().naive_utc(),
        );
        assert_eq!(announcement.title, "Launch");
        assert!(announcement.body.contains("<p>Hello</p>"));
        assert!(!announcement.body.contains("script"));
    }
}
