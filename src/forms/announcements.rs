use chrono::{NaiveDateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::domain::announcement::NewAnnouncement;

#[derive(Deserialize, Validate)]
/// Form data for publishing an announcement. The body is sanitized in
/// [`NewAnnouncement::new`], never here.
pub struct AddAnnouncementForm {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub body: String,
    pub published_at: Option<NaiveDateTime>,
}

impl From<AddAnnouncementForm> for NewAnnouncement {
    fn from(form: AddAnnouncementForm) -> Self {
        let published_at = form.published_at.unwrap_or_else(|| Utc::now().naive_utc());
        NewAnnouncement::new(form.title, form.body, published_at)
    }
}
