use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::announcement::{
    Announcement as DomainAnnouncement, NewAnnouncement as DomainNewAnnouncement,
    UpdateAnnouncement as DomainUpdateAnnouncement,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::announcements)]
/// Diesel model for [`crate::domain::announcement::Announcement`].
pub struct Announcement {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub active: bool,
    pub published_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::announcements)]
pub struct NewAnnouncement<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub published_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::announcements)]
pub struct UpdateAnnouncement<'a> {
    pub title: Option<&'a str>,
    pub body: Option<&'a str>,
    pub active: Option<bool>,
    pub published_at: Option<NaiveDateTime>,
}

impl From<Announcement> for DomainAnnouncement {
    fn from(announcement: Announcement) -> Self {
        Self {
            id: announcement.id,
            title: announcement.title,
            body: announcement.body,
            active: announcement.active,
            published_at: announcement.published_at,
            created_at: announcement.created_at,
            updated_at: announcement.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewAnnouncement> for NewAnnouncement<'a> {
    fn from(announcement: &'a DomainNewAnnouncement) -> Self {
        Self {
            title: announcement.title.as_str(),
            body: announcement.body.as_str(),
            published_at: announcement.published_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateAnnouncement> for UpdateAnnouncement<'a> {
    fn from(updates: &'a DomainUpdateAnnouncement) -> Self {
        Self {
            title: updates.title.as_deref(),
            body: updates.body.as_deref(),
            active: updates.active,
            published_at: updates.published_at,
        }
    }
}
