//! Data required to render the admin list pages.

use crate::domain::announcement::Announcement;
use crate::domain::job::Job;
use crate::domain::product::Product;
use crate::domain::training::Training;
use crate::domain::user::User;
use crate::pagination::Paginated;

pub struct UsersPageData {
    pub users: Paginated<User>,
    pub search: Option<String>,
}

pub struct TrainingsPageData {
    pub trainings: Paginated<Training>,
    pub search: Option<String>,
}

pub struct JobsPageData {
    pub jobs: Paginated<Job>,
    pub search: Option<String>,
}

pub struct ProductsPageData {
    pub products: Paginated<Product>,
    pub search: Option<String>,
}

pub struct AnnouncementsPageData {
    pub announcements: Paginated<Announcement>,
    pub search: Option<String>,
}
