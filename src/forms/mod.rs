//! Form payloads posted by the admin pages.

pub mod announcements;
pub mod jobs;
pub mod products;
pub mod trainings;
pub mod users;
