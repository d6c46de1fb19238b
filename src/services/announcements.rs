//! Announcement administration services.

use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::announcement::{Announcement, NewAnnouncement, UpdateAnnouncement};
use crate::dto::pages::AnnouncementsPageData;
use crate::forms::announcements::AddAnnouncementForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{AnnouncementListQuery, AnnouncementReader, AnnouncementWriter};
use crate::services::{ListParams, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub fn list_announcements<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: ListParams,
) -> ServiceResult<AnnouncementsPageData>
where
    R: AnnouncementReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut query = AnnouncementListQuery::new().paginate(params.page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(search) = &params.search {
        query = query.search(search.clone());
    }

    let (total, announcements) = repo.list_announcements(query)?;
    let announcements = Paginated::new(
        announcements,
        params.page,
        total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
        total,
    );

    Ok(AnnouncementsPageData {
        announcements,
        search: params.search,
    })
}

/// Validates and persists a new announcement. Sanitizing happens in the
/// domain constructor so no raw markup can reach storage.
pub fn add_announcement<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddAnnouncementForm,
) -> ServiceResult<()>
where
    R: AnnouncementWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    form.validate()?;

    let new_announcement: NewAnnouncement = form.into();
    repo.create_announcement(&new_announcement)?;

    Ok(())
}

pub fn patch_announcement<R>(
    repo: &R,
    user: &AuthenticatedUser,
    announcement_id: i32,
    updates: UpdateAnnouncement,
) -> ServiceResult<Announcement>
where
    R: AnnouncementWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    let updates = updates.sanitized();
    Ok(repo.update_announcement(announcement_id, &updates)?)
}

pub fn set_announcement_active<R>(
    repo: &R,
    user: &AuthenticatedUser,
    announcement_id: i32,
    active: bool,
) -> ServiceResult<Announcement>
where
    R: AnnouncementWriter + ?Sized,
{
    patch_announcement(
        repo,
        user,
        announcement_id,
        UpdateAnnouncement {
            active: Some(active),
            ..UpdateAnnouncement::default()
        },
    )
}

pub fn delete_announcement<R>(
    repo: &R,
    user: &AuthenticatedUser,
    announcement_id: i32,
) -> ServiceResult<()>
where
    R: AnnouncementWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    repo.delete_announcement(announcement_id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::repository::errors::RepositoryResult;
    use crate::services::ServiceError;

    mock! {
        Repo {}

        impl AnnouncementWriter for Repo {
            fn create_announcement(
                &self,
                new_announcement: &NewAnnouncement,
            ) -> RepositoryResult<Announcement>;
            fn update_announcement(
                &self,
                announcement_id: i32,
                updates: &UpdateAnnouncement,
            ) -> RepositoryResult<Announcement>;
            fn delete_announcement(&self, announcement_id: i32) -> RepositoryResult<()>;
        }
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            roles: vec![
                SERVICE_ACCESS_ROLE.to_string(),
                SERVICE_ADMIN_ROLE.to_string(),
            ],
            exp: 0,
        }
    }

    fn stored(new_announcement: &NewAnnouncement) -> Announcement {
        let now = Utc::now().naive_utc();
        Announcement {
            id: 1,
            title: new_announcement.title.clone(),
            body: new_announcement.body.clone(),
            active: true,
            published_at: new_announcement.published_at,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn add_announcement_strips_markup_before_storage() {
        let mut repo = MockRepo::new();
        repo.expect_create_announcement()
            .withf(|new_announcement| !new_announcement.body.contains("script"))
            .returning(|new_announcement| Ok(stored(new_announcement)));

        let form = AddAnnouncementForm {
            title: "Launch".to_string(),
            body: "<p>Hello</p><script>alert(1)</script>".to_string(),
            published_at: None,
        };

        add_announcement(&repo, &admin(), form).unwrap();
    }

    #[test]
    fn add_announcement_rejects_empty_title() {
        let repo = MockRepo::new();
        let form = AddAnnouncementForm {
            title: String::new(),
            body: "text".to_string(),
            published_at: None,
        };

        let result = add_announcement(&repo, &admin(), form);
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
