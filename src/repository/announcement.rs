use diesel::prelude::*;

use crate::domain::announcement::{Announcement, NewAnnouncement, UpdateAnnouncement};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    AnnouncementListQuery, AnnouncementReader, AnnouncementWriter, DieselRepository,
};

impl AnnouncementReader for DieselRepository {
    fn get_announcement_by_id(&self, id: i32) -> RepositoryResult<Option<Announcement>> {
        use crate::models::announcement::Announcement as DbAnnouncement;
        use crate::schema::announcements;

        let mut conn = self.conn()?;
        let announcement = announcements::table
            .find(id)
            .first::<DbAnnouncement>(&mut conn)
            .optional()?;

        Ok(announcement.map(Into::into))
    }

    fn list_announcements(
        &self,
        query: AnnouncementListQuery,
    ) -> RepositoryResult<(usize, Vec<Announcement>)> {
        use crate::models::announcement::Announcement as DbAnnouncement;
        use crate::schema::announcements;

        let mut conn = self.conn()?;
        let pattern = query.search.as_ref().map(|s| format!("%{s}%"));

        let mut items = announcements::table.into_boxed();
        let mut count = announcements::table.into_boxed();

        if let Some(active) = query.active {
            items = items.filter(announcements::active.eq(active));
            count = count.filter(announcements::active.eq(active));
        }
        if let Some(pattern) = &pattern {
            items = items.filter(
                announcements::title
                    .like(pattern.clone())
                    .or(announcements::body.like(pattern.clone())),
            );
            count = count.filter(
                announcements::title
                    .like(pattern.clone())
                    .or(announcements::body.like(pattern.clone())),
            );
        }

        let total: i64 = count.count().get_result(&mut conn)?;

        items = items.order(announcements::created_at.desc());
        if let Some(pagination) = &query.pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }

        let announcements = items
            .load::<DbAnnouncement>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total as usize, announcements))
    }
}

impl AnnouncementWriter for DieselRepository {
    fn create_announcement(
        &self,
        new_announcement: &NewAnnouncement,
    ) -> RepositoryResult<Announcement> {
        use crate::models::announcement::{
            Announcement as DbAnnouncement, NewAnnouncement as DbNewAnnouncement,
        };
        use crate::schema::announcements;

        let mut conn = self.conn()?;
        let insertable: DbNewAnnouncement = new_announcement.into();
        let created = diesel::insert_into(announcements::table)
            .values(&insertable)
            .get_result::<DbAnnouncement>(&mut conn)?;

        Ok(created.into())
    }

    fn update_announcement(
        &self,
        announcement_id: i32,
        updates: &UpdateAnnouncement,
    ) -> RepositoryResult<Announcement> {
        use crate::models::announcement::{
            Announcement as DbAnnouncement, UpdateAnnouncement as DbUpdateAnnouncement,
        };
        use crate::schema::announcements;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateAnnouncement = updates.into();

        let updated = diesel::update(announcements::table.find(announcement_id))
            .set((&db_updates, announcements::updated_at.eq(diesel::dsl::now)))
            .get_result::<DbAnnouncement>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_announcement(&self, announcement_id: i32) -> RepositoryResult<()> {
        use crate::schema::announcements;

        let mut conn = self.conn()?;
        let affected =
            diesel::delete(announcements::table.find(announcement_id)).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
