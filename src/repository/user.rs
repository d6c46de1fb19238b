use diesel::prelude::*;

use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, UserListQuery, UserReader, UserWriter};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .find(id)
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::email.eq(email))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.conn()?;
        let pattern = query.search.as_ref().map(|s| format!("%{s}%"));

        let mut items = users::table.into_boxed();
        let mut count = users::table.into_boxed();

        if let Some(role) = &query.role {
            items = items.filter(users::role.eq(role.clone()));
            count = count.filter(users::role.eq(role.clone()));
        }
        if let Some(active) = query.active {
            items = items.filter(users::active.eq(active));
            count = count.filter(users::active.eq(active));
        }
        if let Some(pattern) = &pattern {
            items = items.filter(
                users::name
                    .like(pattern.clone())
                    .or(users::email.like(pattern.clone())),
            );
            count = count.filter(
                users::name
                    .like(pattern.clone())
                    .or(users::email.like(pattern.clone())),
            );
        }

        let total: i64 = count.count().get_result(&mut conn)?;

        items = items.order(users::created_at.desc());
        if let Some(pagination) = &query.pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }

        let users = items
            .load::<DbUser>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total as usize, users))
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        use crate::models::user::{NewUser as DbNewUser, User as DbUser};
        use crate::schema::users;

        let mut conn = self.conn()?;
        let insertable: DbNewUser = new_user.into();
        let created = diesel::insert_into(users::table)
            .values(&insertable)
            .get_result::<DbUser>(&mut conn)?;

        Ok(created.into())
    }

    fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User> {
        use crate::models::user::{UpdateUser as DbUpdateUser, User as DbUser};
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateUser = updates.into();

        let updated = diesel::update(users::table.find(user_id))
            .set((&db_updates, users::updated_at.eq(diesel::dsl::now)))
            .get_result::<DbUser>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_user(&self, user_id: i32) -> RepositoryResult<()> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let affected = diesel::delete(users::table.find(user_id)).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
