use diesel::prelude::*;

use crate::domain::training::{NewTraining, Training, UpdateTraining};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, TrainingListQuery, TrainingReader, TrainingWriter};

impl TrainingReader for DieselRepository {
    fn get_training_by_id(&self, id: i32) -> RepositoryResult<Option<Training>> {
        use crate::models::training::Training as DbTraining;
        use crate::schema::trainings;

        let mut conn = self.conn()?;
        let training = trainings::table
            .find(id)
            .first::<DbTraining>(&mut conn)
            .optional()?;

        Ok(training.map(Into::into))
    }

    fn list_trainings(
        &self,
        query: TrainingListQuery,
    ) -> RepositoryResult<(usize, Vec<Training>)> {
        use crate::models::training::Training as DbTraining;
        use crate::schema::trainings;

        let mut conn = self.conn()?;
        let pattern = query.search.as_ref().map(|s| format!("%{s}%"));

        let mut items = trainings::table.into_boxed();
        let mut count = trainings::table.into_boxed();

        if let Some(category) = &query.category {
            items = items.filter(trainings::category.eq(category.clone()));
            count = count.filter(trainings::category.eq(category.clone()));
        }
        if let Some(level) = &query.level {
            items = items.filter(trainings::level.eq(level.clone()));
            count = count.filter(trainings::level.eq(level.clone()));
        }
        if let Some(active) = query.active {
            items = items.filter(trainings::active.eq(active));
            count = count.filter(trainings::active.eq(active));
        }
        if let Some(pattern) = &pattern {
            items = items.filter(
                trainings::title
                    .like(pattern.clone())
                    .or(trainings::description.like(pattern.clone())),
            );
            count = count.filter(
                trainings::title
                    .like(pattern.clone())
                    .or(trainings::description.like(pattern.clone())),
            );
        }

        let total: i64 = count.count().get_result(&mut conn)?;

        items = items.order((trainings::featured.desc(), trainings::created_at.desc()));
        if let Some(pagination) = &query.pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }

        let trainings = items
            .load::<DbTraining>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total as usize, trainings))
    }
}

impl TrainingWriter for DieselRepository {
    fn create_training(&self, new_training: &NewTraining) -> RepositoryResult<Training> {
        use crate::models::training::{NewTraining as DbNewTraining, Training as DbTraining};
        use crate::schema::trainings;

        let mut conn = self.conn()?;
        let insertable: DbNewTraining = new_training.into();
        let created = diesel::insert_into(trainings::table)
            .values(&insertable)
            .get_result::<DbTraining>(&mut conn)?;

        Ok(created.into())
    }

    fn update_training(
        &self,
        training_id: i32,
        updates: &UpdateTraining,
    ) -> RepositoryResult<Training> {
        use crate::models::training::{Training as DbTraining, UpdateTraining as DbUpdateTraining};
        use crate::schema::trainings;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateTraining = updates.into();

        let updated = diesel::update(trainings::table.find(training_id))
            .set((&db_updates, trainings::updated_at.eq(diesel::dsl::now)))
            .get_result::<DbTraining>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_training(&self, training_id: i32) -> RepositoryResult<()> {
        use crate::schema::trainings;

        let mut conn = self.conn()?;
        let affected = diesel::delete(trainings::table.find(training_id)).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
