//! Training program administration services.

use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::training::{NewTraining, Training, UpdateTraining};
use crate::dto::pages::TrainingsPageData;
use crate::forms::trainings::AddTrainingForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{TrainingListQuery, TrainingReader, TrainingWriter};
use crate::services::{ListParams, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub fn list_trainings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: ListParams,
) -> ServiceResult<TrainingsPageData>
where
    R: TrainingReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut query = TrainingListQuery::new().paginate(params.page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(search) = &params.search {
        query = query.search(search.clone());
    }

    let (total, trainings) = repo.list_trainings(query)?;
    let trainings = Paginated::new(
        trainings,
        params.page,
        total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
        total,
    );

    Ok(TrainingsPageData {
        trainings,
        search: params.search,
    })
}

pub fn add_training<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddTrainingForm,
) -> ServiceResult<()>
where
    R: TrainingWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    form.validate()?;

    let new_training: NewTraining = form.into();
    repo.create_training(&new_training)?;

    Ok(())
}

pub fn patch_training<R>(
    repo: &R,
    user: &AuthenticatedUser,
    training_id: i32,
    updates: UpdateTraining,
) -> ServiceResult<Training>
where
    R: TrainingWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    Ok(repo.update_training(training_id, &updates)?)
}

pub fn set_training_active<R>(
    repo: &R,
    user: &AuthenticatedUser,
    training_id: i32,
    active: bool,
) -> ServiceResult<Training>
where
    R: TrainingWriter + ?Sized,
{
    patch_training(
        repo,
        user,
        training_id,
        UpdateTraining {
            active: Some(active),
            ..UpdateTraining::default()
        },
    )
}

pub fn delete_training<R>(
    repo: &R,
    user: &AuthenticatedUser,
    training_id: i32,
) -> ServiceResult<()>
where
    R: TrainingWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    repo.delete_training(training_id)?;
    Ok(())
}
