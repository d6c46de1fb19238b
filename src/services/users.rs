//! User administration services.

use validator::Validate;

use crate::SERVICE_ADMIN_ROLE;
use crate::auth::AuthenticatedUser;
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::dto::pages::UsersPageData;
use crate::forms::users::AddUserForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{UserListQuery, UserReader, UserWriter};
use crate::services::{ListParams, ServiceResult, ensure_role};

/// Loads one page of user accounts for the admin index.
pub fn list_users<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: ListParams,
) -> ServiceResult<UsersPageData>
where
    R: UserReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let mut query = UserListQuery::new().paginate(params.page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(search) = &params.search {
        query = query.search(search.clone());
    }

    let (total, users) = repo.list_users(query)?;
    let users = Paginated::new(
        users,
        params.page,
        total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
        total,
    );

    Ok(UsersPageData {
        users,
        search: params.search,
    })
}

/// Validates the form and persists the new account.
pub fn add_user<R>(repo: &R, user: &AuthenticatedUser, form: AddUserForm) -> ServiceResult<()>
where
    R: UserWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    form.validate()?;

    let new_user: NewUser = form.into();
    repo.create_user(&new_user)?;

    Ok(())
}

/// Applies a partial update and returns the stored row.
pub fn patch_user<R>(
    repo: &R,
    user: &AuthenticatedUser,
    user_id: i32,
    updates: UpdateUser,
) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    Ok(repo.update_user(user_id, &updates)?)
}

pub fn set_user_active<R>(
    repo: &R,
    user: &AuthenticatedUser,
    user_id: i32,
    active: bool,
) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    patch_user(
        repo,
        user,
        user_id,
        UpdateUser {
            active: Some(active),
            ..UpdateUser::default()
        },
    )
}

pub fn delete_user<R>(repo: &R, user: &AuthenticatedUser, user_id: i32) -> ServiceResult<()>
where
    R: UserWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    repo.delete_user(user_id)?;
    Ok(())
}
