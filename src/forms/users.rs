use serde::Deserialize;
use validator::Validate;

use crate::domain::user::NewUser;

#[derive(Deserialize, Validate)]
/// Form data for adding a user account.
pub struct AddUserForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub role: String,
}

impl From<AddUserForm> for NewUser {
    fn from(form: AddUserForm) -> Self {
        NewUser::new(form.name, form.email, form.role)
    }
}
