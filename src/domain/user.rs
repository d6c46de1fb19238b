use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::listview::ListRecord;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_USER: &str = "user";

pub const USER_ROLES: [&str; 3] = [ROLE_ADMIN, ROLE_MANAGER, ROLE_USER];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl NewUser {
    #[must_use]
    pub fn new(name: String, email: String, role: String) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            role: if USER_ROLES.contains(&role.as_str()) {
                role
            } else {
                ROLE_USER.to_string()
            },
        }
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub active: Option<bool>,
}

impl ListRecord for User {
    fn record_id(&self) -> i32 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_normalizes_email_and_role() {
        let user = NewUser::new(
            " Amina ".to_string(),
            " Amina@Example.COM ".to_string(),
            "superuser".to_string(),
        );
        assert_eq!(user.name, "Amina");
        assert_eq!(user.email, "amina@example.com");
        assert_eq!(user.role, ROLE_USER);
    }
}
