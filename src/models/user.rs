//! User model and related types

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

static NO_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+$").unwrap());

/// Full user model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Short user representation embedded in booking and request views
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        UserSummary {
            id: user.id,
            name: user.name,
        }
    }
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(regex(path = *NO_WHITESPACE, message = "Name must not be blank or contain whitespace"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Update user request (partial: only supplied fields overwrite)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(regex(path = *NO_WHITESPACE, message = "Name must not be blank or contain whitespace"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_name_and_email() {
        let user = CreateUser {
            name: "alice".to_string(),
            email: "alice@example.com".to_string(),
        };
        assert!(user.validate().is_ok());
    }

    #[test]
    fn rejects_name_with_whitespace() {
        let user = CreateUser {
            name: "al ice".to_string(),
            email: "alice@example.com".to_string(),
        };
        assert!(user.validate().is_err());
    }

    #[test]
    fn rejects_blank_name_and_bad_email() {
        let blank = CreateUser {
            name: String::new(),
            email: "alice@example.com".to_string(),
        };
        assert!(blank.validate().is_err());

        let bad_email = CreateUser {
            name: "alice".to_string(),
            email: "not-an-email".to_string(),
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn partial_update_skips_absent_fields() {
        let update = UpdateUser {
            name: None,
            email: None,
        };
        assert!(update.validate().is_ok());
    }
}
