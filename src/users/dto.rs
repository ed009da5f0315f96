use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::payload::RequiredFields;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email: String, // neither format nor uniqueness is checked here
    pub city: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub city: String,
    pub language: String,
}

/// Missing user fields answer 500, not 422 like movies. Existing clients
/// depend on this status, so it stays until the contract is renegotiated.
pub const USER_FIELDS: RequiredFields = RequiredFields {
    resource: "user",
    fields: &["firstname", "lastname", "email", "city", "language"],
    status: StatusCode::INTERNAL_SERVER_ERROR,
};

impl User {
    pub fn from_payload(id: i32, p: UserPayload) -> Self {
        Self {
            id,
            firstname: p.firstname,
            lastname: p.lastname,
            email: p.email,
            city: p.city,
            language: p.language,
        }
    }
}
