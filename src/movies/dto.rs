use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::payload::RequiredFields;

/// Movie row as stored in the `movies` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub director: String,
    pub year: String,
    pub color: String, // "0" or "1"
    pub duration: i32,
}

/// Body of POST and PUT. Every field is resupplied; there is no partial update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoviePayload {
    pub title: String,
    pub director: String,
    pub year: String,
    pub color: String,
    pub duration: i32,
}

pub const MOVIE_FIELDS: RequiredFields = RequiredFields {
    resource: "movie",
    fields: &["title", "director", "year", "color", "duration"],
    status: StatusCode::UNPROCESSABLE_ENTITY,
};

impl Movie {
    pub fn from_payload(id: i32, p: MoviePayload) -> Self {
        Self {
            id,
            title: p.title,
            director: p.director,
            year: p.year,
            color: p.color,
            duration: p.duration,
        }
    }
}
