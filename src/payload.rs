//! Request body parsing shared by the resource handlers.

use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::ApiError;

pub type JsonObject = Map<String, Value>;

/// Body of a `201 Created` response.
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: i32,
}

/// The fields a resource requires on create and update, and the status
/// returned when any of them is missing.
#[derive(Debug, Clone, Copy)]
pub struct RequiredFields {
    pub resource: &'static str,
    pub fields: &'static [&'static str],
    pub status: StatusCode,
}

impl RequiredFields {
    /// Fields that are absent, null or an empty string, in declaration order.
    pub fn missing(&self, body: &JsonObject) -> Vec<&'static str> {
        self.fields
            .iter()
            .copied()
            .filter(|field| match body.get(*field) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.is_empty(),
                Some(_) => false,
            })
            .collect()
    }

    /// Check presence, then deserialize into the typed payload.
    pub fn parse<T: DeserializeOwned>(
        &self,
        body: Result<Json<JsonObject>, JsonRejection>,
    ) -> Result<T, ApiError> {
        let Json(body) = body.map_err(|rejection| {
            warn!(resource = self.resource, error = %rejection, "unreadable body");
            ApiError::InvalidBody {
                status: self.status,
                message: rejection.body_text(),
            }
        })?;

        let missing = self.missing(&body);
        if !missing.is_empty() {
            warn!(resource = self.resource, ?missing, "missing required fields");
            return Err(ApiError::MissingFields {
                status: self.status,
                fields: missing,
            });
        }

        serde_json::from_value(Value::Object(body)).map_err(|e| {
            warn!(resource = self.resource, error = %e, "invalid field type");
            ApiError::InvalidBody {
                status: self.status,
                message: e.to_string(),
            }
        })
    }
}
