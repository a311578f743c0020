//! Actix handlers for the JSON API.

pub mod accounts;
pub mod auth;
pub mod contacts;
pub mod custom_fields;
pub mod leads;
pub mod mac_search;
pub mod transactions;
pub mod users;

use actix_web::HttpResponse;
use log::error;
use serde_json::json;

use crate::services::ServiceError;

/// Maps a service error onto an HTTP response with a JSON error body.
/// Repository and internal failures are logged and reported as opaque 500s.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            HttpResponse::Unauthorized().json(json!({ "error": "unauthorized" }))
        }
        ServiceError::Forbidden(msg) => HttpResponse::Forbidden().json(json!({ "error": msg })),
        ServiceError::NotFound => HttpResponse::NotFound().json(json!({ "error": "not found" })),
        ServiceError::Conflict(msg) => HttpResponse::Conflict().json(json!({ "error": msg })),
        ServiceError::Validation(msg) => {
            HttpResponse::BadRequest().json(json!({ "error": msg }))
        }
        ServiceError::Repository(e) => {
            error!("Repository error: {e}");
            HttpResponse::InternalServerError().json(json!({ "error": "internal error" }))
        }
        ServiceError::Internal(msg) => {
            error!("Internal error: {msg}");
            HttpResponse::InternalServerError().json(json!({ "error": "internal error" }))
        }
    }
}

/// Rejects a payload that fails declarative validation.
pub fn validate_payload<T: validator::Validate>(payload: &T) -> Result<(), HttpResponse> {
    payload.validate().map_err(|e| {
        HttpResponse::BadRequest().json(json!({ "error": e.to_string() }))
    })
}
