// Route exports
pub mod matches;
pub mod profiles;

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::models::ErrorResponse;
use crate::services::{Matchmaker, MatchmakingError, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matchmaker: Arc<Matchmaker>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(profiles::configure),
    );
}

/// Map a workflow fault onto a JSON error body
pub(crate) fn error_response(context: &str, err: MatchmakingError) -> HttpResponse {
    match err {
        MatchmakingError::Validation(message) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message,
            status_code: 400,
        }),
        MatchmakingError::Store(StoreError::InvalidInput(message)) => HttpResponse::BadRequest().json(ErrorResponse {
            error: context.to_string(),
            message,
            status_code: 400,
        }),
        MatchmakingError::Store(e) => {
            tracing::error!("{}: {}", context, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: context.to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

pub(crate) fn not_found(error: &str, message: String) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 404,
    })
}

pub(crate) fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}
