use actix_web::{web, HttpResponse, Responder};

use crate::models::{
    CounterpartResponse, HealthResponse, LatestMatchQuery, MatchListResponse, RematchRequest, RematchResponse, Role,
};
use crate::routes::{bad_request, error_response, not_found, AppState};
use crate::services::{Counterpart, RematchOutcome};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/rematch/{role}", web::post().to(rematch))
        .route("/matches/latest", web::get().to(latest_match))
        .route("/admin/matches", web::get().to(list_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.matchmaker.health_check().await;

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Rematch endpoint
///
/// POST /api/v1/matches/rematch/{role}
///
/// A `designer` rematch spends one credit of the designer from the founder's
/// latest match (or `designerId`). Request body, both fields optional:
/// ```json
/// {
///   "founderId": 1,
///   "designerId": 2
/// }
/// ```
async fn rematch(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: Option<web::Json<RematchRequest>>,
) -> impl Responder {
    let Some(role) = Role::parse(&path) else {
        return bad_request("Invalid role", "Role must be one of: designer, founder".to_string());
    };
    let req = body.map(web::Json::into_inner).unwrap_or_default();

    tracing::info!("Rematch requested: role={:?}, founder={:?}, designer={:?}", role, req.founder_id, req.designer_id);

    match state.matchmaker.rematch(role, req.founder_id, req.designer_id).await {
        Ok(RematchOutcome::Rematched {
            founder,
            designers,
            new_matches,
            credits_remaining,
        }) => HttpResponse::Ok().json(RematchResponse {
            status: "rematched".to_string(),
            founder: Some(founder),
            designers,
            new_matches,
            credits_remaining,
        }),
        Ok(RematchOutcome::NoMatch {
            founder,
            credits_remaining,
        }) => HttpResponse::Ok().json(RematchResponse {
            status: "no_match".to_string(),
            founder: Some(founder),
            designers: vec![],
            new_matches: vec![],
            credits_remaining,
        }),
        Ok(RematchOutcome::OutOfCredits { founder, .. }) => HttpResponse::PaymentRequired().json(RematchResponse {
            status: "out_of_credits".to_string(),
            founder: Some(founder),
            designers: vec![],
            new_matches: vec![],
            credits_remaining: Some(0),
        }),
        Ok(RematchOutcome::FounderNotFound) => {
            not_found("Founder not found", "No founder to rematch for".to_string())
        }
        Err(e) => error_response("Failed to rematch", e),
    }
}

/// Match success lookup
///
/// GET /api/v1/matches/latest?role=designer&founderId=1&designerId=2
async fn latest_match(
    state: web::Data<AppState>,
    query: web::Query<LatestMatchQuery>,
) -> impl Responder {
    let role = Role::parse(&query.role).unwrap_or(Role::Designer);

    match state
        .matchmaker
        .latest_counterpart(role, query.founder_id, query.designer_id)
        .await
    {
        Ok(Some(counterpart)) => HttpResponse::Ok().json(counterpart_response(counterpart)),
        Ok(None) => not_found("No match found", "There are no matches yet".to_string()),
        Err(e) => error_response("Failed to fetch latest match", e),
    }
}

fn counterpart_response(counterpart: Counterpart) -> CounterpartResponse {
    match counterpart {
        Counterpart::Designer(designer) => CounterpartResponse {
            role: "Designer".to_string(),
            name: designer.name,
            email: designer.email,
            avatar: "designer.png".to_string(),
            bg_color: "#E7F4FF".to_string(),
        },
        Counterpart::Founder(founder) => CounterpartResponse {
            role: "Founder".to_string(),
            name: founder.name,
            email: founder.email,
            avatar: "founder.png".to_string(),
            bg_color: "#FBF1D6".to_string(),
        },
    }
}

/// Admin listing of every match, newest first
///
/// GET /api/v1/admin/matches
async fn list_matches(state: web::Data<AppState>) -> impl Responder {
    match state.matchmaker.list_matches().await {
        Ok(matches) => HttpResponse::Ok().json(MatchListResponse {
            total: matches.len(),
            matches,
        }),
        Err(e) => error_response("Failed to list matches", e),
    }
}
