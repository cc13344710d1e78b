use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    CreditBalanceResponse, CreditGrantResponse, DesignerResponse, DesignerSubmission, FounderResponse,
    FounderSubmission, GrantCreditsRequest,
};
use crate::routes::{bad_request, error_response, not_found, AppState};
use crate::services::FounderOutcome;

/// Configure signup and credit routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/founders", web::post().to(submit_founder))
        .route("/designers", web::post().to(submit_designer))
        .route("/designers/{id}/credits", web::get().to(get_credits))
        .route("/designers/{id}/credits", web::post().to(grant_credits));
}

/// Founder signup
///
/// POST /api/v1/founders
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "email": "string",
///   "project": "string",
///   "needs": "comma, separated, needs"
/// }
/// ```
async fn submit_founder(
    state: web::Data<AppState>,
    req: web::Json<FounderSubmission>,
) -> impl Responder {
    match state.matchmaker.submit_founder(req.into_inner()).await {
        Ok(FounderOutcome::Matched { founder, designer, record }) => HttpResponse::Created().json(FounderResponse {
            status: "matched".to_string(),
            founder,
            record: Some(record),
            designer: Some(designer),
        }),
        Ok(FounderOutcome::NoMatch { founder }) => HttpResponse::Created().json(FounderResponse {
            status: "no_match".to_string(),
            founder,
            record: None,
            designer: None,
        }),
        Err(e) => error_response("Failed to submit founder", e),
    }
}

/// Designer signup or profile update
///
/// POST /api/v1/designers
async fn submit_designer(
    state: web::Data<AppState>,
    req: web::Json<DesignerSubmission>,
) -> impl Responder {
    match state.matchmaker.submit_designer(req.into_inner()).await {
        Ok((designer, true)) => HttpResponse::Created().json(DesignerResponse { designer, created: true }),
        Ok((designer, false)) => HttpResponse::Ok().json(DesignerResponse { designer, created: false }),
        Err(e) => error_response("Failed to submit designer", e),
    }
}

/// GET /api/v1/designers/{id}/credits
async fn get_credits(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let designer_id = path.into_inner();

    match state.matchmaker.credit_balance(designer_id).await {
        Ok(Some(credits)) => HttpResponse::Ok().json(CreditBalanceResponse {
            designer_id,
            credits,
            has_credits: credits > 0,
        }),
        Ok(None) => not_found("Designer not found", format!("No designer with id {}", designer_id)),
        Err(e) => error_response("Failed to fetch credits", e),
    }
}

/// Grant credits and log the purchase
///
/// POST /api/v1/designers/{id}/credits
///
/// Request body:
/// ```json
/// { "credits": 5, "amountCents": 499 }
/// ```
async fn grant_credits(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<GrantCreditsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let designer_id = path.into_inner();

    match state
        .matchmaker
        .grant_credits(designer_id, req.credits, req.amount_cents)
        .await
    {
        Ok(Some((purchase, credits))) => HttpResponse::Ok().json(CreditGrantResponse { purchase, credits }),
        Ok(None) => not_found("Designer not found", format!("No designer with id {}", designer_id)),
        Err(e) => error_response("Failed to grant credits", e),
    }
}
