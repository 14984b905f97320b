//! Distribution HTTP routes.

use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::domain::DealNumber;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::routes::games::GameResponse;
use crate::services::games::GameService;
use crate::state::app_state::AppState;

/// Body of `POST /api/distributions`.
///
/// Either both identifiers or neither. Each may be a decimal string or a
/// non-negative JSON integer.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateDistributionRequest {
    distribution_number: Option<Value>,
    sequence_number: Option<Value>,
}

/// Identifier fields stay raw so a bad value is INVALID_ARGUMENT, not BAD_REQUEST.
fn deal_number_field(field: &str, value: &Value) -> Result<DealNumber, AppError> {
    DealNumber::deserialize(value)
        .map_err(|e| AppError::invalid(ErrorCode::InvalidArgument, format!("{field}: {e}")))
}

fn parse_create_body(body: &[u8]) -> Result<Option<(DealNumber, DealNumber)>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let req: CreateDistributionRequest = serde_json::from_slice(body)
        .map_err(|e| AppError::bad_request(ErrorCode::BadRequest, format!("Invalid JSON body: {e}")))?;

    match (&req.distribution_number, &req.sequence_number) {
        (None, None) => Ok(None),
        (Some(dn), Some(sn)) => Ok(Some((
            deal_number_field("distribution_number", dn)?,
            deal_number_field("sequence_number", sn)?,
        ))),
        _ => Err(AppError::invalid(
            ErrorCode::InvalidArgument,
            "distribution_number and sequence_number must be supplied together",
        )),
    }
}

/// POST /api/distributions
///
/// Allocates identifiers (empty body) or uses the supplied ones, deals and
/// persists. Responds 201 with the full deal.
async fn create_distribution(
    body: web::Bytes,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let identifiers = parse_create_body(&body)?;
    let service = app_state.distributions();

    let generated = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let generated = match identifiers {
                Some((dn, sn)) => service.create_distribution(txn, dn, sn).await?,
                None => service.generate_distribution(txn).await?,
            };
            Ok(generated)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(generated))
}

/// GET /api/distributions/{hash_code}
async fn get_distribution(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let view = app_state
        .distributions()
        .lookup_by_code(db, &path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

/// GET /api/distributions/{hash_code}/verify
async fn verify_distribution(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let report = app_state
        .distributions()
        .verify_distribution(db, &path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(report))
}

/// POST /api/distributions/{hash_code}/games
///
/// Registers a game on the distribution and increments its usage count.
async fn start_game(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let code = path.into_inner();
    let game = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(GameService::new().start_game(txn, &code).await?) })
    })
    .await?;

    Ok(HttpResponse::Created().json(GameResponse::from(game)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_distribution))
        .route("/{hash_code}", web::get().to(get_distribution))
        .route("/{hash_code}/verify", web::get().to(verify_distribution))
        .route("/{hash_code}/games", web::post().to(start_game));
}
