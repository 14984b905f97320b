//! Stateless recomputation of a deal from its identifiers.

use actix_web::{web, HttpResponse, Result};
use serde::Serialize;

use crate::domain::dealing::SEAT_COUNT;
use crate::domain::{deal_cards_with_seed, hash_code, Card, DealNumber, HashCode, DEAL_PROTOCOL_VERSION};
use crate::error::AppError;
use crate::errors::ErrorCode;

#[derive(Debug, Serialize)]
struct DealResponse {
    distribution_number: DealNumber,
    sequence_number: DealNumber,
    hash_code: HashCode,
    protocol_version: u32,
    hands: [Vec<Card>; SEAT_COUNT],
    dog: Vec<Card>,
}

fn parse_path_number(field: &str, raw: &str) -> Result<DealNumber, AppError> {
    DealNumber::parse(raw)
        .map_err(|e| AppError::invalid(ErrorCode::InvalidArgument, format!("{field}: {e}")))
}

/// GET /api/deals/{distribution_number}/{sequence_number}
///
/// Hands and dog come back canonicalized. Nothing is read or written.
async fn get_deal(path: web::Path<(String, String)>) -> Result<HttpResponse, AppError> {
    let (dn, sn) = path.into_inner();
    let dn = parse_path_number("distribution_number", &dn)?;
    let sn = parse_path_number("sequence_number", &sn)?;

    let canonical = deal_cards_with_seed(&dn, &sn)?.canonicalized();
    let code = hash_code(&dn, &sn);

    Ok(HttpResponse::Ok().json(DealResponse {
        distribution_number: dn,
        sequence_number: sn,
        hash_code: code,
        protocol_version: DEAL_PROTOCOL_VERSION,
        hands: canonical.hands,
        dog: canonical.dog,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/{distribution_number}/{sequence_number}",
        web::get().to(get_deal),
    );
}
