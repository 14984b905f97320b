//! SeaORM -> DomainError translation helpers.
//!
//! Adapters should convert `sea_orm::DbErr` into `crate::errors::domain::DomainError`
//! here, and higher layers can then map `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::web::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract the column list from SQLite "UNIQUE constraint failed: t.a, t.b" messages.
fn extract_sqlite_table_columns(error_msg: &str) -> Option<Vec<&str>> {
    const MARKER: &str = "UNIQUE constraint failed: ";
    let start = error_msg.find(MARKER)? + MARKER.len();
    let rest = &error_msg[start..];
    let end = rest
        .find(|c: char| c == '\n' || c == '"' || c == ')')
        .unwrap_or(rest.len());
    let columns: Vec<&str> = rest[..end]
        .split(',')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect();
    if columns.is_empty() {
        None
    } else {
        Some(columns)
    }
}

/// Map SQLite table.column lists to domain-specific conflict errors.
fn map_sqlite_columns_to_conflict(columns: &[&str]) -> Option<(ConflictKind, &'static str)> {
    if columns.contains(&"distributions.hash_code") {
        return Some((
            ConflictKind::HashCodeCollision,
            "Hash code already issued to another distribution",
        ));
    }
    if columns.contains(&"distributions.distribution_number")
        && columns.contains(&"distributions.sequence_number")
    {
        return Some((
            ConflictKind::DistributionExists,
            "Distribution already exists for these identifiers",
        ));
    }
    None
}

/// Map PostgreSQL constraint names to domain-specific conflict errors.
fn map_postgres_constraint_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("ux_distributions_identifiers") {
        return Some((
            ConflictKind::DistributionExists,
            "Distribution already exists for these identifiers",
        ));
    }
    if error_msg.contains("ux_distributions_hash_code") {
        return Some((
            ConflictKind::HashCodeCollision,
            "Hash code already issued to another distribution",
        ));
    }
    None
}

fn parse_custom_id<'a>(msg: &'a str, prefix: &str) -> Option<&'a str> {
    msg.strip_prefix(prefix)
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        sea_orm::DbErr::Custom(msg) => {
            if let Some(id) = parse_custom_id(msg, "DISTRIBUTION_NOT_FOUND:") {
                warn!(trace_id = %trace_id, distribution_id = %id, "Distribution not found");
                return DomainError::not_found(
                    NotFoundKind::Distribution,
                    format!("Distribution {id} not found"),
                );
            }
            if let Some(id) = parse_custom_id(msg, "GAME_NOT_FOUND:") {
                warn!(trace_id = %trace_id, game_id = %id, "Game not found");
                return DomainError::not_found(NotFoundKind::Game, format!("Game {id} not found"));
            }
            if let Some(id) = parse_custom_id(msg, "GAME_FINISHED:") {
                warn!(trace_id = %trace_id, game_id = %id, "Game already finished");
                return DomainError::conflict(
                    ConflictKind::GameFinished,
                    format!("Game {id} is finished and cannot return to play"),
                );
            }
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Unique constraint violation");

        if let Some(columns) = extract_sqlite_table_columns(&error_msg) {
            if let Some((kind, detail)) = map_sqlite_columns_to_conflict(&columns) {
                return DomainError::conflict(kind, detail);
            }
        }

        if let Some((kind, detail)) = map_postgres_constraint_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::validation_other("Foreign key constraint violation");
    }

    if mentions_sqlstate(&error_msg, "23514") || error_msg.contains("CHECK constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Check constraint violation");
        return DomainError::validation_other("Check constraint violation");
    }

    if error_msg.contains("timeout")
        || error_msg.contains("pool")
        || error_msg.contains("unavailable")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
