//! Database settings for the backend.
//!
//! Connection strings are built by `db_infra` so the server and the
//! migration CLI resolve the same environment variables.

use std::env;

pub use db_infra::config::db::{make_conn_spec, sqlite_file_path, DbKind, DbOwner, RuntimeEnv};

use crate::error::AppError;

/// Engine selected by `DB_KIND`, defaulting to Postgres.
pub fn db_kind_from_env() -> Result<DbKind, AppError> {
    match env::var("DB_KIND") {
        Ok(value) => Ok(DbKind::parse(&value)?),
        Err(env::VarError::NotPresent) => Ok(DbKind::Postgres),
        Err(e) => Err(e.into()),
    }
}
