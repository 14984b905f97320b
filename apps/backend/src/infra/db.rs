use db_infra::config::db::{DbKind, RuntimeEnv};
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::error::AppError;

/// Connect the application pool without touching the schema.
pub async fn connect_db(env: RuntimeEnv, db_kind: DbKind) -> Result<DatabaseConnection, AppError> {
    Ok(db_infra::build_app_pool(env, db_kind).await?)
}

/// Connect and migrate to the latest schema. Single entrypoint for the
/// server and for tests.
pub async fn bootstrap_db(env: RuntimeEnv, db_kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let conn = db_infra::bootstrap_db(env, db_kind).await?;
    info!(?env, ?db_kind, "database ready");
    Ok(conn)
}
