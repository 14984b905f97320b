use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand, Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::{info, trace, warn};

use crate::config::db::{make_conn_spec, DbKind, DbOwner, RuntimeEnv};
use crate::error::DbInfraError;

fn get_db_engine(db_kind: DbKind) -> &'static str {
    match db_kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, DbInfraError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbInfraError>>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(
                        "connection_retry=success attempts={} interval_ms={}",
                        attempt, interval_ms
                    );
                }
                return Ok(result);
            }
            Err(e) => {
                last_error = Some(e);
                if attempt < max_attempts {
                    warn!(
                        "connection_retry=failed attempt={} max_attempts={} interval_ms={}",
                        attempt, max_attempts, interval_ms
                    );
                    tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| DbInfraError::Connect {
        message: "no error recorded after max attempts".to_string(),
    }))
}

fn connect_options(url: &str, db_kind: DbKind, purpose: &str) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url.to_owned());
    match db_kind {
        DbKind::Postgres => {
            opt.min_connections(1).max_connections(10);
        }
        DbKind::SqliteFile => {
            opt.min_connections(1).max_connections(4);
        }
        // Every connection to `sqlite::memory:` opens a fresh database, so the
        // pool must never hold more than one.
        DbKind::SqliteMemory => {
            opt.min_connections(1).max_connections(1);
        }
    }
    opt.acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    trace!(purpose, engine = get_db_engine(db_kind), "connect options built");
    opt
}

async fn connect(url: String, db_kind: DbKind, purpose: &'static str) -> Result<DatabaseConnection, DbInfraError> {
    let opt = connect_options(&url, db_kind, purpose);
    if matches!(db_kind, DbKind::Postgres) {
        retry_connection(
            || {
                let opt_clone = opt.clone();
                async move {
                    Database::connect(opt_clone)
                        .await
                        .map_err(|e| DbInfraError::Connect {
                            message: format!("failed to connect to Postgres ({purpose} pool): {e}"),
                        })
                }
            },
            5,
            500,
        )
        .await
    } else {
        Database::connect(opt)
            .await
            .map_err(|e| DbInfraError::Connect {
                message: format!("failed to connect to database ({purpose} pool): {e}"),
            })
    }
}

/// Connection pool used by the application at runtime.
pub async fn build_app_pool(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, DbInfraError> {
    let url = make_conn_spec(env, db_kind, DbOwner::App)?;
    info!(url = %sanitize_db_url(&url), "connecting app pool");
    connect(url, db_kind, "app").await
}

/// Single-connection pool with owner credentials, used for schema changes.
pub async fn build_admin_pool(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, DbInfraError> {
    let url = make_conn_spec(env, db_kind, DbOwner::Owner)?;
    connect(url, db_kind, "admin").await
}

/// Sanitize database URL by masking password in connection strings.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((auth_part, host_part)) = url.split_once('@') else {
        return url.to_string();
    };
    match auth_part.rfind(':') {
        Some(colon_pos) if colon_pos > auth_part.find("://").map_or(0, |i| i + 2) => {
            format!("{}:***@{}", &auth_part[..colon_pos], host_part)
        }
        _ => url.to_string(),
    }
}

fn ensure_sqlite_dir(env: RuntimeEnv) -> Result<(), DbInfraError> {
    let path = crate::config::db::sqlite_file_path(env)?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| DbInfraError::config(format!("cannot create {}: {e}", dir.display())))?;
    }
    Ok(())
}

/// Whether every defined migration has already been applied to `conn`.
pub async fn schema_is_current(conn: &DatabaseConnection) -> Result<bool, DbInfraError> {
    let expected = Migrator::migrations()
        .last()
        .map(|m| m.name().to_string());
    let expected_count = Migrator::migrations().len();

    let applied = match Migrator::get_applied_migrations(conn).await {
        Ok(applied) => applied,
        Err(DbErr::Exec(_)) => {
            trace!(fastpath = "miss", reason = "migration_table_missing");
            return Ok(false);
        }
        Err(e) => {
            return Err(DbInfraError::Migration {
                message: format!("failed to get applied migrations: {e}"),
            })
        }
    };

    let current = applied.last().map(|m| m.name().to_string());
    let up_to_date = applied.len() == expected_count && current == expected;
    trace!(
        fastpath = if up_to_date { "hit" } else { "miss" },
        applied_count = applied.len(),
        expected_count
    );
    Ok(up_to_date)
}

/// Run a migration command against an already-open pool.
pub async fn migrate_pool(
    pool: &DatabaseConnection,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    if command == MigrationCommand::Up && schema_is_current(pool).await? {
        info!("migrate=skipped up_to_date=true");
        return Ok(());
    }
    migrate(pool, command)
        .await
        .map_err(|e| DbInfraError::Migration {
            message: format!("migration execution failed: {e}"),
        })
}

/// Connect with owner credentials and run `command`.
pub async fn orchestrate_migration(
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    if matches!(db_kind, DbKind::SqliteMemory) {
        return Err(DbInfraError::config(
            "in-memory SQLite databases cannot be migrated out of process",
        ));
    }
    info!(
        "migrate=start env={:?} db_kind={:?} engine={}",
        env,
        db_kind,
        get_db_engine(db_kind)
    );
    if matches!(db_kind, DbKind::SqliteFile) {
        ensure_sqlite_dir(env)?;
    }
    let pool = build_admin_pool(env, db_kind).await?;
    migrate_pool(&pool, command).await?;
    info!("migrate=done");
    Ok(())
}

/// Open the application pool and make sure the schema is current.
///
/// Postgres is migrated through a separate owner pool; SQLite has no role
/// separation, so the application pool migrates itself. For in-memory SQLite
/// this is the only way the schema can reach the pool at all.
pub async fn bootstrap_db(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, DbInfraError> {
    if matches!(db_kind, DbKind::Postgres) {
        orchestrate_migration(env, db_kind, MigrationCommand::Up).await?;
        return build_app_pool(env, db_kind).await;
    }

    if matches!(db_kind, DbKind::SqliteFile) {
        ensure_sqlite_dir(env)?;
    }

    let pool = build_app_pool(env, db_kind).await?;
    migrate_pool(&pool, MigrationCommand::Up).await?;
    Ok(pool)
}
