pub mod core;

pub use core::{
    bootstrap_db, build_admin_pool, build_app_pool, migrate_pool, orchestrate_migration,
    sanitize_db_url, schema_is_current,
};
