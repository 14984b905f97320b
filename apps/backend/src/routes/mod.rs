use actix_web::web;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod deals;
pub mod distributions;
pub mod games;
pub mod health;

/// JSON extractor config that reports malformed bodies as problem details.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, format!("Invalid JSON body: {err}")).into()
    })
}

/// Register every route. Shared by `main.rs` and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config());
    cfg.service(web::scope("/health").configure(health::configure_routes));
    cfg.service(web::scope("/api/distributions").configure(distributions::configure_routes));
    cfg.service(web::scope("/api/deals").configure(deals::configure_routes));
    cfg.service(web::scope("/api/games").configure(games::configure_routes));
}
