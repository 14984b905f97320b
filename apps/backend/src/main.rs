use actix_web::{web, App, HttpServer};
use tarot_backend::config::db::{db_kind_from_env, RuntimeEnv};
use tarot_backend::config::server::ServerConfig;
use tarot_backend::domain::DEAL_PROTOCOL_VERSION;
use tarot_backend::infra::state::build_state;
use tarot_backend::middleware::request_trace::RequestTrace;
use tarot_backend::middleware::structured_logger::StructuredLogger;
use tarot_backend::middleware::trace_span::TraceSpan;
use tarot_backend::routes;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let server = match ServerConfig::from_env() {
        Ok(server) => server,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let db_kind = match db_kind_from_env() {
        Ok(kind) => kind,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        host = %server.host,
        port = server.port,
        ?db_kind,
        protocol_version = DEAL_PROTOCOL_VERSION,
        "Starting tarot deal backend"
    );

    let app_state = match build_state()
        .with_env(RuntimeEnv::Prod)
        .with_db(db_kind)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!("Database connected");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
