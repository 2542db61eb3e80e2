use actix_web::{web, App, HttpServer};
use pantry_api::config::BackendConfig;
use pantry_api::infra::state::build_state;
use pantry_api::middleware::cors::cors_middleware;
use pantry_api::middleware::request_trace::RequestTrace;
use pantry_api::middleware::structured_logger::StructuredLogger;
use pantry_api::middleware::trace_span::TraceSpan;
use pantry_api::routes;
use tracing::info;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables come from the runtime (compose env_file, systemd, shell).
    let config = match BackendConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let app_state = match build_state().with_config(&config).build().await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    info!(host = %config.host, port = config.port, "server.starting");

    let data = web::Data::new(app_state);
    let cors_origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&cors_origins))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
