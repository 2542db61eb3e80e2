use actix_web::web;

pub mod health;
pub mod lookups;

/// Register every route of the service.
///
/// `main.rs` wraps the app with logging, tracing and CORS middleware; tests
/// call this directly so handler behavior can be exercised without them.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Reference data: /api/units, /api/categories, /api/staples
    cfg.service(web::scope("/api").configure(lookups::configure_routes));
}
