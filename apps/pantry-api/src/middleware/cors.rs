use actix_cors::Cors;
use actix_web::http::header;

/// CORS policy for the read-only API.
///
/// `allowed` is the raw `CORS_ALLOWED_ORIGINS` value (comma separated). Empty,
/// `null` and non-http(s) entries are dropped; with nothing valid left only
/// localhost dev origins are allowed. Credentials are allowed so the session
/// cookie reaches the API from the web app.
pub fn cors_middleware(allowed: &str) -> Cors {
    let mut origins: Vec<&str> = allowed
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .collect();

    if origins.is_empty() {
        origins = vec!["http://localhost:3000", "http://127.0.0.1:3000"];
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT])
        .expose_headers(vec![header::HeaderName::from_static("x-trace-id")])
        .supports_credentials()
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
