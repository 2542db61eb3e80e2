//! Authenticated reference-data endpoints: `/api/units`, `/api/categories`,
//! `/api/staples`.
//!
//! Every endpoint ends in one of three outcomes: 200 with `{"data": [...]}`
//! and a shared cache policy, 401 when the caller has no identity (no query
//! is issued), or an opaque 500 with the cause logged server-side.

use std::future::Future;
use std::sync::Arc;

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::backend::{create_client, BackendHandle, ResponseCookies};
use crate::error::AppError;
use crate::repos::lookups::LookupError;
use crate::services::lookups;
use crate::state::app_state::AppState;

/// Fresh for an hour, then servable stale for a day while revalidating.
pub const LOOKUP_CACHE_CONTROL: &str = "public, max-age=3600, stale-while-revalidate=86400";

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: Vec<T>,
}

async fn list_units(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    serve_lookup(&req, &app_state, "units", |handle| async move {
        lookups::get_all_units(&handle).await
    })
    .await
}

async fn list_categories(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    serve_lookup(&req, &app_state, "categories", |handle| async move {
        lookups::get_all_categories(&handle).await
    })
    .await
}

async fn list_staples(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    serve_lookup(&req, &app_state, "staples", |handle| async move {
        lookups::get_all_staple_definitions(&handle).await
    })
    .await
}

/// Authenticate, fetch, and render one lookup.
///
/// `fetch` only runs after the caller's identity has been resolved.
async fn serve_lookup<T, F, Fut>(
    req: &HttpRequest,
    app_state: &AppState,
    resource: &'static str,
    fetch: F,
) -> Result<HttpResponse, AppError>
where
    T: Serialize,
    F: FnOnce(BackendHandle) -> Fut,
    Fut: Future<Output = Result<Vec<T>, LookupError>>,
{
    let cookies = Arc::new(ResponseCookies::from_request(req));
    let handle = create_client(app_state, req.headers(), cookies.clone()).map_err(|e| {
        error!(resource, error = %e, "lookup.client_unavailable");
        e
    })?;

    match handle.get_user().await {
        Ok(user) => {
            debug!(resource, user_id = %user.id, "lookup.authenticated");
        }
        Err(e) if e.is_unauthorized() => {
            info!(
                resource,
                reason = e.reason(),
                source = handle.credentials().map(|c| c.source()).unwrap_or("none"),
                "lookup.unauthorized"
            );
            let mut resp = AppError::unauthorized().error_response();
            cookies.apply_to(&mut resp);
            return Ok(resp);
        }
        Err(e) => {
            error!(resource, error = %e, "lookup.identity_failed");
            return Err(AppError::internal(e.to_string()));
        }
    }

    let rows = fetch(handle).await.map_err(|e| {
        error!(resource, error = %e, "lookup.query_failed");
        AppError::internal(e.to_string())
    })?;

    debug!(resource, count = rows.len(), "lookup.served");

    let mut resp = HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, LOOKUP_CACHE_CONTROL))
        .json(DataResponse { data: rows });
    cookies.apply_to(&mut resp);
    Ok(resp)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/units", web::get().to(list_units))
        .route("/categories", web::get().to(list_categories))
        .route("/staples", web::get().to(list_staples));
}
