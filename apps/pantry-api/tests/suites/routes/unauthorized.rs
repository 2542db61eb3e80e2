use actix_web::cookie::Cookie;
use actix_web::http::header::{AUTHORIZATION, CACHE_CONTROL, SET_COOKIE, WWW_AUTHENTICATE};
use actix_web::http::StatusCode;
use actix_web::test;
use pantry_api::state::app_state::DEFAULT_SESSION_COOKIE;
use pantry_api::state::security_config::SecurityConfig;
use pantry_test_support::problem_details::assert_problem_details_from_service_response;
use time::{Duration, OffsetDateTime};

use crate::support::auth::{bearer_header, mint_expired_token, session_cookie};
use crate::support::create_test_app;
use crate::support::mock_db::{logged_sql, mock_state, postgres, user_row};

const ENDPOINTS: [&str; 3] = ["/api/units", "/api/categories", "/api/staples"];

#[actix_web::test]
async fn test_missing_credentials_rejected_without_queries() {
    for uri in ENDPOINTS {
        let (state, db_log) = mock_state(postgres());
        let app = create_test_app(state).with_prod_routes().build().await;

        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.headers().get(WWW_AUTHENTICATE).unwrap(), "Bearer");
        assert!(
            resp.headers().get(CACHE_CONTROL).is_none(),
            "{uri}: 401 must not be cacheable"
        );
        assert_problem_details_from_service_response(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED")
            .await;
        assert!(logged_sql(db_log).is_empty(), "{uri}: no query may be issued");
    }
}

#[actix_web::test]
async fn test_malformed_bearer_token_rejected() {
    let (state, db_log) = mock_state(postgres());
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/units")
        .insert_header((AUTHORIZATION, "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED")
        .await;
    assert!(logged_sql(db_log).is_empty());
}

#[actix_web::test]
async fn test_non_bearer_header_without_cookie_rejected() {
    let (state, db_log) = mock_state(postgres());
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/categories")
        .insert_header((AUTHORIZATION, "Basic dXNlcjpwYXNz"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(logged_sql(db_log).is_empty());
}

#[actix_web::test]
async fn test_expired_bearer_token_rejected() {
    let (state, db_log) = mock_state(postgres());
    let app = create_test_app(state).with_prod_routes().build().await;

    let token = mint_expired_token(&SecurityConfig::for_tests());
    let req = test::TestRequest::get()
        .uri("/api/staples")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let (problem, body) =
        assert_problem_details_from_service_response(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED")
            .await;
    assert_eq!(problem.detail, "Authentication required");
    assert!(!body.to_lowercase().contains("expired"));
    assert!(logged_sql(db_log).is_empty());
}

#[actix_web::test]
async fn test_token_signed_with_other_key_rejected() {
    let (state, db_log) = mock_state(postgres());
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/units")
        .insert_header((AUTHORIZATION, bearer_header(&SecurityConfig::new("another-secret"))))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(logged_sql(db_log).is_empty());
}

#[actix_web::test]
async fn test_expired_session_cookie_rejected_and_cleared() {
    let (state, db_log) = mock_state(postgres());
    let app = create_test_app(state).with_prod_routes().build().await;

    let token = mint_expired_token(&SecurityConfig::for_tests());
    let req = test::TestRequest::get()
        .uri("/api/units")
        .cookie(session_cookie(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let removal = resp
        .headers()
        .get_all(SET_COOKIE)
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| Cookie::parse(v.to_string()).ok())
        .find(|c| c.name() == DEFAULT_SESSION_COOKIE)
        .expect("stale session cookie should be removed");
    assert_eq!(removal.value(), "");
    assert!(logged_sql(db_log).is_empty());
}

#[actix_web::test]
async fn test_valid_session_cookie_is_accepted() {
    let (state, db_log) = mock_state(
        postgres()
            .append_query_results([vec![user_row()]])
            .append_query_results([Vec::<pantry_api::entities::categories::Model>::new()]),
    );
    let app = create_test_app(state).with_prod_routes().build().await;

    let token = crate::support::auth::mint_test_token(&SecurityConfig::for_tests());
    let req = test::TestRequest::get()
        .uri("/api/categories")
        .cookie(session_cookie(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(SET_COOKIE).is_none());
    assert_eq!(logged_sql(db_log).len(), 2);
}

#[actix_web::test]
async fn test_unknown_user_rejected_before_lookup() {
    let (state, db_log) = mock_state(
        postgres().append_query_results([Vec::<pantry_api::entities::users::Model>::new()]),
    );
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/units")
        .insert_header((AUTHORIZATION, bearer_header(&SecurityConfig::for_tests())))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let sql = logged_sql(db_log);
    assert_eq!(sql.len(), 1, "only the identity query may run");
    assert!(sql[0].contains(r#"FROM "users""#));
}

#[actix_web::test]
async fn test_banned_user_rejected() {
    let mut banned = user_row();
    banned.banned_until = Some(OffsetDateTime::now_utc() + Duration::days(1));
    let (state, db_log) = mock_state(postgres().append_query_results([vec![banned]]));
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/staples")
        .insert_header((AUTHORIZATION, bearer_header(&SecurityConfig::for_tests())))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(logged_sql(db_log).len(), 1);
}
