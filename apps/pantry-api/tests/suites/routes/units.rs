use actix_web::http::header::{AUTHORIZATION, CACHE_CONTROL};
use actix_web::test;
use pantry_api::routes::lookups::LOOKUP_CACHE_CONTROL;
use pantry_api::state::security_config::SecurityConfig;
use serde_json::json;

use crate::common::read_data;
use crate::support::auth::bearer_header;
use crate::support::create_test_app;
use crate::support::mock_db::{authenticated, logged_sql, mock_state, unit_row};

#[actix_web::test]
async fn test_units_returns_rows_in_backend_order() {
    let (state, db_log) = mock_state(authenticated().append_query_results([vec![
        unit_row(4, "Piece", "pc", "count", 1.0),
        unit_row(2, "Liter", "l", "volume", 1000.0),
        unit_row(3, "Milliliter", "ml", "volume", 1.0),
        unit_row(1, "Gram", "g", "weight", 1.0),
    ]]));
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/units")
        .insert_header((AUTHORIZATION, bearer_header(&SecurityConfig::for_tests())))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(
        resp.headers().get(CACHE_CONTROL).unwrap(),
        LOOKUP_CACHE_CONTROL
    );
    let data = read_data(resp).await;
    let ids: Vec<i64> = data.iter().map(|u| u["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![4, 2, 3, 1]);
    assert_eq!(
        data[1],
        json!({
            "id": 2,
            "name": {"en": "Liter"},
            "abbreviation": "l",
            "unit_type": "volume",
            "base_unit_multiplier": 1000.0
        })
    );

    let sql = logged_sql(db_log);
    assert_eq!(sql.len(), 2, "one identity query then one lookup query");
    assert!(sql[0].contains(r#"FROM "users""#));
    assert!(
        sql[1].contains(
            r#"ORDER BY "units"."unit_type" ASC, "units"."name" ->> 'en' ASC, "units"."id" ASC"#
        ),
        "unexpected units query: {}",
        sql[1]
    );
}

#[actix_web::test]
async fn test_units_empty_table_yields_empty_data() {
    let (state, _db_log) = mock_state(
        authenticated().append_query_results([Vec::<pantry_api::entities::units::Model>::new()]),
    );
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/units")
        .insert_header((AUTHORIZATION, bearer_header(&SecurityConfig::for_tests())))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(read_data(resp).await.is_empty());
}

#[actix_web::test]
async fn test_unknown_unit_type_is_internal_error() {
    let (state, _db_log) = mock_state(
        authenticated().append_query_results([vec![unit_row(9, "Inch", "in", "length", 1.0)]]),
    );
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/units")
        .insert_header((AUTHORIZATION, bearer_header(&SecurityConfig::for_tests())))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let (_, body) = pantry_test_support::problem_details::assert_problem_details_from_service_response(
        resp,
        actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
    )
    .await;
    assert!(!body.contains("length"), "corrupt value leaked: {body}");
}
