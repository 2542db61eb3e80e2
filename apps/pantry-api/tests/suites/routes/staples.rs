use actix_web::http::header::{AUTHORIZATION, CACHE_CONTROL};
use actix_web::test;
use pantry_api::routes::lookups::LOOKUP_CACHE_CONTROL;
use pantry_api::state::security_config::SecurityConfig;
use serde_json::json;

use crate::common::read_data;
use crate::support::auth::bearer_header;
use crate::support::create_test_app;
use crate::support::mock_db::{authenticated, logged_sql, mock_state, staple_row};

#[actix_web::test]
async fn test_staples_map_joined_product() {
    let (state, db_log) = mock_state(authenticated().append_query_results([vec![
        staple_row(1, 40, "Salt"),
        staple_row(2, 41, "Flour"),
    ]]));
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/staples")
        .insert_header((AUTHORIZATION, bearer_header(&SecurityConfig::for_tests())))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(
        resp.headers().get(CACHE_CONTROL).unwrap(),
        LOOKUP_CACHE_CONTROL
    );
    let data = read_data(resp).await;
    assert_eq!(
        data,
        vec![
            json!({"id": 1, "is_active": true, "product": {"id": 40, "name": {"en": "Salt"}}}),
            json!({"id": 2, "is_active": true, "product": {"id": 41, "name": {"en": "Flour"}}}),
        ]
    );

    let sql = logged_sql(db_log);
    assert_eq!(sql.len(), 2);
    let query = &sql[1];
    assert!(
        query.contains(r#"INNER JOIN "products""#),
        "staples must inner-join products: {query}"
    );
    assert!(
        query.contains(r#"WHERE "staple_definitions"."is_active" = "#),
        "staples must filter active rows: {query}"
    );
    assert!(query.contains(r#"ORDER BY "staple_definitions"."id" ASC"#));
}
