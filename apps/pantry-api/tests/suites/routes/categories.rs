use actix_web::http::header::{AUTHORIZATION, CACHE_CONTROL};
use actix_web::test;
use pantry_api::state::security_config::SecurityConfig;

use crate::common::read_data;
use crate::support::auth::bearer_header;
use crate::support::create_test_app;
use crate::support::mock_db::{category_row, logged_sql, mock_state, postgres, user_row};

fn category_rows() -> Vec<pantry_api::entities::categories::Model> {
    vec![
        category_row(3, "Produce", 1),
        category_row(1, "Dairy", 2),
        category_row(2, "Bakery", 2),
        category_row(7, "Frozen", 5),
    ]
}

#[actix_web::test]
async fn test_categories_ordered_by_display_order() {
    let (state, db_log) = mock_state(
        postgres()
            .append_query_results([vec![user_row()]])
            .append_query_results([category_rows()]),
    );
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/categories")
        .insert_header((AUTHORIZATION, bearer_header(&SecurityConfig::for_tests())))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let data = read_data(resp).await;
    let orders: Vec<i64> = data
        .iter()
        .map(|c| c["display_order"].as_i64().unwrap())
        .collect();
    assert_eq!(orders, vec![1, 2, 2, 5]);
    assert_eq!(data[0]["name"]["en"], "Produce");

    let sql = logged_sql(db_log);
    assert_eq!(sql.len(), 2);
    assert!(
        sql[1].contains(r#"ORDER BY "categories"."display_order" ASC, "categories"."id" ASC"#),
        "unexpected categories query: {}",
        sql[1]
    );
}

#[actix_web::test]
async fn test_repeated_requests_are_identical() {
    let (state, _db_log) = mock_state(
        postgres()
            .append_query_results([vec![user_row()]])
            .append_query_results([category_rows()])
            .append_query_results([vec![user_row()]])
            .append_query_results([category_rows()]),
    );
    let app = create_test_app(state).with_prod_routes().build().await;
    let auth = bearer_header(&SecurityConfig::for_tests());

    let mut bodies = Vec::new();
    let mut cache_headers = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::get()
            .uri("/api/categories")
            .insert_header((AUTHORIZATION, auth.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
        cache_headers.push(resp.headers().get(CACHE_CONTROL).cloned());
        bodies.push(test::read_body(resp).await);
    }

    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(cache_headers[0], cache_headers[1]);
}
