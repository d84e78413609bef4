// tests/task_api_tests.rs

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::json;

use common::{bearer, create_customer, register, send, spawn_app, test_config};

#[actix_web::test]
async fn every_task_route_requires_a_session() {
  let app = spawn_app(test_config()).await;

  for req in [
    test::TestRequest::get().uri("/v1/tasks"),
    test::TestRequest::get().uri("/v1/tasks/reports"),
    test::TestRequest::post().uri("/v1/tasks").set_json(json!({ "customerName": "X" })),
    test::TestRequest::get().uri("/v1/tasks/1"),
    test::TestRequest::delete().uri("/v1/tasks/1"),
  ] {
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], json!("Unauthenticated."));
  }
}

#[actix_web::test]
async fn create_takes_owner_from_session() {
  let app = spawn_app(test_config()).await;
  let token = register(&app, "Ayla", "ayla@example.com").await;

  let (status, body) = send(
    &app,
    test::TestRequest::post()
      .uri("/v1/tasks")
      .insert_header(bearer(&token))
      .set_json(json!({ "customerName": "Nərgiz", "userId": 999 })),
  )
  .await;

  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["result"]["data"]["userId"], json!(1));
  assert_eq!(body["result"]["data"]["customerName"], json!("Nərgiz"));
  assert!(body["result"]["data"]["customerPhone"].is_null());
}

#[actix_web::test]
async fn create_requires_a_name() {
  let app = spawn_app(test_config()).await;
  let token = register(&app, "Ayla", "ayla@example.com").await;

  let (status, body) = send(
    &app,
    test::TestRequest::post()
      .uri("/v1/tasks")
      .insert_header(bearer(&token))
      .set_json(json!({ "customerEmail": "not-an-email" })),
  )
  .await;

  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(body["error"]["customerName"][0], json!("Müştərinin adı qeyd edilməyib."));
  assert!(body["error"]["customerEmail"][0].is_string());
}

#[actix_web::test]
async fn show_patch_and_delete_round_trip() {
  let app = spawn_app(test_config()).await;
  let token = register(&app, "Ayla", "ayla@example.com").await;
  let id = create_customer(&app, &token, "Nərgiz").await;
  let uri = format!("/v1/tasks/{}", id);

  let (status, body) = send(&app, test::TestRequest::get().uri(&uri).insert_header(bearer(&token))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["result"]["message"], json!(format!("Customer successfully show: {}", id)));

  let (status, body) = send(
    &app,
    test::TestRequest::patch()
      .uri(&uri)
      .insert_header(bearer(&token))
      .set_json(json!({ "customerNote": "VIP" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["result"]["data"]["customerNote"], json!("VIP"));
  assert_eq!(body["result"]["data"]["customerName"], json!("Nərgiz"));

  let (status, _) = send(&app, test::TestRequest::delete().uri(&uri).insert_header(bearer(&token))).await;
  assert_eq!(status, StatusCode::NO_CONTENT);

  let (status, body) = send(&app, test::TestRequest::get().uri(&uri).insert_header(bearer(&token))).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], json!(format!("Customer not found with ID: {}", id)));
}

#[actix_web::test]
async fn put_clears_optional_fields_it_does_not_send() {
  let app = spawn_app(test_config()).await;
  let token = register(&app, "Ayla", "ayla@example.com").await;
  let id = create_customer(&app, &token, "Nərgiz").await;
  let uri = format!("/v1/tasks/{}", id);

  let (status, _) = send(
    &app,
    test::TestRequest::patch()
      .uri(&uri)
      .insert_header(bearer(&token))
      .set_json(json!({ "customerPhone": "+994501234567", "customerNote": "VIP" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let (status, body) = send(
    &app,
    test::TestRequest::put()
      .uri(&uri)
      .insert_header(bearer(&token))
      .set_json(json!({ "customerName": "Nərgiz Əliyeva", "customerNote": "VIP" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK, "{}", body);
  assert_eq!(body["result"]["data"]["customerName"], json!("Nərgiz Əliyeva"));
  assert_eq!(body["result"]["data"]["customerNote"], json!("VIP"));
  assert!(body["result"]["data"]["customerPhone"].is_null());
}

#[actix_web::test]
async fn ownership_is_open_by_default() {
  let app = spawn_app(test_config()).await;
  let owner = register(&app, "Ayla", "ayla@example.com").await;
  let other = register(&app, "Rəşad", "rashad@example.com").await;
  let id = create_customer(&app, &owner, "Nərgiz").await;

  let (status, _) = send(
    &app,
    test::TestRequest::get().uri(&format!("/v1/tasks/{}", id)).insert_header(bearer(&other)),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn enforced_ownership_forbids_other_users() {
  let mut config = test_config();
  config.enforce_ownership = true;
  let app = spawn_app(config).await;
  let owner = register(&app, "Ayla", "ayla@example.com").await;
  let other = register(&app, "Rəşad", "rashad@example.com").await;
  let id = create_customer(&app, &owner, "Nərgiz").await;
  let uri = format!("/v1/tasks/{}", id);

  let (status, body) = send(&app, test::TestRequest::get().uri(&uri).insert_header(bearer(&other))).await;
  assert_eq!(status, StatusCode::FORBIDDEN);
  assert_eq!(body["error"], json!("This action is unauthorized."));

  let (status, _) = send(&app, test::TestRequest::delete().uri(&uri).insert_header(bearer(&other))).await;
  assert_eq!(status, StatusCode::FORBIDDEN);

  let (status, _) = send(&app, test::TestRequest::get().uri(&uri).insert_header(bearer(&owner))).await;
  assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn report_is_scoped_to_caller_unless_all() {
  let app = spawn_app(test_config()).await;
  let ayla = register(&app, "Ayla", "ayla@example.com").await;
  let rashad = register(&app, "Rəşad", "rashad@example.com").await;
  create_customer(&app, &ayla, "Nərgiz").await;
  create_customer(&app, &ayla, "Elvin").await;
  create_customer(&app, &rashad, "Kamran").await;

  let (status, body) = send(&app, test::TestRequest::get().uri("/v1/tasks/reports").insert_header(bearer(&ayla))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(
    body["result"]["data"],
    json!({ "total": 2, "createdLast7Days": 2, "createdLast30Days": 2 })
  );

  let (_, body) = send(
    &app,
    test::TestRequest::get().uri("/v1/tasks/reports?all=true").insert_header(bearer(&ayla)),
  )
  .await;
  assert_eq!(body["result"]["data"]["total"], json!(3));

  let (_, body) = send(
    &app,
    test::TestRequest::get()
      .uri("/v1/tasks/reports?all=1&customerName%5Bilk%5D=kam")
      .insert_header(bearer(&ayla)),
  )
  .await;
  assert_eq!(body["result"]["data"]["total"], json!(1));
}

#[actix_web::test]
async fn list_uses_fifteen_rows_by_default() {
  let app = spawn_app(test_config()).await;
  let token = register(&app, "Ayla", "ayla@example.com").await;
  create_customer(&app, &token, "Nərgiz").await;

  let (status, body) = send(&app, test::TestRequest::get().uri("/v1/tasks").insert_header(bearer(&token))).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["result"]["message"], json!("Customer successfully full list."));
  assert_eq!(body["result"]["meta"]["per_page"], json!(15));
  assert_eq!(body["result"]["meta"]["total"], json!(1));
}
