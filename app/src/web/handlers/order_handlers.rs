// app/src/web/handlers/order_handlers.rs

use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use orderdesk::{LabeledEnum, WriteMode};
use serde_json::json;
use tracing::instrument;

use super::{collection, page_request, QueryPairs};
use crate::errors::AppError;
use crate::models::OrderStatus;
use crate::requests::order_request::{validate_new_order, validate_order_changes};
use crate::requests::parse_body;
use crate::resources::OrderResource;
use crate::state::AppState;
use crate::web::envelope::{respond, respond_no_content};

pub const DEFAULT_PER_PAGE: u32 = 10;

#[instrument(name = "handler::orders::list", skip_all)]
pub async fn list_orders_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  query: web::Query<QueryPairs>,
) -> HttpResponse {
  let query = query.into_inner();
  let outcome = async {
    let page = app_state
      .orders
      .list(&query, page_request(&query, DEFAULT_PER_PAGE))
      .await?
      .map(OrderResource::from);
    Ok::<_, AppError>(collection(&app_state, &req, page, "Order successfully full list.", &query))
  }
  .await;
  respond(&req, StatusCode::OK, outcome)
}

pub async fn list_statuses_handler(req: HttpRequest) -> HttpResponse {
  respond(
    &req,
    StatusCode::OK,
    Ok(json!({
      "message": "Order statuses.",
      "data": OrderStatus::all_labeled(),
    })),
  )
}

#[instrument(name = "handler::orders::store", skip_all)]
pub async fn store_order_handler(app_state: web::Data<AppState>, req: HttpRequest, body: web::Bytes) -> HttpResponse {
  let outcome = async {
    let order = validate_new_order(&parse_body(&body)?)?;
    let created = app_state.orders.create(order).await?;
    Ok::<_, AppError>(json!({
      "message": "Order successfully created",
      "data": OrderResource::from(created),
    }))
  }
  .await;
  respond(&req, StatusCode::CREATED, outcome)
}

#[instrument(name = "handler::orders::show", skip(app_state, req))]
pub async fn show_order_handler(app_state: web::Data<AppState>, req: HttpRequest, path: web::Path<i64>) -> HttpResponse {
  let id = path.into_inner();
  let outcome = app_state.orders.get(id).await.map(|order| {
    json!({
      "message": format!("Order successfully show: {}", id),
      "data": OrderResource::from(order),
    })
  });
  respond(&req, StatusCode::OK, outcome)
}

/// PUT replaces every business field; PATCH touches only what is sent.
async fn update_order(app_state: web::Data<AppState>, req: HttpRequest, id: i64, body: web::Bytes, mode: WriteMode) -> HttpResponse {
  let outcome = async {
    let changes = validate_order_changes(&parse_body(&body)?, mode)?;
    let updated = app_state.orders.update(id, changes).await?;
    Ok::<_, AppError>(json!({
      "message": "Order successfully updated",
      "data": OrderResource::from(updated),
    }))
  }
  .await;
  respond(&req, StatusCode::OK, outcome)
}

#[instrument(name = "handler::orders::replace", skip(app_state, req, body))]
pub async fn replace_order_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  path: web::Path<i64>,
  body: web::Bytes,
) -> HttpResponse {
  update_order(app_state, req, path.into_inner(), body, WriteMode::Replace).await
}

#[instrument(name = "handler::orders::patch", skip(app_state, req, body))]
pub async fn patch_order_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  path: web::Path<i64>,
  body: web::Bytes,
) -> HttpResponse {
  update_order(app_state, req, path.into_inner(), body, WriteMode::Patch).await
}

#[instrument(name = "handler::orders::destroy", skip(app_state, req))]
pub async fn destroy_order_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  path: web::Path<i64>,
) -> HttpResponse {
  let outcome = app_state.orders.delete(path.into_inner()).await.map(|_| ());
  respond_no_content(&req, outcome)
}
