// app/src/web/handlers/task_handlers.rs

//! Customers, exposed under `/tasks`. Every route requires a session.

use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use orderdesk::WriteMode;
use serde_json::json;
use tracing::instrument;

use super::{collection, page_request, query_flag, QueryPairs};
use crate::errors::AppError;
use crate::requests::customer_request::{validate_customer_changes, validate_new_customer};
use crate::requests::parse_body;
use crate::resources::CustomerResource;
use crate::state::AppState;
use crate::web::envelope::{respond, respond_no_content};
use crate::web::extractors::AuthSession;

pub const DEFAULT_PER_PAGE: u32 = 15;

#[instrument(name = "handler::tasks::list", skip_all, fields(user_id = session.user_id))]
pub async fn list_tasks_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  session: AuthSession,
  query: web::Query<QueryPairs>,
) -> HttpResponse {
  let query = query.into_inner();
  let outcome = async {
    let page = app_state
      .customers
      .list(&query, page_request(&query, DEFAULT_PER_PAGE))
      .await?
      .map(CustomerResource::from);
    Ok::<_, AppError>(collection(&app_state, &req, page, "Customer successfully full list.", &query))
  }
  .await;
  respond(&req, StatusCode::OK, outcome)
}

/// Scoped to the caller unless `all=true`.
#[instrument(name = "handler::tasks::report", skip_all, fields(user_id = session.user_id))]
pub async fn tasks_report_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  session: AuthSession,
  query: web::Query<QueryPairs>,
) -> HttpResponse {
  let owner = (!query_flag(&query, "all")).then_some(session.user_id);
  let outcome = app_state.customers.report(&query, owner).await.map(|report| {
    json!({
      "message": "Customer report generated successfully",
      "data": report,
    })
  });
  respond(&req, StatusCode::OK, outcome)
}

#[instrument(name = "handler::tasks::store", skip_all, fields(user_id = session.user_id))]
pub async fn store_task_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  session: AuthSession,
  body: web::Bytes,
) -> HttpResponse {
  let outcome = async {
    let customer = validate_new_customer(&parse_body(&body)?)?;
    let created = app_state.customers.create(session.user_id, customer).await?;
    Ok::<_, AppError>(json!({
      "message": "Customer successfully created",
      "data": CustomerResource::from(created),
    }))
  }
  .await;
  respond(&req, StatusCode::CREATED, outcome)
}

#[instrument(name = "handler::tasks::show", skip(app_state, req, session))]
pub async fn show_task_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  session: AuthSession,
  path: web::Path<i64>,
) -> HttpResponse {
  let id = path.into_inner();
  let outcome = app_state.customers.get(id, session.user_id).await.map(|customer| {
    json!({
      "message": format!("Customer successfully show: {}", id),
      "data": CustomerResource::from(customer),
    })
  });
  respond(&req, StatusCode::OK, outcome)
}

async fn update_task(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  session: AuthSession,
  id: i64,
  body: web::Bytes,
  mode: WriteMode,
) -> HttpResponse {
  let outcome = async {
    let changes = validate_customer_changes(&parse_body(&body)?, mode)?;
    let updated = app_state.customers.update(id, session.user_id, changes).await?;
    Ok::<_, AppError>(json!({
      "message": "Customer successfully updated",
      "data": CustomerResource::from(updated),
    }))
  }
  .await;
  respond(&req, StatusCode::OK, outcome)
}

#[instrument(name = "handler::tasks::replace", skip(app_state, req, session, body))]
pub async fn replace_task_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  session: AuthSession,
  path: web::Path<i64>,
  body: web::Bytes,
) -> HttpResponse {
  update_task(app_state, req, session, path.into_inner(), body, WriteMode::Replace).await
}

#[instrument(name = "handler::tasks::patch", skip(app_state, req, session, body))]
pub async fn patch_task_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  session: AuthSession,
  path: web::Path<i64>,
  body: web::Bytes,
) -> HttpResponse {
  update_task(app_state, req, session, path.into_inner(), body, WriteMode::Patch).await
}

#[instrument(name = "handler::tasks::destroy", skip(app_state, req, session))]
pub async fn destroy_task_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  session: AuthSession,
  path: web::Path<i64>,
) -> HttpResponse {
  let outcome = app_state
    .customers
    .delete(path.into_inner(), session.user_id)
    .await
    .map(|_| ());
  respond_no_content(&req, outcome)
}
