// app/src/web/handlers/concession_handlers.rs

use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use orderdesk::ConcessionInput;
use serde_json::json;
use tracing::instrument;

use crate::web::envelope::respond;

/// Missing amounts count as zero.
#[instrument(name = "handler::concessions::calculate", skip_all)]
pub async fn calculate_concession_handler(req: HttpRequest, input: web::Json<ConcessionInput>) -> HttpResponse {
  let outcome = input
    .calculate()
    .map(|breakdown| {
      json!({
        "message": "Concession calculated successfully",
        "data": breakdown,
      })
    })
    .map_err(Into::into);
  respond(&req, StatusCode::OK, outcome)
}
