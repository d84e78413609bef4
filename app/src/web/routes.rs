// app/src/web/routes.rs

use actix_web::{middleware::from_fn, web};

use super::envelope;
use super::handlers::{auth_handlers, check_handlers, concession_handlers, order_handlers, task_handlers};
use super::rate_limit::rate_limit;

/// Registers every route plus the JSON/path error envelopes and the 404
/// fallback. Shared by the server binary and the integration tests.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(envelope::json_error_handler))
    .app_data(web::PathConfig::default().error_handler(envelope::path_error_handler))
    .service(
      web::scope("/v1")
        .wrap(from_fn(rate_limit))
        // Authentication Routes
        .service(
          web::scope("/auth")
            .route("/register", web::post().to(auth_handlers::register_handler))
            .route("/login", web::post().to(auth_handlers::login_handler))
            .route("/me", web::get().to(auth_handlers::me_handler))
            .route("/me", web::put().to(auth_handlers::update_me_handler))
            .route("/refresh", web::get().to(auth_handlers::refresh_handler))
            .route("/logout", web::post().to(auth_handlers::logout_handler))
            .route("/generate-otp", web::post().to(auth_handlers::generate_otp_handler))
            .route("/verify-otp", web::post().to(auth_handlers::verify_otp_handler)),
        )
        // Order Routes
        .service(
          web::scope("/orders")
            .route("", web::get().to(order_handlers::list_orders_handler))
            .route("", web::post().to(order_handlers::store_order_handler))
            .route("/statuses", web::get().to(order_handlers::list_statuses_handler))
            .service(
              web::resource("/{id:\\d+}")
                .route(web::get().to(order_handlers::show_order_handler))
                .route(web::put().to(order_handlers::replace_order_handler))
                .route(web::patch().to(order_handlers::patch_order_handler))
                .route(web::delete().to(order_handlers::destroy_order_handler)),
            ),
        )
        // Customer ("task") Routes, all authenticated through the AuthSession extractor
        .service(
          web::scope("/tasks")
            .route("", web::get().to(task_handlers::list_tasks_handler))
            .route("", web::post().to(task_handlers::store_task_handler))
            .route("/reports", web::get().to(task_handlers::tasks_report_handler))
            .service(
              web::resource("/{id:\\d+}")
                .route(web::get().to(task_handlers::show_task_handler))
                .route(web::put().to(task_handlers::replace_task_handler))
                .route(web::patch().to(task_handlers::patch_task_handler))
                .route(web::delete().to(task_handlers::destroy_task_handler)),
            ),
        )
        .route(
          "/concessions/calculate",
          web::post().to(concession_handlers::calculate_concession_handler),
        )
        // Operational probes
        .service(
          web::scope("/check")
            .route("/db", web::get().to(check_handlers::db_check_handler))
            .route("/health", web::get().to(check_handlers::health_check_handler))
            .route("/static", web::get().to(check_handlers::static_check_handler))
            .route("/ip", web::get().to(check_handlers::ip_check_handler))
            .route("/clear_cache", web::get().to(check_handlers::clear_cache_handler)),
        ),
    )
    .default_service(web::to(envelope::route_not_found));
}
