pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repo;

use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use db::Database;
pub use repo::OrderStore;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gestor de Pedidos - API",
        description = "API REST para gestionar pedidos de inventario."
    ),
    paths(
        handlers::orders::list_orders,
        handlers::orders::create_order,
        handlers::orders::get_order,
        handlers::orders::replace_order,
        handlers::orders::update_order_status,
        handlers::orders::delete_order,
    ),
    tags((name = "orders", description = "Order management endpoints"))
)]
pub struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    store: OrderStore,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(store.clone()))
            // Malformed JSON (including an estado outside the allowed set)
            // surfaces as the same rejected-input response as field
            // validation failures.
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                errors::AppError::Validation(err.to_string()).into()
            }))
            .wrap(Logger::default())
            .service(
                web::scope("/orders")
                    .route("", web::get().to(handlers::orders::list_orders))
                    .route("", web::post().to(handlers::orders::create_order))
                    .route("/{id}", web::get().to(handlers::orders::get_order))
                    .route("/{id}", web::put().to(handlers::orders::replace_order))
                    .route("/{id}", web::delete().to(handlers::orders::delete_order))
                    .route(
                        "/{id}/status",
                        web::patch().to(handlers::orders::update_order_status),
                    ),
            )
            .service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()))
    })
    .bind((host.to_string(), port))?
    .run())
}
