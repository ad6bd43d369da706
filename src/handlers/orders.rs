use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::AppError;
use crate::models::order::{Estado, Order, OrderInput};
use crate::repo::{OrderStore, DEFAULT_PAGE_SIZE};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    pub estado: Estado,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: String,
    pub producto_id: String,
    pub cantidad: i64,
    pub vendedor_id: String,
    pub estado: Estado,
    /// RFC 3339, UTC
    pub fecha_creacion: String,
    /// RFC 3339, UTC
    pub fecha_actualizacion: String,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        OrderResponse {
            id: o.id,
            producto_id: o.producto_id,
            cantidad: o.cantidad,
            vendedor_id: o.vendedor_id,
            estado: o.estado,
            fecha_creacion: o.fecha_creacion.to_rfc3339(),
            fecha_actualizacion: o.fecha_actualizacion.to_rfc3339(),
        }
    }
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 200.
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub count: u64,
    pub page: i64,
    pub page_size: i64,
    pub results: Vec<OrderResponse>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /orders
///
/// Returns one page of orders, newest first. `page` values below 1 behave as
/// page 1; `page_size` is clamped to 1..=200.
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("page_size" = Option<i64>, Query, description = "Items per page (default 20, max 200)"),
    ),
    responses(
        (status = 200, description = "Paginated list of orders", body = ListOrdersResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    store: web::Data<OrderStore>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let page = store.list_page(params.page, params.page_size).await?;
    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        count: page.count,
        page: page.page,
        page_size: page.page_size,
        results: page.results.into_iter().map(OrderResponse::from).collect(),
    }))
}

/// POST /orders
///
/// Creates a new order. The id and both timestamps are generated server-side.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = OrderInput,
    responses(
        (status = 201, description = "Order created successfully", body = OrderResponse),
        (status = 400, description = "Invalid input"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    store: web::Data<OrderStore>,
    body: web::Json<OrderInput>,
) -> Result<HttpResponse, AppError> {
    let order = store.create(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = String, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    store: web::Data<OrderStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order = store.find_by_id(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// PUT /orders/{id}
///
/// Replaces all mutable fields of an existing order. Never creates.
#[utoipa::path(
    put,
    path = "/orders/{id}",
    params(("id" = String, Path, description = "Order id")),
    request_body = OrderInput,
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn replace_order(
    store: web::Data<OrderStore>,
    path: web::Path<String>,
    body: web::Json<OrderInput>,
) -> Result<HttpResponse, AppError> {
    let order = store.replace(&path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// PATCH /orders/{id}/status
///
/// Latency-optimized status transition: only `estado` is read from the body
/// and only `estado` plus `fecha_actualizacion` are written.
#[utoipa::path(
    patch,
    path = "/orders/{id}/status",
    params(("id" = String, Path, description = "Order id")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Status updated", body = OrderResponse),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn update_order_status(
    store: web::Data<OrderStore>,
    path: web::Path<String>,
    body: web::Json<StatusUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let order = store
        .patch_status(&path.into_inner(), body.estado)
        .await?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// DELETE /orders/{id}
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(("id" = String, Path, description = "Order id")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    store: web::Data<OrderStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    store.delete(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
