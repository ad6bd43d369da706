use actix_web::HttpResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Order not found")]
    NotFound,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Validation(_) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Storage(detail) => {
                log::error!("storage failure: {}", detail);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Internal server error"
                }))
            }
        }
    }
}
