use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::AppError;

/// The closed set of order statuses. Serde enforces membership wherever a
/// status crosses a boundary, so a constructed `Estado` is valid by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Estado {
    Pendiente,
    EnProceso,
    Enviado,
    Entregado,
}

impl Estado {
    pub fn as_str(&self) -> &'static str {
        match self {
            Estado::Pendiente => "pendiente",
            Estado::EnProceso => "en_proceso",
            Estado::Enviado => "enviado",
            Estado::Entregado => "entregado",
        }
    }
}

/// An order document as persisted in the `orders` collection. `id` maps to
/// the collection's `_id` primary key and is a UUIDv4 in text form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    pub producto_id: String,
    pub cantidad: i64,
    pub vendedor_id: String,
    pub estado: Estado,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub fecha_creacion: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub fecha_actualizacion: DateTime<Utc>,
}

pub const MAX_IDENTIFIER_LEN: usize = 200;

/// The mutable fields of an order, as accepted by create and replace.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderInput {
    pub producto_id: String,
    pub cantidad: i64,
    pub vendedor_id: String,
    pub estado: Estado,
}

impl OrderInput {
    /// Field constraints: identifiers 1-200 characters, cantidad at least 1.
    /// Status membership is already guaranteed by the `Estado` type.
    pub fn validate(&self) -> Result<(), AppError> {
        check_identifier("producto_id", &self.producto_id)?;
        if self.cantidad < 1 {
            return Err(AppError::Validation(
                "cantidad must be at least 1".to_string(),
            ));
        }
        check_identifier("vendedor_id", &self.vendedor_id)?;
        Ok(())
    }
}

fn check_identifier(field: &str, value: &str) -> Result<(), AppError> {
    if value.is_empty() || value.chars().count() > MAX_IDENTIFIER_LEN {
        return Err(AppError::Validation(format!(
            "{} must be 1-{} characters",
            field, MAX_IDENTIFIER_LEN
        )));
    }
    Ok(())
}
