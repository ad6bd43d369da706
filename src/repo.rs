use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, DateTime as BsonDateTime};
use mongodb::options::ReturnDocument;
use mongodb::Collection;
use uuid::Uuid;

use crate::db::Database;
use crate::errors::AppError;
use crate::models::order::{Estado, Order, OrderInput};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 200;

/// One page of the order listing. `count` is the unfiltered collection
/// total, read in a separate request from the page itself, so it can be
/// stale relative to `results` under concurrent writes.
#[derive(Debug)]
pub struct OrderPage {
    pub count: u64,
    pub page: i64,
    pub page_size: i64,
    pub results: Vec<Order>,
}

/// Implements the order record lifecycle against the backing collection.
/// Every operation is a single atomic request to the store; concurrent
/// writers to the same id are serialized by the store and the last write
/// wins. No retries, no timeouts beyond the driver's own.
#[derive(Clone)]
pub struct OrderStore {
    orders: Collection<Order>,
}

impl OrderStore {
    pub fn new(db: &Database) -> Self {
        Self {
            orders: db.orders(),
        }
    }

    /// Insert a new order. The id is a fresh UUIDv4 and one timestamp is
    /// used for both `fecha_creacion` and `fecha_actualizacion`.
    pub async fn create(&self, input: OrderInput) -> Result<Order, AppError> {
        input.validate()?;
        // The store keeps millisecond precision; truncate up front so the
        // returned document is byte-identical to later reads.
        let now = BsonDateTime::from_chrono(Utc::now()).to_chrono();
        let order = Order {
            id: Uuid::new_v4().to_string(),
            producto_id: input.producto_id,
            cantidad: input.cantidad,
            vendedor_id: input.vendedor_id,
            estado: input.estado,
            fecha_creacion: now,
            fecha_actualizacion: now,
        };
        self.orders.insert_one(&order).await?;
        Ok(order)
    }

    /// Offset pagination over the whole collection, newest first. The count
    /// and the page fetch are two store requests; deep pages cost the store
    /// a scan of everything they skip.
    pub async fn list_page(&self, page: i64, page_size: i64) -> Result<OrderPage, AppError> {
        let (page, page_size) = clamp_page(page, page_size);
        let count = self.orders.count_documents(doc! {}).await?;
        let results = self
            .orders
            .find(doc! {})
            .sort(doc! { "fecha_creacion": -1 })
            .skip(((page - 1) * page_size) as u64)
            .limit(page_size)
            .await?
            .try_collect()
            .await?;
        Ok(OrderPage {
            count,
            page,
            page_size,
            results,
        })
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Order, AppError> {
        self.orders
            .find_one(doc! { "_id": id })
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Replace all mutable fields in one atomic find-and-update, stamping a
    /// fresh `fecha_actualizacion`. `id` and `fecha_creacion` are never
    /// touched. Not an upsert: a missing id is `NotFound`.
    pub async fn replace(&self, id: &str, input: OrderInput) -> Result<Order, AppError> {
        input.validate()?;
        let update = doc! {
            "$set": {
                "producto_id": input.producto_id.as_str(),
                "cantidad": input.cantidad,
                "vendedor_id": input.vendedor_id.as_str(),
                "estado": input.estado.as_str(),
                "fecha_actualizacion": BsonDateTime::from_chrono(Utc::now()),
            }
        };
        self.orders
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Latency-critical path. Status membership is the only validation (the
    /// `Estado` type carries it), the update touches exactly two fields, and
    /// the store returns just the projection needed to rebuild the response.
    pub async fn patch_status(&self, id: &str, estado: Estado) -> Result<Order, AppError> {
        let update = doc! {
            "$set": {
                "estado": estado.as_str(),
                "fecha_actualizacion": BsonDateTime::from_chrono(Utc::now()),
            }
        };
        self.orders
            .find_one_and_update(doc! { "_id": id }, update)
            .projection(doc! {
                "_id": 1,
                "producto_id": 1,
                "cantidad": 1,
                "vendedor_id": 1,
                "estado": 1,
                "fecha_creacion": 1,
                "fecha_actualizacion": 1,
            })
            .return_document(ReturnDocument::After)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Physical, immediate removal. No soft delete.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let res = self.orders.delete_one(doc! { "_id": id }).await?;
        if res.deleted_count == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// Clamp list parameters server-side: pages are 1-based and a single page
/// never exceeds [`MAX_PAGE_SIZE`] documents.
pub fn clamp_page(page: i64, page_size: i64) -> (i64, i64) {
    (page.max(1), page_size.clamp(1, MAX_PAGE_SIZE))
}
