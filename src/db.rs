use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, IndexModel};

use crate::config::MongoConfig;
use crate::errors::AppError;
use crate::models::order::Order;

pub const ORDERS_COLLECTION: &str = "orders";

/// Handle to the order database, created once at startup and shared by
/// cloning. The underlying `mongodb::Client` multiplexes a single
/// process-wide connection pool, so clones are cheap.
#[derive(Clone)]
pub struct Database {
    db: mongodb::Database,
}

impl Database {
    /// Configure the process-wide client. The driver connects lazily, so a
    /// store that is unreachable surfaces on the first operation rather than
    /// here; an invalid connection string is a fatal startup condition.
    pub async fn connect(cfg: &MongoConfig) -> Result<Self, AppError> {
        let mut options = ClientOptions::parse(cfg.uri()).await?;
        options.app_name = Some("pedidos_service".to_string());
        let client = Client::with_options(options)?;
        Ok(Self {
            db: client.database(&cfg.database),
        })
    }

    pub fn orders(&self) -> Collection<Order> {
        self.db.collection(ORDERS_COLLECTION)
    }

    /// Create the secondary indexes backing the supported query shapes.
    /// `_id` is indexed by the store itself; `fecha_creacion` orders the
    /// paginated listing, `vendedor_id` and `estado` cover filtered lookups.
    /// Idempotent: re-creating an existing index is a no-op server-side.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        let indexes = vec![
            IndexModel::builder().keys(doc! { "vendedor_id": 1 }).build(),
            IndexModel::builder().keys(doc! { "estado": 1 }).build(),
            IndexModel::builder()
                .keys(doc! { "fecha_creacion": 1 })
                .build(),
        ];
        self.orders().create_indexes(indexes).await?;
        log::info!("MongoDB indexes ensured for orders collection");
        Ok(())
    }
}
