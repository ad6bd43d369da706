use dotenvy::dotenv;
use pedidos_service::config::MongoConfig;
use pedidos_service::{build_server, Database, OrderStore};
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .expect("PORT must be a valid number");

    let db = Database::connect(&MongoConfig::from_env())
        .await
        .expect("Failed to configure MongoDB client");

    // Degraded-but-available: without the secondary indexes, listing and
    // filtered queries fall back to collection scans but stay correct.
    if let Err(e) = db.ensure_indexes().await {
        log::warn!("Mongo index init skipped: {}", e);
    }

    let store = OrderStore::new(&db);

    log::info!("Starting server at http://{}:{}", host, port);

    build_server(store, &host, port)?.await
}
