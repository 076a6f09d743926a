use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, DatabaseConnection};
use settings::{Backend, Database};

use std::time::Duration;

mod settings;

/// Keeps the single in-memory connection from being recycled.
const MEMORY_CONNECTION_LIFETIME: Duration = Duration::from_secs(60 * 60 * 24 * 365);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "tally={level},server={level},engine={level},migration={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    let db = connect_database(&settings.database).await?;
    let engine = engine::Engine::builder().database(db).build().await?;

    let bind = settings.server.bind.as_deref().unwrap_or("127.0.0.1");
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    server::run_with_listener(engine, &settings.server.static_dir, listener).await?;
    tracing::info!("Server stopped");

    Ok(())
}

async fn connect_database(
    config: &Database,
) -> Result<DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    tracing::info!("Using {} database", config.backend.name());

    let db = sea_orm::Database::connect(connect_options(config)).await?;
    Migrator::up(&db, None).await?;
    tracing::debug!("Migrations applied");

    Ok(db)
}

fn connect_options(config: &Database) -> ConnectOptions {
    let mut options = ConnectOptions::new(config.backend.url());
    match (&config.backend, config.max_connections) {
        // The in-memory database is dropped with its last open connection.
        (Backend::Memory, _) => {
            options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(MEMORY_CONNECTION_LIFETIME)
                .max_lifetime(MEMORY_CONNECTION_LIFETIME);
        }
        (_, Some(max)) => {
            options.max_connections(max);
        }
        (_, None) => {}
    }
    options
}
