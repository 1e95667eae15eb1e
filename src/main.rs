use std::error;

use addressbook::config::Config;
use addressbook::db::Store;
use addressbook::web;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<(), Box<dyn error::Error>>
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("addressbook=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;

    info!("Address book");
    info!("Version : {}", VERSION);
    info!("Database used: {:?}", config.db_path);

    // creates and seeds the db on first use, checks integrity either way
    let store = Store::open(&config.db_path)?;

    let app = web::router(store);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;

    info!("listening on http://{}", config.bind);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal()
{
    if let Err(e) = tokio::signal::ctrl_c().await
    {
        tracing::error!("couldn't listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
