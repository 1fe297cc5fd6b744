use backend::routes::configure_routes;
use backend::shared::{config, data, logger};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load_config()?;
    logger::init_tracing(&config.log_dir(), &config.logging.filter)?;
    config.log_origin();

    // Loaded once, shared read-only by every request
    data::initialize_dataset(&config.data_path())
        .map_err(|e| anyhow::anyhow!("dataset init failed: {e}"))?;

    let app = configure_routes();
    let addr = config.bind_address();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: {} is already in use. Please ensure no other process is using this port.",
                    addr
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
