use postboard::{config::Config, routes::router, store::Store, AppState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            warn!("Invalid configuration : {e}");
            std::process::exit(1);
        }
    };

    let store = match Store::connect(&config.database_url).await {
        Ok(store) => store,
        Err(e) => {
            warn!("Cannot open database {} : {e}", config.database_url);
            std::process::exit(1);
        }
    };

    let bind_address = config.bind_address;
    let app = router(AppState::new(store, config));

    info!("Listening on http://{bind_address}");

    if let Err(e) = axum::Server::bind(&bind_address)
        .serve(app.into_make_service())
        .await
    {
        warn!("Server error : {e}");
    }
}
