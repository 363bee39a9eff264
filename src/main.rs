use media_metadata::{
    adapters::repositories::YamlFieldConfigSource, build_router, build_state,
    domain::config::server::ServerConfig,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env().expect("ERROR: invalid server configuration");

    let plugin_config = YamlFieldConfigSource::load_plugin_config(&config.plugin_config_path)
        .await
        .unwrap_or_else(|e| panic!("ERROR: cannot load plugin configuration: {:?}", e));

    if !plugin_config.enabled {
        tracing::warn!(
            "Plugin disabled in {}, not starting",
            config.plugin_config_path.display()
        );
        return;
    }

    tracing::info!(
        "Starting media-metadata with pages root {}",
        config.pages_root.display()
    );

    let port = config.port;
    let router = build_router(build_state(config, plugin_config.metadata_form));

    // Start the server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
