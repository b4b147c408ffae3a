mod actions;

use anyhow::Context;
use axum::{middleware, Router};
use std::sync::Arc;
use tiller::{filter, Config, ConfigRoutingPolicy};
use tower_http::services::ServeDir;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load_default().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}, using defaults", e);
        Config::default()
    });

    let policy = Arc::new(ConfigRoutingPolicy::from(&config.routing));
    let engine = Arc::new(
        actions::build_engine(&config, policy).context("routing configuration rejected")?,
    );
    info!(mounts = engine.registry().len(), "actions registered");

    // The routing filter intercepts every request; whatever it passes
    // through lands on the static-file service.
    let app = Router::new()
        .fallback_service(ServeDir::new(&config.routing.static_dir))
        .layer(middleware::from_fn_with_state(
            engine.clone(),
            filter::route_request,
        ));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("server running at http://{}", addr);
    axum::serve(listener, app)
        .await
        .context("server terminated")?;

    Ok(())
}
