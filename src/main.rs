mod config;
mod db;
mod editor;
mod routes;
mod services;
mod state;
mod store;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env().expect("invalid configuration");

    let store = store::connect(&config)
        .await
        .expect("component store init failed");
    let state = state::AppState::new(store, config.toast_history);

    // A failed initial load is reported as a toast; the editor starts empty.
    let _ = state.editor.load().await;

    let app = routes::app(state, &config.static_dir);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "mockboard listening");
    axum::serve(listener, app).await.expect("server failed");
}
