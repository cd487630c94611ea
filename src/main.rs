/**
 * EduConnect Server Entry Point
 *
 * This is the main entry point for the EduConnect backend server. It loads
 * environment configuration, initializes tracing, assembles the Axum
 * application, and serves it. The listener is built with connect info so
 * the rate limiter can key on the peer address when no forwarding header
 * is present.
 */
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    let app = educonnect::server::create_app().await?;

    let port = std::env::var("SERVER_PORT")
        .unwrap_or_else(|_| "5000".to_string())
        .parse::<u16>()
        .unwrap_or(5000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!("EduConnect server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
