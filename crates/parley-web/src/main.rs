use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use parley_core::settings::Settings;
use parley_web::app::build_router;
use parley_web::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let in_lambda = std::env::var("AWS_LAMBDA_RUNTIME_API").is_ok();

    // Structured JSON logging for CloudWatch; plain output locally
    if in_lambda {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    }

    let settings = Settings::from_env();
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(settings.aws_region.clone()))
        .load()
        .await;

    let app = build_router(AppState::new(settings, config));

    if in_lambda {
        lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
    } else {
        let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
        let address = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&address).await?;
        tracing::info!(%address, "serving locally");
        axum::serve(listener, app).await?;
        Ok(())
    }
}
