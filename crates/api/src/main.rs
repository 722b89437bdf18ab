use anyhow::Context;

use meshinv_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("invalid inventory api configuration")?;
    meshinv_observability::init(&config.log_level);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!(
        environment = %config.environment,
        mock_validation = matches!(config.validation, meshinv_infra::ValidationMode::Mock),
        "starting inventory backend"
    );

    let app = meshinv_api::app::build_app(config).context("failed to build validation client")?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
