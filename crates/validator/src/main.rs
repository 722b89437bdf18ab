use anyhow::Context;

use meshinv_validator::config::ValidatorConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ValidatorConfig::from_env().context("invalid validator configuration")?;
    meshinv_observability::init(&config.log_level);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!(
        validator = %config.validator_id,
        latency_ms = config.simulated_latency.as_millis() as u64,
        "starting legacy item validation service"
    );

    let app = meshinv_validator::app::build_app(config);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
