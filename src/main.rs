use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wallet_bot::shared::config::Config;
use wallet_bot::shared::database::Database;
use wallet_bot::shared::services::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wallet_bot=info")),
        )
        .init();

    // .env 포함 환경 변수 로드
    let config = Config::from_env().context("Invalid configuration")?;

    // DB 연결 및 마이그레이션
    let db = Database::new(&config.database_url).await?;
    db.initialize().await?;

    // AppState 생성 (모든 Service 초기화)
    let app_state = AppState::new(&config, db).await?;

    info!("Wallet bot is running");
    app_state.dispatcher().run().await;

    info!("Wallet bot stopped");
    Ok(())
}
