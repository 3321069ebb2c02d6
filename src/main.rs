#![warn(clippy::all)]

use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;

mod config;
mod quiz;
mod routes;
mod store;
mod types;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::new()?;

    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone());
    tracing_subscriber::fmt()
        // 위에 만든 필터로 어떤 추적을 기록할지 결정한다.
        .with_env_filter(log_filter)
        // 각 범위가 닫힐 때 이벤트를 기록한다.
        .with_span_events(FmtSpan::CLOSE)
        .init();

    let store: store::Store = if config.in_memory {
        tracing::info!("using in-memory store");
        Arc::new(store::MemoryStore::seeded()?)
    } else {
        let pg = store::PgStore::new(&config.database_url()).await?;
        sqlx::migrate!().run(&pg.connection).await?;
        Arc::new(pg)
    };

    tracing::info!(
        port = config.port,
        per_page = config.questions_per_page,
        "trivia api listening"
    );
    warp::serve(routes::api(store, config.questions_per_page))
        .run(([127, 0, 0, 1], config.port))
        .await;

    Ok(())
}
