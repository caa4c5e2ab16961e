mod settings;

use std::sync::Arc;

use chrono::Utc;
use quoteboard_analytics::session::SessionClassifier;
use quoteboard_api::server::{AppState, start_server};
use quoteboard_core::config::FeedProvider;
use quoteboard_core::market::port::QuoteSource;
use quoteboard_feed::fixture::FixtureQuoteSource;
use quoteboard_feed::yahoo::YahooQuoteSource;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// 初始化全局日志，返回的 guard 必须存活到进程退出，否则缓冲日志会丢失。
fn init_tracing() -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .init();
    guard
}

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化行情源与交易时段判定器，并通过 Arc<dyn Trait> 注入到 API 层。
///
/// # Logic
/// 1. 初始化全局日志。
/// 2. 加载配置 (默认值 → 配置文件 → 环境变量)。
/// 3. 按配置实例化行情源 (Yahoo 或离线演示数据)。
/// 4. 启动 HTTP 服务，直到服务异常退出或收到外部退出信号。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 初始化日志
    let _guard = init_tracing();
    info!("Quoteboard starting...");

    // 2. 加载配置
    let config = settings::load()?;
    info!(
        "Config loaded: feed={:?}, indicators={:?}",
        config.feed.provider, config.indicators
    );

    // 3. 实例化基础设施层
    let quote_source: Arc<dyn QuoteSource> = match config.feed.provider {
        FeedProvider::Yahoo => Arc::new(YahooQuoteSource::new(&config.feed)?),
        FeedProvider::Fixture => Arc::new(FixtureQuoteSource::demo(Utc::now())),
    };
    info!("Quote source [{}] ready", quote_source.name());

    let bind_addr = config.server.bind_addr();
    let state = AppState {
        quote_source,
        classifier: Arc::new(SessionClassifier::default()),
        app_config: Arc::new(config),
    };

    // 4. 挂起主线程，服务退出或收到外部信号时结束
    tokio::select! {
        result = start_server(state, &bind_addr) => result?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutdown signal received. Exiting...");
        }
    }

    Ok(())
}
