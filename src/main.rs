//! NovelVerse - 小说阅读平台数据访问服务
//!
//! 启动流程：加载配置 -> 选择数据源 -> 选择文档提取器 -> 启动 HTTP 服务

use std::sync::Arc;

use novelverse::application::DocumentExtractorPort;
use novelverse::config::{load_config, print_config};
use novelverse::infrastructure::adapters::{
    HttpDocumentExtractor, HttpExtractorConfig, PlainTextExtractor,
};
use novelverse::infrastructure::data_source::DataSource;
use novelverse::infrastructure::events::EventPublisher;
use novelverse::infrastructure::http::{AppState, HttpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},novelverse={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("NovelVerse - 小说阅读平台数据访问服务");
    print_config(&config);

    // 选择数据源（远程 / Mock），进程生命周期内不再改变
    let data_source = DataSource::select(&config.remote, &config.mock)
        .map_err(|e| anyhow::anyhow!("Failed to initialize data source: {}", e))?;

    // 文档提取器：配置了提取服务时走 HTTP，否则只支持纯文本
    let extractor: Arc<dyn DocumentExtractorPort> = match config.extractor.service_url() {
        Some(url) => {
            let extractor_config =
                HttpExtractorConfig::new(url).with_timeout(config.extractor.timeout_secs);
            Arc::new(HttpDocumentExtractor::new(extractor_config)?)
        }
        None => Arc::new(PlainTextExtractor::new()),
    };

    // 创建事件发布器（通知出口）
    let event_publisher = EventPublisher::new().arc();

    // 创建 HTTP 服务器
    let state = AppState::new(data_source, extractor, event_publisher);
    let server = HttpServer::new(&config.server, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
