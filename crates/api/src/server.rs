//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI、配置 CORS 并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 的 DI 容器持有并调用。

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use quoteboard_analytics::session::SessionClassifier;
use quoteboard_core::config::AppConfig;
use quoteboard_core::market::port::QuoteSource;

use crate::routes::{analytics, market};

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - 所有字段在服务启动前由 DI 容器注入，生命周期与进程等同。
/// - 不持有任何跨请求的行情缓存，每次拉取都重新计算。
#[derive(Clone)]
pub struct AppState {
    /// 行情数据源
    pub quote_source: Arc<dyn QuoteSource>,
    /// 交易时段判定器
    pub classifier: Arc<SessionClassifier>,
    /// 全局配置 (指标默认参数)
    pub app_config: Arc<AppConfig>,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quoteboard 行情看板 API",
        version = "0.1.0",
        description = "股票价格走势与技术指标看板的 RESTful API 网关。",
        license(name = "MIT")
    ),
    tags(
        (name = "行情 (Market)", description = "日线图表序列、技术指标与开市状态"),
        (name = "指标 (Analytics)", description = "对自定义序列计算技术指标")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// 构建完整的 axum 应用路由树 (含 Swagger UI 与 CORS)。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
pub fn build_router(state: AppState) -> Router {
    // 1. 看板接口均为公开只读路由
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(market::get_chart))
        .routes(routes!(market::get_market_status))
        .routes(routes!(analytics::compute_overlay_series))
        .with_state(state)
        .split_for_parts();

    // 2. 配置 CORS (看板前端与 API 分开部署)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 3. 合并 Swagger UI 路由并应用中间件
    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(cors)
}

/// 在已绑定的监听器上提供服务，直到进程退出。
///
/// # Arguments
/// * `listener` - 已绑定的 TCP 监听器
/// * `state` - 由外部 DI 容器注入的共享状态
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, build_router(state)).await
}

/// 绑定端口并启动 HTTP 服务。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:8080"`
///
/// # Returns
/// TCP 绑定失败或服务异常退出时返回错误。
pub async fn start_server(
    state: AppState,
    bind_addr: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("🚀 Quoteboard API Server listening on {}", bind_addr);
    tracing::info!("📖 Swagger UI: http://{}/swagger-ui/", bind_addr);

    serve(listener, state).await?;
    Ok(())
}
