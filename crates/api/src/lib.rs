//! # `quoteboard-api` - HTTP API 网关
//!
//! 本 crate 是 Quoteboard 行情看板的 HTTP/REST 服务入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收来自浏览器看板的定时拉取请求
//! - 调用 `QuoteSource` 抓取行情，交由 `quoteboard-analytics` 归一化并计算指标
//! - 将领域模型转换为 DTO 返回给前端

pub mod error;
pub mod routes;
pub mod server;
pub mod types;
