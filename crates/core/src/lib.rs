//! # `quoteboard-core` - 领域核心
//!
//! 定义行情看板的领域实体、错误分类与端口 (Port) 契约。
//! 本 crate 不包含任何 I/O 实现，具体适配器由 `quoteboard-feed` 等下游 crate 提供。

pub mod common;
pub mod config;
pub mod market;
