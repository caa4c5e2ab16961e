use crate::common::{ChartRange, Stock};
use crate::market::entity::ChartData;
use crate::market::error::MarketError;
use async_trait::async_trait;

/// # Summary
/// 行情数据源接口 (原始数据提供者)。
///
/// # Invariants
/// - 实现者只负责抓取与反序列化，不做任何过滤或补值，数据清洗由归一化流程完成。
/// - 实现者必须是无状态或内部同步的，允许被多个请求并发调用。
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// # Summary
    /// 获取特定证券在指定历史窗口内的日线数据。
    ///
    /// # Logic
    /// 1. 将 `ChartRange` 映射为数据源识别的请求参数。
    /// 2. 执行请求并解析为平行数组结构。
    ///
    /// # Arguments
    /// * `stock`: 证券身份。
    /// * `range`: 历史窗口。
    ///
    /// # Returns
    /// 成功返回 `ChartData`，标的不存在返回 `MarketError::NotFound`。
    async fn fetch_chart(&self, stock: &Stock, range: ChartRange)
    -> Result<ChartData, MarketError>;

    /// 数据源名称，用于日志
    fn name(&self) -> &'static str;
}
