use thiserror::Error;

/// # Summary
/// 行情数据域错误枚举，处理网络、解析、数据缺失及结构不匹配等问题。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 全部数据点被过滤掉不是错误，归一化直接返回空序列。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    // 网络层错误，包含底层 HTTP 客户端错误信息
    #[error("Network error: {0}")]
    Network(String),
    // 数据解析错误，如 JSON 格式不匹配
    #[error("Parse error: {0}")]
    Parse(String),
    // 请求的标的未找到 (404 或结果为空)
    #[error("Data not found")]
    NotFound,
    // 平行数组长度与时间戳数组不一致，无法解释为数据点序列
    #[error("Invalid input shape: `{field}` has {actual} entries, expected {expected}")]
    InvalidInputShape {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    // 未知或未分类的错误
    #[error("Unknown error: {0}")]
    Unknown(String),
}
