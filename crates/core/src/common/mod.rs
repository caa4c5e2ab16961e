use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub mod time;

/// # Summary
/// 证券标的实体，代表看板上展示的特定股票。
///
/// # Invariants
/// - `symbol` 为去除首尾空白后的大写交易代码。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Stock {
    // 股票代码 (例如: AAPL, MSFT)
    pub symbol: String,
    // 交易所代码 (可选，例如: NASDAQ)
    pub exchange: Option<String>,
}

impl Stock {
    /// # Summary
    /// 从用户输入构造证券身份。
    ///
    /// # Logic
    /// 1. 去除首尾空白并统一转为大写。
    /// 2. 空代码视为非法输入。
    ///
    /// # Arguments
    /// * `symbol`: 原始代码字符串。
    ///
    /// # Returns
    /// 合法时返回 `Some(Stock)`，否则返回 None。
    pub fn parse(symbol: &str) -> Option<Self> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return None;
        }
        Some(Self {
            symbol: symbol.to_uppercase(),
            exchange: None,
        })
    }
}

/// # Summary
/// 看板历史窗口枚举，决定请求的日线跨度与保留的最大点数。
///
/// # Invariants
/// - `max_points` 与 UI 的 1M/3M/6M/1Y 切换按钮一一对应。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ChartRange {
    // 1 个月 (30 点)
    #[serde(rename = "1mo")]
    OneMonth,
    // 3 个月 (90 点)
    #[default]
    #[serde(rename = "3mo")]
    ThreeMonths,
    // 6 个月 (180 点)
    #[serde(rename = "6mo")]
    SixMonths,
    // 1 年 (365 点)
    #[serde(rename = "1y")]
    OneYear,
}

impl ChartRange {
    /// 该窗口保留的最大数据点数
    pub fn max_points(self) -> usize {
        match self {
            ChartRange::OneMonth => 30,
            ChartRange::ThreeMonths => 90,
            ChartRange::SixMonths => 180,
            ChartRange::OneYear => 365,
        }
    }

    /// 行情提供者识别的 `range` 参数值
    pub fn as_query(self) -> &'static str {
        match self {
            ChartRange::OneMonth => "1mo",
            ChartRange::ThreeMonths => "3mo",
            ChartRange::SixMonths => "6mo",
            ChartRange::OneYear => "1y",
        }
    }
}

impl FromStr for ChartRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" | "1mo" => Ok(ChartRange::OneMonth),
            "3m" | "3mo" => Ok(ChartRange::ThreeMonths),
            "6m" | "6mo" => Ok(ChartRange::SixMonths),
            "1y" | "12mo" => Ok(ChartRange::OneYear),
            _ => Err(format!("Unknown ChartRange: {}", s)),
        }
    }
}

impl std::fmt::Display for ChartRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_query())
    }
}
