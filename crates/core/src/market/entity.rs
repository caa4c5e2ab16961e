use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// # Summary
/// 行情提供者返回的单个原始日线记录。
///
/// # Invariants
/// - 除 `timestamp` 外任意字段都可能缺失，缺失值的替代策略由归一化流程统一处理。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawQuotePoint {
    // 时间戳 (Unix 秒)
    pub timestamp: i64,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

/// # Summary
/// 单个交易时段窗口 (Unix 秒，闭区间)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TradingWindow {
    #[serde(default)]
    pub start: Option<i64>,
    #[serde(default)]
    pub end: Option<i64>,
}

/// # Summary
/// 当前交易周期信息，目前只关心常规时段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TradingPeriod {
    #[serde(default)]
    pub regular: Option<TradingWindow>,
}

/// # Summary
/// 行情响应中的元数据部分。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteMeta {
    // 股票代码
    pub symbol: String,
    // 计价货币
    #[serde(default)]
    pub currency: Option<String>,
    // 最新成交价
    #[serde(default)]
    pub regular_market_price: Option<f64>,
    // 市场状态令牌 (REGULAR / PRE / POST / CLOSED ...)
    #[serde(default, alias = "marketState")]
    pub regular_market_state: Option<String>,
    // 当前交易周期
    #[serde(default)]
    pub current_trading_period: Option<TradingPeriod>,
}

/// # Summary
/// 与时间戳数组平行的 OHLCV 数组集合。
///
/// # Invariants
/// - `None` 表示提供者完全没有返回该数组；`Some` 时长度必须与时间戳数组一致。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteArrays {
    #[serde(default)]
    pub open: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub high: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub low: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub close: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub volume: Option<Vec<Option<f64>>>,
}

/// # Summary
/// 单次行情抓取的完整响应，由 `QuoteSource` 产出、归一化流程消费。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub meta: QuoteMeta,
    // 平行时间戳数组 (Unix 秒)
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub quote: QuoteArrays,
}

/// # Summary
/// 归一化后的图表数据点。
///
/// # Invariants
/// - `price` 即收盘价，且恒大于 0。
/// - 创建后不可变，序列顺序与原始数据一致。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    // UTC 日历日期 (ISO 格式)
    pub date: NaiveDate,
    // 收盘价
    pub price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
    // 收盘价 - 开盘价
    pub change: f64,
    // 涨跌幅百分比，开盘价为 0 时取 0
    pub change_percent: f64,
    // 星期缩写 (Mon, Tue ...)
    pub day_of_week: String,
    // 展示用日期标签 (Jan 5)
    pub formatted_date: String,
}

impl From<&ChartPoint> for RawQuotePoint {
    /// 将已归一化的数据点还原为原始记录，时间戳取该日 UTC 零点。
    fn from(point: &ChartPoint) -> Self {
        Self {
            timestamp: point.date.and_time(NaiveTime::MIN).and_utc().timestamp(),
            open: Some(point.open),
            high: Some(point.high),
            low: Some(point.low),
            close: Some(point.price),
            volume: Some(point.volume),
        }
    }
}

/// # Summary
/// 调用方直接提交的宽松数据点，收盘价字段名可能为 `close` 或 `price`。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoosePoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

/// # Summary
/// 附着在每个数据点上的技术指标集合。
///
/// # Invariants
/// - 任一指标在滚动窗口未填满前 (index < period - 1) 为 None。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorBundle {
    // 成交量均线
    #[serde(rename = "volSMA")]
    pub vol_sma: Option<f64>,
    // 短周期均线 (默认 50)
    #[serde(rename = "sma50")]
    pub sma_short: Option<f64>,
    // 长周期均线 (默认 200)
    #[serde(rename = "sma200")]
    pub sma_long: Option<f64>,
    // 布林带中轨
    #[serde(rename = "bbMid")]
    pub bb_mid: Option<f64>,
    // 布林带上轨
    #[serde(rename = "bbUpper")]
    pub bb_upper: Option<f64>,
    // 布林带下轨
    #[serde(rename = "bbLower")]
    pub bb_lower: Option<f64>,
}

/// # Summary
/// 原始数据点与其指标的合并视图，序列化时两者字段展平到同一个对象。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayPoint<P> {
    #[serde(flatten)]
    pub point: P,
    #[serde(flatten)]
    pub indicators: IndicatorBundle,
}

/// # Summary
/// 市场状态令牌。无法识别的令牌原样透传。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MarketState {
    Regular,
    Pre,
    Post,
    Closed,
    Unknown,
    Other(String),
}

impl MarketState {
    pub fn as_str(&self) -> &str {
        match self {
            MarketState::Regular => "REGULAR",
            MarketState::Pre => "PRE",
            MarketState::Post => "POST",
            MarketState::Closed => "CLOSED",
            MarketState::Unknown => "UNKNOWN",
            MarketState::Other(raw) => raw,
        }
    }
}

impl From<&str> for MarketState {
    fn from(token: &str) -> Self {
        match token {
            "REGULAR" => MarketState::Regular,
            "PRE" => MarketState::Pre,
            "POST" => MarketState::Post,
            "CLOSED" => MarketState::Closed,
            "UNKNOWN" => MarketState::Unknown,
            other => MarketState::Other(other.to_string()),
        }
    }
}

impl From<String> for MarketState {
    fn from(token: String) -> Self {
        MarketState::from(token.as_str())
    }
}

impl From<MarketState> for String {
    fn from(state: MarketState) -> Self {
        state.as_str().to_string()
    }
}

impl std::fmt::Display for MarketState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// # Summary
/// 交易时段判定结果，每次判定重新生成。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatus {
    pub is_market_open: bool,
    pub market_state: MarketState,
    // 判定时刻的展示用时间标签
    pub last_update: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_state_passthrough() {
        assert_eq!(MarketState::from("REGULAR"), MarketState::Regular);
        assert_eq!(MarketState::from("PREPRE"), MarketState::Other("PREPRE".into()));
        assert_eq!(MarketState::from("PREPRE").to_string(), "PREPRE");
    }

    #[test]
    fn test_overlay_point_flattened_json() {
        let point = OverlayPoint {
            point: LoosePoint {
                close: Some(10.0),
                ..Default::default()
            },
            indicators: IndicatorBundle {
                sma_short: Some(10.0),
                ..Default::default()
            },
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["close"], 10.0);
        assert_eq!(json["sma50"], 10.0);
        assert!(json["sma200"].is_null());
        assert!(json["volSMA"].is_null());
    }

    #[test]
    fn test_meta_accepts_market_state_alias() {
        let meta: QuoteMeta =
            serde_json::from_str(r#"{"symbol":"AAPL","marketState":"POST"}"#).unwrap();
        assert_eq!(meta.regular_market_state.as_deref(), Some("POST"));
    }
}
