//! # DTO (Data Transfer Object) 层
//!
//! 将内部领域模型转化为面向前端 JSON 输出的轻量结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。
//! 字段命名沿用看板前端约定的 camelCase (`changePercent`, `volSMA`, `bbUpper` ...)。

use quoteboard_core::config::IndicatorConfig;
use quoteboard_core::market::entity::{ChartPoint, LoosePoint, MarketStatus, OverlayPoint};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================
//  行情相关 DTO
// ============================================================

/// 图表数据点 DTO，已合并技术指标
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartPointResponse {
    /// 日期 (ISO 8601, UTC)
    #[schema(example = "2024-03-01")]
    pub date: String,
    /// 收盘价
    #[schema(example = 179.66)]
    pub price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
    /// 收盘价 - 开盘价
    pub change: f64,
    /// 涨跌幅 (%)
    pub change_percent: f64,
    #[schema(example = "Fri")]
    pub day_of_week: String,
    #[schema(example = "Mar 1")]
    pub formatted_date: String,
    /// 成交量均线
    #[serde(rename = "volSMA")]
    pub vol_sma: Option<f64>,
    /// 短周期均线
    #[serde(rename = "sma50")]
    pub sma_short: Option<f64>,
    /// 长周期均线
    #[serde(rename = "sma200")]
    pub sma_long: Option<f64>,
    pub bb_mid: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
}

/// 交易时段状态 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatusResponse {
    /// 是否开市 (盘前盘后视为开市)
    pub is_market_open: bool,
    /// 市场状态 (REGULAR / PRE / POST / CLOSED / UNKNOWN 或原样透传)
    #[schema(example = "REGULAR")]
    pub market_state: String,
    /// 判定时刻
    #[schema(example = "2:30:05 PM")]
    pub last_update: String,
}

/// 看板图表 DTO - 对应单个标的的价格走势面板
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartResponse {
    #[schema(example = "AAPL")]
    pub symbol: String,
    #[schema(example = "USD")]
    pub currency: Option<String>,
    /// 历史窗口
    #[schema(example = "3mo")]
    pub range: String,
    /// 最新成交价
    #[schema(example = 179.66)]
    pub regular_market_price: Option<f64>,
    pub status: MarketStatusResponse,
    /// 本次计算使用的指标参数
    pub indicators: IndicatorConfigDto,
    pub points: Vec<ChartPointResponse>,
}

// ============================================================
//  指标计算 DTO
// ============================================================

/// 技术指标参数 DTO
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorConfigDto {
    #[schema(example = 20)]
    pub bb_period: u32,
    #[schema(example = 2.0)]
    pub bb_std_dev_multiplier: f64,
    #[schema(example = 50)]
    pub sma_short_period: u32,
    #[schema(example = 200)]
    pub sma_long_period: u32,
    #[schema(example = 20)]
    pub volume_sma_period: u32,
}

/// 宽松数据点 DTO，收盘价可以使用 `close` 或 `price` 字段名
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoosePointDto {
    #[schema(example = "2024-03-01")]
    pub date: Option<String>,
    pub close: Option<f64>,
    pub price: Option<f64>,
    pub volume: Option<f64>,
}

/// 指标计算请求 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OverlayRequest {
    pub points: Vec<LoosePointDto>,
    /// 缺省时使用服务端配置
    pub config: Option<IndicatorConfigDto>,
}

/// 指标计算结果 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverlayPointResponse {
    pub date: Option<String>,
    pub close: Option<f64>,
    pub price: Option<f64>,
    pub volume: Option<f64>,
    #[serde(rename = "volSMA")]
    pub vol_sma: Option<f64>,
    #[serde(rename = "sma50")]
    pub sma_short: Option<f64>,
    #[serde(rename = "sma200")]
    pub sma_long: Option<f64>,
    pub bb_mid: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
}

// ============================================================
//  通用响应 DTO
// ============================================================

/// 统一 API 响应包装器
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T: Serialize + ToSchema> {
    /// 是否成功
    pub success: bool,
    /// 数据载荷 (成功时)
    pub data: Option<T>,
    /// 错误信息 (失败时)
    pub error: Option<String>,
}

impl<T: Serialize + ToSchema> ApiResponse<T> {
    /// 构建成功响应
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// 构建失败响应 (不含泛型载荷)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误描述信息
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}

// ============================================================
//  领域模型 ↔ DTO 惯用转换 (impl From<T>)
// ============================================================

impl From<OverlayPoint<ChartPoint>> for ChartPointResponse {
    fn from(o: OverlayPoint<ChartPoint>) -> Self {
        let p = o.point;
        Self {
            date: p.date.to_string(),
            price: p.price,
            open: p.open,
            high: p.high,
            low: p.low,
            volume: p.volume,
            change: p.change,
            change_percent: p.change_percent,
            day_of_week: p.day_of_week,
            formatted_date: p.formatted_date,
            vol_sma: o.indicators.vol_sma,
            sma_short: o.indicators.sma_short,
            sma_long: o.indicators.sma_long,
            bb_mid: o.indicators.bb_mid,
            bb_upper: o.indicators.bb_upper,
            bb_lower: o.indicators.bb_lower,
        }
    }
}

impl From<OverlayPoint<LoosePoint>> for OverlayPointResponse {
    fn from(o: OverlayPoint<LoosePoint>) -> Self {
        Self {
            date: o.point.date,
            close: o.point.close,
            price: o.point.price,
            volume: o.point.volume,
            vol_sma: o.indicators.vol_sma,
            sma_short: o.indicators.sma_short,
            sma_long: o.indicators.sma_long,
            bb_mid: o.indicators.bb_mid,
            bb_upper: o.indicators.bb_upper,
            bb_lower: o.indicators.bb_lower,
        }
    }
}

impl From<MarketStatus> for MarketStatusResponse {
    fn from(s: MarketStatus) -> Self {
        Self {
            is_market_open: s.is_market_open,
            market_state: s.market_state.to_string(),
            last_update: s.last_update,
        }
    }
}

impl From<IndicatorConfig> for IndicatorConfigDto {
    fn from(c: IndicatorConfig) -> Self {
        Self {
            bb_period: c.bb_period,
            bb_std_dev_multiplier: c.bb_std_dev_multiplier,
            sma_short_period: c.sma_short_period,
            sma_long_period: c.sma_long_period,
            volume_sma_period: c.volume_sma_period,
        }
    }
}

impl From<IndicatorConfigDto> for IndicatorConfig {
    fn from(c: IndicatorConfigDto) -> Self {
        Self {
            bb_period: c.bb_period,
            bb_std_dev_multiplier: c.bb_std_dev_multiplier,
            sma_short_period: c.sma_short_period,
            sma_long_period: c.sma_long_period,
            volume_sma_period: c.volume_sma_period,
        }
    }
}

impl From<LoosePointDto> for LoosePoint {
    fn from(p: LoosePointDto) -> Self {
        Self {
            date: p.date,
            close: p.close,
            price: p.price,
            volume: p.volume,
        }
    }
}
