//! # 行情路由控制器
//!
//! 实现 `/api/v1/market` 路径下的 REST 接口。
//! 对应看板的价格走势面板与顶部的开市状态徽标，前端按固定周期轮询。

use axum::Json;
use axum::extract::{Path, Query, State};
use quoteboard_analytics::indicators::compute_overlays;
use quoteboard_analytics::normalizer::normalize_chart;
use quoteboard_core::common::{ChartRange, Stock};
use quoteboard_core::config::IndicatorConfig;
use serde::Deserialize;
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiResponse, ChartPointResponse, ChartResponse, MarketStatusResponse};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ChartQuery {
    pub range: Option<String>,
    pub bb_period: Option<u32>,
    pub bb_std_dev: Option<f64>,
    pub sma_short: Option<u32>,
    pub sma_long: Option<u32>,
    pub volume_sma: Option<u32>,
}

impl ChartQuery {
    /// 解析历史窗口，缺省为 3mo
    fn chart_range(&self) -> Result<ChartRange, ApiError> {
        match self.range.as_deref() {
            Some(raw) => raw.parse().map_err(ApiError::BadRequest),
            None => Ok(ChartRange::default()),
        }
    }

    /// 以服务端配置为基础，叠加请求中显式给出的参数
    fn indicator_config(&self, base: IndicatorConfig) -> Result<IndicatorConfig, ApiError> {
        let multiplier = self.bb_std_dev.unwrap_or(base.bb_std_dev_multiplier);
        if !multiplier.is_finite() {
            return Err(ApiError::BadRequest(
                "bb_std_dev must be a finite number".to_string(),
            ));
        }
        Ok(IndicatorConfig {
            bb_period: self.bb_period.unwrap_or(base.bb_period),
            bb_std_dev_multiplier: multiplier,
            sma_short_period: self.sma_short.unwrap_or(base.sma_short_period),
            sma_long_period: self.sma_long.unwrap_or(base.sma_long_period),
            volume_sma_period: self.volume_sma.unwrap_or(base.volume_sma_period),
        })
    }
}

fn parse_stock(symbol: &str) -> Result<Stock, ApiError> {
    Stock::parse(symbol).ok_or_else(|| ApiError::BadRequest("symbol must not be empty".to_string()))
}

/// 获取标的的图表序列与技术指标
///
/// 抓取日线数据，过滤无效交易日并截取窗口，随后计算 SMA、布林带与成交量均线。
/// 所有数据点都被过滤时返回空的 `points`，由前端决定如何展示。
#[utoipa::path(
    get,
    path = "/api/v1/market/chart/{symbol}",
    tag = "行情 (Market)",
    params(
        ("symbol" = String, Path, description = "股票代码"),
        ("range" = Option<String>, Query, description = "历史窗口: 1mo / 3mo / 6mo / 1y，默认 3mo"),
        ("bb_period" = Option<u32>, Query, description = "布林带周期"),
        ("bb_std_dev" = Option<f64>, Query, description = "布林带标准差倍数"),
        ("sma_short" = Option<u32>, Query, description = "短周期均线"),
        ("sma_long" = Option<u32>, Query, description = "长周期均线"),
        ("volume_sma" = Option<u32>, Query, description = "成交量均线周期")
    ),
    responses(
        (status = 200, description = "获取成功", body = ApiResponse<ChartResponse>),
        (status = 400, description = "请求参数错误"),
        (status = 404, description = "标的不存在"),
        (status = 502, description = "行情源获取失败")
    )
)]
pub async fn get_chart(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ApiResponse<ChartResponse>>, ApiError> {
    let stock = parse_stock(&symbol)?;
    let range = query.chart_range()?;
    let config = query.indicator_config(state.app_config.indicators)?;

    let chart = state.quote_source.fetch_chart(&stock, range).await?;
    let points = normalize_chart(&chart, range.max_points())?;
    debug!(
        "Normalized [{}] {} from {}: {} raw -> {} points",
        stock.symbol,
        range,
        state.quote_source.name(),
        chart.timestamp.len(),
        points.len()
    );
    if points.is_empty() {
        info!("No valid daily points for [{}] in range {}", stock.symbol, range);
    }

    let status = state.classifier.classify_meta(&chart.meta);
    let overlays = compute_overlays(&points, &config);

    Ok(Json(ApiResponse::ok(ChartResponse {
        symbol: stock.symbol,
        currency: chart.meta.currency,
        range: range.to_string(),
        regular_market_price: chart.meta.regular_market_price,
        status: status.into(),
        indicators: config.into(),
        points: overlays.into_iter().map(ChartPointResponse::from).collect(),
    })))
}

/// 获取标的当前的开市状态
///
/// 依据行情元数据中的市场状态令牌，缺失时退回常规交易窗口判定。
#[utoipa::path(
    get,
    path = "/api/v1/market/status/{symbol}",
    tag = "行情 (Market)",
    params(
        ("symbol" = String, Path, description = "股票代码")
    ),
    responses(
        (status = 200, description = "获取成功", body = ApiResponse<MarketStatusResponse>),
        (status = 404, description = "标的不存在"),
        (status = 502, description = "行情源获取失败")
    )
)]
pub async fn get_market_status(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<MarketStatusResponse>>, ApiError> {
    let stock = parse_stock(&symbol)?;
    let chart = state
        .quote_source
        .fetch_chart(&stock, ChartRange::OneMonth)
        .await?;

    let status = state.classifier.classify_meta(&chart.meta);
    debug!("Market status for [{}]: {:?}", stock.symbol, status);
    Ok(Json(ApiResponse::ok(status.into())))
}
