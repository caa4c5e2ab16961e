use async_trait::async_trait;
use quoteboard_core::common::{ChartRange, Stock};
use quoteboard_core::config::FeedConfig;
use quoteboard_core::market::entity::{ChartData, QuoteArrays, QuoteMeta};
use quoteboard_core::market::error::MarketError;
use quoteboard_core::market::port::QuoteSource;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// 伪装浏览器的 User-Agent，减少被拦截的概率
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// # Summary
/// Yahoo Finance 行情数据源实现。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯，客户端内部连接池可被并发请求共享。
/// - 只请求日线 (`interval=1d`)，不做任何数据清洗。
#[derive(Clone)]
pub struct YahooQuoteSource {
    /// 内部使用的 HTTP 客户端
    client: Client,
    /// 接口根地址，如 `https://query1.finance.yahoo.com`
    base_url: String,
}

impl YahooQuoteSource {
    /// # Summary
    /// 根据数据源配置创建实例。
    ///
    /// # Logic
    /// 1. 安装 rustls 的 ring 加密后端 (进程内只需一次)。
    /// 2. 配置超时与浏览器 User-Agent。
    /// 3. 初始化 reqwest 客户端。
    ///
    /// # Arguments
    /// * `config`: 数据源配置。
    ///
    /// # Returns
    /// 客户端构建失败时返回 `MarketError::Network`。
    pub fn new(config: &FeedConfig) -> Result<Self, MarketError> {
        if rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
        {
            debug!("rustls crypto provider already installed");
        }

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(BROWSER_USER_AGENT),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| MarketError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// # Summary
/// Yahoo API 响应顶层结构。
///
/// # Invariants
/// - 映射自 Yahoo v8 chart 接口。
#[derive(Deserialize, Debug)]
struct YahooResponse {
    chart: YahooChart,
}

/// # Summary
/// Yahoo API 图表数据部分。
#[derive(Deserialize, Debug)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

/// # Summary
/// Yahoo API 错误详情。
#[derive(Deserialize, Debug)]
struct YahooError {
    code: Option<String>,
    description: String,
}

/// # Summary
/// Yahoo API 单个时间序列结果。
#[derive(Deserialize, Debug)]
struct YahooResult {
    meta: QuoteMeta,
    // 无成交数据时 Yahoo 会省略该字段
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: YahooIndicators,
}

/// # Summary
/// Yahoo API 指标容器，`quote[0]` 持有平行的 OHLCV 数组。
#[derive(Deserialize, Debug)]
struct YahooIndicators {
    #[serde(default)]
    quote: Vec<QuoteArrays>,
}

/// # Summary
/// 将 Yahoo 响应结构映射为领域层的 `ChartData`。
///
/// # Logic
/// 1. `chart.error` 为 "Not Found" 时视为标的不存在，其余错误归为未知错误。
/// 2. 取最后一个 result，缺失时视为标的不存在。
/// 3. 取 `indicators.quote[0]`；仅在时间戳为空时允许其缺失。
fn into_chart_data(response: YahooResponse) -> Result<ChartData, MarketError> {
    if let Some(err) = response.chart.error {
        return match err.code.as_deref() {
            Some("Not Found") => Err(MarketError::NotFound),
            _ => Err(MarketError::Unknown(err.description)),
        };
    }

    let result = response
        .chart
        .result
        .and_then(|mut results| results.pop())
        .ok_or(MarketError::NotFound)?;

    let quote = match result.indicators.quote.into_iter().next() {
        Some(quote) => quote,
        None if result.timestamp.is_empty() => QuoteArrays::default(),
        None => return Err(MarketError::Parse("No quote data".into())),
    };

    Ok(ChartData {
        meta: result.meta,
        timestamp: result.timestamp,
        quote,
    })
}

#[async_trait]
impl QuoteSource for YahooQuoteSource {
    /// # Summary
    /// 从 Yahoo Finance 抓取日线历史数据。
    ///
    /// # Logic
    /// 1. 构建包含 range 与 interval 的 chart 接口 URL。
    /// 2. 发起异步请求；404 视为标的不存在，其余非 2xx 归为网络错误。
    /// 3. 解析嵌套的 JSON 并映射为 `ChartData`。
    ///
    /// # Arguments
    /// * `stock`: 证券实体。
    /// * `range`: 历史窗口。
    ///
    /// # Returns
    /// 成功返回 `ChartData`，失败返回 `MarketError`。
    async fn fetch_chart(
        &self,
        stock: &Stock,
        range: ChartRange,
    ) -> Result<ChartData, MarketError> {
        let symbol = &stock.symbol;
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        debug!("Requesting Yahoo chart for [{symbol}] range={range}");

        let resp = self
            .client
            .get(&url)
            .query(&[("range", range.as_query()), ("interval", "1d")])
            .send()
            .await
            .map_err(|e| MarketError::Network(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MarketError::NotFound);
        }
        if !status.is_success() {
            warn!("Yahoo chart request for [{symbol}] failed: HTTP {status}");
            return Err(MarketError::Network(format!("HTTP {}", status)));
        }

        let json: YahooResponse = resp
            .json()
            .await
            .map_err(|e| MarketError::Parse(e.to_string()))?;

        into_chart_data(json)
    }

    fn name(&self) -> &'static str {
        "yahoo"
    }
}
