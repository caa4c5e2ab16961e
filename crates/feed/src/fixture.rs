use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc, Weekday};
use quoteboard_core::common::{ChartRange, Stock};
use quoteboard_core::market::entity::{
    ChartData, QuoteArrays, QuoteMeta, TradingPeriod, TradingWindow,
};
use quoteboard_core::market::error::MarketError;
use quoteboard_core::market::port::QuoteSource;
use std::collections::HashMap;

/// 演示数据覆盖的标的及其基准价格
const DEMO_SYMBOLS: &[(&str, f64)] = &[
    ("AAPL", 175.0),
    ("MSFT", 380.0),
    ("GOOGL", 140.0),
    ("AMZN", 150.0),
    ("TSLA", 240.0),
    ("NVDA", 480.0),
];

/// 演示数据回溯的自然日天数，足以覆盖最长的 1y 窗口
const DEMO_CALENDAR_DAYS: u32 = 540;

/// 每隔多少个交易日制造一个收盘价缺失的空洞
const DEMO_HOLE_EVERY: u32 = 17;

/// # Summary
/// 基于内存的行情数据源，用于测试与离线演示。
///
/// # Invariants
/// - 构造完成后只读，可在多个请求间共享。
/// - 总是返回完整的预置序列，窗口截断由归一化流程负责。
#[derive(Debug, Clone, Default)]
pub struct FixtureQuoteSource {
    // 代码 (大写) → 预置响应
    charts: HashMap<String, ChartData>,
}

impl FixtureQuoteSource {
    /// 创建一个空数据源
    pub fn new() -> Self {
        Self::default()
    }

    /// # Summary
    /// 注册一份预置响应，以 `meta.symbol` 的大写形式为键。
    ///
    /// # Arguments
    /// * `chart`: 预置响应。
    ///
    /// # Returns
    /// 追加后的数据源，便于链式构造。
    pub fn with_chart(mut self, chart: ChartData) -> Self {
        self.charts.insert(chart.meta.symbol.to_uppercase(), chart);
        self
    }

    /// # Summary
    /// 生成确定性的离线演示数据。
    ///
    /// # Logic
    /// 1. 以 `anchor` 所在日期为终点，向前回溯固定天数，跳过周末。
    /// 2. 价格按正弦波动叠加缓慢漂移生成，每隔固定交易日插入一个收盘价空洞。
    /// 3. 常规交易窗口设为 `anchor` 当日 14:30–21:00 UTC，不提供市场状态令牌。
    ///
    /// # Arguments
    /// * `anchor`: 序列终点时刻。
    ///
    /// # Returns
    /// 覆盖全部演示标的的数据源。
    pub fn demo(anchor: DateTime<Utc>) -> Self {
        DEMO_SYMBOLS
            .iter()
            .fold(Self::new(), |source, &(symbol, base)| {
                source.with_chart(demo_chart(symbol, base, anchor))
            })
    }

    /// 已注册的标的代码
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.charts.keys().cloned().collect();
        symbols.sort();
        symbols
    }
}

fn demo_chart(symbol: &str, base: f64, anchor: DateTime<Utc>) -> ChartData {
    let session_open = NaiveTime::from_hms_opt(14, 30, 0).unwrap_or(NaiveTime::MIN);
    let session_close = NaiveTime::from_hms_opt(21, 0, 0).unwrap_or(NaiveTime::MIN);
    let anchor_date = anchor.date_naive();

    let mut timestamp = Vec::new();
    let mut quote = Columns::default();
    let mut previous_close = base;
    let mut trading_day = 0_u32;

    for back in (0..DEMO_CALENDAR_DAYS).rev() {
        let date = anchor_date - Duration::days(i64::from(back));
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }
        trading_day += 1;
        timestamp.push(date.and_time(session_open).and_utc().timestamp());

        let step = f64::from(trading_day);
        if trading_day % DEMO_HOLE_EVERY == 0 {
            quote.push_hole();
            continue;
        }

        let close = base * (1.0 + 0.08 * (step / 9.0).sin() + 0.0004 * step);
        let open = previous_close;
        quote.push(
            open,
            open.max(close) * 1.01,
            open.min(close) * 0.99,
            close,
            (1_000_000.0 * (1.0 + 0.5 * (step / 5.0).sin())).round(),
        );
        previous_close = close;
    }

    ChartData {
        meta: QuoteMeta {
            symbol: symbol.to_string(),
            currency: Some("USD".to_string()),
            regular_market_price: Some(previous_close),
            regular_market_state: None,
            current_trading_period: Some(TradingPeriod {
                regular: Some(TradingWindow {
                    start: Some(anchor_date.and_time(session_open).and_utc().timestamp()),
                    end: Some(anchor_date.and_time(session_close).and_utc().timestamp()),
                }),
            }),
        },
        timestamp,
        quote: quote.into_arrays(),
    }
}

/// 逐行追加的 OHLCV 列缓冲
#[derive(Default)]
struct Columns {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<f64>>,
}

impl Columns {
    fn push(&mut self, open: f64, high: f64, low: f64, close: f64, volume: f64) {
        self.open.push(Some(open));
        self.high.push(Some(high));
        self.low.push(Some(low));
        self.close.push(Some(close));
        self.volume.push(Some(volume));
    }

    fn push_hole(&mut self) {
        self.open.push(None);
        self.high.push(None);
        self.low.push(None);
        self.close.push(None);
        self.volume.push(None);
    }

    fn into_arrays(self) -> QuoteArrays {
        QuoteArrays {
            open: Some(self.open),
            high: Some(self.high),
            low: Some(self.low),
            close: Some(self.close),
            volume: Some(self.volume),
        }
    }
}

#[async_trait]
impl QuoteSource for FixtureQuoteSource {
    async fn fetch_chart(
        &self,
        stock: &Stock,
        _range: ChartRange,
    ) -> Result<ChartData, MarketError> {
        self.charts
            .get(&stock.symbol.to_uppercase())
            .cloned()
            .ok_or(MarketError::NotFound)
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}
