//! # 序列归一化
//!
//! 将行情提供者返回的平行数组压缩为有序的日线数据点，并执行缺失值策略：
//!
//! | 字段 | 缺失或非法时 |
//! |---|---|
//! | `close` | 缺失、非有限值或 ≤ 0：整条记录丢弃，不插值也不沿用前值 |
//! | `open` / `high` / `low` | 取 `close` |
//! | `volume` | 取 0 |
//! | `timestamp` | 超出可表示日历范围：整条记录丢弃 |

use chrono::{DateTime, NaiveDate};
use quoteboard_core::market::entity::{ChartData, ChartPoint, QuoteArrays, RawQuotePoint};
use quoteboard_core::market::error::MarketError;

/// # Summary
/// 按下标将时间戳数组与 OHLCV 平行数组拼接为原始记录。
///
/// # Logic
/// 1. 校验每个存在的报价数组长度与时间戳数组一致。
/// 2. 完全缺失的数组视为全部为空。
/// 3. 逐下标组装 `RawQuotePoint`。
///
/// # Arguments
/// * `timestamps`: 时间戳数组 (Unix 秒)。
/// * `quote`: 平行报价数组。
///
/// # Returns
/// 长度不一致时返回 `MarketError::InvalidInputShape`。
pub fn zip_quote_arrays(
    timestamps: &[i64],
    quote: &QuoteArrays,
) -> Result<Vec<RawQuotePoint>, MarketError> {
    let expected = timestamps.len();
    let open = checked_column("open", quote.open.as_deref(), expected)?;
    let high = checked_column("high", quote.high.as_deref(), expected)?;
    let low = checked_column("low", quote.low.as_deref(), expected)?;
    let close = checked_column("close", quote.close.as_deref(), expected)?;
    let volume = checked_column("volume", quote.volume.as_deref(), expected)?;

    Ok(timestamps
        .iter()
        .enumerate()
        .map(|(i, &timestamp)| RawQuotePoint {
            timestamp,
            open: cell(open, i),
            high: cell(high, i),
            low: cell(low, i),
            close: cell(close, i),
            volume: cell(volume, i),
        })
        .collect())
}

fn checked_column<'a>(
    field: &'static str,
    column: Option<&'a [Option<f64>]>,
    expected: usize,
) -> Result<Option<&'a [Option<f64>]>, MarketError> {
    match column {
        Some(values) if values.len() != expected => Err(MarketError::InvalidInputShape {
            field,
            expected,
            actual: values.len(),
        }),
        other => Ok(other),
    }
}

fn cell(column: Option<&[Option<f64>]>, index: usize) -> Option<f64> {
    column.and_then(|values| values.get(index).copied().flatten())
}

/// # Summary
/// 将原始记录清洗为图表数据点，并截取最近的 `max_points` 个。
///
/// # Logic
/// 1. 丢弃收盘价缺失或非正的记录。
/// 2. 对剩余记录执行缺失值替代并计算涨跌额、涨跌幅。
/// 3. 保持输入顺序；超出 `max_points` 时只保留尾部。
///
/// # Arguments
/// * `raw`: 按时间升序排列的原始记录。
/// * `max_points`: 保留的最大点数。
///
/// # Returns
/// 清洗后的数据点序列，可能为空。
pub fn normalize(raw: &[RawQuotePoint], max_points: usize) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = raw.iter().filter_map(to_chart_point).collect();
    if points.len() > max_points {
        let excess = points.len() - max_points;
        points.drain(..excess);
    }
    points
}

/// # Summary
/// 拼接平行数组并归一化，一次完成整个响应的处理。
///
/// # Arguments
/// * `chart`: 数据源返回的完整响应。
/// * `max_points`: 保留的最大点数。
///
/// # Returns
/// 数组结构不合法时返回 `MarketError::InvalidInputShape`。
pub fn normalize_chart(chart: &ChartData, max_points: usize) -> Result<Vec<ChartPoint>, MarketError> {
    let raw = zip_quote_arrays(&chart.timestamp, &chart.quote)?;
    Ok(normalize(&raw, max_points))
}

fn to_chart_point(raw: &RawQuotePoint) -> Option<ChartPoint> {
    let close = valid_close(raw.close)?;
    let date = utc_date(raw.timestamp)?;
    let open = or_close(raw.open, close);
    let change = close - open;

    Some(ChartPoint {
        date,
        price: close,
        open,
        high: or_close(raw.high, close),
        low: or_close(raw.low, close),
        volume: raw.volume.unwrap_or(0.0),
        change,
        change_percent: change_percent(change, open),
        day_of_week: date.format("%a").to_string(),
        formatted_date: date.format("%b %-d").to_string(),
    })
}

/// 收盘价必须为正的有限值
fn valid_close(close: Option<f64>) -> Option<f64> {
    close.filter(|c| c.is_finite() && *c > 0.0)
}

/// 开盘、最高、最低价缺失时以收盘价代替
fn or_close(value: Option<f64>, close: f64) -> f64 {
    value.unwrap_or(close)
}

fn change_percent(change: f64, open: f64) -> f64 {
    if open != 0.0 {
        change / open * 100.0
    } else {
        0.0
    }
}

/// Unix 秒对应的 UTC 日历日期
fn utc_date(timestamp: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.date_naive())
}
