//! # 技术指标引擎
//!
//! 所有指标均基于 [`SlidingWindow`] 增量计算，整条序列的复杂度为 O(n)。
//! 引擎对任意输入都是全函数：空序列、周期为 0 或周期大于序列长度都只会产出全空的指标列。

use crate::window::SlidingWindow;
use quoteboard_core::config::IndicatorConfig;
use quoteboard_core::market::entity::{ChartPoint, IndicatorBundle, LoosePoint, OverlayPoint};

/// # Summary
/// 可参与指标计算的数据点。
///
/// # Invariants
/// - 收盘价取值顺序固定为 `close` → `price` → 0，上游数据两种字段名都可能出现。
pub trait OverlaySource {
    /// `close` 字段
    fn close(&self) -> Option<f64>;

    /// `price` 字段
    fn price(&self) -> Option<f64>;

    /// 成交量，缺失时按 0 计
    fn volume(&self) -> Option<f64>;

    /// 参与指标计算的收盘价
    fn closing_price(&self) -> f64 {
        self.close().or_else(|| self.price()).unwrap_or(0.0)
    }
}

impl OverlaySource for ChartPoint {
    fn close(&self) -> Option<f64> {
        None
    }

    fn price(&self) -> Option<f64> {
        Some(self.price)
    }

    fn volume(&self) -> Option<f64> {
        Some(self.volume)
    }
}

impl OverlaySource for LoosePoint {
    fn close(&self) -> Option<f64> {
        self.close
    }

    fn price(&self) -> Option<f64> {
        self.price
    }

    fn volume(&self) -> Option<f64> {
        self.volume
    }
}

/// # Summary
/// 简单移动平均。
///
/// # Logic
/// 1. 逐个推入滑动窗口，窗口同步维护累计和。
/// 2. 窗口填满前输出 None，之后输出窗口均值。
///
/// # Arguments
/// * `series`: 数值序列。
/// * `period`: 窗口长度。
///
/// # Returns
/// 与输入等长的均值序列。
pub fn sma(series: &[f64], period: u32) -> Vec<Option<f64>> {
    let mut window = SlidingWindow::new(period);
    series
        .iter()
        .map(|&value| {
            window.push(value);
            window.mean()
        })
        .collect()
}

/// # Summary
/// 滚动总体标准差 (除以 `period`)。
///
/// # Logic
/// 1. 与 SMA 共用同样的滑动窗口，额外维护平方和。
/// 2. 使用 `means` 中该位置已算好的均值；均值为 None 的位置输出 None。
///
/// # Arguments
/// * `series`: 数值序列。
/// * `period`: 窗口长度。
/// * `means`: 同周期的 SMA 结果。
///
/// # Returns
/// 与输入等长的标准差序列。
pub fn rolling_std_dev(series: &[f64], period: u32, means: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut window = SlidingWindow::new(period);
    series
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            window.push(value);
            let mean = means.get(i).copied().flatten()?;
            window.std_dev_around(mean)
        })
        .collect()
}

/// 布林带三条轨道，长度均与输入序列一致
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BollingerBands {
    pub mid: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// # Summary
/// 布林带：中轨为 SMA，上下轨为中轨 ± 倍数 × 滚动标准差。
///
/// # Arguments
/// * `closes`: 收盘价序列。
/// * `period`: 中轨与标准差的窗口长度。
/// * `multiplier`: 标准差倍数。
///
/// # Returns
/// 任一操作数为 None 的位置，上下轨同为 None。
pub fn bollinger(closes: &[f64], period: u32, multiplier: f64) -> BollingerBands {
    let mid = sma(closes, period);
    let std_dev = rolling_std_dev(closes, period, &mid);

    let band = |sign: f64| -> Vec<Option<f64>> {
        mid.iter()
            .zip(&std_dev)
            .map(|(m, s)| Some((*m)? + sign * multiplier * (*s)?))
            .collect()
    };
    let upper = band(1.0);
    let lower = band(-1.0);

    BollingerBands { mid, upper, lower }
}

/// # Summary
/// 计算整条序列的全部叠加指标并与数据点按下标合并。
///
/// # Logic
/// 1. 按收盘价取值策略抽取收盘价序列，成交量缺失按 0。
/// 2. 分别计算短、长周期 SMA、布林带与成交量 SMA。
/// 3. 克隆输入数据点并附加同下标的指标，输入本身不被修改。
///
/// # Arguments
/// * `points`: 数据点序列。
/// * `config`: 指标参数。
///
/// # Returns
/// 新的合并序列，长度与输入一致。
pub fn compute_overlays<P>(points: &[P], config: &IndicatorConfig) -> Vec<OverlayPoint<P>>
where
    P: OverlaySource + Clone,
{
    let closes: Vec<f64> = points.iter().map(OverlaySource::closing_price).collect();
    let volumes: Vec<f64> = points.iter().map(|p| p.volume().unwrap_or(0.0)).collect();

    let sma_short = sma(&closes, config.sma_short_period);
    let sma_long = sma(&closes, config.sma_long_period);
    let bands = bollinger(&closes, config.bb_period, config.bb_std_dev_multiplier);
    let vol_sma = sma(&volumes, config.volume_sma_period);

    let column = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

    points
        .iter()
        .enumerate()
        .map(|(i, point)| OverlayPoint {
            point: point.clone(),
            indicators: IndicatorBundle {
                vol_sma: column(&vol_sma, i),
                sma_short: column(&sma_short, i),
                sma_long: column(&sma_long, i),
                bb_mid: column(&bands.mid, i),
                bb_upper: column(&bands.upper, i),
                bb_lower: column(&bands.lower, i),
            },
        })
        .collect()
}
