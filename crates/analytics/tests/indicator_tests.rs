use quoteboard_analytics::indicators::{
    OverlaySource, bollinger, compute_overlays, rolling_std_dev, sma,
};
use quoteboard_analytics::normalizer::normalize;
use quoteboard_core::config::IndicatorConfig;
use quoteboard_core::market::entity::{LoosePoint, RawQuotePoint};

fn assert_close(actual: Option<f64>, expected: f64) {
    let value = actual.unwrap_or_else(|| panic!("expected Some({expected}), got None"));
    assert!(
        (value - expected).abs() < 1e-9,
        "expected {expected}, got {value}"
    );
}

fn loose(close: Option<f64>, price: Option<f64>, volume: Option<f64>) -> LoosePoint {
    LoosePoint {
        date: None,
        close,
        price,
        volume,
    }
}

fn small_config() -> IndicatorConfig {
    IndicatorConfig {
        bb_period: 3,
        bb_std_dev_multiplier: 2.0,
        sma_short_period: 2,
        sma_long_period: 4,
        volume_sma_period: 2,
    }
}

/// # Summary
/// SMA 边界：窗口填满前为空。
#[test]
fn test_sma_boundary() {
    assert_eq!(sma(&[10.0, 20.0, 30.0], 3), vec![None, None, Some(20.0)]);
}

/// # Summary
/// SMA 滚动计算与逐窗口求和结果一致。
#[test]
fn test_sma_rolling_matches_window_mean() {
    let series = [3.0, 8.0, 1.0, 9.0, 4.0, 7.0, 2.0];
    let result = sma(&series, 3);

    assert_eq!(result.len(), series.len());
    for (i, value) in result.iter().enumerate().skip(2) {
        let expected = series[i - 2..=i].iter().sum::<f64>() / 3.0;
        assert_close(*value, expected);
    }
}

/// # Summary
/// 周期为 0 或大于序列长度时全部为空，空序列返回空结果。
#[test]
fn test_sma_degenerate_periods() {
    assert!(sma(&[1.0, 2.0], 5).iter().all(Option::is_none));
    assert!(sma(&[1.0, 2.0], 0).iter().all(Option::is_none));
    assert!(sma(&[], 3).is_empty());
}

/// # Summary
/// 滚动标准差为总体标准差 (除以 period)。
#[test]
fn test_rolling_std_dev_population() {
    let series = [1.0, 2.0, 3.0, 4.0, 5.0];
    let means = sma(&series, 3);
    let result = rolling_std_dev(&series, 3, &means);

    assert_eq!(result[0], None);
    assert_eq!(result[1], None);
    let expected = (2.0_f64 / 3.0).sqrt();
    for value in &result[2..] {
        assert_close(*value, expected);
    }
}

/// # Summary
/// 均值为空的位置标准差同样为空。
#[test]
fn test_rolling_std_dev_follows_mean_nulls() {
    let series = [1.0, 2.0, 3.0];
    let means = vec![None, None, None];
    assert!(rolling_std_dev(&series, 2, &means).iter().all(Option::is_none));
}

/// # Summary
/// 布林带基本计算。
#[test]
fn test_bollinger_basic() {
    let bands = bollinger(&[1.0, 2.0, 3.0, 4.0, 5.0], 3, 2.0);
    let std = (2.0_f64 / 3.0).sqrt();

    assert_eq!(bands.mid[1], None);
    assert_eq!(bands.upper[1], None);
    assert_eq!(bands.lower[1], None);
    assert_close(bands.mid[2], 2.0);
    assert_close(bands.upper[2], 2.0 + 2.0 * std);
    assert_close(bands.lower[2], 2.0 - 2.0 * std);
    assert_close(bands.mid[4], 4.0);
}

/// # Summary
/// 常数价格序列：已填满窗口的位置上下轨与中轨完全相同。
#[test]
fn test_bollinger_constant_series() {
    let closes = vec![100.0; 30];
    let bands = bollinger(&closes, 20, 2.0);

    for i in 0..30 {
        if i < 19 {
            assert_eq!(bands.mid[i], None);
            continue;
        }
        assert_eq!(bands.mid[i], Some(100.0));
        assert_eq!(bands.upper[i], bands.mid[i]);
        assert_eq!(bands.lower[i], bands.mid[i]);
    }
}

/// # Summary
/// 收盘价取值顺序：close → price → 0。
#[test]
fn test_closing_price_fallback() {
    assert_eq!(loose(Some(3.0), Some(9.0), None).closing_price(), 3.0);
    assert_eq!(loose(None, Some(9.0), None).closing_price(), 9.0);
    assert_eq!(loose(None, None, None).closing_price(), 0.0);
}

/// # Summary
/// 合并结果与输入逐下标对应，混合字段名的输入也能正确计算。
#[test]
fn test_compute_overlays_mixed_field_names() {
    let points = vec![
        loose(Some(10.0), None, Some(100.0)),
        loose(None, Some(20.0), None),
        loose(Some(30.0), Some(999.0), Some(300.0)),
        loose(None, Some(40.0), Some(400.0)),
    ];
    let overlays = compute_overlays(&points, &small_config());

    assert_eq!(overlays.len(), 4);
    assert_eq!(overlays[2].point, points[2]);

    assert_eq!(overlays[0].indicators.sma_short, None);
    assert_close(overlays[1].indicators.sma_short, 15.0);
    assert_close(overlays[2].indicators.sma_short, 25.0);
    assert_close(overlays[3].indicators.sma_long, 25.0);
    assert_eq!(overlays[2].indicators.sma_long, None);
    assert_close(overlays[2].indicators.bb_mid, 20.0);

    // 成交量缺失按 0 计
    assert_close(overlays[1].indicators.vol_sma, 50.0);
    assert_close(overlays[2].indicators.vol_sma, 150.0);
}

/// # Summary
/// 周期大于序列长度时，成交量均线整列为空。
#[test]
fn test_volume_sma_longer_than_series() {
    let points: Vec<LoosePoint> = (1..=5)
        .map(|v| loose(Some(f64::from(v)), None, Some(1_000.0)))
        .collect();
    let config = IndicatorConfig {
        volume_sma_period: 6,
        ..small_config()
    };

    let overlays = compute_overlays(&points, &config);
    assert!(overlays.iter().all(|o| o.indicators.vol_sma.is_none()));
}

/// # Summary
/// 默认参数 (50 / 200) 作用于归一化后的真实形态序列。
#[test]
fn test_default_config_on_normalized_series() {
    let raw: Vec<RawQuotePoint> = (0..250_i64)
        .map(|i| RawQuotePoint {
            timestamp: 1_704_153_600 + i * 86_400,
            open: Some(50.0),
            high: Some(51.0),
            low: Some(49.0),
            close: Some(50.0),
            volume: Some(1_000.0),
        })
        .collect();
    let points = normalize(&raw, 365);
    let overlays = compute_overlays(&points, &IndicatorConfig::default());

    assert_eq!(overlays.len(), 250);
    assert_eq!(overlays[48].indicators.sma_short, None);
    assert_eq!(overlays[49].indicators.sma_short, Some(50.0));
    assert_eq!(overlays[198].indicators.sma_long, None);
    assert_eq!(overlays[199].indicators.sma_long, Some(50.0));
    assert_eq!(overlays[19].indicators.vol_sma, Some(1_000.0));
    assert_eq!(overlays[249].indicators.bb_upper, Some(50.0));
    assert_eq!(overlays[249].point, points[249]);
}

/// # Summary
/// 空序列返回空结果。
#[test]
fn test_compute_overlays_empty() {
    let points: Vec<LoosePoint> = Vec::new();
    assert!(compute_overlays(&points, &IndicatorConfig::default()).is_empty());
}

/// # Summary
/// 合并结果序列化为展平的 JSON 对象，字段名与前端约定一致。
#[test]
fn test_overlay_json_shape() {
    let raw = vec![RawQuotePoint {
        timestamp: 1_704_153_600,
        open: Some(10.0),
        high: Some(11.0),
        low: Some(9.0),
        close: Some(10.0),
        volume: Some(100.0),
    }];
    let overlays = compute_overlays(&normalize(&raw, 10), &IndicatorConfig::default());
    let json = serde_json::to_value(&overlays[0]).unwrap();

    assert_eq!(json["date"], "2024-01-02");
    assert_eq!(json["price"], 10.0);
    assert_eq!(json["changePercent"], 0.0);
    assert_eq!(json["dayOfWeek"], "Tue");
    assert!(json["volSMA"].is_null());
    assert!(json["bbUpper"].is_null());
}
