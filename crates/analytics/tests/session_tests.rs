use chrono::{TimeZone, Utc};
use quoteboard_analytics::session::SessionClassifier;
use quoteboard_core::common::time::FakeClockProvider;
use quoteboard_core::market::entity::{MarketState, QuoteMeta, TradingPeriod, TradingWindow};
use std::sync::Arc;

fn classifier_at(clock: Arc<FakeClockProvider>) -> SessionClassifier {
    SessionClassifier::new(clock)
}

fn fixed_clock() -> Arc<FakeClockProvider> {
    // 2024-03-04 15:30:00 UTC
    Arc::new(FakeClockProvider::new(
        Utc.with_ymd_and_hms(2024, 3, 4, 15, 30, 0).unwrap(),
    ))
}

fn window(start: Option<i64>, end: Option<i64>) -> TradingPeriod {
    TradingPeriod {
        regular: Some(TradingWindow { start, end }),
    }
}

/// # Summary
/// 明确的状态令牌优先于交易窗口。
#[test]
fn test_explicit_states() {
    let classifier = classifier_at(fixed_clock());
    let ts = Utc.with_ymd_and_hms(2024, 3, 4, 15, 30, 0).unwrap().timestamp();
    let around_now = window(Some(ts - 100), Some(ts + 100));

    let regular = classifier.classify(Some("REGULAR"), None);
    assert!(regular.is_market_open);
    assert_eq!(regular.market_state, MarketState::Regular);

    assert!(classifier.classify(Some("PRE"), None).is_market_open);
    assert!(classifier.classify(Some("POST"), None).is_market_open);

    // CLOSED 即使在交易窗口内也判定为休市
    let closed = classifier.classify(Some("CLOSED"), Some(&around_now));
    assert!(!closed.is_market_open);
    assert_eq!(closed.market_state, MarketState::Closed);
}

/// # Summary
/// 没有状态令牌时依据常规交易窗口判定，边界为闭区间。
#[test]
fn test_trading_window_fallback() {
    let clock = fixed_clock();
    let classifier = classifier_at(clock.clone());
    let ts = Utc.with_ymd_and_hms(2024, 3, 4, 15, 30, 0).unwrap().timestamp();

    let open = classifier.classify(None, Some(&window(Some(ts - 100), Some(ts + 100))));
    assert!(open.is_market_open);
    assert_eq!(open.market_state, MarketState::Unknown);

    assert!(classifier.classify(None, Some(&window(Some(ts), Some(ts)))).is_market_open);
    assert!(!classifier.classify(None, Some(&window(Some(ts + 1), Some(ts + 100)))).is_market_open);
    assert!(!classifier.classify(None, Some(&window(Some(ts - 100), Some(ts - 1)))).is_market_open);

    // 窗口起止缺失时无法判定
    assert!(!classifier.classify(None, Some(&window(None, Some(ts + 100)))).is_market_open);
    assert!(!classifier.classify(None, Some(&TradingPeriod::default())).is_market_open);
}

/// # Summary
/// 时钟推进后同一窗口的判定随之改变，判定器本身不缓存结果。
#[test]
fn test_classification_follows_clock() {
    let clock = fixed_clock();
    let classifier = classifier_at(clock.clone());
    let ts = Utc.with_ymd_and_hms(2024, 3, 4, 15, 30, 0).unwrap().timestamp();
    let period = window(Some(ts - 60), Some(ts + 60));

    assert!(classifier.classify(None, Some(&period)).is_market_open);
    clock.set_time(Utc.with_ymd_and_hms(2024, 3, 4, 21, 0, 0).unwrap());
    let later = classifier.classify(None, Some(&period));
    assert!(!later.is_market_open);
    assert_eq!(later.last_update, "9:00:00 PM");
}

/// # Summary
/// 无任何输入时安全降级为休市 / UNKNOWN。
#[test]
fn test_no_input_defaults_to_closed_unknown() {
    let classifier = classifier_at(fixed_clock());
    let status = classifier.classify(None, None);

    assert!(!status.is_market_open);
    assert_eq!(status.market_state, MarketState::Unknown);
    assert_eq!(status.last_update, "3:30:00 PM");
}

/// # Summary
/// 无法识别的令牌原样透传，并继续按交易窗口判定。
#[test]
fn test_unrecognized_state_passthrough() {
    let classifier = classifier_at(fixed_clock());
    let ts = Utc.with_ymd_and_hms(2024, 3, 4, 15, 30, 0).unwrap().timestamp();

    let status = classifier.classify(Some("PREPRE"), None);
    assert!(!status.is_market_open);
    assert_eq!(status.market_state, MarketState::Other("PREPRE".to_string()));

    let inside = classifier.classify(Some("POSTPOST"), Some(&window(Some(ts - 1), Some(ts + 1))));
    assert!(inside.is_market_open);
    assert_eq!(inside.market_state.to_string(), "POSTPOST");
}

/// # Summary
/// 直接使用行情元数据判定。
#[test]
fn test_classify_meta() {
    let classifier = classifier_at(fixed_clock());
    let meta = QuoteMeta {
        symbol: "AAPL".to_string(),
        regular_market_state: Some("POST".to_string()),
        ..Default::default()
    };

    let status = classifier.classify_meta(&meta);
    assert!(status.is_market_open);
    assert_eq!(status.market_state, MarketState::Post);

    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["isMarketOpen"], true);
    assert_eq!(json["marketState"], "POST");
}
