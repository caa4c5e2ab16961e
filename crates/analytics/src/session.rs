use chrono::{DateTime, Utc};
use quoteboard_core::common::time::{RealTimeProvider, TimeProvider};
use quoteboard_core::market::entity::{
    MarketState, MarketStatus, QuoteMeta, TradingPeriod, TradingWindow,
};
use std::sync::Arc;

/// # Summary
/// 交易时段判定器，根据市场状态令牌与可选的常规交易窗口判断是否开市。
///
/// # Invariants
/// - 判定永不失败，任何无法解释的输入都降级为"休市"。
/// - 当前时间只来自注入的 `TimeProvider`。
pub struct SessionClassifier {
    clock: Arc<dyn TimeProvider>,
}

impl SessionClassifier {
    pub fn new(clock: Arc<dyn TimeProvider>) -> Self {
        Self { clock }
    }

    /// # Summary
    /// 判定当前是否开市。
    ///
    /// # Logic
    /// 按以下优先级，命中即返回：
    /// 1. `REGULAR` → 开市。
    /// 2. `PRE` / `POST` → 开市 (盘前盘后同样视为开市)。
    /// 3. `CLOSED` → 休市。
    /// 4. 提供了起止均为数值的常规交易窗口时，当前时间落在闭区间内即开市。
    /// 5. 其余情况 → 休市；未提供状态令牌时报告为 `UNKNOWN`。
    ///
    /// # Arguments
    /// * `market_state`: 市场状态令牌。
    /// * `trading_period`: 当前交易周期。
    ///
    /// # Returns
    /// 判定结果，`last_update` 为判定时刻的时间标签。
    pub fn classify(
        &self,
        market_state: Option<&str>,
        trading_period: Option<&TradingPeriod>,
    ) -> MarketStatus {
        let now = self.clock.now();
        let state = market_state.map(MarketState::from);

        let is_market_open = match &state {
            Some(MarketState::Regular | MarketState::Pre | MarketState::Post) => true,
            Some(MarketState::Closed) => false,
            _ => trading_period
                .and_then(|period| period.regular.as_ref())
                .is_some_and(|window| within_window(window, now)),
        };

        MarketStatus {
            is_market_open,
            market_state: state.unwrap_or(MarketState::Unknown),
            last_update: last_update_label(now),
        }
    }

    /// 使用行情元数据中的状态令牌与交易周期进行判定
    pub fn classify_meta(&self, meta: &QuoteMeta) -> MarketStatus {
        self.classify(
            meta.regular_market_state.as_deref(),
            meta.current_trading_period.as_ref(),
        )
    }
}

impl Default for SessionClassifier {
    fn default() -> Self {
        Self::new(Arc::new(RealTimeProvider))
    }
}

/// 窗口起止缺失时不可判定，按休市处理
fn within_window(window: &TradingWindow, now: DateTime<Utc>) -> bool {
    match (window.start, window.end) {
        (Some(start), Some(end)) => {
            let now = now.timestamp();
            start <= now && now <= end
        }
        _ => false,
    }
}

/// en-US 风格的时间标签，如 `2:30:05 PM`
fn last_update_label(now: DateTime<Utc>) -> String {
    now.format("%-I:%M:%S %p").to_string()
}
