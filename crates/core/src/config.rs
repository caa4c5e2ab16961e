use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub indicators: IndicatorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// 监听地址，如 `0.0.0.0:8080`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 行情数据源类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedProvider {
    // Yahoo Finance chart 接口
    #[default]
    Yahoo,
    // 内置离线演示数据
    Fixture,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub provider: FeedProvider,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            provider: FeedProvider::Yahoo,
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout_secs: 10,
        }
    }
}

/// # Summary
/// 技术指标参数。任一参数变化都会触发整条序列的重新计算。
///
/// # Invariants
/// - 周期为 0 或大于序列长度时，对应指标列全部为空，不视为错误。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndicatorConfig {
    #[serde(alias = "bb_period")]
    pub bb_period: u32,
    #[serde(alias = "bb_std_dev_multiplier")]
    pub bb_std_dev_multiplier: f64,
    #[serde(alias = "sma_short_period")]
    pub sma_short_period: u32,
    #[serde(alias = "sma_long_period")]
    pub sma_long_period: u32,
    #[serde(alias = "volume_sma_period")]
    pub volume_sma_period: u32,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            bb_period: 20,
            bb_std_dev_multiplier: 2.0,
            sma_short_period: 50,
            sma_long_period: 200,
            volume_sma_period: 20,
        }
    }
}
