use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use quoteboard_core::config::AppConfig;

/// 配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "QUOTEBOARD_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "quoteboard.toml";
const ENV_PREFIX: &str = "QUOTEBOARD";

/// # Summary
/// 加载全局配置。
///
/// # Logic
/// 1. 内置默认值 (由 `AppConfig` 的 serde 默认值提供)。
/// 2. 可选的 TOML 配置文件，路径可由 `QUOTEBOARD_CONFIG` 覆盖，文件缺失不报错。
/// 3. `QUOTEBOARD__` 前缀的环境变量，以 `__` 分隔层级，如 `QUOTEBOARD__SERVER__PORT=9000`。
///
/// # Returns
/// 合并后的配置；文件格式错误或字段类型不匹配时返回 `ConfigError`。
pub fn load() -> Result<AppConfig, ConfigError> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    let builder = Config::builder().add_source(File::with_name(&path).required(false));
    finish(builder)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, ConfigError> {
    builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use quoteboard_core::config::FeedProvider;

    #[test]
    fn test_empty_sources_yield_defaults() {
        let config = finish(Config::builder()).unwrap();
        assert_eq!(config.server.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.feed.provider, FeedProvider::Yahoo);
        assert_eq!(config.indicators.bb_period, 20);
    }

    #[test]
    fn test_file_overrides_selected_keys() {
        let toml = r#"
            [server]
            port = 9100

            [feed]
            provider = "fixture"

            [indicators]
            sma_short_period = 20
            bb_std_dev_multiplier = 2.5
        "#;
        let builder = Config::builder().add_source(File::from_str(toml, FileFormat::Toml));
        let config = finish(builder).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.feed.provider, FeedProvider::Fixture);
        assert_eq!(config.feed.timeout_secs, 10);
        assert_eq!(config.indicators.sma_short_period, 20);
        assert_eq!(config.indicators.sma_long_period, 200);
        assert_eq!(config.indicators.bb_std_dev_multiplier, 2.5);
    }

    #[test]
    fn test_malformed_value_is_rejected() {
        let toml = r#"
            [server]
            port = "not-a-port"
        "#;
        let builder = Config::builder().add_source(File::from_str(toml, FileFormat::Toml));
        assert!(finish(builder).is_err());
    }
}
