//! # `quoteboard-feed` - 行情数据源适配器
//!
//! `QuoteSource` 端口的两个实现：
//! - [`yahoo::YahooQuoteSource`]: 生产环境使用的 Yahoo Finance chart 接口
//! - [`fixture::FixtureQuoteSource`]: 测试与离线演示使用的内存数据

pub mod fixture;
pub mod yahoo;
