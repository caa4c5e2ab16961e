//! # `quoteboard-analytics` - 行情分析核心
//!
//! 纯函数式的同步计算组件，不做任何 I/O，也不输出日志：
//! - [`normalizer`]: 原始 OHLCV 平行数组 → 清洗后的图表序列
//! - [`indicators`]: 均线、滚动标准差、布林带与成交量均线
//! - [`session`]: 根据市场状态令牌与交易时段判定是否开市

pub mod indicators;
pub mod normalizer;
pub mod session;
pub mod window;
