/// 浮点抵消误差的容忍倍数 (以 `f64::EPSILON` 为单位)
const CANCELLATION_ULPS: f64 = 64.0;

/// # Summary
/// 固定容量的滑动窗口累加器，在环形缓冲区之上维护窗口内数值的和与平方和。
///
/// # Invariants
/// - 内存空间在初始化时一次性分配，后续不再扩容。
/// - 始终保持最近 N 个数值，`sum` / `sum_sq` 随推入与淘汰增量更新，从不重新扫描窗口。
/// - 容量为 0 的窗口永远不会填满。
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    // 内部存储容器
    data: Vec<f64>,
    // 最大容量
    capacity: usize,
    // 窗口长度的浮点形式，作为均值与方差的除数
    divisor: f64,
    // 下一个被覆盖的位置索引
    cursor: usize,
    // 窗口内数值之和
    sum: f64,
    // 窗口内数值平方和
    sum_sq: f64,
}

impl SlidingWindow {
    /// # Summary
    /// 创建一个新的滑动窗口。
    ///
    /// # Arguments
    /// * `period`: 窗口长度。
    ///
    /// # Returns
    /// 初始化后的空窗口。
    pub fn new(period: u32) -> Self {
        let capacity = usize::try_from(period).unwrap_or(0);
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
            divisor: f64::from(period),
            cursor: 0,
            sum: 0.0,
            sum_sq: 0.0,
        }
    }

    /// # Summary
    /// 向窗口推送新值。
    ///
    /// # Logic
    /// 1. 若未满，则直接 push 并累加。
    /// 2. 若已满，则根据 cursor 覆盖最旧的值，累加新值并减去被淘汰的值，cursor 取模递增。
    ///
    /// # Arguments
    /// * `value`: 最新的数值。
    ///
    /// # Returns
    /// 被淘汰的旧值；窗口未满时返回 None。容量为 0 时新值本身立即被淘汰。
    pub fn push(&mut self, value: f64) -> Option<f64> {
        if self.capacity == 0 {
            return Some(value);
        }
        if self.data.len() < self.capacity {
            self.data.push(value);
            self.sum += value;
            self.sum_sq += value * value;
            return None;
        }

        let slot = self.data.get_mut(self.cursor)?;
        let evicted = std::mem::replace(slot, value);
        self.sum += value - evicted;
        self.sum_sq += value * value - evicted * evicted;
        self.cursor = (self.cursor + 1) % self.capacity;
        Some(evicted)
    }

    /// 窗口是否已填满
    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.data.len() == self.capacity
    }

    /// 窗口填满后的算术平均值
    pub fn mean(&self) -> Option<f64> {
        self.is_full().then(|| self.sum / self.divisor)
    }

    /// # Summary
    /// 以给定均值计算窗口内的总体标准差 (除以窗口长度而非长度减一)。
    ///
    /// # Logic
    /// 1. 方差 = (Σx² - 2·mean·Σx) / N + mean²。
    /// 2. 结果落在浮点抵消噪声范围内 (含负值) 时视为 0。
    ///
    /// # Arguments
    /// * `mean`: 该位置已计算好的均值。
    ///
    /// # Returns
    /// 窗口未填满时返回 None。
    pub fn std_dev_around(&self, mean: f64) -> Option<f64> {
        if !self.is_full() {
            return None;
        }
        let mean_sq = self.sum_sq / self.divisor;
        let variance = (self.sum_sq - 2.0 * mean * self.sum) / self.divisor + mean * mean;
        let noise_floor = mean_sq.abs() * f64::EPSILON * CANCELLATION_ULPS;
        if variance <= noise_floor {
            Some(0.0)
        } else {
            Some(variance.sqrt())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_evicts_oldest() {
        let mut window = SlidingWindow::new(3);
        assert_eq!(window.push(1.0), None);
        assert_eq!(window.push(2.0), None);
        assert!(!window.is_full());
        assert_eq!(window.push(3.0), None);
        assert!(window.is_full());
        assert_eq!(window.push(4.0), Some(1.0));
        assert_eq!(window.push(5.0), Some(2.0));
        assert_eq!(window.mean(), Some(4.0));
    }

    #[test]
    fn test_window_mean_requires_full_window() {
        let mut window = SlidingWindow::new(2);
        window.push(10.0);
        assert_eq!(window.mean(), None);
        assert_eq!(window.std_dev_around(10.0), None);
        window.push(20.0);
        assert_eq!(window.mean(), Some(15.0));
    }

    #[test]
    fn test_window_population_std_dev() {
        let mut window = SlidingWindow::new(3);
        for v in [1.0, 2.0, 3.0] {
            window.push(v);
        }
        let std = window.std_dev_around(2.0).unwrap();
        assert!((std - (2.0_f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_window_constant_values_have_zero_std_dev() {
        let mut window = SlidingWindow::new(4);
        for _ in 0..20 {
            window.push(101.37);
        }
        let mean = window.mean().unwrap();
        assert_eq!(window.std_dev_around(mean), Some(0.0));
    }

    #[test]
    fn test_zero_capacity_window_never_fills() {
        let mut window = SlidingWindow::new(0);
        assert_eq!(window.push(1.0), Some(1.0));
        assert!(!window.is_full());
        assert_eq!(window.mean(), None);
    }
}
