use std::time::{Duration, Instant};

use crate::motion::calculate_magnitude;
use crate::types::AccelSample;

/// 摇动分类器：幅值超过阈值且距上次触发超过防抖窗口时产生一次触发
///
/// 一次物理摇动会让连续多帧样本超过阈值，防抖窗口保证只产生一次触发。
/// 没有队列：两次评估之间到达的样本直接丢弃（馈送固定 10 Hz，无背压问题）。
#[derive(Debug)]
pub struct ShakeDetector {
    threshold: f64,
    debounce: Duration,
    last_accepted: Option<Instant>,
}

impl ShakeDetector {
    pub fn new(threshold: f64, debounce: Duration) -> Self {
        Self {
            threshold,
            debounce,
            last_accepted: None,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// 评估一个样本，返回 true 表示接受为一次摇动触发
    ///
    /// 初始化后的第一个合格样本总是触发（视为窗口已过期）。
    /// 返回 true 时同时记录触发时间，保证窗口内至多一次触发。
    pub fn classify(&mut self, sample: &AccelSample, now: Instant) -> bool {
        if calculate_magnitude(sample) <= self.threshold {
            return false;
        }

        let window_elapsed = match self.last_accepted {
            Some(last) => now.duration_since(last) > self.debounce,
            None => true,
        };

        if window_elapsed {
            self.last_accepted = Some(now);
        }
        window_elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> ShakeDetector {
        ShakeDetector::new(1.78, Duration::from_millis(800))
    }

    fn strong_sample() -> AccelSample {
        // 幅值 2.0g，超过 1.78g 阈值
        AccelSample::new(2.0, 0.0, 0.0, 0)
    }

    #[test]
    fn first_qualifying_sample_always_triggers() {
        let mut det = detector();
        assert!(det.classify(&strong_sample(), Instant::now()));
    }

    #[test]
    fn below_threshold_never_triggers() {
        let mut det = detector();
        let weak = AccelSample::new(0.5, 0.5, 0.5, 0);
        assert!(!det.classify(&weak, Instant::now()));
        // 阈值不是严格小于：正好等于阈值也不触发
        let exact = AccelSample::new(1.78, 0.0, 0.0, 0);
        assert!(!det.classify(&exact, Instant::now()));
    }

    #[test]
    fn debounce_suppresses_then_rearms() {
        let mut det = detector();
        let t0 = Instant::now();

        assert!(det.classify(&strong_sample(), t0));
        // 500ms 后仍在 800ms 窗口内
        assert!(!det.classify(&strong_sample(), t0 + Duration::from_millis(500)));
        // 900ms 后窗口已过
        assert!(det.classify(&strong_sample(), t0 + Duration::from_millis(900)));
    }

    #[test]
    fn rejected_sample_does_not_extend_window() {
        let mut det = detector();
        let t0 = Instant::now();

        assert!(det.classify(&strong_sample(), t0));
        assert!(!det.classify(&strong_sample(), t0 + Duration::from_millis(700)));
        // 窗口从首次接受算起，而不是从上一次被拒绝的样本
        assert!(det.classify(&strong_sample(), t0 + Duration::from_millis(801)));
    }

    #[test]
    fn trigger_rate_bounded_by_debounce_window() {
        // 10 Hz 连续超阈值样本持续 4 秒，800ms 防抖最多接受 ceil(4000/800)=5 次
        let mut det = detector();
        let t0 = Instant::now();
        let mut accepted = 0;
        for i in 0..40 {
            if det.classify(&strong_sample(), t0 + Duration::from_millis(i * 100)) {
                accepted += 1;
            }
        }
        assert!(accepted <= 5, "accepted {} triggers in 4s window", accepted);
        assert!(accepted >= 4);
    }
}
