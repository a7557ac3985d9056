use std::time::{Duration, Instant};

/// 可取消的沉降定时器
///
/// 到期由拥有者在事件循环中轮询，没有独立回调，因此取消后的到期
/// 不可能再触达已释放的状态。取消是幂等的。
#[derive(Debug, Default)]
pub struct SettleTimer {
    deadline: Option<Instant>,
}

impl SettleTimer {
    pub fn new() -> Self {
        Self { deadline: None }
    }

    /// 从 now 起经过 delay 后到期；重复 arm 会覆盖旧的期限
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// 已到期则消费定时器并返回 true；未到期或未激活返回 false
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unarmed_timer_never_fires() {
        let mut timer = SettleTimer::new();
        assert!(!timer.fire_if_due(Instant::now()));
    }

    #[test]
    fn fires_exactly_once_after_deadline() {
        let mut timer = SettleTimer::new();
        let t0 = Instant::now();
        timer.arm(t0, Duration::from_millis(600));

        assert!(!timer.fire_if_due(t0 + Duration::from_millis(599)));
        assert!(timer.fire_if_due(t0 + Duration::from_millis(600)));
        // 已消费，不会再次到期
        assert!(!timer.fire_if_due(t0 + Duration::from_millis(10_000)));
    }

    #[test]
    fn cancel_discards_pending_deadline() {
        let mut timer = SettleTimer::new();
        let t0 = Instant::now();
        timer.arm(t0, Duration::from_millis(600));
        timer.cancel();
        assert!(!timer.is_armed());
        assert!(!timer.fire_if_due(t0 + Duration::from_secs(1)));
        // 重复取消安全
        timer.cancel();
    }
}
