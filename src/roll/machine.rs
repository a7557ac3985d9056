use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::roll::{DiceRoller, SettleTimer, INITIAL_FACE};
use crate::types::RollCommand;

/// 掷骰阶段。沉降期间对外表现与 Rolling 相同（rolling 标志为 true）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollPhase {
    Idle,
    Rolling,
}

/// reset 后面值的策略
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetFacePolicy {
    /// 恢复初始面值 1
    Initial,
    /// 保留当前面值
    Hold,
}

/// 掷骰状态机
///
/// 唯一拥有面值、掷骰计数和历史。摇动触发与手动触发走同一条
/// 命令路径（apply），Rolling 期间到达的触发直接忽略，不排队。
/// 结果在沉降定时器到期后统一由 poll 发布，与外部动画时长对齐。
#[derive(Debug)]
pub struct RollMachine {
    phase: RollPhase,
    face_value: u8,
    roll_count: u64,
    history: VecDeque<u8>,
    history_cap: usize,
    settle_delay: Duration,
    settle_timer: SettleTimer,
    roller: DiceRoller,
    reset_face: ResetFacePolicy,
    allow_reset_while_rolling: bool,
    shut_down: bool,
}

impl RollMachine {
    pub fn new(
        settle_delay: Duration,
        history_cap: usize,
        reset_face: ResetFacePolicy,
        allow_reset_while_rolling: bool,
        roller: DiceRoller,
    ) -> Self {
        Self {
            phase: RollPhase::Idle,
            face_value: INITIAL_FACE,
            roll_count: 0,
            history: VecDeque::with_capacity(history_cap),
            history_cap,
            settle_delay,
            settle_timer: SettleTimer::new(),
            roller,
            reset_face,
            allow_reset_while_rolling,
            shut_down: false,
        }
    }

    pub fn face_value(&self) -> u8 {
        self.face_value
    }

    pub fn roll_count(&self) -> u64 {
        self.roll_count
    }

    pub fn is_rolling(&self) -> bool {
        self.phase == RollPhase::Rolling
    }

    /// 最近的掷骰结果，最新在前
    pub fn history(&self) -> impl Iterator<Item = u8> + '_ {
        self.history.iter().copied()
    }

    /// 应用一条命令，返回是否被接受
    pub fn apply(&mut self, cmd: RollCommand, now: Instant) -> bool {
        if self.shut_down {
            return false;
        }

        match cmd {
            RollCommand::Trigger(source) => {
                if self.phase == RollPhase::Rolling {
                    // 互斥：进行中的掷骰不被打断，触发也不排队
                    debug!("Ignoring {} trigger, roll already in flight", source.as_str());
                    return false;
                }
                self.phase = RollPhase::Rolling;
                self.settle_timer.arm(now, self.settle_delay);
                info!("Roll started ({} trigger)", source.as_str());
                true
            }
            RollCommand::Reset => {
                if self.phase == RollPhase::Rolling && !self.allow_reset_while_rolling {
                    debug!("Ignoring reset, roll in flight");
                    return false;
                }
                self.roll_count = 0;
                self.history.clear();
                if self.reset_face == ResetFacePolicy::Initial {
                    self.face_value = INITIAL_FACE;
                }
                info!("Roll counter reset");
                true
            }
        }
    }

    /// 推进沉降定时器；到期时计算结果并发布，返回新面值
    pub fn poll(&mut self, now: Instant) -> Option<u8> {
        if self.shut_down || !self.settle_timer.fire_if_due(now) {
            return None;
        }

        let face = self.roller.roll();
        self.face_value = face;
        self.roll_count += 1;
        self.history.push_front(face);
        self.history.truncate(self.history_cap);
        self.phase = RollPhase::Idle;
        info!("Roll #{} settled on {}", self.roll_count, face);
        Some(face)
    }

    /// 生命周期结束时调用一次；取消挂起的沉降定时器，之后的
    /// poll / apply 全部失效。幂等。
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        if self.settle_timer.is_armed() {
            debug!("Discarding pending roll on shutdown");
        }
        self.settle_timer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TriggerSource;

    fn machine() -> RollMachine {
        RollMachine::new(
            Duration::from_millis(600),
            5,
            ResetFacePolicy::Initial,
            false,
            DiceRoller::from_seed(42),
        )
    }

    fn shake() -> RollCommand {
        RollCommand::Trigger(TriggerSource::Shake)
    }

    fn manual() -> RollCommand {
        RollCommand::Trigger(TriggerSource::Manual)
    }

    #[test]
    fn trigger_from_idle_starts_rolling_immediately() {
        let mut m = machine();
        let t0 = Instant::now();
        assert!(!m.is_rolling());
        assert!(m.apply(shake(), t0));
        assert!(m.is_rolling());
        assert_eq!(m.roll_count(), 0, "count only moves on completion");
    }

    #[test]
    fn settle_publishes_outcome_and_increments_count() {
        let mut m = machine();
        let t0 = Instant::now();
        m.apply(manual(), t0);

        assert_eq!(m.poll(t0 + Duration::from_millis(599)), None);
        let face = m.poll(t0 + Duration::from_millis(600)).unwrap();
        assert!((1..=6).contains(&face));
        assert_eq!(m.face_value(), face);
        assert_eq!(m.roll_count(), 1);
        assert!(!m.is_rolling());
    }

    #[test]
    fn trigger_while_rolling_is_ignored() {
        let mut m = machine();
        let t0 = Instant::now();
        m.apply(shake(), t0);

        assert!(!m.apply(manual(), t0 + Duration::from_millis(100)));
        assert!(!m.apply(shake(), t0 + Duration::from_millis(200)));

        // 被忽略的触发不影响挂起的掷骰
        m.poll(t0 + Duration::from_millis(600)).unwrap();
        assert_eq!(m.roll_count(), 1);

        // 回到 Idle 后可以再次触发
        assert!(m.apply(manual(), t0 + Duration::from_millis(700)));
    }

    #[test]
    fn history_is_most_recent_first_and_capped() {
        let mut m = machine();
        let mut t = Instant::now();
        let mut faces = Vec::new();
        for _ in 0..7 {
            m.apply(manual(), t);
            t += Duration::from_millis(600);
            faces.push(m.poll(t).unwrap());
        }

        let history: Vec<u8> = m.history().collect();
        assert_eq!(history.len(), 5);
        // 最新在前：历史是最后 5 次结果的倒序
        let expected: Vec<u8> = faces.iter().rev().take(5).copied().collect();
        assert_eq!(history, expected);
        assert_eq!(m.roll_count(), 7);
    }

    #[test]
    fn reset_from_idle_clears_count_history_and_face() {
        let mut m = machine();
        let t0 = Instant::now();
        m.apply(manual(), t0);
        m.poll(t0 + Duration::from_millis(600)).unwrap();

        assert!(m.apply(RollCommand::Reset, t0 + Duration::from_millis(700)));
        assert_eq!(m.roll_count(), 0);
        assert_eq!(m.history().count(), 0);
        assert_eq!(m.face_value(), INITIAL_FACE);
    }

    #[test]
    fn reset_while_rolling_is_a_no_op_by_default() {
        let mut m = machine();
        let t0 = Instant::now();
        m.apply(manual(), t0);

        assert!(!m.apply(RollCommand::Reset, t0 + Duration::from_millis(100)));
        // 挂起的掷骰照常完成
        m.poll(t0 + Duration::from_millis(600)).unwrap();
        assert_eq!(m.roll_count(), 1);
    }

    #[test]
    fn hold_policy_keeps_face_on_reset() {
        let mut m = RollMachine::new(
            Duration::from_millis(600),
            5,
            ResetFacePolicy::Hold,
            false,
            DiceRoller::from_seed(42),
        );
        let t0 = Instant::now();
        m.apply(manual(), t0);
        let face = m.poll(t0 + Duration::from_millis(600)).unwrap();

        m.apply(RollCommand::Reset, t0 + Duration::from_millis(700));
        assert_eq!(m.roll_count(), 0);
        assert_eq!(m.face_value(), face);
    }

    #[test]
    fn reset_while_rolling_when_allowed_still_completes_the_roll() {
        let mut m = RollMachine::new(
            Duration::from_millis(600),
            5,
            ResetFacePolicy::Initial,
            true,
            DiceRoller::from_seed(42),
        );
        let t0 = Instant::now();
        m.apply(manual(), t0);
        assert!(m.apply(RollCommand::Reset, t0 + Duration::from_millis(100)));

        // 计数被清零，但进行中的掷骰仍然完成
        m.poll(t0 + Duration::from_millis(600)).unwrap();
        assert_eq!(m.roll_count(), 1);
    }

    #[test]
    fn shutdown_with_pending_roll_discards_completion() {
        let mut m = machine();
        let t0 = Instant::now();
        m.apply(shake(), t0);
        m.shutdown();

        assert_eq!(m.poll(t0 + Duration::from_secs(10)), None);
        assert_eq!(m.roll_count(), 0);
        assert_eq!(m.face_value(), INITIAL_FACE);

        // 幂等，重复调用安全
        m.shutdown();
        assert!(!m.apply(manual(), t0 + Duration::from_secs(11)));
    }
}
