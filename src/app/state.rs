use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::Receiver;

use crate::config::AppConfig;
use crate::motion::ShakeDetector;
use crate::plotter::MotionPlot;
use crate::roll::{DiceRoller, RollMachine};
use crate::types::AccelSample;

/// 应用状态管理模块
/// 掷骰状态机、摇动检测与传感器读数分离到独立的结构体中

/// 运动输入状态
#[derive(Debug)]
pub struct MotionState {
    pub detector: ShakeDetector,
    pub latest_sample: Option<AccelSample>,
    pub magnitude: f64,
}

/// 传感器馈送状态
pub struct SensorState {
    /// broker 已配置且凭据可解析；false 时馈送从未启动
    pub available: bool,
    /// 馈送线程是否处于已连接状态
    pub active: Arc<AtomicBool>,
    pub sample_receiver: Receiver<AccelSample>,
}

impl SensorState {
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }
}

/// 统一的应用状态管理
pub struct AppState {
    pub roll: RollMachine,
    pub motion: MotionState,
    pub sensor: SensorState,
    pub motion_plot: MotionPlot,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        sample_receiver: Receiver<AccelSample>,
        sensor_available: bool,
        sensor_active: Arc<AtomicBool>,
    ) -> Self {
        let roll = RollMachine::new(
            config.roll.settle_delay(),
            config.roll.history_cap,
            config.roll.reset_face,
            config.roll.allow_reset_while_rolling,
            DiceRoller::new(),
        );

        let detector = ShakeDetector::new(
            config.motion.shake_threshold,
            config.motion.debounce(),
        );

        let sample_rate_hz = 1000.0 / config.motion.update_interval_ms as f64;

        Self {
            roll,
            motion: MotionState {
                detector,
                latest_sample: None,
                magnitude: 0.0,
            },
            sensor: SensorState {
                available: sensor_available,
                active: sensor_active,
                sample_receiver,
            },
            motion_plot: MotionPlot::new(sample_rate_hz, &config.plot),
        }
    }

    /// 获取当前状态摘要
    pub fn status_summary(&self) -> &'static str {
        if self.roll.is_rolling() {
            "Rolling"
        } else {
            "Idle"
        }
    }

    /// 当前幅值是否超过摇动阈值（用于 UI 高亮）
    pub fn magnitude_above_threshold(&self) -> bool {
        self.motion.magnitude > self.motion.detector.threshold()
    }
}
