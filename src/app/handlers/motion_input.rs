use std::time::Instant;

use crate::app::dice_app::DiceApp;
use crate::motion::calculate_magnitude;
use crate::types::{RollCommand, TriggerSource};

pub struct MotionInputHandler;

impl MotionInputHandler {
    /// 排空样本通道：净化、计算幅值、分类，命中则向状态机送出摇动触发
    pub fn handle_samples(app: &mut DiceApp, now: Instant) {
        while let Ok(raw) = app.state.sensor.sample_receiver.try_recv() {
            let sample = raw.sanitized();
            let magnitude = calculate_magnitude(&sample);

            app.state.motion.latest_sample = Some(sample);
            app.state.motion.magnitude = magnitude;
            app.state.motion_plot.add_sample(&sample, magnitude);

            if app.state.motion.detector.classify(&sample, now) {
                app.state
                    .roll
                    .apply(RollCommand::Trigger(TriggerSource::Shake), now);
            }
        }
    }
}
