use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::{egui, Frame};
use log::info;

use crate::config::ConfigManager;
use crate::types::{AccelSample, RollCommand, TriggerSource};

use super::state::AppState;

pub struct DiceApp {
    // 统一的状态管理
    pub state: AppState,

    // 配置管理
    pub config: ConfigManager,
}

impl DiceApp {
    pub fn new(
        config: ConfigManager,
        sample_receiver: crossbeam_channel::Receiver<AccelSample>,
        sensor_available: bool,
        sensor_active: Arc<AtomicBool>,
    ) -> Self {
        let state = AppState::new(
            config.get_config(),
            sample_receiver,
            sensor_available,
            sensor_active,
        );

        // 打印启动信息
        if sensor_available {
            info!("应用启动，摇动手机或点击按钮掷骰子");
        } else {
            info!("Sensor feed unavailable, manual rolling only");
        }

        DiceApp { state, config }
    }
}

impl eframe::App for DiceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 深色主题，与骰子界面一致
        ctx.set_visuals(egui::Visuals::dark());

        let now = Instant::now();

        // 处理传感器样本：净化、分类、触发
        crate::app::handlers::MotionInputHandler::handle_samples(self, now);

        // 推进沉降定时器，发布到期的掷骰结果
        self.state.roll.poll(now);

        // 处理键盘输入
        self.handle_keyboard_input(ctx, now);

        // 渲染UI组件
        crate::app::ui::render_status_bar(self, ctx);
        crate::app::ui::render_dice_panel(self, ctx);

        // 掷骰动画期间提高刷新率，空闲时跟随采样间隔
        let repaint_after = if self.state.roll.is_rolling() {
            Duration::from_millis(16)
        } else {
            self.config.get_config().motion.update_interval()
        };
        ctx.request_repaint_after(repaint_after);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // 挂起的掷骰在此被丢弃，而不是写入已释放的状态
        self.state.roll.shutdown();
        info!("Roll controller shut down");
    }
}

impl DiceApp {
    fn handle_keyboard_input(&mut self, ctx: &egui::Context, now: Instant) {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Space) {
                self.request_manual_roll(now);
            }
        });
    }

    pub fn request_manual_roll(&mut self, now: Instant) {
        self.state
            .roll
            .apply(RollCommand::Trigger(TriggerSource::Manual), now);
    }

    pub fn request_reset(&mut self, now: Instant) {
        self.state.roll.apply(RollCommand::Reset, now);
    }
}
