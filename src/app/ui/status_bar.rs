use eframe::egui;

use crate::app::dice_app::DiceApp;
use crate::utils::format_magnitude;

pub fn render_status_bar(app: &mut DiceApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("status_bar")
        .min_height(35.0)
        .show(ctx, |ui| {
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                ui.label("Status:");

                let status_color = if app.state.roll.is_rolling() {
                    egui::Color32::from_rgb(255, 165, 0) // 橙色
                } else {
                    egui::Color32::from_rgb(0, 150, 0) // 绿色
                };
                ui.colored_label(status_color, app.state.status_summary());

                ui.separator();

                // 传感器状态
                ui.label("Sensor:");
                if !app.state.sensor.available {
                    ui.colored_label(egui::Color32::from_rgb(150, 0, 0), "Unavailable");
                } else if app.state.sensor.is_active() {
                    ui.colored_label(egui::Color32::from_rgb(0, 150, 0), "Active");
                } else {
                    ui.colored_label(egui::Color32::from_rgb(255, 165, 0), "Connecting...");
                }

                ui.separator();

                // 实时幅值，超过阈值时高亮
                let magnitude_color = if app.state.magnitude_above_threshold() {
                    egui::Color32::from_rgb(236, 72, 153) // 粉色
                } else {
                    egui::Color32::GRAY
                };
                ui.colored_label(
                    magnitude_color,
                    format_magnitude(app.state.motion.magnitude),
                );

                ui.separator();
                ui.label(format!(
                    "Threshold: {}",
                    format_magnitude(app.state.motion.detector.threshold())
                ));

                // 右侧：总掷骰次数
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Rolls: {}", app.state.roll.roll_count()));
                });
            });
            ui.add_space(5.0);
        });
}
