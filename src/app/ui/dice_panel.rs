use std::time::Instant;

use eframe::egui;

use crate::app::dice_app::DiceApp;
use crate::utils::format_magnitude;

/// 骰子面值对应的 Unicode 字符 ⚀..⚅
fn die_face_char(value: u8) -> char {
    match value {
        1 => '⚀',
        2 => '⚁',
        3 => '⚂',
        4 => '⚃',
        5 => '⚄',
        _ => '⚅',
    }
}

pub fn render_dice_panel(app: &mut DiceApp, ctx: &egui::Context) {
    let now = Instant::now();

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(10.0);
                ui.heading("🎲 ShakeDice");
                ui.label(if app.state.sensor.available {
                    "Shake your phone to roll!"
                } else {
                    "Press the button to roll"
                });

                ui.add_space(20.0);
                render_die(app, ui);
                ui.add_space(20.0);

                render_controls(app, ui, now);
                ui.add_space(10.0);
                render_stats(app, ui);
                ui.add_space(10.0);
                render_history(app, ui);
            });

            // 实时运动曲线（有数据才显示）
            if !app.state.motion_plot.is_empty() {
                ui.separator();
                ui.heading("Motion");
                let config = app.config.get_config();
                app.state.motion_plot.ui(
                    ui,
                    &config.plot,
                    config.motion.shake_threshold,
                );
            }
        });
    });
}

fn render_die(app: &DiceApp, ui: &mut egui::Ui) {
    let rolling = app.state.roll.is_rolling();

    let (face_text, face_color) = if rolling {
        // 沉降期间面值尚未发布，显示动画占位
        (
            die_face_char(animation_face(ui)).to_string(),
            egui::Color32::from_rgb(139, 92, 246), // 紫色
        )
    } else {
        (
            die_face_char(app.state.roll.face_value()).to_string(),
            egui::Color32::WHITE,
        )
    };

    ui.label(
        egui::RichText::new(face_text)
            .size(140.0)
            .color(face_color),
    );

    if rolling {
        ui.colored_label(egui::Color32::from_rgb(139, 92, 246), "Rolling...");
    } else {
        ui.label(format!("Value: {}", app.state.roll.face_value()));
    }
}

/// 滚动动画的临时面值：按帧序号轮换，不掺入真正的结果生成器
fn animation_face(ui: &egui::Ui) -> u8 {
    let tick = ui.input(|i| (i.time * 12.0) as u64);
    (tick % 6) as u8 + 1
}

fn render_controls(app: &mut DiceApp, ui: &mut egui::Ui, now: Instant) {
    let rolling = app.state.roll.is_rolling();

    // 掷骰进行中禁用手动按钮（触发也会被状态机忽略，禁用只是反馈）
    let roll_button = egui::Button::new(
        egui::RichText::new(if rolling { "🎲 Rolling..." } else { "🎲 Manual Roll" }).size(18.0),
    )
    .min_size(egui::vec2(200.0, 45.0));

    if ui.add_enabled(!rolling, roll_button).clicked() {
        app.request_manual_roll(now);
    }

    if app.state.roll.roll_count() > 0 {
        ui.add_space(5.0);
        if ui.button("Reset Counter").clicked() {
            app.request_reset(now);
        }
    }
}

fn render_stats(app: &DiceApp, ui: &mut egui::Ui) {
    ui.group(|ui| {
        ui.set_min_width(260.0);

        stat_row(ui, "Total Rolls", &app.state.roll.roll_count().to_string(), egui::Color32::WHITE);
        stat_row(
            ui,
            "Current Value",
            &app.state.roll.face_value().to_string(),
            egui::Color32::from_rgb(139, 92, 246),
        );

        let magnitude_color = if app.state.magnitude_above_threshold() {
            egui::Color32::from_rgb(236, 72, 153)
        } else {
            egui::Color32::GRAY
        };
        stat_row(
            ui,
            "Acceleration",
            &format_magnitude(app.state.motion.magnitude),
            magnitude_color,
        );

        let (sensor_text, sensor_color) = if app.state.sensor.is_active() {
            ("● Active", egui::Color32::from_rgb(0, 200, 100))
        } else {
            ("● Inactive", egui::Color32::from_rgb(200, 60, 60))
        };
        stat_row(ui, "Sensor Status", sensor_text, sensor_color);

        if let Some(sample) = &app.state.motion.latest_sample {
            stat_row(
                ui,
                "Axes",
                &format!("{:+.2} / {:+.2} / {:+.2}", sample.x, sample.y, sample.z),
                egui::Color32::GRAY,
            );
        }
    });
}

fn stat_row(ui: &mut egui::Ui, label: &str, value: &str, color: egui::Color32) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(label).color(egui::Color32::GRAY));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.colored_label(color, value);
        });
    });
}

fn render_history(app: &DiceApp, ui: &mut egui::Ui) {
    let history: Vec<u8> = app.state.roll.history().collect();
    if history.is_empty() {
        return;
    }

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Recent:").color(egui::Color32::GRAY));
        // 最新在前
        for face in history {
            ui.label(egui::RichText::new(die_face_char(face).to_string()).size(24.0));
        }
    });
}
