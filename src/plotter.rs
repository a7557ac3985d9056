use egui::Color32;
use egui_plot::{HLine, Line, Plot, PlotPoints};
use std::collections::VecDeque;

use crate::config::PlotConfig;
use crate::types::AccelSample;

/// 实时运动曲线：三轴加速度与幅值的滑动窗口显示
#[derive(Debug)]
pub struct MotionPlot {
    buffer_x: VecDeque<f64>,
    buffer_y: VecDeque<f64>,
    buffer_z: VecDeque<f64>,
    buffer_magnitude: VecDeque<f64>,
    max_samples: usize,
    window_duration: f64, // 窗口持续时间（秒）
}

impl MotionPlot {
    pub fn new(sample_rate_hz: f64, config: &PlotConfig) -> Self {
        let window_seconds = config.window_duration_seconds;
        let max_samples = (window_seconds * sample_rate_hz).max(1.0) as usize;

        Self {
            buffer_x: VecDeque::with_capacity(max_samples),
            buffer_y: VecDeque::with_capacity(max_samples),
            buffer_z: VecDeque::with_capacity(max_samples),
            buffer_magnitude: VecDeque::with_capacity(max_samples),
            max_samples,
            window_duration: window_seconds,
        }
    }

    pub fn add_sample(&mut self, sample: &AccelSample, magnitude: f64) {
        self.buffer_x.push_back(sample.x);
        self.buffer_y.push_back(sample.y);
        self.buffer_z.push_back(sample.z);
        self.buffer_magnitude.push_back(magnitude);

        // 超过窗口长度时从前面移除最旧数据 - O(1)
        if self.buffer_x.len() > self.max_samples {
            self.buffer_x.pop_front();
            self.buffer_y.pop_front();
            self.buffer_z.pop_front();
            self.buffer_magnitude.pop_front();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buffer_magnitude.is_empty()
    }

    pub fn ui(&self, ui: &mut egui::Ui, config: &PlotConfig, threshold: f64) {
        if self.is_empty() {
            return;
        }

        let c = &config.colors;
        self.plot_magnitude(
            ui,
            config,
            Color32::from_rgb(c.magnitude[0], c.magnitude[1], c.magnitude[2]),
            Color32::from_rgb(c.threshold[0], c.threshold[1], c.threshold[2]),
            threshold,
        );
        self.plot_axes(ui, config);
    }

    /// 幅值曲线，叠加阈值水平线
    fn plot_magnitude(
        &self,
        ui: &mut egui::Ui,
        config: &PlotConfig,
        color: Color32,
        threshold_color: Color32,
        threshold: f64,
    ) {
        let (y_min, y_max) = Self::value_range(&self.buffer_magnitude);
        // 阈值线必须始终可见
        let y_min = y_min.min(0.0);
        let y_max = y_max.max(threshold * 1.15);

        Plot::new("Magnitude")
            .height(config.plot_height)
            .x_axis_formatter(|v, _| format!("{:.1}s", v.value))
            .show_x(false)
            .show_y(false)
            .allow_drag(false)
            .allow_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(egui_plot::PlotBounds::from_min_max(
                    [0.0, y_min],
                    [self.window_duration, y_max],
                ));
                plot_ui.hline(
                    HLine::new("Threshold", threshold)
                        .color(threshold_color)
                        .width(1.0),
                );
                plot_ui.line(
                    Line::new("Magnitude", PlotPoints::from(self.timed_points(&self.buffer_magnitude)))
                        .color(color)
                        .width(1.5),
                );
            });
    }

    /// 三轴原始数据共用一幅图
    fn plot_axes(&self, ui: &mut egui::Ui, config: &PlotConfig) {
        let c = &config.colors;
        let axes = [
            ("ACC X", &self.buffer_x, c.x_axis),
            ("ACC Y", &self.buffer_y, c.y_axis),
            ("ACC Z", &self.buffer_z, c.z_axis),
        ];

        let (y_min, y_max) = axes
            .iter()
            .map(|(_, buffer, _)| Self::value_range(buffer))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), (lo, hi)| {
                (min.min(lo), max.max(hi))
            });

        Plot::new("Axes")
            .height(config.plot_height)
            .x_axis_formatter(|v, _| format!("{:.1}s", v.value))
            .show_x(false)
            .show_y(false)
            .allow_drag(false)
            .allow_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(egui_plot::PlotBounds::from_min_max(
                    [0.0, y_min],
                    [self.window_duration, y_max],
                ));
                for (title, buffer, rgb) in axes {
                    plot_ui.line(
                        Line::new(title, PlotPoints::from(self.timed_points(buffer)))
                            .color(Color32::from_rgb(rgb[0], rgb[1], rgb[2]))
                            .width(1.0),
                    );
                }
            });
    }

    /// 最旧数据在左（时间 0），最新在右
    fn timed_points(&self, buffer: &VecDeque<f64>) -> Vec<[f64; 2]> {
        let dt = self.window_duration / (self.max_samples as f64);
        buffer
            .iter()
            .enumerate()
            .map(|(i, &y)| [i as f64 * dt, y])
            .collect()
    }

    fn value_range(buffer: &VecDeque<f64>) -> (f64, f64) {
        let (y_min, y_max) = buffer.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), &val| (min.min(val), max.max(val)),
        );
        let range = (y_max - y_min).max(0.1);
        (y_min - range * 0.05, y_max + range * 0.05)
    }
}
