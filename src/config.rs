use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::roll::machine::ResetFacePolicy;

/// 应用配置管理模块
/// 集中管理所有配置项，提供默认值和配置验证

/// 主配置结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub mqtt: MqttConfig,
    pub motion: MotionConfig,
    pub roll: RollConfig,
    pub plot: PlotConfig,
    pub channels: ChannelConfig,
}

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    pub resizable: bool,
    pub vsync: bool,
}

/// MQTT配置（加速度数据来源）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MqttConfig {
    pub broker: String,
    pub port: u16,
    pub client_id: String,
    pub topic: String,
    pub keep_alive_secs: u16,
}

/// 摇动检测配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// 摇动阈值，单位 g。静止约 1g，中等摇动 1.6-1.8g，用力摇动 >1.9g
    pub shake_threshold: f64,
    /// 两次触发之间的最小间隔，防止一次摇动产生多次掷骰
    pub debounce_ms: u64,
    /// 加速度采样间隔，100ms = 10 Hz
    pub update_interval_ms: u64,
}

/// 掷骰配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollConfig {
    /// 触发到结果发布的沉降时间，与外部动画时长对齐
    pub settle_ms: u64,
    /// 历史记录上限
    pub history_cap: usize,
    /// reset 后面值策略
    pub reset_face: ResetFacePolicy,
    /// 是否允许掷骰进行中 reset（只清计数，结果仍会发布）
    pub allow_reset_while_rolling: bool,
}

/// 绘图配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    pub window_duration_seconds: f64,
    pub plot_height: f32,
    pub colors: PlotColors,
}

/// 绘图颜色配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotColors {
    pub x_axis: [u8; 3],
    pub y_axis: [u8; 3],
    pub z_axis: [u8; 3],
    pub magnitude: [u8; 3],
    pub threshold: [u8; 3],
}

/// 通道配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub sample_channel_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            mqtt: MqttConfig::default(),
            motion: MotionConfig::default(),
            roll: RollConfig::default(),
            plot: PlotConfig::default(),
            channels: ChannelConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 720.0,
            title: "ShakeDice - Shake to Roll".to_string(),
            resizable: true,
            vsync: true,
        }
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker: "localhost".to_string(),
            port: 1883,
            client_id: "shakedice_client".to_string(),
            topic: "sensor/accelerometer".to_string(),
            keep_alive_secs: 5,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            shake_threshold: 1.78,
            debounce_ms: 800,
            update_interval_ms: 100,
        }
    }
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            settle_ms: 600,
            history_cap: 5,
            reset_face: ResetFacePolicy::Initial,
            allow_reset_while_rolling: false,
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            window_duration_seconds: 5.0,
            plot_height: 120.0,
            colors: PlotColors::default(),
        }
    }
}

impl Default for PlotColors {
    fn default() -> Self {
        Self {
            x_axis: [255, 0, 0],      // 红色
            y_axis: [0, 255, 0],      // 绿色
            z_axis: [0, 0, 255],      // 蓝色
            magnitude: [139, 92, 246], // 紫色
            threshold: [236, 72, 153], // 粉色
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            sample_channel_capacity: 1000,
        }
    }
}

impl MotionConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }
}

impl RollConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

impl AppConfig {
    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;

        let config: AppConfig = toml::from_str(&content).map_err(ConfigError::ParseError)?;

        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;

        std::fs::write(path, content).map_err(ConfigError::IoError)?;

        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(ConfigError::ValidationError(
                "Window dimensions must be positive".to_string(),
            ));
        }

        if self.motion.shake_threshold <= 0.0 {
            return Err(ConfigError::ValidationError(
                "Shake threshold must be positive".to_string(),
            ));
        }

        if self.motion.debounce_ms == 0 {
            return Err(ConfigError::ValidationError(
                "Debounce interval must be positive".to_string(),
            ));
        }

        if self.motion.update_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "Update interval must be positive".to_string(),
            ));
        }

        if self.roll.settle_ms == 0 {
            return Err(ConfigError::ValidationError(
                "Settle delay must be positive".to_string(),
            ));
        }

        if self.roll.history_cap == 0 {
            return Err(ConfigError::ValidationError(
                "History cap must be at least 1".to_string(),
            ));
        }

        if self.channels.sample_channel_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "Sample channel capacity must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(toml::de::Error),
    #[error("Serialize error: {0}")]
    SerializeError(toml::ser::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// 配置管理器
pub struct ConfigManager {
    config: AppConfig,
}

impl ConfigManager {
    /// 创建配置管理器（默认配置）
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let config = AppConfig::load_from_file(&path)?;
        Ok(Self { config })
    }

    /// 获取当前配置
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
