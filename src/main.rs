mod app;
mod config;
mod logger;
mod motion;
mod plotter;
mod roll;
mod sensor;
mod types;
mod utils;

use crossbeam_channel::bounded;
use eframe::egui;
use log::{error, info, warn};

use app::DiceApp;
use config::ConfigManager;

const CONFIG_PATH: &str = "config.toml";

fn main() {
    logger::init_logger();
    info!("Application starting");

    // 配置文件存在则加载；首次运行时写出默认配置
    let config_manager = match ConfigManager::load_from_file(CONFIG_PATH) {
        Ok(manager) => {
            info!("Loaded configuration from {}", CONFIG_PATH);
            manager
        }
        Err(e) => {
            warn!("Using default configuration ({})", e);
            let manager = ConfigManager::new();
            if !std::path::Path::new(CONFIG_PATH).exists() {
                if let Err(e) = manager.get_config().save_to_file(CONFIG_PATH) {
                    warn!("Failed to write default config: {}", e);
                }
            }
            manager
        }
    };
    let config = config_manager.get_config().clone();

    let (sample_sender, sample_receiver) = bounded(config.channels.sample_channel_capacity);

    // 传感器不可用时不启动馈送线程，应用降级为仅手动掷骰
    let sensor_available = sensor::is_feed_available(&config.mqtt);
    let mut feed_handle = if sensor_available {
        Some(sensor::start_sensor_feed(&config.mqtt, sample_sender))
    } else {
        warn!("Sensor feed unavailable (no broker credentials), shake detection disabled");
        None
    };

    let sensor_active = feed_handle
        .as_ref()
        .map(|handle| handle.active_flag())
        .unwrap_or_default();

    let options = eframe::NativeOptions {
        vsync: config.window.vsync,
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        renderer: eframe::Renderer::Glow,
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_resizable(config.window.resizable),
        ..Default::default()
    };

    let app_title = config.window.title.clone();
    if let Err(e) = eframe::run_native(
        &app_title,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(DiceApp::new(
                config_manager,
                sample_receiver,
                sensor_available,
                sensor_active,
            )))
        }),
    ) {
        error!("GUI failed: {}", e);
        std::process::exit(1);
    }

    // GUI 关闭后停止馈送线程；stop 幂等，Drop 再次调用也安全
    info!("GUI closed, stopping sensor feed");
    if let Some(handle) = feed_handle.as_mut() {
        handle.stop();
    }
}
