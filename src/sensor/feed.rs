use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::Sender;
use dotenv::dotenv;
use log::{error, info, warn};
use rumqttc::{Client, Event, MqttOptions, Packet, QoS};

use crate::config::MqttConfig;
use crate::types::AccelSample;

/// 传感器馈送适配器
///
/// 把手机端（或任意发布者）经 MQTT 推送的加速度样本封装成统一的
/// 通道接口。订阅线程内的所有传输/解析错误都在此边界被吸收：记录
/// 日志后停止送样，绝不向控制器传播。没有样本只意味着摇动检测
/// 失效，手动掷骰不受影响。

/// 馈送线程的句柄，拥有线程生命周期与活跃状态标志
pub struct SensorFeedHandle {
    shutdown: Arc<AtomicBool>,
    active: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl SensorFeedHandle {
    /// UI 层用来显示传感器状态；连接建立后为 true，线程退出后为 false
    pub fn active_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.active)
    }

    /// 停止馈送线程并等待其退出。幂等：重复调用是安全的空操作。
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            match handle.join() {
                Ok(()) => info!("Sensor feed thread shut down gracefully"),
                Err(e) => error!("Sensor feed thread panicked: {:?}", e),
            }
        }
    }
}

impl Drop for SensorFeedHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// 传感器数据源是否可用：broker 已配置且凭据可解析。
/// 不可用时完全不启动订阅，应用降级为仅手动掷骰。
pub fn is_feed_available(config: &MqttConfig) -> bool {
    dotenv().ok(); // 加载 .env 文件

    if config.broker.is_empty() {
        return false;
    }
    env::var("MQTT_USER").is_ok() && env::var("MQTT_PASS").is_ok()
}

/// 启动馈送线程，样本按固定采样间隔经 sender 送出
pub fn start_sensor_feed(config: &MqttConfig, sender: Sender<AccelSample>) -> SensorFeedHandle {
    let shutdown = Arc::new(AtomicBool::new(false));
    let active = Arc::new(AtomicBool::new(false));

    let feed_config = config.clone();
    let feed_shutdown = Arc::clone(&shutdown);
    let feed_active = Arc::clone(&active);
    let thread = thread::spawn(move || {
        if let Err(e) = run_feed_loop(&feed_config, sender, &feed_shutdown, &feed_active) {
            error!("Sensor feed failed: {}", e);
        }
        feed_active.store(false, Ordering::Relaxed);
    });

    SensorFeedHandle {
        shutdown,
        active,
        thread: Some(thread),
    }
}

fn run_feed_loop(
    config: &MqttConfig,
    sender: Sender<AccelSample>,
    shutdown: &AtomicBool,
    active: &AtomicBool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mqtt_user = env::var("MQTT_USER")?;
    let mqtt_pass = env::var("MQTT_PASS")?;
    let mqtt_host = env::var("MQTT_HOST").unwrap_or_else(|_| config.broker.clone());
    let mqtt_port = match env::var("MQTT_PORT") {
        Ok(port) => port.parse::<u16>()?,
        Err(_) => config.port,
    };

    let mut mqtt_options = MqttOptions::new(config.client_id.clone(), mqtt_host, mqtt_port);
    mqtt_options
        .set_credentials(mqtt_user, mqtt_pass)
        .set_keep_alive(Duration::from_secs(config.keep_alive_secs as u64));

    let (client, mut connection) = Client::new(mqtt_options, 10);
    client.subscribe(&config.topic, QoS::AtLeastOnce)?;

    for event in connection.iter() {
        // 检查关闭信号
        if shutdown.load(Ordering::Relaxed) {
            info!("Sensor feed received shutdown signal, exiting gracefully");
            break;
        }

        match event {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                info!("Sensor feed connected to broker");
                active.store(true, Ordering::Relaxed);
            }
            Ok(Event::Incoming(Packet::Publish(publish))) if publish.topic == config.topic => {
                match parse_sample(&publish.payload) {
                    Ok(sample) => {
                        if sender.send(sample).is_err() {
                            // 通道断开表示 GUI 已关闭，优雅退出
                            info!("Sample channel disconnected, sensor feed exiting");
                            break;
                        }
                    }
                    // 畸形样本只告警并跳过，不中断数据流
                    Err(e) => warn!("Invalid accelerometer sample: {}", e),
                }
            }
            Ok(Event::Incoming(_)) => {}
            Err(e) => {
                // 传输错误被吸收在适配器边界：之后不再有样本到达
                error!("Sensor feed connection error: {}", e);
                return Err(e.into());
            }
            _ => {}
        }
    }

    Ok(())
}

fn parse_sample(payload: &[u8]) -> Result<AccelSample, String> {
    let payload_str =
        std::str::from_utf8(payload).map_err(|e| format!("Invalid UTF-8: {}", e))?;

    serde_json::from_str::<AccelSample>(payload_str)
        .map_err(|e| format!("JSON parsing error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_sample_payload() {
        let sample =
            parse_sample(br#"{"x": 0.1, "y": -0.2, "z": 0.98, "timestamp": 1700000000000}"#)
                .unwrap();
        assert_eq!(sample.x, 0.1);
        assert_eq!(sample.z, 0.98);
        assert_eq!(sample.timestamp, 1_700_000_000_000);
    }

    #[test]
    fn missing_axes_are_coerced_to_zero() {
        let sample = parse_sample(br#"{"z": 1.0}"#).unwrap();
        assert_eq!(sample.x, 0.0);
        assert_eq!(sample.y, 0.0);
        assert_eq!(sample.z, 1.0);
    }

    #[test]
    fn malformed_payload_is_an_error_not_a_panic() {
        assert!(parse_sample(b"not json").is_err());
        assert!(parse_sample(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn stop_is_idempotent_after_feed_failure() {
        // 无凭据或无 broker 时线程自行退出；stop 必须仍然安全且可重复
        let (sender, _receiver) = crossbeam_channel::bounded(8);
        let config = MqttConfig {
            broker: "127.0.0.1".to_string(),
            port: 1,
            ..Default::default()
        };
        let mut handle = start_sensor_feed(&config, sender);
        handle.stop();
        handle.stop();
        assert!(!handle.active_flag().load(Ordering::Relaxed));
    }
}
