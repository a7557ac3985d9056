/// 手机端通过 MQTT 发送的加速度样本，单位为 g
/// 缺失的轴分量在反序列化时补 0
#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct AccelSample {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub timestamp: i64,
}

impl AccelSample {
    pub fn new(x: f64, y: f64, z: f64, timestamp: i64) -> Self {
        Self { x, y, z, timestamp }
    }

    /// 将 NaN / 无穷分量归零，保证幅值计算永远有定义
    pub fn sanitized(self) -> Self {
        fn finite_or_zero(v: f64) -> f64 {
            if v.is_finite() {
                v
            } else {
                0.0
            }
        }

        Self {
            x: finite_or_zero(self.x),
            y: finite_or_zero(self.y),
            z: finite_or_zero(self.z),
            timestamp: self.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_zeroes_non_finite_components() {
        let sample = AccelSample::new(f64::NAN, f64::INFINITY, 0.5, 42);
        let clean = sample.sanitized();
        assert_eq!(clean.x, 0.0);
        assert_eq!(clean.y, 0.0);
        assert_eq!(clean.z, 0.5);
        assert_eq!(clean.timestamp, 42);
    }

    #[test]
    fn sanitized_keeps_finite_samples_unchanged() {
        let sample = AccelSample::new(0.1, -0.2, 0.98, 7);
        assert_eq!(sample.sanitized(), sample);
    }

    #[test]
    fn missing_axes_deserialize_to_zero() {
        let sample: AccelSample = serde_json::from_str(r#"{"x": 1.2, "timestamp": 10}"#)
            .unwrap();
        assert_eq!(sample.x, 1.2);
        assert_eq!(sample.y, 0.0);
        assert_eq!(sample.z, 0.0);
    }
}
