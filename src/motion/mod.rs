pub mod shake;

pub use shake::ShakeDetector;

use crate::types::AccelSample;

/// 计算三轴加速度的欧几里得幅值 √(x²+y²+z²)，单位 g
pub fn calculate_magnitude(sample: &AccelSample) -> f64 {
    (sample.x * sample.x + sample.y * sample.y + sample.z * sample.z).sqrt()
}

/// 幅值是否超过摇动阈值
pub fn is_shaking(sample: &AccelSample, threshold: f64) -> bool {
    calculate_magnitude(sample) > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_of_zero_vector_is_zero() {
        let sample = AccelSample::new(0.0, 0.0, 0.0, 0);
        assert_eq!(calculate_magnitude(&sample), 0.0);
    }

    #[test]
    fn magnitude_is_never_negative() {
        for &(x, y, z) in &[
            (-1.0, -2.0, -3.0),
            (0.3, -0.4, 0.0),
            (1.78, 0.0, -1.78),
        ] {
            let sample = AccelSample::new(x, y, z, 0);
            assert!(calculate_magnitude(&sample) >= 0.0);
        }
    }

    #[test]
    fn magnitude_matches_known_triple() {
        // 3-4-0 勾股三元组
        let sample = AccelSample::new(0.3, 0.4, 0.0, 0);
        assert!((calculate_magnitude(&sample) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn resting_phone_is_not_shaking() {
        // 静止时读数约 1g（重力分量）
        let sample = AccelSample::new(0.0, 0.0, 1.0, 0);
        assert!(!is_shaking(&sample, 1.78));
    }

    #[test]
    fn strong_motion_is_shaking() {
        let sample = AccelSample::new(1.5, 1.0, 0.9, 0);
        assert!(is_shaking(&sample, 1.78));
    }
}
