/// 将幅值格式化为显示文本，保留两位小数并带 g 单位
pub fn format_magnitude(magnitude: f64) -> String {
    format!("{:.2}g", magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_two_decimals_and_unit() {
        assert_eq!(format_magnitude(1.784_9), "1.78g");
        assert_eq!(format_magnitude(0.0), "0.00g");
        assert_eq!(format_magnitude(2.0), "2.00g");
    }
}
