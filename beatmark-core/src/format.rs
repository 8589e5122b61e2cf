/// Format a playback position the way every time display in the panel
/// shows it: seconds with three decimals.
pub fn format_secs(secs: f64) -> String {
    format!("{:.3}", secs)
}

pub const ZERO_TIME: &str = "0.000";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_decimals() {
        assert_eq!(format_secs(0.0), ZERO_TIME);
        assert_eq!(format_secs(12.3456), "12.346");
        assert_eq!(format_secs(1.5), "1.500");
    }
}
