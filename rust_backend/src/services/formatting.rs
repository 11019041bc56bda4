/// Format with exactly two fractional digits, the way the dashboards
/// expect percentages: `NaN`, `Infinity` and `-Infinity` are spelled out
/// and negative zero prints as `0.00`.
///
/// A value exactly halfway between two cents rounds away from zero
/// (`10.125` gives `10.13`), matching `Number.prototype.toFixed`.
pub fn to_fixed_2(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value == 0.0 {
        "0.00".to_string()
    } else if is_cent_tie(value) {
        let cents = (value.abs() * 100.0).ceil() as u64;
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, cents / 100, cents % 100)
    } else {
        format!("{:.2}", value)
    }
}

/// Exact binary ties at the third decimal are odd multiples of 1/8.
fn is_cent_tie(value: f64) -> bool {
    (value.abs() * 8.0) % 2.0 == 1.0
}
