//! Go-style duration strings.
//!
//! The stress endpoint accepts durations the way Go's `time.ParseDuration`
//! does (`"10s"`, `"1m30s"`, `"1.5h"`, `"-2s"`) and reports elapsed time the
//! way `time.Duration.String` prints it (`"3.000412345s"`).

use std::time::Duration;

pub const NANOS_PER_SEC: i64 = 1_000_000_000;

const UNITS: &[(&str, u64)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("\u{b5}s", 1_000), // U+00B5 micro sign
    ("\u{3bc}s", 1_000), // U+03BC greek mu
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60 * 1_000_000_000),
    ("h", 3_600 * 1_000_000_000),
];

/// Parse a signed duration string into nanoseconds.
///
/// Returns `None` for anything `time.ParseDuration` would reject: empty input,
/// a missing or unknown unit, a number without digits, or overflow of `i64`.
pub fn parse_go_duration(input: &str) -> Option<i64> {
    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Some(0);
    }
    if rest.is_empty() {
        return None;
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        let first = rest.as_bytes()[0];
        if first != b'.' && !first.is_ascii_digit() {
            return None;
        }

        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_digits, after_int) = rest.split_at(int_len);
        let whole: u64 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().ok()?
        };

        let (frac_digits, after_frac) = match after_int.strip_prefix('.') {
            Some(tail) => {
                let len = tail.bytes().take_while(u8::is_ascii_digit).count();
                tail.split_at(len)
            }
            None => ("", after_int),
        };
        if int_digits.is_empty() && frac_digits.is_empty() {
            return None;
        }

        let unit_len = after_frac
            .char_indices()
            .find(|(_, c)| *c == '.' || c.is_ascii_digit())
            .map_or(after_frac.len(), |(i, _)| i);
        if unit_len == 0 {
            return None;
        }
        let (unit_name, tail) = after_frac.split_at(unit_len);
        let unit = UNITS
            .iter()
            .find(|(name, _)| *name == unit_name)
            .map(|(_, nanos)| *nanos)?;

        let mut value = whole.checked_mul(unit)?;
        if !frac_digits.is_empty() {
            // Digits past u64 precision cannot change the result.
            let (mantissa, scale) = frac_digits
                .bytes()
                .take(18)
                .fold((0u64, 1u64), |(m, s), b| (m * 10 + u64::from(b - b'0'), s * 10));
            let fraction = (mantissa as f64 * (unit as f64 / scale as f64)) as u64;
            value = value.checked_add(fraction)?;
        }
        total = total.checked_add(value)?;
        if total > i64::MAX as u64 + 1 {
            return None;
        }
        rest = tail;
    }

    if negative {
        Some((total as i128).wrapping_neg() as i64)
    } else {
        i64::try_from(total).ok()
    }
}

/// Render a duration with the shortest Go `Duration.String` notation.
pub fn format_go_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{}ns", nanos);
    }
    if nanos < 1_000_000 {
        return format!("{}\u{b5}s", scaled(nanos, 3));
    }
    if nanos < 1_000_000_000 {
        return format!("{}ms", scaled(nanos, 6));
    }

    let fraction = fraction_digits(nanos % 1_000_000_000, 9);
    let total_secs = nanos / 1_000_000_000;
    let (hours, minutes, seconds) = (total_secs / 3_600, total_secs / 60 % 60, total_secs % 60);

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}h", hours));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{}m", minutes));
    }
    out.push_str(&format!("{}{}s", seconds, fraction));
    out
}

fn scaled(value: u128, precision: u32) -> String {
    let scale = 10u128.pow(precision);
    format!("{}{}", value / scale, fraction_digits(value % scale, precision))
}

fn fraction_digits(remainder: u128, precision: u32) -> String {
    if remainder == 0 {
        return String::new();
    }
    let padded = format!("{:0width$}", remainder, width = precision as usize);
    format!(".{}", padded.trim_end_matches('0'))
}
