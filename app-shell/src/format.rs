//! Display helpers. Every numeric path renders `-` for missing or
//! non-finite input.

use chrono::{Local, TimeZone};
use ts_core::Timestamp;

pub const MISSING: &str = "-";

/// Number with at most two fraction digits and thousands separators.
pub fn fmt_num(x: Option<f64>) -> String {
    let Some(n) = x.filter(|n| n.is_finite()) else {
        return MISSING.to_string();
    };
    let fixed = format!("{:.2}", n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');
    let grouped = group_thousands(int_part);
    let sign = if n < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `12.34%` with a fixed number of digits.
pub fn fmt_pct(x: Option<f64>, digits: usize) -> String {
    match x.filter(|n| n.is_finite()) {
        Some(n) => format!("{n:.digits$}%"),
        None => MISSING.to_string(),
    }
}

/// Signed percentage for price deltas, e.g. `+0.42%`.
pub fn fmt_signed_pct(x: Option<f64>, digits: usize) -> String {
    match x.filter(|n| n.is_finite()) {
        Some(n) if n >= 0.0 => format!("+{}", fmt_pct(Some(n), digits)),
        other => fmt_pct(other, digits),
    }
}

/// Fixed decimals, e.g. RSI values.
pub fn fmt_fixed(x: Option<f64>, digits: usize) -> String {
    match x.filter(|n| n.is_finite()) {
        Some(n) => format!("{n:.digits$}"),
        None => MISSING.to_string(),
    }
}

/// Value as the backend sent it, e.g. confidence or leverage.
pub fn fmt_raw(x: Option<f64>) -> String {
    match x.filter(|n| n.is_finite()) {
        Some(n) => n.to_string(),
        None => MISSING.to_string(),
    }
}

/// Seconds rounded to whole minutes: `3m`.
pub fn fmt_minutes(secs: Option<i64>) -> String {
    match secs {
        Some(s) => format!("{}m", (s as f64 / 60.0).round() as i64),
        None => MISSING.to_string(),
    }
}

/// Local date and time of a unix-seconds bar stamp; zero counts as missing.
pub fn fmt_ts(ts: Option<Timestamp>) -> String {
    ts.filter(|t| *t != 0)
        .and_then(|t| Local.timestamp_opt(t, 0).single())
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

/// User-facing message for a failed notification `detail` code.
pub fn notify_detail_message(detail: Option<&str>) -> String {
    match detail {
        None | Some("") => "Send failed".to_string(),
        Some("discord_webhook_missing") => {
            "Discord webhook is not configured (set RECO_DISCORD_WEBHOOK_URL or RECO_DISCORD_WEBHOOK_FILE)."
                .to_string()
        }
        Some(d) if d.starts_with("http_") => format!("Discord request failed ({d})"),
        Some(d) if d.starts_with("error:") => "Error while sending to Discord".to_string(),
        Some(d) => d.to_string(),
    }
}
