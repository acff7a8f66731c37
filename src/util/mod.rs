pub(crate) fn today_iso_local() -> String {
    // Browser local timezone.
    let d = js_sys::Date::new_0();
    let y = d.get_full_year();
    let m = d.get_month() + 1;
    let day = d.get_date();
    format!("{:04}-{:02}-{:02}", y, m, day)
}

/// `1234.5` -> `$1,234.50`. Negative amounts keep the sign before the symbol.
pub(crate) fn format_currency(amount: f64, symbol: &str) -> String {
    if !amount.is_finite() {
        return format!("{symbol}0.00");
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{frac:02}")
}

/// Date part of an ISO-8601 timestamp; other input is returned trimmed.
pub(crate) fn format_date(ts: &str) -> String {
    let ts = ts.trim();
    match ts.get(..10) {
        Some(day) if is_iso_day(day) => day.to_string(),
        _ => ts.to_string(),
    }
}

fn is_iso_day(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit())
}

/// Cut to at most `max` chars, ending in `…` when shortened.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('…');
    out
}
