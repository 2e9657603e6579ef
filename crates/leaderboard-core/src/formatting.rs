use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Format an integer with thousands separators.
///
/// # Examples
///
/// ```
/// use leaderboard_core::formatting::format_number;
///
/// assert_eq!(format_number(0), "0");
/// assert_eq!(format_number(1_234_567), "1,234,567");
/// assert_eq!(format_number(-9_876), "-9,876");
/// ```
pub fn format_number(value: i64) -> String {
    let grouped = group_thousands(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format a points award the way activity cards show it.
///
/// # Examples
///
/// ```
/// use leaderboard_core::formatting::format_points;
///
/// assert_eq!(format_points(5), "+5 pts");
/// assert_eq!(format_points(1500), "+1,500 pts");
/// ```
pub fn format_points(points: i64) -> String {
    if points < 0 {
        format!("{} pts", format_number(points))
    } else {
        format!("+{} pts", format_number(points))
    }
}

/// Truncate `s` so it occupies at most `max_width` terminal columns,
/// appending `…` when anything was cut.
pub fn truncate_display(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Right-pad `s` with spaces to `width` terminal columns.
pub fn pad_display(s: &str, width: usize) -> String {
    let w = s.width();
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

/// Render rows as a plain-text table with a header and a rule line.
///
/// Column widths are measured in terminal columns so names with wide
/// characters stay aligned. Trailing padding on the last column is dropped.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let columns = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().take(columns).enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let mut out = String::new();
    out.push_str(&render_row(headers.iter().copied(), &widths));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in rows {
        out.push_str(&render_row(row.iter().map(String::as_str), &widths));
        out.push('\n');
    }
    out
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line: Vec<String> = cells
        .zip(widths.iter())
        .map(|(cell, &w)| pad_display(cell, w))
        .collect();
    line.join("  ").trim_end().to_string()
}

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
