use jiff::Timestamp;
use shortlist_core::LinkRecord;
use std::fmt::Write;

const ORIGINAL_URL_WIDTH: usize = 40;
const SHORT_URL_WIDTH: usize = 25;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Shortens `text` to `max` characters followed by `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push_str("...");
    out
}

/// Describes how long ago `then` was, e.g. `5 minutes ago`.
pub fn relative_time(then: Timestamp, now: Timestamp) -> String {
    let seconds = now.duration_since(then).as_secs();
    let distance = distance_in_words(seconds.abs());

    if seconds < 0 {
        format!("in {distance}")
    } else {
        format!("{distance} ago")
    }
}

fn distance_in_words(seconds: i64) -> String {
    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {unit}")
        } else {
            format!("{n} {unit}s")
        }
    };

    match seconds {
        s if s < 30 => "less than a minute".to_string(),
        s if s < 90 => "1 minute".to_string(),
        s if s < 45 * MINUTE => plural((s + 30) / MINUTE, "minute"),
        s if s < 90 * MINUTE => "about 1 hour".to_string(),
        s if s < DAY => format!("about {}", plural((s + HOUR / 2) / HOUR, "hour")),
        s if s < 42 * HOUR => "1 day".to_string(),
        s if s < MONTH => plural((s + DAY / 2) / DAY, "day"),
        s if s < 45 * DAY => "about 1 month".to_string(),
        s if s < YEAR => plural((s + MONTH / 2) / MONTH, "month"),
        s => format!("about {}", plural(s / YEAR, "year")),
    }
}

/// Renders the saved links as a table, in stored order.
pub fn render_links(links: &[LinkRecord], now: Timestamp) -> String {
    if links.is_empty() {
        return "No saved links yet. Create one with `shortlist create <url>`.\n".to_string();
    }

    let rows: Vec<[String; 4]> = links
        .iter()
        .map(|link| {
            [
                link.id.to_string(),
                truncate(&link.original_url, ORIGINAL_URL_WIDTH),
                truncate(&link.short_url, SHORT_URL_WIDTH),
                relative_time(link.created_at, now),
            ]
        })
        .collect();

    let header = ["ID", "ORIGINAL URL", "SHORT LINK", "CREATED"];
    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    write_row(&mut out, &header.map(str::to_string), &widths);
    for row in &rows {
        write_row(&mut out, row, &widths);
    }
    out
}

fn write_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;
    use shortlist_core::LinkId;

    fn now() -> Timestamp {
        "2024-06-01T12:00:00Z".parse().unwrap()
    }

    fn ago(seconds: i64) -> String {
        relative_time(now() - SignedDuration::from_secs(seconds), now())
    }

    #[test]
    fn truncates_long_text() {
        assert_eq!(truncate("short", 40), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate(&"a".repeat(40), 40), "a".repeat(40));
    }

    #[test]
    fn relative_times() {
        assert_eq!(ago(5), "less than a minute ago");
        assert_eq!(ago(60), "1 minute ago");
        assert_eq!(ago(5 * MINUTE), "5 minutes ago");
        assert_eq!(ago(HOUR), "about 1 hour ago");
        assert_eq!(ago(3 * HOUR), "about 3 hours ago");
        assert_eq!(ago(DAY + HOUR), "1 day ago");
        assert_eq!(ago(10 * DAY), "10 days ago");
        assert_eq!(ago(40 * DAY), "about 1 month ago");
        assert_eq!(ago(100 * DAY), "3 months ago");
        assert_eq!(ago(2 * YEAR), "about 2 years ago");
        assert_eq!(ago(-5 * MINUTE), "in 5 minutes");
    }

    #[test]
    fn empty_list_message() {
        assert!(render_links(&[], now()).starts_with("No saved links yet"));
    }

    #[test]
    fn renders_rows_in_order() {
        let links = vec![
            LinkRecord {
                id: LinkId::new("abc123").unwrap(),
                original_url: "https://very-long-example.com/a/really/long/path/that/keeps/going"
                    .to_string(),
                short_url: "https://s.example/abc123".to_string(),
                created_at: now() - SignedDuration::from_secs(5 * MINUTE),
            },
            LinkRecord {
                id: LinkId::new("x").unwrap(),
                original_url: "https://a.com".to_string(),
                short_url: "https://s.example/x".to_string(),
                created_at: now() - SignedDuration::from_secs(3 * DAY),
            },
        ];

        let table = render_links(&links, now());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].starts_with("abc123"));
        assert!(lines[1].contains("https://very-long-example.com/a/really/l..."));
        assert!(lines[1].contains("5 minutes ago"));
        assert!(lines[2].starts_with("x "));
        assert!(lines[2].ends_with("3 days ago"));
    }
}
