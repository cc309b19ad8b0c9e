//! Utility functions for rendering UI components

use crate::model::Paging;

pub fn format_duration(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

pub fn format_duration_sec(sec: u64) -> String {
    format_duration(sec * 1000)
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_width)
    } else {
        format!("{:<width$}", s, width = max_width)
    }
}

/// "2/5" style page indicator for a paged list title, empty when the
/// collection fits one page.
pub fn page_indicator(paging: Option<Paging>) -> String {
    match paging {
        Some(p) if p.total_pages() > 1 => {
            format!(" [page {}/{} ←→] ", p.current_page() + 1, p.total_pages())
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_format_as_minutes_and_seconds() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(59_000), "0:59");
        assert_eq!(format_duration(61_500), "1:01");
        assert_eq!(format_duration_sec(754), "12:34");
    }

    #[test]
    fn truncation_pads_and_ellipsizes() {
        assert_eq!(truncate_string("abc", 5), "abc  ");
        assert_eq!(truncate_string("abcdefgh", 5), "ab...");
    }

    #[test]
    fn page_indicator_only_shows_for_multiple_pages() {
        assert_eq!(page_indicator(None), "");
        assert_eq!(page_indicator(Some(Paging::new(100).with_total(50))), "");
        assert_eq!(
            page_indicator(Some(Paging::new(100).with_total(250).select_page(1))),
            " [page 2/3 ←→] "
        );
    }
}
