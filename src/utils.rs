use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::models::Revenue;

/// Format an amount in cents as US dollars, e.g. `$1,234.56`.
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}${}.{:02}", sign, group_thousands(abs / 100), abs % 100)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a date the way the dashboard shows it for a locale.
///
/// `en-GB` puts the day first; every other locale gets the `en-US` form.
pub fn format_date_to_local(date: NaiveDate, locale: &str) -> String {
    match locale {
        "en-GB" => date.format("%-d %b %Y").to_string(),
        _ => date.format("%b %-d, %Y").to_string(),
    }
}

/// Labels for the revenue chart's y-axis, highest first, and the top value.
pub fn generate_y_axis(revenue: &[Revenue]) -> (Vec<String>, i64) {
    let Some(highest) = revenue.iter().map(|month| i64::from(month.revenue)).max() else {
        tracing::warn!("no revenue data to chart");
        return (Vec::new(), 0);
    };

    let thousands = highest.div_euclid(1000) + i64::from(highest.rem_euclid(1000) > 0);
    let top_label = thousands * 1000;

    let mut labels = Vec::new();
    let mut step = top_label;
    while step >= 0 {
        labels.push(format!("${}K", step / 1000));
        step -= 1000;
    }

    (labels, top_label)
}

/// One slot in a pagination bar
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(untagged)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{}", n),
            PageItem::Ellipsis => f.write_str("..."),
        }
    }
}

/// Pages to show in a pagination bar, with ellipses standing in for gaps.
pub fn generate_pagination(current_page: u32, total_pages: u32) -> Vec<PageItem> {
    use PageItem::{Ellipsis, Page};

    if total_pages <= 7 {
        return (1..=total_pages).map(Page).collect();
    }

    if current_page <= 3 {
        return vec![
            Page(1),
            Page(2),
            Page(3),
            Ellipsis,
            Page(total_pages - 1),
            Page(total_pages),
        ];
    }

    if current_page >= total_pages - 2 {
        return vec![
            Page(1),
            Page(2),
            Ellipsis,
            Page(total_pages - 2),
            Page(total_pages - 1),
            Page(total_pages),
        ];
    }

    vec![
        Page(1),
        Ellipsis,
        Page(current_page - 1),
        Page(current_page),
        Page(current_page + 1),
        Ellipsis,
        Page(total_pages),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(items: &[PageItem]) -> String {
        items.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
    }

    fn months(values: &[i32]) -> Vec<Revenue> {
        values
            .iter()
            .map(|&revenue| Revenue {
                month: "Jan".into(),
                revenue,
            })
            .collect()
    }

    #[test]
    fn currency_formatting() {
        assert_eq!(format_currency(0), "$0.00");
        assert_eq!(format_currency(5), "$0.05");
        assert_eq!(format_currency(15795), "$157.95");
        assert_eq!(format_currency(100_000), "$1,000.00");
        assert_eq!(format_currency(123_456_789), "$1,234,567.89");
        assert_eq!(format_currency(-150), "-$1.50");
    }

    #[test]
    fn date_formatting_by_locale() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert_eq!(format_date_to_local(date, "en-US"), "Jan 3, 2024");
        assert_eq!(format_date_to_local(date, "en-GB"), "3 Jan 2024");
        assert_eq!(format_date_to_local(date, "fr-FR"), "Jan 3, 2024");
    }

    #[test]
    fn y_axis_rounds_up_to_thousands() {
        let (labels, top) = generate_y_axis(&months(&[2000, 1800, 4800, 3200]));
        assert_eq!(top, 5000);
        assert_eq!(labels, vec!["$5K", "$4K", "$3K", "$2K", "$1K", "$0K"]);
    }

    #[test]
    fn y_axis_exact_thousand_is_not_bumped() {
        let (labels, top) = generate_y_axis(&months(&[3000]));
        assert_eq!(top, 3000);
        assert_eq!(labels.first().map(String::as_str), Some("$3K"));
        assert_eq!(labels.len(), 4);
    }

    #[test]
    fn y_axis_empty_input() {
        assert_eq!(generate_y_axis(&[]), (Vec::new(), 0));
    }

    #[test]
    fn pagination_shows_everything_when_short() {
        assert_eq!(render(&generate_pagination(1, 5)), "1 2 3 4 5");
        assert_eq!(render(&generate_pagination(4, 7)), "1 2 3 4 5 6 7");
        assert!(generate_pagination(1, 0).is_empty());
    }

    #[test]
    fn pagination_near_start() {
        assert_eq!(render(&generate_pagination(2, 10)), "1 2 3 ... 9 10");
    }

    #[test]
    fn pagination_near_end() {
        assert_eq!(render(&generate_pagination(9, 10)), "1 2 ... 8 9 10");
    }

    #[test]
    fn pagination_in_the_middle() {
        assert_eq!(render(&generate_pagination(5, 10)), "1 ... 4 5 6 ... 10");
    }
}
