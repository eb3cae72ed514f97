//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use coursedesk_core::catalog::{Course, PageItem};
use coursedesk_core::{Locale, Navigation};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Tell the user where an authorization failure sends them.
pub fn navigation_hint(navigation: Navigation, locale: Locale) {
    let hint = match (navigation, locale) {
        (Navigation::Login, Locale::Swedish) => "Logga in med 'coursedesk login'.",
        (Navigation::Login, Locale::English) => "Log in with 'coursedesk login'.",
        (Navigation::AccessDenied, Locale::Swedish) => "Åtkomst nekad.",
        (Navigation::AccessDenied, Locale::English) => "Access denied.",
    };
    eprintln!("{} ({})", hint.dimmed(), navigation.path());
}

/// Course price as shown in the catalog.
pub fn price(amount: f64) -> String {
    if amount == 0.0 {
        "Gratis".to_string()
    } else if amount.fract() == 0.0 {
        format!("{:.0} kr", amount)
    } else {
        format!("{:.2} kr", amount)
    }
}

/// One course per line: id, title, level and price.
pub fn course_line(course: &Course) {
    let level = if course.level.is_empty() {
        String::new()
    } else {
        format!(" [{}]", course.level)
    };
    println!(
        "{:>5}  {}{}  {}",
        course.course_id.to_string().dimmed(),
        course.title.bold(),
        level.dimmed(),
        price(course.price)
    );
}

/// Render a pagination window, e.g. `1 … 4 [5] 6 … 12`.
pub fn page_window(items: &[PageItem]) -> String {
    items
        .iter()
        .map(|item| match item {
            PageItem::Page {
                number,
                current: true,
            } => format!("[{}]", number),
            PageItem::Page { number, .. } => number.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
