use std::sync::LazyLock;

use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use regex::{Captures, Regex};

use super::slug::{sanitize_title, slugify};
use crate::types::TemplateContext;

pub const DEFAULT_DATE_FORMAT: &str = "yyyy-MM-dd";

/// Context keys with dedicated resolution rules; `extra` entries with these
/// names are never substituted literally.
pub const RESERVED_KEYS: [&str; 5] = ["date", "fileName", "year", "month", "day"];

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_.\-]+)\s*(?:\|([^{}]*))?\}\}").expect("static regex")
});
static DATE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"yyyy|MM|dd|HH|mm|ss").expect("static regex"));

/// Formats `date` using the `yyyy MM dd HH mm ss` tokens. Anything else in
/// `format` is copied through.
pub fn format_date(date: &NaiveDateTime, format: &str) -> String {
    DATE_TOKEN
        .replace_all(format, |caps: &Captures| match &caps[0] {
            "yyyy" => format!("{:04}", date.year()),
            "MM" => format!("{:02}", date.month()),
            "dd" => format!("{:02}", date.day()),
            "HH" => format!("{:02}", date.hour()),
            "mm" => format!("{:02}", date.minute()),
            "ss" => format!("{:02}", date.second()),
            other => other.to_string(),
        })
        .into_owned()
}

/// Substitutes every placeholder the context can answer in a single pass.
/// Placeholders it cannot answer are left in the output untouched.
pub fn resolve_template(template: &str, ctx: &TemplateContext) -> String {
    let date = ctx.date.unwrap_or_else(|| Local::now().naive_local());

    let file_name = ctx.file_name.as_deref().map(sanitize_title);
    // A title that sanitizes to nothing counts as absent.
    let title = ctx
        .title
        .as_deref()
        .map(sanitize_title)
        .filter(|t| !t.is_empty())
        .or_else(|| file_name.clone().filter(|f| !f.is_empty()));
    let slug = ctx
        .slug
        .clone()
        .or_else(|| title.as_deref().map(slugify));

    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];
            let format = caps.get(2).map(|m| m.as_str());

            let value = match (key, format) {
                ("date", Some(format)) if !format.is_empty() => Some(format_date(&date, format)),
                ("date", None) => Some(format_date(&date, DEFAULT_DATE_FORMAT)),
                (_, Some(_)) => None,
                ("year", None) => Some(format!("{:04}", date.year())),
                ("month", None) => Some(format!("{:02}", date.month())),
                ("day", None) => Some(format!("{:02}", date.day())),
                ("fileName", None) => file_name.clone(),
                ("title", None) => title.clone(),
                ("slug", None) => slug.clone(),
                (other, None) if !RESERVED_KEYS.contains(&other) => ctx.extra.get(other).cloned(),
                _ => None,
            };

            value.unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
