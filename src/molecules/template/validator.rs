use std::sync::LazyLock;

use regex::Regex;

static DATE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*date\s*\|([^}]*)\}\}").expect("static regex"));
static DATE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[yMdHms\-:/ ]+$").expect("static regex"));

/// Lists every structural problem in `template`. An empty list means the
/// template is usable.
pub fn validate_template(template: &str) -> Vec<String> {
    if template.trim().is_empty() {
        return vec!["Template cannot be empty".to_string()];
    }

    let mut errors = Vec::new();

    let opening = template.matches("{{").count();
    let closing = template.matches("}}").count();
    if opening != closing {
        errors.push(format!(
            "Unbalanced braces: found {} opening '{{{{' and {} closing '}}}}'",
            opening, closing
        ));
    }

    for caps in DATE_PLACEHOLDER.captures_iter(template) {
        let format = &caps[1];
        if !DATE_FORMAT.is_match(format) {
            errors.push(format!(
                "Invalid date format \"{}\": use yyyy, MM, dd, HH, mm, ss separated by '-', ':', '/' or spaces",
                format
            ));
        }
    }

    errors
}
