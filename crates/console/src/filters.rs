//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Render a boolean as "yes"/"no".
///
/// Usage in templates: `{{ item.is_available|yes_no }}`
#[askama::filter_fn]
pub fn yes_no(value: &bool, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(if *value { "yes" } else { "no" })
}

/// Render an optional string, falling back to a dash.
///
/// Usage in templates: `{{ lead.country|or_dash }}`
#[askama::filter_fn]
pub fn or_dash(value: &Option<String>, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or("-")
        .to_owned())
}

/// Prefix a displayable value with the yuan sign.
///
/// Usage in templates: `{{ item.price|cny }}`
#[askama::filter_fn]
pub fn cny(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("\u{a5}{value}"))
}

/// Format a UTC timestamp for tables.
///
/// Usage in templates: `{{ lead.created_at|fmt_ts }}`
#[askama::filter_fn]
pub fn fmt_ts(
    value: &chrono::DateTime<chrono::Utc>,
    _env: &dyn askama::Values,
) -> askama::Result<String> {
    Ok(value.format("%Y-%m-%d %H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use crate::filters;
    use askama::Template;

    #[derive(Template)]
    #[template(
        source = "{{ available|yes_no }} {{ country|or_dash }} {{ price|cny }}",
        ext = "txt"
    )]
    struct FilterProbe {
        available: bool,
        country: Option<String>,
        price: String,
    }

    #[test]
    fn test_filters_render() {
        let probe = FilterProbe {
            available: true,
            country: None,
            price: "12.50".to_owned(),
        };
        assert_eq!(probe.render().expect("render"), "yes - \u{a5}12.50");
    }

    #[derive(Template)]
    #[template(source = "{{ at|fmt_ts }}", ext = "txt")]
    struct TsProbe {
        at: chrono::DateTime<chrono::Utc>,
    }

    #[test]
    fn test_fmt_ts_renders_minutes() {
        let at = chrono::DateTime::parse_from_rfc3339("2026-08-30T09:05:00Z")
            .expect("timestamp")
            .with_timezone(&chrono::Utc);
        assert_eq!(TsProbe { at }.render().expect("render"), "2026-08-30 09:05");
    }

    #[test]
    fn test_or_dash_passes_values_through() {
        let probe = FilterProbe {
            available: false,
            country: Some("Bangladesh".to_owned()),
            price: "0".to_owned(),
        };
        assert_eq!(probe.render().expect("render"), "no Bangladesh \u{a5}0");
    }
}
