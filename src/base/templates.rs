//! Default alert template.

/// Alert text rendered when an error is logged.
///
/// Placeholders use `strfmt` syntax: `{error_type}`, `{error_value}`, `{datetime}`,
/// `{record_id}`, `{traceback}`.
pub const DEFAULT_ALERT_TEMPLATE: &str = r#####"⚠️ {error_type}: {error_value}

Time: {datetime}
Record: {record_id}

{traceback}"#####;
