use time::{OffsetDateTime, format_description::well_known::Rfc3339};

pub mod ai;
pub mod examples;
pub mod generated;
pub mod health;
pub mod spec;
pub mod validation;

/// Render a timestamp as RFC 3339 for generated headers and API responses.
pub fn format_timestamp(time: OffsetDateTime) -> String {
    time.format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
