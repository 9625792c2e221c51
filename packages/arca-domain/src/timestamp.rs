use time::{OffsetDateTime, format_description::well_known::Rfc3339};

pub fn now_rfc3339() -> String {
	format_rfc3339(OffsetDateTime::now_utc())
}

pub fn format_rfc3339(ts: OffsetDateTime) -> String {
	ts.format(&Rfc3339).unwrap_or_else(|_| ts.unix_timestamp().to_string())
}
