//! Content renderer
//!
//! Turns a record list into the published hosts-file text: a fixed
//! banner, one fixed-width `name address` line per record, and a
//! timestamped metadata block. The same text is written to the hosts
//! file and embedded in the README, so everything here is pure string
//! formatting with no I/O.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

use crate::traits::record_store::Record;

/// Column the address starts at. Names longer than this are emitted
/// unpadded and untruncated; the address then follows immediately.
pub const NAME_COLUMN_WIDTH: usize = 30;

/// First line of the rendered block, also the change detector's start sentinel
pub const BANNER_START: &str = "# Hostsync Host Start";

/// Last line of the rendered block, also the change detector's end sentinel
pub const BANNER_END: &str = "# Hostsync Host End";

/// Prefix of the timestamp line. Everything from this marker on is
/// excluded from change detection.
pub const UPDATE_TIME_MARKER: &str = "# Update time:";

const UPDATE_URL_LINE: &str = "# Update url: https://raw.hostsync.dev/hosts";
const STAR_LINE: &str = "# Star me: https://github.com/hostsync-lab/hostsync";

/// Published timestamps carry a fixed UTC+8 offset
const UPDATE_TIME_OFFSET_HOURS: i32 = 8;

/// Format `now` the way it appears in the rendered block and the
/// README template: RFC 3339 with the fixed +08:00 offset, second
/// precision.
pub fn format_update_time(now: DateTime<Utc>) -> String {
    let offset = FixedOffset::east_opt(UPDATE_TIME_OFFSET_HOURS * 3600)
        .expect("fixed +08:00 offset is in range");
    now.with_timezone(&offset)
        .to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Render the full banner-wrapped hosts block
///
/// Deterministic given `records` and `now`. Records are emitted in
/// input order; duplicates are not filtered.
pub fn render(records: &[Record], now: DateTime<Utc>) -> String {
    let mut listing = String::new();
    for record in records {
        listing.push_str(&format!(
            "{:<width$}{}\n",
            record.name,
            record.address,
            width = NAME_COLUMN_WIDTH
        ));
    }

    format!(
        "{BANNER_START}\n{listing}\n{UPDATE_TIME_MARKER} {time}\n{UPDATE_URL_LINE}\n{STAR_LINE}\n{BANNER_END}\n",
        time = format_update_time(now)
    )
}
