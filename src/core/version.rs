//! Release version record and the generated `version.go` file
//!
//! Release mode stamps the current UTC instant into a small Go source file.
//! The file holds the timestamp as a string constant plus a `getVersion`
//! accessor that turns it into an HTTP date at runtime. [`http_date`] is the
//! same accessor on this side, so the contract can be checked here:
//!
//! - empty timestamp → empty string
//! - unparseable timestamp, or the zero instant → empty string
//! - valid timestamp → `Tue, 02 Jan 2024 03:04:05 GMT`

use crate::core::error::{MakeResult, ResultExt};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Timelike, Utc};
use log::{debug, info};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Default location of the generated file, relative to the project root
pub const DEFAULT_VERSION_FILE: &str = "version.go";

/// RFC 7231 preferred HTTP-date layout
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Timestamp recorded by a release
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionRecord {
  date: String,
}

impl VersionRecord {
  /// Record an already formatted timestamp (may be empty)
  pub fn new(date: impl Into<String>) -> Self {
    Self { date: date.into() }
  }

  /// Record the given instant in RFC 3339 nano form
  pub fn at(instant: DateTime<Utc>) -> Self {
    Self::new(format_rfc3339_nano(instant))
  }

  pub fn date(&self) -> &str {
    &self.date
  }

  pub fn is_empty(&self) -> bool {
    self.date.is_empty()
  }

  /// The release date as the generated accessor would report it
  pub fn http_date(&self) -> String {
    http_date(&self.date)
  }
}

/// Format an instant as RFC 3339 with nanoseconds, trailing zeros trimmed
///
/// The fraction is dropped entirely when the instant falls on a whole second,
/// and UTC is always written as `Z`.
pub fn format_rfc3339_nano(instant: DateTime<Utc>) -> String {
  let mut out = instant.format("%Y-%m-%dT%H:%M:%S").to_string();

  // nanosecond() exceeds 999_999_999 only for leap seconds; keep those whole
  let nanos = instant.nanosecond() % 1_000_000_000;
  if nanos != 0 {
    let fraction = format!("{:09}", nanos);
    out.push('.');
    out.push_str(fraction.trim_end_matches('0'));
  }

  out.push('Z');
  out
}

/// Parse an RFC 3339 timestamp and render it as an HTTP date
///
/// Returns an empty string for empty input, for anything `getVersion` would
/// fail to parse, and for the zero instant `0001-01-01T00:00:00Z`. Like the
/// generated code, the date is rendered on the stamp's own clock.
pub fn http_date(stamp: &str) -> String {
  let Some(parsed) = parse_rfc3339_nano(stamp) else {
    return String::new();
  };

  if is_zero_instant(&parsed.with_timezone(&Utc)) {
    return String::new();
  }

  parsed.format(HTTP_DATE_FORMAT).to_string()
}

/// Parse with the same strictness as Go's `time.RFC3339Nano` layout
///
/// Accepts `YYYY-MM-DDTHH:MM:SS`, an optional `.` plus 1 to 9 fraction digits,
/// then `Z` or `±hh:mm`. Rejects lowercase `t`/`z`, other separators, and
/// second 60.
fn parse_rfc3339_nano(stamp: &str) -> Option<DateTime<FixedOffset>> {
  if stamp.len() < 20 || !stamp.is_ascii() {
    return None;
  }

  let (body, zone) = match stamp.strip_suffix('Z') {
    Some(body) => (body, 0),
    None => {
      let (body, zone) = stamp.split_at(stamp.len() - 6);
      (body, parse_offset(zone)?)
    }
  };

  if body.len() < 19 {
    return None;
  }
  let (main, fraction) = body.as_bytes().split_at(19);
  let main_ok = main.iter().enumerate().all(|(i, b)| match i {
    4 | 7 => *b == b'-',
    10 => *b == b'T',
    13 | 16 => *b == b':',
    _ => b.is_ascii_digit(),
  });
  let fraction_ok = fraction.is_empty()
    || (fraction.len() >= 2 && fraction.len() <= 10 && fraction[0] == b'.' && fraction[1..].iter().all(u8::is_ascii_digit));
  if !main_ok || !fraction_ok {
    return None;
  }

  let naive = NaiveDateTime::parse_from_str(body, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
  // chrono reads second 60 as a leap second; Go does not
  if naive.nanosecond() >= 1_000_000_000 {
    return None;
  }

  let offset = FixedOffset::east_opt(zone)?;
  naive.and_local_timezone(offset).single()
}

/// `±hh:mm` to seconds east of UTC
fn parse_offset(zone: &str) -> Option<i32> {
  let b = zone.as_bytes();
  let sign = match b[0] {
    b'+' => 1,
    b'-' => -1,
    _ => return None,
  };
  if b[3] != b':' || ![1, 2, 4, 5].iter().all(|&i| b[i].is_ascii_digit()) {
    return None;
  }

  let hours: i32 = zone[1..3].parse().ok()?;
  let minutes: i32 = zone[4..6].parse().ok()?;
  if hours > 23 || minutes > 59 {
    return None;
  }
  Some(sign * (hours * 3600 + minutes * 60))
}

fn is_zero_instant(instant: &DateTime<Utc>) -> bool {
  NaiveDate::from_ymd_opt(1, 1, 1)
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .is_some_and(|zero| instant.naive_utc() == zero)
}

/// Render the Go source for `record`
pub fn render(record: &VersionRecord) -> String {
  let literal = if record.is_empty() {
    "\"\"".to_string()
  } else {
    format!("\"{}\"", record.date())
  };

  format!(
    r#"// --------  DO NOT EDIT --------
// this is an autogenerated file

package main

import (
	"net/http"
	"time"
)

// Version autogenerated
var Version = {literal}

// getVersion -
func getVersion() string {{
	t, _ := time.Parse(time.RFC3339Nano, Version)
	if t.IsZero() {{
		return ""
	}}
	return t.Format(http.TimeFormat)
}}
"#
  )
}

/// Write the rendered version file, replacing anything already at `path`
///
/// A newly created file is readable and writable by its owner only.
pub fn write_version_file(path: &Path, record: &VersionRecord) -> MakeResult<()> {
  let contents = render(record);

  let mut options = OpenOptions::new();
  options.write(true).create(true).truncate(true);
  #[cfg(unix)]
  {
    use std::os::unix::fs::OpenOptionsExt;
    options.mode(0o600);
  }

  let mut file = options
    .open(path)
    .with_context(|| format!("Failed to open {} for writing", path.display()))?;
  file
    .write_all(contents.as_bytes())
    .with_context(|| format!("Failed to write {}", path.display()))?;

  debug!("wrote {} bytes to {}", contents.len(), path.display());
  info!("stamped release {} ({})", record.date(), record.http_date());
  Ok(())
}
