//! Date/time answers tried against a fixed, ordered list of layouts.

use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime};

use super::TargetKind;
use crate::config::Zone;
use crate::{Error, Result};

/// Which calendar and clock fields a layout carries. Anything missing is
/// filled with year 0, January, day 1 or midnight.
#[derive(Debug, Clone, Copy)]
enum Fields {
    DateTime,
    /// Month, day and clock but no year.
    NoYear,
    /// Clock only.
    Clock,
    /// Full date, no clock.
    Date,
    /// Month and year only.
    Month,
}

/// How the offset of a parsed value is decided.
#[derive(Debug, Clone, Copy)]
enum Zoning {
    /// No zone in the text: interpret in the configured zone.
    Configured,
    /// Numeric offset in the text (`-0700`).
    Offset,
    /// Zone abbreviation in the text (`MST`); only UTC/GMT are understood.
    Abbreviation,
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Rfc3339,
    Pattern(&'static str),
}

#[derive(Debug, Clone, Copy)]
struct Layout {
    format: Format,
    fields: Fields,
    zoning: Zoning,
}

const fn layout(pattern: &'static str, fields: Fields, zoning: Zoning) -> Layout {
    Layout {
        format: Format::Pattern(pattern),
        fields,
        zoning,
    }
}

const fn local(pattern: &'static str, fields: Fields) -> Layout {
    layout(pattern, fields, Zoning::Configured)
}

/// Tried in order; the first layout that accepts the whole text wins.
///
/// Numeric fields accept padded and unpadded digits alike, so `1/2/06` and
/// `01/02/06` share an entry.
const LAYOUTS: &[Layout] = &[
    // ANSIC
    local("%a %b %e %H:%M:%S %Y", Fields::DateTime),
    // UnixDate
    layout("%a %b %e %H:%M:%S %Z %Y", Fields::DateTime, Zoning::Abbreviation),
    // RubyDate
    layout("%a %b %d %H:%M:%S %z %Y", Fields::DateTime, Zoning::Offset),
    // RFC 822
    layout("%d %b %y %H:%M %Z", Fields::DateTime, Zoning::Abbreviation),
    layout("%d %b %y %H:%M %z", Fields::DateTime, Zoning::Offset),
    // RFC 850
    layout("%A, %d-%b-%y %H:%M:%S %Z", Fields::DateTime, Zoning::Abbreviation),
    // RFC 1123
    layout("%a, %d %b %Y %H:%M:%S %Z", Fields::DateTime, Zoning::Abbreviation),
    layout("%a, %d %b %Y %H:%M:%S %z", Fields::DateTime, Zoning::Offset),
    // RFC 3339, with or without fractional seconds
    Layout {
        format: Format::Rfc3339,
        fields: Fields::DateTime,
        zoning: Zoning::Offset,
    },
    // Kitchen
    local("%I:%M%p", Fields::Clock),
    // Stamp, StampMilli, StampMicro, StampNano
    local("%b %e %H:%M:%S", Fields::NoYear),
    local("%b %e %H:%M:%S%.3f", Fields::NoYear),
    local("%b %e %H:%M:%S%.6f", Fields::NoYear),
    local("%b %e %H:%M:%S%.9f", Fields::NoYear),
    // Textual month
    local("%B %e, %Y", Fields::Date),
    local("%b %e, %Y", Fields::Date),
    local("%e %B %Y", Fields::Date),
    local("%e %b %Y", Fields::Date),
    // Month and year
    local("%m/%y", Fields::Month),
    local("%m/%Y", Fields::Month),
    local("%m-%y", Fields::Month),
    local("%m-%Y", Fields::Month),
    // Month, day and year
    local("%m/%d/%y", Fields::Date),
    local("%m/%d/%Y", Fields::Date),
    local("%m-%d-%y", Fields::Date),
    local("%m-%d-%Y", Fields::Date),
    // ISO 8601 without offset; `%Y` also takes short years, so these go
    // after the month-first layouts
    local("%Y-%m-%dT%H:%M:%S%.f", Fields::DateTime),
    local("%Y-%m-%d %H:%M:%S%.f", Fields::DateTime),
    local("%Y-%m-%d %H:%M", Fields::DateTime),
    local("%Y-%m-%d", Fields::Date),
];

/// Number of layouts tried before giving up.
pub const LAYOUT_COUNT: usize = LAYOUTS.len();

/// Parse a date/time answer, trying every known layout in order.
///
/// Values without an offset are placed in `zone`. If no layout matches, the
/// individual layout failures are dropped in favour of one generic error.
pub fn parse_time(raw: &str, zone: Zone) -> Result<DateTime<FixedOffset>> {
    LAYOUTS
        .iter()
        .find_map(|layout| layout.parse(raw, zone))
        .ok_or_else(|| Error::parse(TargetKind::Time, raw, "unrecognized time format"))
}

impl Layout {
    fn parse(&self, raw: &str, zone: Zone) -> Option<DateTime<FixedOffset>> {
        let pattern = match self.format {
            Format::Rfc3339 => return DateTime::parse_from_rfc3339(raw).ok(),
            Format::Pattern(pattern) => pattern,
        };

        // `%Z` skips any token, numeric offsets included.
        if matches!(self.zoning, Zoning::Abbreviation)
            && raw.split_whitespace().any(is_numeric_offset)
        {
            return None;
        }

        let mut parsed = Parsed::new();
        format::parse(&mut parsed, raw, StrftimeItems::new(pattern)).ok()?;

        match self.fields {
            Fields::NoYear => parsed.set_year(0).ok()?,
            Fields::Clock => {
                parsed.set_year(0).ok()?;
                parsed.set_month(1).ok()?;
                parsed.set_day(1).ok()?;
            }
            Fields::Month => parsed.set_day(1).ok()?,
            Fields::DateTime | Fields::Date => {}
        }

        if let Zoning::Offset = self.zoning {
            return parsed.to_datetime().ok();
        }

        let date = parsed.to_naive_date().ok()?;
        let time = match self.fields {
            Fields::Date | Fields::Month => NaiveTime::MIN,
            _ => parsed.to_naive_time().ok()?,
        };
        let naive = NaiveDateTime::new(date, time);

        match self.zoning {
            Zoning::Abbreviation if names_utc(raw) => Zone::Utc.localize(naive),
            _ => zone.localize(naive),
        }
    }
}

fn is_numeric_offset(token: &str) -> bool {
    token.strip_prefix(['+', '-']).is_some_and(|rest| {
        !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit() || c == ':')
    })
}

fn names_utc(raw: &str) -> bool {
    raw.split_whitespace()
        .any(|token| matches!(token, "UTC" | "GMT" | "Z"))
}
