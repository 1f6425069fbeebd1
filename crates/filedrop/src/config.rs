//! Session configuration
//!
//! Every field has a working default, so `SessionConfig::default()` gives a
//! session rooted at the working directory that parses times in the local
//! zone and retries for as long as the operator keeps answering.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use filedrop_fs::ConfigStore;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Configuration surface offered to the host program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Directory logical file names are resolved under. Unset or empty means
    /// names are used as given.
    pub root: Option<PathBuf>,

    /// Zone for date/time answers that carry no offset of their own.
    pub time_zone: Zone,

    /// Optional caps on operator retry loops.
    pub retry: RetryLimits,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration file (`.toml`, `.json`, `.yaml`/`.yml`).
    pub fn load(path: &Path) -> Result<Self> {
        Ok(ConfigStore::new().load(path)?)
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_time_zone(mut self, zone: Zone) -> Self {
        self.time_zone = zone;
        self
    }

    pub fn with_retry(mut self, retry: RetryLimits) -> Self {
        self.retry = retry;
        self
    }
}

/// Upper bounds for the operator retry loops. `None` keeps a loop going for
/// as long as the operator answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryLimits {
    /// Source paths the operator may offer for one import.
    pub source_attempts: Option<u32>,

    /// Failed creations of one directory before giving up.
    pub directory_attempts: Option<u32>,
}

impl RetryLimits {
    pub(crate) fn sources_exhausted(&self, attempts: u32) -> bool {
        self.source_attempts.is_some_and(|max| attempts >= max)
    }

    pub(crate) fn directories_exhausted(&self, attempts: u32) -> bool {
        self.directory_attempts.is_some_and(|max| attempts >= max)
    }
}

/// Time zone applied to date/time answers without an explicit offset.
///
/// Written as `local`, `utc`, or a fixed offset such as `+02:00`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Zone {
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl Zone {
    /// Place a wall-clock reading in this zone.
    ///
    /// An ambiguous local time (clocks turned back) takes the earlier
    /// instant; a time skipped by a forward transition yields `None`.
    pub fn localize(self, naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.fixed_offset()),
            Self::Utc => Some(Utc.from_utc_datetime(&naive).fixed_offset()),
            Self::Fixed(offset) => offset.from_local_datetime(&naive).single(),
        }
    }
}

impl FromStr for Zone {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(Self::Local),
            zone if zone.eq_ignore_ascii_case("local") => Ok(Self::Local),
            zone if zone.eq_ignore_ascii_case("utc") || zone == "Z" => Ok(Self::Utc),
            zone => zone
                .parse::<FixedOffset>()
                .map(Self::Fixed)
                .map_err(|e| format!("invalid time zone '{zone}': {e}")),
        }
    }
}

impl TryFrom<String> for Zone {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Zone> for String {
    fn from(zone: Zone) -> Self {
        zone.to_string()
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Utc => f.write_str("utc"),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}
