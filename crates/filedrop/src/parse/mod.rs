//! Typed parsing of raw answers
//!
//! Each supported target type implements [`FromAnswer`]. The parser does no
//! caching and has no side effects; [`Session::var`](crate::Session::var)
//! composes it with the answer cache.

mod time;

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Zone;
use crate::{Error, Result};

pub use time::{LAYOUT_COUNT, parse_time};

/// The kind of value an answer was being read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    String,
    Integer,
    Float,
    Url,
    Time,
    Structured,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Url => "URL",
            Self::Time => "time",
            Self::Structured => "structured data",
        };
        f.write_str(name)
    }
}

/// A type that can be read from a raw operator answer.
pub trait FromAnswer: Sized {
    /// The kind reported in [`Error::Parse`].
    const KIND: TargetKind;

    /// Convert `raw`; `zone` is used by time values without an explicit offset.
    fn from_answer(raw: &str, zone: Zone) -> Result<Self>;
}

/// Parse `raw` as `T`.
pub fn parse_as<T: FromAnswer>(raw: &str, zone: Zone) -> Result<T> {
    T::from_answer(raw, zone)
}

/// Any deserializable shape, decoded from a JSON object or array literal.
///
/// ```
/// use filedrop::{Structured, Zone, parse_as};
///
/// let Structured(ports): Structured<Vec<u16>> = parse_as("[80, 443]", Zone::Utc).unwrap();
/// assert_eq!(ports, vec![80, 443]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structured<T>(pub T);

impl<T> Structured<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: DeserializeOwned> FromAnswer for Structured<T> {
    const KIND: TargetKind = TargetKind::Structured;

    fn from_answer(raw: &str, _zone: Zone) -> Result<Self> {
        serde_json::from_str(raw)
            .map(Structured)
            .map_err(|e| Error::parse(Self::KIND, raw, e))
    }
}

impl FromAnswer for serde_json::Value {
    const KIND: TargetKind = TargetKind::Structured;

    fn from_answer(raw: &str, _zone: Zone) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| Error::parse(Self::KIND, raw, e))
    }
}

impl FromAnswer for String {
    const KIND: TargetKind = TargetKind::String;

    fn from_answer(raw: &str, _zone: Zone) -> Result<Self> {
        Ok(raw.to_owned())
    }
}

impl FromAnswer for Url {
    const KIND: TargetKind = TargetKind::Url;

    fn from_answer(raw: &str, _zone: Zone) -> Result<Self> {
        Url::parse(raw).map_err(|e| Error::parse(Self::KIND, raw, e))
    }
}

impl FromAnswer for DateTime<FixedOffset> {
    const KIND: TargetKind = TargetKind::Time;

    fn from_answer(raw: &str, zone: Zone) -> Result<Self> {
        parse_time(raw, zone)
    }
}

macro_rules! from_str_answer {
    ($kind:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl FromAnswer for $ty {
                const KIND: TargetKind = $kind;

                fn from_answer(raw: &str, _zone: Zone) -> Result<Self> {
                    raw.parse::<$ty>().map_err(|e| Error::parse(Self::KIND, raw, e))
                }
            }
        )+
    };
}

from_str_answer!(TargetKind::Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
from_str_answer!(TargetKind::Float => f32, f64);
