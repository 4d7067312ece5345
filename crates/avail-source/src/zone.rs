//! The local time reference busy periods are expressed in.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::SourceError;

/// Where instants are localized to before they reach the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetZone {
    /// The system's local time zone.
    #[default]
    Local,
    /// A named IANA time zone.
    Named(Tz),
}

impl TargetZone {
    /// Resolve an optional IANA name; `None` means the system zone.
    pub fn from_name(name: Option<&str>) -> Result<Self, SourceError> {
        match name {
            None => Ok(Self::Local),
            Some(name) => parse_tz(name).map(Self::Named),
        }
    }

    /// The IANA name, if the zone was named explicitly.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Self::Local => None,
            Self::Named(tz) => Some(tz.name()),
        }
    }

    /// Convert an instant into naive local time in this zone.
    pub fn localize<Z: TimeZone>(&self, instant: &DateTime<Z>) -> NaiveDateTime {
        match self {
            Self::Local => instant.with_timezone(&Local).naive_local(),
            Self::Named(tz) => instant.with_timezone(tz).naive_local(),
        }
    }
}

pub(crate) fn parse_tz(name: &str) -> Result<Tz, SourceError> {
    name.parse::<Tz>()
        .map_err(|_| SourceError::UnknownTimeZone(name.to_string()))
}
