//! File-backed event source.
//!
//! Reads an exported list of calendar events. Two layouts are accepted: a
//! bare JSON array of events, or an object whose `value` field holds the array
//! (the shape calendar-view exports use).
//!
//! Each event timestamp is one of:
//! - an RFC 3339 string with offset, converted into the target zone
//! - a naive `YYYY-MM-DDTHH:MM:SS` string, taken as already local
//! - an object `{ "dateTime": "...", "timeZone": "..." }`, whose naive time is
//!   read in the named zone and converted into the target zone

use std::path::{Path, PathBuf};

use avail_core::BusyPeriod;
use chrono::{DateTime, NaiveDateTime, TimeZone};
use serde::Deserialize;

use crate::zone::{TargetZone, parse_tz};
use crate::{BusySource, SourceError, overlaps_range};

const NO_SUBJECT: &str = "(no subject)";

/// A source reading events from a JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    zone: TargetZone,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>, zone: TargetZone) -> Self {
        Self {
            path: path.into(),
            zone,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub const fn zone(&self) -> TargetZone {
        self.zone
    }

    fn read_events(&self) -> Result<Vec<RawEvent>, SourceError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let file: EventFile =
            serde_json::from_str(&content).map_err(|source| SourceError::Json {
                path: self.path.clone(),
                source,
            })?;
        Ok(file.into_events())
    }

    fn to_busy_period(&self, event: RawEvent) -> Result<BusyPeriod, SourceError> {
        let subject = event.subject.unwrap_or_else(|| NO_SUBJECT.to_string());
        let start = self.resolve(&event.start, &subject)?;
        let end = self.resolve(&event.end, &subject)?;
        BusyPeriod::new(start, end, subject.clone())
            .map_err(|source| SourceError::InvertedEvent { subject, source })
    }

    fn resolve(
        &self,
        timestamp: &RawTimestamp,
        subject: &str,
    ) -> Result<NaiveDateTime, SourceError> {
        let invalid = |value: &str| SourceError::InvalidTimestamp {
            subject: subject.to_string(),
            value: value.to_string(),
        };

        match timestamp {
            RawTimestamp::Text(text) => {
                if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
                    return Ok(self.zone.localize(&instant));
                }
                text.parse::<NaiveDateTime>().map_err(|_| invalid(text))
            }
            RawTimestamp::Zoned {
                date_time,
                time_zone,
            } => {
                let naive = date_time
                    .parse::<NaiveDateTime>()
                    .map_err(|_| invalid(date_time))?;
                let Some(name) = time_zone else {
                    return Ok(naive);
                };
                let tz = parse_tz(name)?;
                // Ambiguous local times (DST fall-back) resolve to the earlier instant
                let instant = tz
                    .from_local_datetime(&naive)
                    .earliest()
                    .ok_or_else(|| invalid(date_time))?;
                Ok(self.zone.localize(&instant))
            }
        }
    }
}

impl BusySource for FileSource {
    fn fetch_busy_periods(
        &self,
        range_start: NaiveDateTime,
        range_end: NaiveDateTime,
    ) -> Result<Vec<BusyPeriod>, SourceError> {
        let events = self.read_events()?;
        let total = events.len();

        let mut periods = Vec::new();
        for event in events {
            if !event.blocks_time() {
                tracing::debug!(subject = ?event.subject, "skipping non-blocking event");
                continue;
            }
            let period = self.to_busy_period(event)?;
            if overlaps_range(&period, range_start, range_end) {
                periods.push(period);
            }
        }

        tracing::debug!(
            path = %self.path.display(),
            total,
            busy = periods.len(),
            "loaded calendar events"
        );
        Ok(periods)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EventFile {
    List(Vec<RawEvent>),
    Wrapped { value: Vec<RawEvent> },
}

impl EventFile {
    fn into_events(self) -> Vec<RawEvent> {
        match self {
            Self::List(events) => events,
            Self::Wrapped { value } => value,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    #[serde(default)]
    subject: Option<String>,
    start: RawTimestamp,
    end: RawTimestamp,
    #[serde(default)]
    is_cancelled: bool,
    #[serde(default)]
    show_as: Option<String>,
}

impl RawEvent {
    /// Cancelled events and events shown as free do not make the user busy.
    fn blocks_time(&self) -> bool {
        !self.is_cancelled
            && !self
                .show_as
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case("free"))
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Zoned {
        #[serde(rename = "dateTime")]
        date_time: String,
        #[serde(rename = "timeZone", default)]
        time_zone: Option<String>,
    },
}
