//! Report command for listing free slots.
//!
//! This module implements `avail report`: it validates the requested range and
//! working hours, fetches busy periods once for the whole range, and renders
//! the resulting free slots as text or JSON.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use avail_core::{
    AvailabilityReport, AvailabilityRequest, ConfigError, DateRange, FreeSlot, WorkingHours,
    find_availability, parse_date, parse_time_of_day,
};
use avail_source::{BusySource, FileSource, SourceError, TargetZone};

use crate::{Config, ReportArgs};

/// Days after the start date covered when no end date is given.
const DEFAULT_SPAN_DAYS: u64 = 6;

const HEAVY_RULE: &str = "=====================";
const LIGHT_RULE: &str = "-------------------------";

/// Computed report data.
#[derive(Debug)]
pub struct ReportData {
    pub generated_at: DateTime<Utc>,
    pub timezone: String,
    pub request: AvailabilityRequest,
    pub report: AvailabilityReport,
}

// ========== Request Validation ==========

/// Builds a validated request from command-line options and configuration.
///
/// Options given on the command line win over configured values. Errors name
/// the flag or config key that held the bad value.
pub fn build_request(
    args: &ReportArgs,
    config: &Config,
    today: NaiveDate,
) -> Result<AvailabilityRequest, ConfigError> {
    let start = match &args.start {
        Some(value) => parse_date("--start", value, today)?,
        None => today,
    };
    let end = match &args.end {
        Some(value) => parse_date("--end", value, today)?,
        None => start
            .checked_add_days(Days::new(DEFAULT_SPAN_DAYS))
            .unwrap_or(NaiveDate::MAX),
    };

    let day_start = time_setting(
        "--start-time",
        "start_time",
        args.start_time.as_deref(),
        &config.start_time,
    )?;
    let day_end = time_setting(
        "--end-time",
        "end_time",
        args.end_time.as_deref(),
        &config.end_time,
    )?;

    Ok(AvailabilityRequest {
        range: DateRange::new(start, end)?,
        hours: WorkingHours::new(day_start, day_end),
        minimum_slot_minutes: args.min_minutes.unwrap_or(config.minimum_slot_minutes),
    })
}

fn time_setting(
    flag: &'static str,
    key: &'static str,
    arg: Option<&str>,
    configured: &str,
) -> Result<NaiveTime, ConfigError> {
    match arg {
        Some(value) => parse_time_of_day(flag, value),
        None => parse_time_of_day(key, configured),
    }
}

// ========== Report Generation ==========

/// Fetches busy periods for the whole range and finds the free slots.
pub fn generate_report_data(
    request: AvailabilityRequest,
    source: &dyn BusySource,
    timezone: String,
    generated_at: DateTime<Utc>,
) -> Result<ReportData, SourceError> {
    let (range_start, range_end) = request.range.bounds();
    let busy = source.fetch_busy_periods(range_start, range_end)?;
    tracing::debug!(busy = busy.len(), "fetched busy periods");

    let report = find_availability(&request, busy);

    Ok(ReportData {
        generated_at,
        timezone,
        request,
        report,
    })
}

// ========== Text Formatting ==========

struct TextReport<'a>(&'a AvailabilityReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "USER AVAILABILITY")?;
        writeln!(f, "{HEAVY_RULE}")?;

        if self.0.is_empty() {
            writeln!(f, "No working days in range")?;
        }

        for (index, (date, slots)) in self.0.days().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", date.format("%A %Y-%m-%d"))?;
            writeln!(f, "{LIGHT_RULE}")?;

            if slots.is_empty() {
                writeln!(f, "  No available slots")?;
            }
            for slot in slots {
                writeln!(
                    f,
                    "  From {} to {}",
                    slot.start.format("%-I:%M %p"),
                    slot.end.format("%-I:%M %p")
                )?;
            }
        }

        writeln!(f, "{HEAVY_RULE}")
    }
}

/// Formats the report as human-readable text.
pub fn format_report(report: &AvailabilityReport) -> String {
    TextReport(report).to_string()
}

// ========== JSON Formatting ==========

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: String,
    pub timezone: &'a str,
    pub range: DateRange,
    pub working_hours: WorkingHours,
    pub minimum_slot_minutes: u32,
    pub days: Vec<JsonDay<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonDay<'a> {
    pub date: NaiveDate,
    pub weekday: String,
    pub slots: &'a [FreeSlot],
}

/// Formats report data as JSON.
pub fn format_report_json(data: &ReportData) -> Result<String> {
    let report = JsonReport {
        generated_at: data.generated_at.to_rfc3339(),
        timezone: &data.timezone,
        range: data.request.range,
        working_hours: data.request.hours,
        minimum_slot_minutes: data.request.minimum_slot_minutes,
        days: data
            .report
            .days()
            .map(|(date, slots)| JsonDay {
                date,
                weekday: date.format("%A").to_string(),
                slots,
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the report command.
pub fn run(args: &ReportArgs, config: &Config) -> Result<()> {
    let generated_at = Utc::now();

    let zone_name = args.timezone.as_deref().or(config.timezone.as_deref());
    let zone = TargetZone::from_name(zone_name)?;
    let today = zone.localize(&generated_at).date();

    let request = build_request(args, config, today)?;

    let events_path: PathBuf = args
        .events
        .clone()
        .unwrap_or_else(|| config.events_path.clone());
    let source = FileSource::new(events_path, zone);

    let timezone = zone.name().map_or_else(
        || iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string()),
        str::to_string,
    );

    let data = generate_report_data(request, &source, timezone, generated_at)
        .context("failed to load calendar events")?;

    let rendered = if args.json {
        let mut json = format_report_json(&data)?;
        json.push('\n');
        json
    } else {
        format_report(&data.report)
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::debug!(path = %path.display(), "report written");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
