//! World clock: a set of IANA timezones read out together
//!
//! [`WorldClock`] keeps the active zones in insertion order and renders a
//! [`ClockReading`] per zone for a given instant. [`WorldClock::run`]
//! refreshes a sink once per tick until shut down.

mod ticker;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub use ticker::ClockSink;

/// Zones shown on a fresh clock
pub const DEFAULT_ZONES: [&str; 4] = [
    "Asia/Kolkata",
    "America/New_York",
    "Europe/London",
    "Asia/Tokyo",
];

/// Errors from editing the zone list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    /// Blank zone name
    #[error("Please select a timezone first!")]
    EmptySelection,
    /// Zone already on the clock
    #[error("This timezone is already added! ({0})")]
    AlreadyAdded(String),
    /// Name not in the IANA database
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// One zone's readout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockReading {
    /// IANA name, e.g. `America/New_York`
    pub zone: String,
    /// Display name, e.g. `New York`
    pub city: String,
    /// `09:05:03 PM` or `21:05:03`
    pub time: String,
    /// `Mon, Jan 5, 2026`
    pub date: String,
    /// Whether this is the machine's local zone
    pub is_local: bool,
}

/// Clock state: active zones and the hour format
#[derive(Debug, Clone)]
pub struct WorldClock {
    zones: Vec<Tz>,
    hour24: bool,
    local_zone: Option<Tz>,
}

impl Default for WorldClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldClock {
    /// Clock with the default zones in 12-hour format
    #[must_use]
    pub fn new() -> Self {
        let zones = DEFAULT_ZONES
            .iter()
            .filter_map(|name| name.parse().ok())
            .collect();
        Self {
            zones,
            hour24: false,
            local_zone: None,
        }
    }

    /// Clock with no zones
    #[must_use]
    pub fn empty() -> Self {
        Self {
            zones: Vec::new(),
            hour24: false,
            local_zone: None,
        }
    }

    /// Clock showing exactly `names`, in order
    pub fn with_zones<I, S>(names: I) -> Result<Self, ClockError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut clock = Self::empty();
        for name in names {
            clock.add_zone(name.as_ref())?;
        }
        Ok(clock)
    }

    /// Marks `name` as the local zone
    pub fn with_local_zone(mut self, name: &str) -> Result<Self, ClockError> {
        self.local_zone = Some(parse_zone(name)?);
        Ok(self)
    }

    /// Sets the hour format
    #[must_use]
    pub fn with_24_hour(mut self, hour24: bool) -> Self {
        self.hour24 = hour24;
        self
    }

    /// Active zone names in display order
    #[must_use]
    pub fn zones(&self) -> Vec<&'static str> {
        self.zones.iter().map(|tz| tz.name()).collect()
    }

    /// Adds a zone at the end
    pub fn add_zone(&mut self, name: &str) -> Result<(), ClockError> {
        let tz = parse_zone(name)?;
        if self.zones.contains(&tz) {
            return Err(ClockError::AlreadyAdded(tz.name().to_string()));
        }
        debug!(zone = tz.name(), "zone added");
        self.zones.push(tz);
        Ok(())
    }

    /// Removes a zone; returns whether it was on the clock
    pub fn remove_zone(&mut self, name: &str) -> bool {
        let before = self.zones.len();
        self.zones.retain(|tz| tz.name() != name.trim());
        self.zones.len() != before
    }

    /// Whether times read in 24-hour format
    #[must_use]
    pub fn is_24_hour(&self) -> bool {
        self.hour24
    }

    /// Flips between 12- and 24-hour format
    pub fn toggle_format(&mut self) {
        self.hour24 = !self.hour24;
    }

    /// Label for the format toggle
    #[must_use]
    pub fn format_label(&self) -> &'static str {
        if self.hour24 {
            "24 Hour Format"
        } else {
            "12 Hour Format"
        }
    }

    /// Readings for every zone at `now`
    #[must_use]
    pub fn snapshot(&self, now: DateTime<Utc>) -> Vec<ClockReading> {
        self.zones.iter().map(|tz| self.read(*tz, now)).collect()
    }

    fn read(&self, tz: Tz, now: DateTime<Utc>) -> ClockReading {
        let local = now.with_timezone(&tz);
        let time_format = if self.hour24 { "%H:%M:%S" } else { "%I:%M:%S %p" };
        ClockReading {
            zone: tz.name().to_string(),
            city: display_name(tz.name()),
            time: local.format(time_format).to_string(),
            date: local.format("%a, %b %-d, %Y").to_string(),
            is_local: self.local_zone == Some(tz),
        }
    }
}

/// City part of a zone name: last `/` segment with `_` as spaces
#[must_use]
pub fn display_name(zone: &str) -> String {
    zone.rsplit('/').next().unwrap_or(zone).replace('_', " ")
}

fn parse_zone(name: &str) -> Result<Tz, ClockError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ClockError::EmptySelection);
    }
    name.parse()
        .map_err(|_| ClockError::UnknownTimezone(name.to_string()))
}
