use alloc::string::String;
use core::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::Position;

/// One observation cycle, as reported across several device lines.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Record {
    pub time: String,
    pub date: String,
    pub fix: u8,
    pub quality: u8,
    pub position: Position,
    pub speed_knots: f64,
    pub heading: f64,
    pub altitude: f64,
    pub satellites: u32,
}

impl Record {
    /// The time text as a clock time, if the device sent something readable.
    pub fn utc_time(&self) -> Option<NaiveTime> {
        let time = self.time.trim();
        NaiveTime::parse_from_str(time, "%H:%M:%S%.f")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
            .ok()
    }

    /// The date text, sent day first (`16/10/2026`).
    pub fn utc_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%d/%m/%Y").ok()
    }

    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        let naive = NaiveDateTime::new(self.utc_date()?, self.utc_time()?);
        Some(DateTime::from_naive_utc_and_offset(naive, Utc))
    }
}

// One table row: date, time, fix, quality, lat, lon, altitude, heading, speed, satellites
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{:.7},{:.7},{},{},{},{}",
            self.date,
            self.time,
            self.fix,
            self.quality,
            self.position.lat,
            self.position.lon,
            self.altitude,
            self.heading,
            self.speed_knots,
            self.satellites,
        )
    }
}

/// Position report for the map surface, sent on every location line.
///
/// On the wire it is `time,lat,lon` with no escaping, so `time` must not
/// contain a comma.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MapUpdate {
    pub time: String,
    pub position: Position,
}

impl fmt::Display for MapUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.time, self.position.lat, self.position.lon)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MapUpdateError {
    #[error("expected 3 comma separated fields, found {0}")]
    FieldCount(usize),
    #[error("latitude is not a number")]
    Latitude,
    #[error("longitude is not a number")]
    Longitude,
}

impl FromStr for MapUpdate {
    type Err = MapUpdateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split(',');
        match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(time), Some(lat), Some(lon), None) => Ok(MapUpdate {
                time: time.into(),
                position: Position {
                    lat: lat.trim().parse().map_err(|_| MapUpdateError::Latitude)?,
                    lon: lon.trim().parse().map_err(|_| MapUpdateError::Longitude)?,
                },
            }),
            _ => Err(MapUpdateError::FieldCount(s.split(',').count())),
        }
    }
}
