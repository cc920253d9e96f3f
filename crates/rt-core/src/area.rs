//! GPS and track-sensor zones.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zone code reported in the telemetry `area` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    Init,
    /// Track sensor zone, numbered 1 through 9.
    ///
    /// Numbers outside that range are treated as [`Area::Unknown`] by
    /// [`Area::code`], `Display` and serialization.
    TrackSensor(u8),
    RaceStart,
    RaceEnd,
    /// Fallback for missing, non-numeric or out-of-range codes.
    Unknown,
}

impl Area {
    /// Maps an integer code to its zone.
    pub fn from_int(code: i64) -> Self {
        match code {
            0 => Self::Init,
            1..=9 => u8::try_from(code).map_or(Self::Unknown, Self::TrackSensor),
            10 => Self::RaceStart,
            11 => Self::RaceEnd,
            _ => Self::Unknown,
        }
    }

    /// Parses a raw column value.
    ///
    /// Never fails: an absent column, empty cell or unparseable value yields
    /// [`Area::Unknown`].
    pub fn from_code(raw: Option<&str>) -> Self {
        raw.map(str::trim)
            .and_then(|s| s.parse::<i64>().ok())
            .map_or(Self::Unknown, Self::from_int)
    }

    /// Numeric code of this zone.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Init => 0,
            Self::TrackSensor(n @ 1..=9) => *n,
            Self::TrackSensor(_) | Self::Unknown => 99,
            Self::RaceStart => 10,
            Self::RaceEnd => 11,
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => f.write_str("GPS_INIT"),
            Self::TrackSensor(n @ 1..=9) => write!(f, "GPS_TRACKSENSOR_{n}"),
            Self::RaceStart => f.write_str("GPS_RACE_START"),
            Self::RaceEnd => f.write_str("GPS_RACE_END"),
            Self::TrackSensor(_) | Self::Unknown => f.write_str("GPS_UNKNOWN"),
        }
    }
}

impl Serialize for Area {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Area {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let area = match s.as_str() {
            "GPS_INIT" => Self::Init,
            "GPS_RACE_START" => Self::RaceStart,
            "GPS_RACE_END" => Self::RaceEnd,
            "GPS_UNKNOWN" => Self::Unknown,
            other => other
                .strip_prefix("GPS_TRACKSENSOR_")
                .and_then(|n| n.parse::<u8>().ok())
                .filter(|n| (1..=9).contains(n))
                .map(Self::TrackSensor)
                .ok_or_else(|| {
                    <D::Error as serde::de::Error>::custom(format!("unknown area: {other}"))
                })?,
        };
        Ok(area)
    }
}
