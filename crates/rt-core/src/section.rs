//! Course sections reported by the ride controller.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical phase of a ride, as labelled in the telemetry `section` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Entering,
    Downhill,
    UphillStandby,
    Uphill,
    UphillSlowdown,
    LandingIc,
    Landing,
    Garage,
    /// Boarding approach. Entering this section starts a new race.
    BoardingIc,
    Boarding,
    /// Fallback for labels outside the known set.
    Unknown,
}

impl Section {
    /// Every known section, excluding `Unknown`.
    pub const KNOWN: [Self; 10] = [
        Self::Entering,
        Self::Downhill,
        Self::UphillStandby,
        Self::Uphill,
        Self::UphillSlowdown,
        Self::LandingIc,
        Self::Landing,
        Self::Garage,
        Self::BoardingIc,
        Self::Boarding,
    ];

    /// Label used in telemetry logs and reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Entering => "ENTERING",
            Self::Downhill => "DOWNHILL",
            Self::UphillStandby => "UPHILL_STANDBY",
            Self::Uphill => "UPHILL",
            Self::UphillSlowdown => "UPHILL_SLOWDOWN",
            Self::LandingIc => "LANDING_IC",
            Self::Landing => "LANDING",
            Self::Garage => "GARAGE",
            Self::BoardingIc => "BOARDING_IC",
            Self::Boarding => "BOARDING",
            Self::Unknown => "SECTION_UNKNOWN",
        }
    }

    /// Numeric code used by the controller firmware.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Entering => 0,
            Self::Downhill => 1,
            Self::UphillStandby => 2,
            Self::Uphill => 3,
            Self::UphillSlowdown => 4,
            Self::LandingIc => 5,
            Self::Landing => 6,
            Self::Garage => 7,
            Self::BoardingIc => 8,
            Self::Boarding => 9,
            Self::Unknown => 99,
        }
    }

    /// Lenient lookup used while scanning rows.
    ///
    /// Surrounding whitespace is ignored; anything that is not an exact label
    /// maps to [`Section::Unknown`].
    pub fn from_label(label: &str) -> Self {
        label.trim().parse().unwrap_or(Self::Unknown)
    }

    /// Whether this is the boarding-approach section that opens a race.
    #[must_use]
    pub const fn is_boarding_approach(&self) -> bool {
        matches!(self, Self::BoardingIc)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::KNOWN
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

impl Serialize for Section {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Section {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s == Self::Unknown.as_str() {
            return Ok(Self::Unknown);
        }
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for section labels outside the known set.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown section: {0}")]
pub struct UnknownSection(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_labels() {
        for section in Section::KNOWN {
            let parsed: Section = section.to_string().parse().expect("should parse");
            assert_eq!(parsed, section, "roundtrip failed for {section:?}");
        }
    }

    #[test]
    fn from_label_trims_whitespace() {
        assert_eq!(Section::from_label("  DOWNHILL \t"), Section::Downhill);
    }

    #[test]
    fn from_label_is_case_sensitive() {
        assert_eq!(Section::from_label("downhill"), Section::Unknown);
    }

    #[test]
    fn garbage_is_unknown() {
        assert_eq!(Section::from_label("garbage"), Section::Unknown);
        assert_eq!(Section::from_label(""), Section::Unknown);
    }

    #[test]
    fn unknown_label_is_not_parseable_strictly() {
        let err = "SECTION_UNKNOWN".parse::<Section>().unwrap_err();
        assert_eq!(err.to_string(), "unknown section: SECTION_UNKNOWN");
    }

    #[test]
    fn unknown_deserializes_from_its_label() {
        let section: Section = serde_json::from_str("\"SECTION_UNKNOWN\"").unwrap();
        assert_eq!(section, Section::Unknown);
    }

    #[test]
    fn codes_match_controller_numbering() {
        assert_eq!(Section::Entering.code(), 0);
        assert_eq!(Section::BoardingIc.code(), 8);
        assert_eq!(Section::Unknown.code(), 99);
    }

    #[test]
    fn only_boarding_ic_is_boarding_approach() {
        let approaches: Vec<_> = Section::KNOWN
            .into_iter()
            .filter(Section::is_boarding_approach)
            .collect();
        assert_eq!(approaches, vec![Section::BoardingIc]);
    }
}
