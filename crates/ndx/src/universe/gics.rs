//! GICS Level 1 sectors.
//!
//! Constituent tables carry sector labels as free text. This module maps them,
//! and the shorthand accepted on the command line, to the eleven sectors of
//! the standard.

use std::fmt;
use std::str::FromStr;

/// GICS sector; the discriminant is the 2-digit sector code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum GicsSector {
    /// Energy (10).
    Energy = 10,
    /// Materials (15).
    Materials = 15,
    /// Industrials (20).
    Industrials = 20,
    /// Consumer Discretionary (25).
    ConsumerDiscretionary = 25,
    /// Consumer Staples (30).
    ConsumerStaples = 30,
    /// Health Care (35).
    HealthCare = 35,
    /// Financials (40).
    Financials = 40,
    /// Information Technology (45).
    InformationTechnology = 45,
    /// Communication Services (50).
    CommunicationServices = 50,
    /// Utilities (55).
    Utilities = 55,
    /// Real Estate (60).
    RealEstate = 60,
}

/// Sector, label, and extra lowercase spellings (spaces removed).
const SECTORS: [(GicsSector, &str, &[&str]); 11] = [
    (GicsSector::Energy, "Energy", &[]),
    (GicsSector::Materials, "Materials", &[]),
    (GicsSector::Industrials, "Industrials", &["industrial"]),
    (GicsSector::ConsumerDiscretionary, "Consumer Discretionary", &["discretionary"]),
    (GicsSector::ConsumerStaples, "Consumer Staples", &["staples"]),
    (GicsSector::HealthCare, "Health Care", &["health"]),
    (GicsSector::Financials, "Financials", &["finance"]),
    (GicsSector::InformationTechnology, "Information Technology", &["it", "tech", "technology"]),
    (GicsSector::CommunicationServices, "Communication Services", &["communication", "comms"]),
    (GicsSector::Utilities, "Utilities", &["utility"]),
    (GicsSector::RealEstate, "Real Estate", &["estate"]),
];

/// Name or code that is not a GICS sector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised GICS sector: {0}")]
pub struct ParseSectorError(pub String);

impl GicsSector {
    /// Every sector, in code order.
    pub fn all() -> impl Iterator<Item = Self> {
        SECTORS.iter().map(|(sector, _, _)| *sector)
    }

    /// 2-digit sector code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Label as printed in constituent tables.
    pub fn name(self) -> &'static str {
        SECTORS
            .iter()
            .find(|(sector, _, _)| *sector == self)
            .map_or("", |(_, label, _)| *label)
    }

    /// Sector whose label equals `label`, ignoring case and surrounding space.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::all().find(|s| s.name().eq_ignore_ascii_case(label))
    }
}

impl FromStr for GicsSector {
    type Err = ParseSectorError;

    /// Accepts labels in any case and spacing, codes, and shorthand such as
    /// `tech` or `staples`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_lowercase().replace([' ', '-', '_'], "");

        let found = match key.parse::<u8>() {
            Ok(code) => Self::all().find(|sector| sector.code() == code),
            Err(_) => SECTORS
                .iter()
                .find(|(_, label, aliases)| {
                    label.to_lowercase().replace(' ', "") == key || aliases.contains(&key.as_str())
                })
                .map(|(sector, _, _)| *sector),
        };

        found.ok_or_else(|| ParseSectorError(s.to_string()))
    }
}

impl fmt::Display for GicsSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Information Technology", GicsSector::InformationTechnology)]
    #[case("information-technology", GicsSector::InformationTechnology)]
    #[case("tech", GicsSector::InformationTechnology)]
    #[case("Health Care", GicsSector::HealthCare)]
    #[case("staples", GicsSector::ConsumerStaples)]
    #[case("comms", GicsSector::CommunicationServices)]
    #[case("REAL_ESTATE", GicsSector::RealEstate)]
    #[case("45", GicsSector::InformationTechnology)]
    #[case("10", GicsSector::Energy)]
    fn test_parse(#[case] input: &str, #[case] expected: GicsSector) {
        assert_eq!(input.parse::<GicsSector>(), Ok(expected));
    }

    #[rstest]
    #[case("crypto")]
    #[case("99")]
    #[case("")]
    fn test_parse_rejects(#[case] input: &str) {
        assert!(input.parse::<GicsSector>().is_err());
    }

    #[test]
    fn test_codes_ascend() {
        let codes: Vec<u8> = GicsSector::all().map(GicsSector::code).collect();
        assert_eq!(codes.len(), 11);
        assert!(codes.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(GicsSector::RealEstate.code(), 60);
    }

    #[test]
    fn test_labels() {
        for sector in GicsSector::all() {
            assert!(!sector.name().is_empty());
            assert_eq!(GicsSector::from_label(sector.name()), Some(sector));
            assert_eq!(sector.to_string(), sector.name());
        }
        assert_eq!(GicsSector::from_label(" health care "), Some(GicsSector::HealthCare));
        assert_eq!(GicsSector::from_label("Technology"), None);
    }
}
