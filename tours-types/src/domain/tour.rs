//! Tour domain model.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::error::DomainError;

/// Unique identifier for a Tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct TourId(pub i64);

impl TourId {
    /// Returns the raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TourId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TourId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// How demanding a tour is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Difficulty {
    Easy,
    Medium,
    Difficult,
    Varies,
}

impl Difficulty {
    /// Variant name, as persisted.
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Difficult => "Difficult",
            Difficulty::Varies => "Varies",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Easy" => Ok(Difficulty::Easy),
            "Medium" => Ok(Difficulty::Medium),
            "Difficult" => Ok(Difficulty::Difficult),
            "Varies" => Ok(Difficulty::Varies),
            other => Err(DomainError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// Geographic region a tour runs in. Serialized and persisted by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Region {
    #[serde(rename = "Central Coast")]
    CentralCoast,
    #[serde(rename = "Southern California")]
    SouthernCalifornia,
    #[serde(rename = "Northern California")]
    NorthernCalifornia,
    #[serde(rename = "Varies")]
    Varies,
}

impl Region {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Region::CentralCoast => "Central Coast",
            Region::SouthernCalifornia => "Southern California",
            Region::NorthernCalifornia => "Northern California",
            Region::Varies => "Varies",
        }
    }

    /// Looks a region up by its label.
    pub fn find_by_label(label: &str) -> Result<Self, DomainError> {
        [
            Region::CentralCoast,
            Region::SouthernCalifornia,
            Region::NorthernCalifornia,
            Region::Varies,
        ]
        .into_iter()
        .find(|r| r.label() == label)
        .ok_or_else(|| DomainError::UnknownRegion(label.to_string()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A bookable tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Tour {
    pub id: TourId,
    #[schema(example = "Big Sur Retreat")]
    pub title: String,
    pub description: String,
    /// Price in whole currency units
    #[schema(example = 750)]
    pub price: i64,
    #[schema(example = "3 days")]
    pub duration: String,
    /// Code of the tour package this tour belongs to
    #[schema(example = "BC")]
    pub package_code: String,
    pub difficulty: Difficulty,
    pub region: Region,
}

impl Tour {
    /// Checks the invariants a tour must satisfy before it is stored.
    pub fn validate(title: &str, price: i64) -> Result<(), DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Tour title cannot be empty".into(),
            ));
        }
        if price < 0 {
            return Err(DomainError::ValidationError(
                "Tour price cannot be negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_label_roundtrip() {
        for region in [
            Region::CentralCoast,
            Region::SouthernCalifornia,
            Region::NorthernCalifornia,
            Region::Varies,
        ] {
            assert_eq!(Region::find_by_label(region.label()).unwrap(), region);
        }
    }

    #[test]
    fn test_unknown_region() {
        let result = Region::find_by_label("Nevada");
        assert!(matches!(result, Err(DomainError::UnknownRegion(_))));
    }

    #[test]
    fn test_region_serializes_as_label() {
        let json = serde_json::to_string(&Region::CentralCoast).unwrap();
        assert_eq!(json, "\"Central Coast\"");
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("Difficult".parse::<Difficulty>().unwrap(), Difficulty::Difficult);
        assert!(matches!(
            "Extreme".parse::<Difficulty>(),
            Err(DomainError::UnknownDifficulty(_))
        ));
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let result = Tour::validate("  ", 100);
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let result = Tour::validate("Hike", -1);
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }
}
