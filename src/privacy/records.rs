use std::fmt;

use chrono::Weekday;
use serde::Serialize;

/// Tariff a household is enrolled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TariffType {
    Flat,
    #[serde(rename = "TOU")]
    Tou,
    #[serde(rename = "CPP")]
    Cpp,
}

impl TariffType {
    pub const ALL: [Self; 3] = [Self::Flat, Self::Tou, Self::Cpp];
}

impl fmt::Display for TariffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => write!(f, "Flat"),
            Self::Tou => write!(f, "TOU"),
            Self::Cpp => write!(f, "CPP"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum HomeType {
    Apt,
    Detached,
    Semi,
}

impl HomeType {
    pub const ALL: [Self; 3] = [Self::Apt, Self::Detached, Self::Semi];
}

impl fmt::Display for HomeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Apt => write!(f, "Apt"),
            Self::Detached => write!(f, "Detached"),
            Self::Semi => write!(f, "Semi"),
        }
    }
}

/// Ordinal occupant-count band used to coarsen the quasi-identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum OccupancyBand {
    #[serde(rename = "1-2")]
    OneToTwo,
    #[serde(rename = "3-4")]
    ThreeToFour,
    #[serde(rename = "5+")]
    FivePlus,
}

impl OccupancyBand {
    /// Buckets an occupant count: 1–2, 3–4, 5 and above.
    ///
    /// A count of zero falls into the lowest band.
    pub fn from_occupants(occupants: u8) -> Self {
        match occupants {
            0..=2 => Self::OneToTwo,
            3..=4 => Self::ThreeToFour,
            _ => Self::FivePlus,
        }
    }
}

impl fmt::Display for OccupancyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneToTwo => write!(f, "1-2"),
            Self::ThreeToFour => write!(f, "3-4"),
            Self::FivePlus => write!(f, "5+"),
        }
    }
}

/// One household-day record.
///
/// Real records carry a household id; synthetic records do not, since they
/// need not correspond to any real household.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntheticRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub household_id: Option<u32>,
    /// Day index within the week (1–7).
    pub day: u8,
    /// Total consumption for the day (kWh).
    pub total_kwh: f64,
    pub weekday: Weekday,
    pub tariff_type: TariffType,
    pub occupants: u8,
    pub home_type: HomeType,
}

impl SyntheticRecord {
    pub fn occupancy_band(&self) -> OccupancyBand {
        OccupancyBand::from_occupants(self.occupants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupancy_bands() {
        assert_eq!(OccupancyBand::from_occupants(1), OccupancyBand::OneToTwo);
        assert_eq!(OccupancyBand::from_occupants(2), OccupancyBand::OneToTwo);
        assert_eq!(OccupancyBand::from_occupants(3), OccupancyBand::ThreeToFour);
        assert_eq!(OccupancyBand::from_occupants(4), OccupancyBand::ThreeToFour);
        assert_eq!(OccupancyBand::from_occupants(5), OccupancyBand::FivePlus);
        assert_eq!(OccupancyBand::from_occupants(9), OccupancyBand::FivePlus);
    }

    #[test]
    fn labels_match_source_categories() {
        assert_eq!(TariffType::Tou.to_string(), "TOU");
        assert_eq!(OccupancyBand::FivePlus.to_string(), "5+");
        assert_eq!(HomeType::Semi.to_string(), "Semi");
    }
}
