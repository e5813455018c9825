use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EstimateError, Result};

/// The three categorical inputs of a prediction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CategoryField {
    Orbit,
    Rocket,
    Fuel,
}

impl CategoryField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Orbit => "orbit",
            Self::Rocket => "rocket",
            Self::Fuel => "fuel",
        }
    }
}

impl fmt::Display for CategoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A categorical input with a closed set of labels.
///
/// Labels are matched exactly as the input widgets offer them. There is no
/// fallback: anything outside [`Category::ALL`] is an `UnknownCategory` error.
pub trait Category: Copy + Eq + fmt::Debug + 'static {
    const FIELD: CategoryField;
    /// Every choice, in the order the input widget lists them.
    const ALL: [Self; 3];

    fn label(self) -> &'static str;

    /// Position of this choice within [`Category::ALL`].
    fn index(self) -> usize;

    fn from_label(label: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == label)
            .ok_or_else(|| EstimateError::UnknownCategory {
                field: Self::FIELD,
                label: label.to_string(),
            })
    }

    fn labels() -> [&'static str; 3] {
        Self::ALL.map(Self::label)
    }
}

/// Target orbit of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orbit {
    Leo,
    Meo,
    Geo,
}

impl Category for Orbit {
    const FIELD: CategoryField = CategoryField::Orbit;
    const ALL: [Self; 3] = [Self::Leo, Self::Meo, Self::Geo];

    fn label(self) -> &'static str {
        match self {
            Self::Leo => "LEO",
            Self::Meo => "MEO",
            Self::Geo => "GEO",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Launch vehicle size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RocketClass {
    Light,
    Medium,
    Heavy,
}

impl Category for RocketClass {
    const FIELD: CategoryField = CategoryField::Rocket;
    const ALL: [Self; 3] = [Self::Light, Self::Medium, Self::Heavy];

    fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Medium => "Medium",
            Self::Heavy => "Heavy",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Propellant type of the launch vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuelType {
    Solid,
    Liquid,
    Cryogenic,
}

impl Category for FuelType {
    const FIELD: CategoryField = CategoryField::Fuel;
    const ALL: [Self; 3] = [Self::Solid, Self::Liquid, Self::Cryogenic];

    fn label(self) -> &'static str {
        match self {
            Self::Solid => "Solid",
            Self::Liquid => "Liquid",
            Self::Cryogenic => "Cryogenic",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_label() {
        for orbit in Orbit::ALL {
            assert_eq!(Orbit::from_label(orbit.label()), Ok(orbit));
        }
        for rocket in RocketClass::ALL {
            assert_eq!(RocketClass::from_label(rocket.label()), Ok(rocket));
        }
        for fuel in FuelType::ALL {
            assert_eq!(FuelType::from_label(fuel.label()), Ok(fuel));
        }
    }

    #[test]
    fn index_matches_position_in_all() {
        for (i, fuel) in FuelType::ALL.into_iter().enumerate() {
            assert_eq!(fuel.index(), i);
        }
    }

    #[test]
    fn from_label_is_case_sensitive() {
        let err = Orbit::from_label("leo").unwrap_err();
        assert_eq!(
            err,
            EstimateError::UnknownCategory {
                field: CategoryField::Orbit,
                label: "leo".to_string(),
            }
        );
    }

    #[test]
    fn from_label_rejects_empty_label() {
        assert!(RocketClass::from_label("").is_err());
    }
}
