use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryField, FuelType, Orbit, RocketClass};

/// Number of distinct codes a categorical field can take.
pub const CODE_COUNT: u8 = 3;

/// Label-to-code table for the three categorical inputs.
///
/// The default table is the one the bundled models were fit with:
///
/// | orbit | rocket | fuel      | code |
/// |-------|--------|-----------|------|
/// | LEO   | Light  | Solid     | 0    |
/// | MEO   | Medium | Liquid    | 1    |
/// | GEO   | Heavy  | Cryogenic | 2    |
///
/// A model artifact may carry its own table. Any table that gets constructed
/// is total over every label of every field, assigns codes in
/// `0..CODE_COUNT`, and never shares a code between two labels of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEncodingTable", into = "RawEncodingTable")]
pub struct EncodingTable {
    orbit: [u8; 3],
    rocket: [u8; 3],
    fuel: [u8; 3],
}

impl Default for EncodingTable {
    fn default() -> Self {
        Self {
            orbit: [0, 1, 2],
            rocket: [0, 1, 2],
            fuel: [0, 1, 2],
        }
    }
}

impl EncodingTable {
    pub fn orbit_code(&self, orbit: Orbit) -> u8 {
        self.orbit[orbit.index()]
    }

    pub fn rocket_code(&self, rocket: RocketClass) -> u8 {
        self.rocket[rocket.index()]
    }

    pub fn fuel_code(&self, fuel: FuelType) -> u8 {
        self.fuel[fuel.index()]
    }

    /// Label/code pairs for a field, in widget order.
    pub fn entries(&self, field: CategoryField) -> Vec<(&'static str, u8)> {
        match field {
            CategoryField::Orbit => zip_codes::<Orbit>(&self.orbit),
            CategoryField::Rocket => zip_codes::<RocketClass>(&self.rocket),
            CategoryField::Fuel => zip_codes::<FuelType>(&self.fuel),
        }
    }
}

fn zip_codes<C: Category>(codes: &[u8; 3]) -> Vec<(&'static str, u8)> {
    C::labels().into_iter().zip(codes.iter().copied()).collect()
}

/// Wire form of [`EncodingTable`]: one `label -> code` map per field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEncodingTable {
    pub orbit: BTreeMap<String, u8>,
    pub rocket: BTreeMap<String, u8>,
    pub fuel: BTreeMap<String, u8>,
}

impl TryFrom<RawEncodingTable> for EncodingTable {
    type Error = String;

    fn try_from(raw: RawEncodingTable) -> Result<Self, Self::Error> {
        Ok(Self {
            orbit: codes_for::<Orbit>(&raw.orbit)?,
            rocket: codes_for::<RocketClass>(&raw.rocket)?,
            fuel: codes_for::<FuelType>(&raw.fuel)?,
        })
    }
}

impl From<EncodingTable> for RawEncodingTable {
    fn from(table: EncodingTable) -> Self {
        let to_map = |field| -> BTreeMap<String, u8> {
            table
                .entries(field)
                .into_iter()
                .map(|(label, code)| (label.to_string(), code))
                .collect()
        };
        Self {
            orbit: to_map(CategoryField::Orbit),
            rocket: to_map(CategoryField::Rocket),
            fuel: to_map(CategoryField::Fuel),
        }
    }
}

fn codes_for<C: Category>(map: &BTreeMap<String, u8>) -> Result<[u8; 3], String> {
    let field = C::FIELD;

    if let Some(extra) = map.keys().find(|label| C::from_label(label).is_err()) {
        return Err(format!("{field} encoding has unexpected label {extra:?}"));
    }

    let mut codes = [0u8; 3];
    let mut seen = [false; CODE_COUNT as usize];
    for category in C::ALL {
        let label = category.label();
        let code = *map
            .get(label)
            .ok_or_else(|| format!("{field} encoding is missing label {label:?}"))?;
        if code >= CODE_COUNT {
            return Err(format!(
                "{field} encoding maps {label:?} to {code}, expected 0..{CODE_COUNT}"
            ));
        }
        if std::mem::replace(&mut seen[code as usize], true) {
            return Err(format!("{field} encoding reuses code {code}"));
        }
        codes[category.index()] = code;
    }
    Ok(codes)
}
