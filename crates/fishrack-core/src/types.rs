//! Domain types: racks, tanks and fish subdivisions
//!
//! Wire names follow the REST service (`rows`, `columns`, `row_configs`).
//! Deserialization is lenient where the service is known to be loose
//! (numeric strings, `null` collections, mixed-case enums) so one bad field
//! never hides a whole rack.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::position;

// ─────────────────────────────────────────────────────────────────
// Identifiers
// ─────────────────────────────────────────────────────────────────

/// Server-assigned rack identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RackId(pub u64);

impl fmt::Display for RackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-assigned tank identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TankId(pub u64);

impl fmt::Display for TankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─────────────────────────────────────────────────────────────────
// Tank Size
// ─────────────────────────────────────────────────────────────────

/// Physical tank size. `Large` tanks span two horizontally adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TankSize {
    Small,
    #[default]
    Regular,
    Large,
}

impl TankSize {
    pub const ALL: [TankSize; 3] = [TankSize::Small, TankSize::Regular, TankSize::Large];

    /// Canonicalize a raw size string. Case-insensitive, surrounding
    /// whitespace ignored. This is the only place size text is interpreted.
    pub fn parse(raw: &str) -> Option<TankSize> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SMALL" => Some(TankSize::Small),
            "REGULAR" => Some(TankSize::Regular),
            "LARGE" => Some(TankSize::Large),
            _ => None,
        }
    }

    /// Canonicalize an optional raw size, defaulting to `Regular`
    pub fn canonicalize(raw: Option<&str>) -> TankSize {
        raw.and_then(TankSize::parse).unwrap_or_default()
    }

    /// Upper-case wire form
    pub fn as_str(&self) -> &'static str {
        match self {
            TankSize::Small => "SMALL",
            TankSize::Regular => "REGULAR",
            TankSize::Large => "LARGE",
        }
    }

    /// Number of horizontally adjacent cells the tank occupies
    pub fn cells(&self) -> u32 {
        match self {
            TankSize::Large => 2,
            TankSize::Small | TankSize::Regular => 1,
        }
    }

    pub fn is_large(&self) -> bool {
        matches!(self, TankSize::Large)
    }

    /// Next size in display order, wrapping around
    pub fn next(&self) -> TankSize {
        match self {
            TankSize::Small => TankSize::Regular,
            TankSize::Regular => TankSize::Large,
            TankSize::Large => TankSize::Small,
        }
    }
}

impl fmt::Display for TankSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TankSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TankSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        if let Some(text) = raw.as_deref() {
            if TankSize::parse(text).is_none() {
                tracing::warn!("Unknown tank size {:?}, treating as REGULAR", text);
            }
        }
        Ok(TankSize::canonicalize(raw.as_deref()))
    }
}

// ─────────────────────────────────────────────────────────────────
// Gender
// ─────────────────────────────────────────────────────────────────

/// Gender or age class of a subdivision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Larvae,
    Juvenile,
}

impl Gender {
    pub const ALL: [Gender; 4] = [Gender::Male, Gender::Female, Gender::Larvae, Gender::Juvenile];

    pub fn parse(raw: &str) -> Option<Gender> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "MALE" => Some(Gender::Male),
            "FEMALE" => Some(Gender::Female),
            "LARVAE" => Some(Gender::Larvae),
            "JUVENILE" => Some(Gender::Juvenile),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Larvae => "LARVAE",
            Gender::Juvenile => "JUVENILE",
        }
    }

    /// Single-letter abbreviation used in cell summaries
    pub fn initial(&self) -> char {
        match self {
            Gender::Male => 'M',
            Gender::Female => 'F',
            Gender::Larvae => 'L',
            Gender::Juvenile => 'J',
        }
    }

    pub fn next(&self) -> Gender {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Larvae,
            Gender::Larvae => Gender::Juvenile,
            Gender::Juvenile => Gender::Male,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Gender {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(Gender::Male),
            Some(text) => Gender::parse(&text)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown gender: {text}"))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Subdivision / Tank / Rack
// ─────────────────────────────────────────────────────────────────

/// A count of fish of one gender/age class within a tank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subdivision {
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub count: u32,
}

impl Subdivision {
    pub fn new(gender: Gender, count: u32) -> Self {
        Self { gender, count }
    }
}

impl Default for Subdivision {
    fn default() -> Self {
        Self::new(Gender::Male, 0)
    }
}

/// A housing unit occupying one or two cells of a rack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tank {
    pub id: TankId,
    /// Cell label such as `B3`. Some call sites store a display range
    /// (`B3-B4`) for large tanks; only the first segment is meaningful.
    pub position: String,
    #[serde(default)]
    pub size: TankSize,
    #[serde(default)]
    pub line: Option<String>,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rack_id: Option<RackId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subdivisions: Vec<Subdivision>,
}

impl Tank {
    /// The label of the cell this tank is anchored at
    pub fn primary_label(&self) -> &str {
        position::primary_label(&self.position)
    }

    /// Position as displayed, e.g. `A2-A3` for a large tank at `A2`
    pub fn display_label(&self) -> String {
        position::format_range(self.primary_label(), self.size)
    }

    /// Total number of fish across all subdivisions
    pub fn fish_count(&self) -> u64 {
        self.subdivisions.iter().map(|s| u64::from(s.count)).sum()
    }
}

/// Per-row column-count exceptions, keyed by 0-based row index.
///
/// Only positive counts are ever stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RowOverrides(BTreeMap<u32, u32>);

impl RowOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column count override for `row`, if any
    pub fn get(&self, row: u32) -> Option<u32> {
        self.0.get(&row).copied()
    }

    /// Insert an override. Zero counts are not representable and remove
    /// the entry instead.
    pub fn insert(&mut self, row: u32, columns: u32) {
        if columns == 0 {
            self.0.remove(&row);
        } else {
            self.0.insert(row, columns);
        }
    }

    pub fn remove(&mut self, row: u32) -> Option<u32> {
        self.0.remove(&row)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.0.iter().map(|(r, c)| (*r, *c))
    }

    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.values().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(u32, u32)> for RowOverrides {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        let mut overrides = RowOverrides::new();
        for (row, columns) in iter {
            overrides.insert(row, columns);
        }
        overrides
    }
}

impl<'de> Deserialize<'de> for RowOverrides {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
        let mut overrides = RowOverrides::new();
        for (key, value) in raw {
            match (key.trim().parse::<u32>(), positive_count(&value)) {
                (Ok(row), Some(columns)) => overrides.insert(row, columns),
                _ => tracing::debug!("Dropping invalid row override {:?} => {}", key, value),
            }
        }
        Ok(overrides)
    }
}

/// A storage rack: a grid of tank slots with optional per-row widths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rack {
    pub id: RackId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lab_id: Option<String>,
    #[serde(rename = "rows", default, deserialize_with = "lenient_u32")]
    pub row_count: u32,
    #[serde(rename = "columns", default, deserialize_with = "lenient_u32")]
    pub default_column_count: u32,
    #[serde(rename = "row_configs", default)]
    pub row_overrides: RowOverrides,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility_id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tanks: Vec<Tank>,
}

impl Rack {
    pub fn new(id: RackId, name: impl Into<String>, rows: u32, columns: u32) -> Self {
        Self {
            id,
            name: name.into(),
            lab_id: None,
            row_count: rows,
            default_column_count: columns,
            row_overrides: RowOverrides::new(),
            facility_id: None,
            tanks: Vec::new(),
        }
    }

    pub fn with_override(mut self, row: u32, columns: u32) -> Self {
        self.row_overrides.insert(row, columns);
        self
    }

    pub fn with_tank(mut self, tank: Tank) -> Self {
        self.tanks.push(tank);
        self
    }

    pub fn tank(&self, id: TankId) -> Option<&Tank> {
        self.tanks.iter().find(|t| t.id == id)
    }
}

// ─────────────────────────────────────────────────────────────────
// Lenient field helpers
// ─────────────────────────────────────────────────────────────────

/// Interpret a JSON value as a positive integer column count.
///
/// Accepts integers, integral floats and numeric strings.
pub fn positive_count(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => match n.as_u64() {
            Some(v) => v,
            None => {
                let f = n.as_f64()?;
                if f.fract() != 0.0 || f < 0.0 {
                    return None;
                }
                f as u64
            }
        },
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    u32::try_from(n).ok().filter(|v| *v > 0)
}

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()).unwrap_or(0),
        Value::String(s) => s.trim().parse::<u32>().unwrap_or(0),
        _ => 0,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_parse_is_case_insensitive() {
        assert_eq!(TankSize::parse("large"), Some(TankSize::Large));
        assert_eq!(TankSize::parse(" Regular "), Some(TankSize::Regular));
        assert_eq!(TankSize::parse("SMALL"), Some(TankSize::Small));
        assert_eq!(TankSize::parse("huge"), None);
        assert_eq!(TankSize::canonicalize(None), TankSize::Regular);
    }

    #[test]
    fn test_rack_deserializes_server_payload() {
        let json = r##"{
            "id": 7,
            "name": "Rack A",
            "lab_id": "Lab-1",
            "rows": 3,
            "columns": "5",
            "row_configs": {"1": 8, "2": "4", "x": 3, "0": -1, "3": 2.5},
            "facility_id": 2,
            "tanks": [
                {"id": 1, "position": "A1", "size": "regular", "line": "AB",
                 "dob": "2024-01-05", "color": "#bbdefb", "rack_id": 7,
                 "subdivisions": [{"id": 4, "tank_id": 1, "gender": "female", "count": 12}]},
                {"id": 2, "position": "A2-A3", "size": null, "subdivisions": null}
            ]
        }"##;
        let rack: Rack = serde_json::from_str(json).unwrap();

        assert_eq!(rack.row_count, 3);
        assert_eq!(rack.default_column_count, 5);
        assert_eq!(rack.row_overrides.get(1), Some(8));
        assert_eq!(rack.row_overrides.get(2), Some(4));
        assert_eq!(rack.row_overrides.get(0), None);
        assert_eq!(rack.row_overrides.len(), 2);

        let first = &rack.tanks[0];
        assert_eq!(first.size, TankSize::Regular);
        assert_eq!(first.dob, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(first.subdivisions[0].gender, Gender::Female);
        assert_eq!(first.subdivisions[0].count, 12);

        let second = &rack.tanks[1];
        assert_eq!(second.size, TankSize::Regular);
        assert!(second.subdivisions.is_empty());
        assert_eq!(second.primary_label(), "A2");
    }

    #[test]
    fn test_null_row_configs_is_empty() {
        let rack: Rack =
            serde_json::from_str(r#"{"id": 1, "rows": 2, "columns": 3, "row_configs": null}"#)
                .unwrap();
        assert!(rack.row_overrides.is_empty());
        assert!(rack.tanks.is_empty());
    }

    #[test]
    fn test_row_overrides_serialize_with_string_keys() {
        let overrides: RowOverrides = [(0, 5), (2, 7)].into_iter().collect();
        let json = serde_json::to_value(&overrides).unwrap();
        assert_eq!(json, serde_json::json!({"0": 5, "2": 7}));
    }

    #[test]
    fn test_row_overrides_insert_zero_removes() {
        let mut overrides = RowOverrides::new();
        overrides.insert(1, 4);
        overrides.insert(1, 0);
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_unknown_gender_is_rejected() {
        let result: Result<Subdivision, _> =
            serde_json::from_str(r#"{"gender": "unicorn", "count": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_size_serializes_upper_case() {
        let json = serde_json::to_string(&TankSize::Large).unwrap();
        assert_eq!(json, "\"LARGE\"");
    }

    #[test]
    fn test_positive_count() {
        assert_eq!(positive_count(&serde_json::json!(5)), Some(5));
        assert_eq!(positive_count(&serde_json::json!("6")), Some(6));
        assert_eq!(positive_count(&serde_json::json!(4.0)), Some(4));
        assert_eq!(positive_count(&serde_json::json!(0)), None);
        assert_eq!(positive_count(&serde_json::json!(-2)), None);
        assert_eq!(positive_count(&serde_json::json!("abc")), None);
        assert_eq!(positive_count(&serde_json::json!(2.5)), None);
    }
}
