//! Farm Data Model
//!
//! Plants, environment snapshots, crop entries and farms. All of these are
//! immutable value objects built by the caller for each calculation; nothing
//! in the crate mutates them.
//!
//! Field names serialize in camelCase (`salePrice`, `numCrops`,
//! `environmentFactors`) so fixtures can be written as plain JSON.

use rustc_hash::FxHashMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Level name → signed percentage adjustment (e.g. "high" → 50)
pub type LevelTable = FxHashMap<String, i32>;

/// Factor name → level table (e.g. "sun" → {low: -50, medium: 0, high: 50})
pub type FactorTable = FxHashMap<String, LevelTable>;

/// Static species definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub name: String,

    /// Kilos produced per plant under baseline conditions
    #[serde(rename = "yield")]
    pub base_yield: f64,

    /// Revenue per kilogram sold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,

    /// Environmental sensitivity. Factors missing here do not affect the plant.
    #[serde(default)]
    pub factors: FactorTable,
}

impl Plant {
    pub fn new(name: impl Into<String>, base_yield: f64) -> Self {
        Self {
            name: name.into(),
            base_yield,
            sale_price: None,
            factors: FactorTable::default(),
        }
    }

    pub fn with_sale_price(mut self, sale_price: f64) -> Self {
        self.sale_price = Some(sale_price);
        self
    }

    /// Register a factor with its level percentages, replacing any previous table
    ///
    /// ```
    /// use farm_yield::Plant;
    ///
    /// let corn = Plant::new("corn", 30.0)
    ///     .with_factor("sun", [("low", -50), ("medium", 0), ("high", 50)]);
    /// assert_eq!(corn.factors["sun"]["high"], 50);
    /// ```
    pub fn with_factor<F, L, I>(mut self, factor: F, levels: I) -> Self
    where
        F: Into<String>,
        L: Into<String>,
        I: IntoIterator<Item = (L, i32)>,
    {
        let table: LevelTable = levels
            .into_iter()
            .map(|(level, pct)| (level.into(), pct))
            .collect();
        self.factors.insert(factor.into(), table);
        self
    }

    /// Whether this plant reacts to the named factor at all
    pub fn responds_to(&self, factor: &str) -> bool {
        self.factors.contains_key(factor)
    }
}

/// Environmental conditions in effect for one evaluation
///
/// Keeps insertion order: yield adjustments compound in the order the
/// factors were supplied. Setting a factor that is already present
/// replaces its level without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentFactors {
    // Most snapshots name only a handful of factors
    entries: SmallVec<[(String, String); 4]>,
}

impl EnvironmentFactors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the level for a factor, returning the previous level if any
    pub fn set(&mut self, factor: impl Into<String>, level: impl Into<String>) -> Option<String> {
        let factor = factor.into();
        let level = level.into();

        match self.entries.iter_mut().find(|(name, _)| *name == factor) {
            Some((_, existing)) => Some(std::mem::replace(existing, level)),
            None => {
                self.entries.push((factor, level));
                None
            }
        }
    }

    /// Builder-style `set`
    pub fn with(mut self, factor: impl Into<String>, level: impl Into<String>) -> Self {
        self.set(factor, level);
        self
    }

    pub fn get(&self, factor: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == factor)
            .map(|(_, level)| level.as_str())
    }

    /// (factor, level) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(factor, level)| (factor.as_str(), level.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<F, L> FromIterator<(F, L)> for EnvironmentFactors
where
    F: Into<String>,
    L: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (F, L)>>(iter: I) -> Self {
        let mut env = Self::new();
        for (factor, level) in iter {
            env.set(factor, level);
        }
        env
    }
}

impl Serialize for EnvironmentFactors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (factor, level) in &self.entries {
            map.serialize_entry(factor, level)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EnvironmentFactors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EnvironmentVisitor)
    }
}

/// Reads map entries in document order
struct EnvironmentVisitor;

impl<'de> Visitor<'de> for EnvironmentVisitor {
    type Value = EnvironmentFactors;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of factor name to level name")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut env = EnvironmentFactors::new();
        while let Some((factor, level)) = access.next_entry::<String, String>()? {
            env.set(factor, level);
        }
        Ok(env)
    }
}

/// A homogeneous planting: `num_crops` plants of one species
///
/// The count is a whole number of plants. Fractional or negative
/// `numCrops` values are rejected when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropEntry {
    pub crop: Arc<Plant>,
    pub num_crops: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_factors: Option<EnvironmentFactors>,
}

impl CropEntry {
    pub fn new(crop: Arc<Plant>, num_crops: u32) -> Self {
        Self {
            crop,
            num_crops,
            environment_factors: None,
        }
    }

    pub fn with_environment(mut self, environment: EnvironmentFactors) -> Self {
        self.environment_factors = Some(environment);
        self
    }
}

/// Ordered collection of crop entries. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Farm {
    pub crops: Vec<CropEntry>,
}

impl Farm {
    pub fn new(crops: Vec<CropEntry>) -> Self {
        Self { crops }
    }

    pub fn push(&mut self, entry: CropEntry) {
        self.crops.push(entry);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CropEntry> {
        self.crops.iter()
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

impl FromIterator<CropEntry> for Farm {
    fn from_iter<I: IntoIterator<Item = CropEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Farm {
    type Item = &'a CropEntry;
    type IntoIter = std::slice::Iter<'a, CropEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.crops.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_keeps_insertion_order() {
        let env = EnvironmentFactors::new()
            .with("wind", "low")
            .with("sun", "high")
            .with("soil", "good");

        let factors: Vec<&str> = env.iter().map(|(f, _)| f).collect();
        assert_eq!(factors, vec!["wind", "sun", "soil"]);
    }

    #[test]
    fn test_environment_set_replaces_in_place() {
        let mut env = EnvironmentFactors::new().with("sun", "low").with("wind", "low");

        let previous = env.set("sun", "high");
        assert_eq!(previous.as_deref(), Some("low"));
        assert_eq!(env.len(), 2);
        assert_eq!(env.iter().next(), Some(("sun", "high")));
    }

    #[test]
    fn test_environment_json_order_preserved() {
        let json = r#"{"soil": "good", "sun": "high", "wind": "low"}"#;
        let env: EnvironmentFactors = serde_json::from_str(json).unwrap();

        let pairs: Vec<(&str, &str)> = env.iter().collect();
        assert_eq!(pairs, vec![("soil", "good"), ("sun", "high"), ("wind", "low")]);

        let back = serde_json::to_string(&env).unwrap();
        assert_eq!(back, r#"{"soil":"good","sun":"high","wind":"low"}"#);
    }

    #[test]
    fn test_plant_from_fixture_json() {
        let json = r#"{
            "name": "corn",
            "yield": 3,
            "salePrice": 5,
            "factors": {
                "sun": {"low": -50, "medium": 0, "high": 50}
            }
        }"#;

        let corn: Plant = serde_json::from_str(json).unwrap();
        assert_eq!(corn.base_yield, 3.0);
        assert_eq!(corn.sale_price, Some(5.0));
        assert!(corn.responds_to("sun"));
        assert!(!corn.responds_to("wind"));
        assert_eq!(corn.factors["sun"]["low"], -50);
    }

    #[test]
    fn test_plant_without_optional_fields() {
        let pumpkin: Plant = serde_json::from_str(r#"{"name": "pumpkin", "yield": 4}"#).unwrap();
        assert_eq!(pumpkin.sale_price, None);
        assert!(pumpkin.factors.is_empty());
    }

    #[test]
    fn test_farm_push_keeps_order_and_duplicates() {
        let corn = Arc::new(Plant::new("corn", 3.0));
        let mut farm = Farm::default();
        farm.push(CropEntry::new(corn.clone(), 5));
        farm.push(CropEntry::new(Arc::new(Plant::new("pumpkin", 4.0)), 2));
        farm.push(CropEntry::new(corn, 5));

        let names: Vec<&str> = farm.iter().map(|e| e.crop.name.as_str()).collect();
        assert_eq!(names, vec!["corn", "pumpkin", "corn"]);
        assert_eq!(farm.len(), 3);
    }

    #[test]
    fn test_fractional_num_crops_rejected() {
        let json = r#"{"crop": {"name": "corn", "yield": 3}, "numCrops": 2.5}"#;
        assert!(serde_json::from_str::<CropEntry>(json).is_err());
    }

    #[test]
    fn test_crop_entry_requires_num_crops() {
        let json = r#"{"crop": {"name": "corn", "yield": 3}}"#;
        let result: Result<CropEntry, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
