//! In-memory car catalog
//!
//! The catalog is loaded once at startup and never mutated. Distinct
//! brand/model/location vocabularies are derived at load time and reused
//! by every request.

pub mod region;

use crate::error::{CarFinderError, Result};
use crate::text::normalize;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Powertrain variants recognized by search and recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Powertrain {
    Electric,
    Hybrid,
    Flex,
    Gasoline,
    Diesel,
}

impl Powertrain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electric => "electric",
            Self::Hybrid => "hybrid",
            Self::Flex => "flex",
            Self::Gasoline => "gasoline",
            Self::Diesel => "diesel",
        }
    }
}

/// Body style variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Hatch,
    Sedan,
    Suv,
}

impl Body {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hatch => "hatch",
            Self::Sedan => "sedan",
            Self::Suv => "suv",
        }
    }
}

/// The four fixed camera angles shipped per car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarImages {
    pub quarter: String,
    pub side: String,
    pub back: String,
    pub interior: String,
}

/// A single catalog entry. Field names mirror the upstream JSON asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarRecord {
    /// Brand, e.g. "Honda"
    #[serde(rename = "Name")]
    pub name: String,

    /// Model, e.g. "Civic"
    #[serde(rename = "Model")]
    pub model: String,

    #[serde(rename = "Images")]
    pub images: CarImages,

    /// Price in whole BRL
    #[serde(rename = "Price")]
    pub price: u32,

    /// Free-text city/state
    #[serde(rename = "Location")]
    pub location: String,

    #[serde(rename = "Powertrain", skip_serializing_if = "Option::is_none")]
    pub powertrain: Option<Powertrain>,

    #[serde(rename = "Body", skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,

    #[serde(rename = "Seats", skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,

    #[serde(rename = "TrunkLiters", skip_serializing_if = "Option::is_none")]
    pub trunk_liters: Option<u32>,

    #[serde(rename = "Tags", default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl CarRecord {
    /// Dedup identity: brand+model is not globally unique, so location and
    /// price are part of the key.
    pub fn identity_key(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.name, self.model, self.location, self.price
        )
    }

    /// UF code of this car's location, when the city is known.
    pub fn region(&self) -> Option<&'static str> {
        region::region_of(&self.location)
    }

    /// Normalized tag set.
    pub fn normalized_tags(&self) -> Vec<String> {
        self.tags.iter().map(|t| normalize(t)).collect()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| normalize(t) == tag)
    }
}

/// Immutable car catalog with derived vocabularies.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cars: Vec<CarRecord>,
    brands: Vec<String>,
    models: Vec<String>,
    locations: Vec<String>,
}

fn distinct_normalized<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = Vec::new();
    for value in values {
        let norm = normalize(value);
        if !norm.is_empty() && !seen.contains(&norm) {
            seen.push(norm);
        }
    }
    seen
}

impl Catalog {
    /// Build a catalog from records, deriving the vocabularies.
    pub fn from_records(cars: Vec<CarRecord>) -> Self {
        let brands = distinct_normalized(cars.iter().map(|c| c.name.as_str()));
        let models = distinct_normalized(cars.iter().map(|c| c.model.as_str()));
        let locations = distinct_normalized(cars.iter().map(|c| c.location.as_str()));
        Self {
            cars,
            brands,
            models,
            locations,
        }
    }

    /// Parse a catalog from a JSON array of records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cars: Vec<CarRecord> = serde_json::from_str(json)
            .map_err(|e| CarFinderError::Catalog(format!("invalid catalog JSON: {}", e)))?;
        Ok(Self::from_records(cars))
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CarFinderError::Catalog(format!("failed to read catalog {:?}: {}", path, e))
        })?;
        let catalog = Self::from_json_str(&content)?;
        tracing::info!(
            "Loaded catalog from {:?}: {} cars, {} brands, {} models",
            path,
            catalog.len(),
            catalog.brands.len(),
            catalog.models.len()
        );
        Ok(catalog)
    }

    pub fn cars(&self) -> &[CarRecord] {
        &self.cars
    }

    pub fn len(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    /// Distinct normalized brands, in catalog order.
    pub fn brands(&self) -> &[String] {
        &self.brands
    }

    /// Distinct normalized models, in catalog order.
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Distinct normalized locations, in catalog order.
    pub fn locations(&self) -> &[String] {
        &self.locations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car(name: &str, model: &str, price: u32, location: &str) -> CarRecord {
        CarRecord {
            name: name.to_string(),
            model: model.to_string(),
            images: CarImages {
                quarter: "/img/q.webp".to_string(),
                side: "/img/s.webp".to_string(),
                back: "/img/b.webp".to_string(),
                interior: "/img/i.webp".to_string(),
            },
            price,
            location: location.to_string(),
            powertrain: None,
            body: None,
            seats: None,
            trunk_liters: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn vocabularies_are_distinct_and_normalized() {
        let catalog = Catalog::from_records(vec![
            car("Honda", "Civic", 120_000, "São Paulo"),
            car("Honda", "HR-V", 140_000, "Campinas"),
            car("BYD", "Dolphin", 150_000, "São Paulo"),
        ]);
        assert_eq!(catalog.brands(), ["honda", "byd"]);
        assert_eq!(catalog.models(), ["civic", "hr-v", "dolphin"]);
        assert_eq!(catalog.locations(), ["sao paulo", "campinas"]);
    }

    #[test]
    fn record_parses_pascal_case_json() {
        let json = r#"{
            "Name": "BYD",
            "Model": "Dolphin",
            "Images": {
                "quarter": "/cars/dolphin/quarter.webp",
                "side": "/cars/dolphin/side.webp",
                "back": "/cars/dolphin/back.webp",
                "interior": "/cars/dolphin/interior.webp"
            },
            "Price": 149990,
            "Location": "São Paulo",
            "Powertrain": "electric",
            "Body": "hatch",
            "Seats": 5,
            "TrunkLiters": 345,
            "Tags": ["city", "tech", "economy"]
        }"#;
        let record: CarRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "BYD");
        assert_eq!(record.powertrain, Some(Powertrain::Electric));
        assert_eq!(record.body, Some(Body::Hatch));
        assert_eq!(record.region(), Some("sp"));
        assert!(record.has_tag("tech"));
    }

    #[test]
    fn identity_key_distinguishes_same_model_in_other_city() {
        let a = car("Honda", "Civic", 120_000, "São Paulo");
        let b = car("Honda", "Civic", 120_000, "Curitiba");
        assert_ne!(a.identity_key(), b.identity_key());
    }
}
