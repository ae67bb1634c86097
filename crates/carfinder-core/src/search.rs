//! Criteria search over the catalog
//!
//! All criteria are AND-combined; an absent criterion always matches.
//! Results keep catalog order.

use crate::catalog::{region, Catalog};
use crate::text::{clean_location_phrase, normalize};
use serde::{Deserialize, Serialize};

/// Default result cap when the catalog is empty and no limit is given.
const EMPTY_CATALOG_LIMIT: usize = 12;

/// Search criteria. Field names match the `search_cars` tool schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchCriteria {
    /// Brand substring, e.g. "Honda"
    pub name: Option<String>,
    /// Model substring, e.g. "Civic"
    pub model: Option<String>,
    /// Free-text city/state/UF
    pub location: Option<String>,
    /// Powertrain, e.g. "electric"
    pub powertrain: Option<String>,
    /// Body style, e.g. "suv"
    pub body: Option<String>,
    pub min_seats: Option<u32>,
    /// Minimum price in BRL (default 0)
    pub min_price: Option<u32>,
    /// Maximum price in BRL (default unbounded)
    pub max_price: Option<u32>,
    /// Required tags, AND semantics
    pub tags: Option<Vec<String>>,
    pub limit: Option<usize>,
}

/// Search result set, serialized verbatim as a tool payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub count: usize,
    pub results: Vec<crate::catalog::CarRecord>,
}

fn non_empty(value: Option<&str>, f: impl Fn(&str) -> String) -> Option<String> {
    value.map(f).filter(|s| !s.is_empty())
}

/// Filter the catalog by the given criteria.
pub fn search_cars(catalog: &Catalog, criteria: &SearchCriteria) -> SearchOutcome {
    let name = non_empty(criteria.name.as_deref(), normalize);
    let model = non_empty(criteria.model.as_deref(), normalize);
    let location = non_empty(criteria.location.as_deref(), clean_location_phrase);
    let powertrain = non_empty(criteria.powertrain.as_deref(), normalize);
    let body = non_empty(criteria.body.as_deref(), normalize);
    let requested_uf = location.as_deref().and_then(region::resolve_region);
    let min_seats = criteria.min_seats.filter(|&s| s > 0);
    let min_price = criteria.min_price.unwrap_or(0);
    let max_price = criteria.max_price.unwrap_or(u32::MAX);
    let tags: Vec<String> = criteria
        .tags
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(|t| normalize(t))
        .collect();

    let dataset_size = catalog.len();
    let cap = if dataset_size == 0 {
        EMPTY_CATALOG_LIMIT
    } else {
        dataset_size
    };
    let limit = criteria.limit.map(|l| l.clamp(1, cap)).unwrap_or(cap);

    let results: Vec<_> = catalog
        .cars()
        .iter()
        .filter(|car| {
            let car_name = normalize(&car.name);
            let car_model = normalize(&car.model);
            let car_location = normalize(&car.location);

            let match_name = name.as_deref().map_or(true, |n| car_name.contains(n));
            let match_model = model.as_deref().map_or(true, |m| car_model.contains(m));
            let match_location = match (&location, &requested_uf) {
                (None, _) => true,
                (Some(_), Some(uf)) => car.region() == Some(uf.as_str()),
                (Some(loc), None) => {
                    car_location.contains(loc.as_str())
                        || loc.contains(&car_location)
                        || region::location_tokens(&car.location).iter().any(|tok| {
                            tok == loc || tok.contains(loc.as_str()) || loc.contains(tok)
                        })
                }
            };
            let match_price = car.price >= min_price && car.price <= max_price;
            let match_powertrain = powertrain
                .as_deref()
                .map_or(true, |p| car.powertrain.is_some_and(|pt| pt.as_str() == p));
            let match_body = body
                .as_deref()
                .map_or(true, |b| car.body.is_some_and(|bd| bd.as_str() == b));
            let match_seats =
                min_seats.map_or(true, |min| car.seats.is_some_and(|s| s >= min));
            let car_tags = car.normalized_tags();
            let match_tags = tags.iter().all(|t| car_tags.contains(t));

            match_name
                && match_model
                && match_location
                && match_price
                && match_powertrain
                && match_body
                && match_seats
                && match_tags
        })
        .take(limit)
        .cloned()
        .collect();

    tracing::debug!(count = results.len(), "search completed");
    SearchOutcome {
        count: results.len(),
        results,
    }
}
