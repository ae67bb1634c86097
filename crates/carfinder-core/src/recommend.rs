//! Profile-based recommendation scoring
//!
//! Every car is scored against the user profile; rules are independent and
//! additive, and each rule that fires appends a human-readable reason that
//! is surfaced verbatim in composed responses.

use crate::catalog::{region, Body, Catalog, Powertrain};
use crate::text::clean_location_phrase;
use serde::{Deserialize, Serialize};

/// Absolute price ceiling above the stated budget. Cars beyond it are cut
/// regardless of score.
pub const BUDGET_OVERSHOOT_LIMIT: u32 = 5_000;

/// Price-to-budget ratio where the in-budget bonus peaks.
pub const BUDGET_SWEET_SPOT: f64 = 0.85;

/// Default number of recommendations returned.
const DEFAULT_LIMIT: usize = 6;

/// Fallback cap when the catalog is empty.
const EMPTY_CATALOG_LIMIT: usize = 12;

/// Primary usage pattern of the buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Usage {
    City,
    Highway,
    Mixed,
}

/// User profile. Field names match the `recommend_cars` tool schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecommendProfile {
    /// Maximum budget in BRL
    pub budget: Option<u32>,
    /// Free-text city/state/UF
    pub location: Option<String>,
    pub usage: Option<Usage>,
    pub family_size: Option<u32>,
    #[serde(rename = "preferSUV")]
    pub prefer_suv: bool,
    #[serde(rename = "preferEV")]
    pub prefer_ev: bool,
    pub wants_tech: bool,
    pub needs_cargo: bool,
    pub limit: Option<usize>,
}

/// A car with its heuristic score and the reasons that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub car: crate::catalog::CarRecord,
    pub score: f64,
    pub reasons: Vec<String>,
}

/// Recommendation result set, serialized verbatim as a tool payload.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendOutcome {
    pub count: usize,
    pub results: Vec<crate::catalog::CarRecord>,
}

/// Score every car against the profile and return the ranked top candidates.
pub fn rank_candidates(catalog: &Catalog, profile: &RecommendProfile) -> Vec<ScoredCandidate> {
    let requested_uf = profile
        .location
        .as_deref()
        .map(clean_location_phrase)
        .filter(|s| !s.is_empty())
        .and_then(|loc| region::resolve_region(&loc));

    let mut scored: Vec<ScoredCandidate> = catalog
        .cars()
        .iter()
        .map(|car| {
            let mut score = 0.0;
            let mut reasons = Vec::new();
            let tags = car.normalized_tags();

            if let Some(budget) = profile.budget {
                if car.price <= budget {
                    score += 30.0;
                    reasons.push("Dentro do orçamento".to_string());
                    // Prices near 85% of budget get a small extra bonus.
                    let ratio = car.price as f64 / budget.max(1) as f64;
                    score += (10.0 - (BUDGET_SWEET_SPOT - ratio).abs() * 40.0).max(0.0);
                } else {
                    score -= 10.0;
                }
            }

            if let Some(uf) = requested_uf.as_deref() {
                if car.region() == Some(uf) {
                    score += 15.0;
                    reasons.push("Disponível na sua região".to_string());
                }
            }

            match profile.usage {
                Some(Usage::City) if tags.iter().any(|t| t == "city") => {
                    score += 10.0;
                    reasons.push("Bom para uso urbano".to_string());
                }
                Some(Usage::Highway)
                    if tags.iter().any(|t| t == "travel" || t == "comfort") =>
                {
                    score += 10.0;
                    reasons.push("Confortável para estrada".to_string());
                }
                Some(Usage::Mixed) if tags.iter().any(|t| t == "city" || t == "travel") => {
                    score += 8.0;
                    reasons.push("Versátil para cidade e estrada".to_string());
                }
                _ => {}
            }

            if let (Some(family), Some(seats)) = (profile.family_size, car.seats) {
                if seats >= family {
                    score += 8.0;
                    reasons.push("Espaço para família".to_string());
                }
            }

            if profile.prefer_suv && car.body == Some(Body::Suv) {
                score += 8.0;
                reasons.push("Altura e versatilidade de SUV".to_string());
            }

            if profile.prefer_ev && car.powertrain == Some(Powertrain::Electric) {
                score += 12.0;
                reasons.push("Elétrico (zero emissões)".to_string());
            }

            if profile.wants_tech && tags.iter().any(|t| t == "tech") {
                score += 6.0;
                reasons.push("Pacote tecnológico".to_string());
            }

            if profile.needs_cargo
                && (car.body == Some(Body::Suv)
                    || tags.iter().any(|t| t == "travel" || t == "family"))
            {
                score += 6.0;
                reasons.push("Bom porta-malas".to_string());
            }

            ScoredCandidate {
                car: car.clone(),
                score,
                reasons,
            }
        })
        .collect();

    // Hard ceiling: never recommend a car far above the stated budget.
    if let Some(budget) = profile.budget {
        scored.retain(|s| s.car.price <= budget.saturating_add(BUDGET_OVERSHOOT_LIMIT));
    }

    // Stable sort keeps catalog order between equal scores.
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    let cap = if catalog.is_empty() {
        EMPTY_CATALOG_LIMIT
    } else {
        catalog.len()
    };
    let limit = profile
        .limit
        .map(|l| l.clamp(1, cap))
        .unwrap_or(DEFAULT_LIMIT);
    scored.truncate(limit);
    scored
}

/// Recommendation entry point: ranked candidates stripped to the car list.
pub fn recommend_cars(catalog: &Catalog, profile: &RecommendProfile) -> RecommendOutcome {
    let ranked = rank_candidates(catalog, profile);
    tracing::debug!(count = ranked.len(), "recommendation completed");
    RecommendOutcome {
        count: ranked.len(),
        results: ranked.into_iter().map(|s| s.car).collect(),
    }
}
