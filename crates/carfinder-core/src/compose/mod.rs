//! Response composition
//!
//! The rule-based reply modes, tried in priority order: details,
//! brand+model, model-only, brand-only, show-all. Each strategy either
//! produces a complete reply or passes, and a mode that finds nothing
//! falls through to the next tier instead of returning empty-handed.
//! The offline heuristic pass (used when no LLM credential exists) lives
//! here too.

mod salesman;

pub use salesman::{build_details_message, build_salesman_message, format_brl, SalesmanOptions};

use crate::catalog::{CarRecord, Catalog};
use crate::chat::ChatReply;
use crate::intent::{detect_body, detect_powertrain, ExtractedIntent};
use crate::search::{search_cars, SearchCriteria, SearchOutcome};
use crate::text::{fuzzy_includes, normalize};
use std::collections::HashSet;

/// Budget tolerance band for "stretch" alternatives (price ≤ budget × 1.15).
pub const STRETCH_FACTOR: f64 = 1.15;

/// Maximum cars in a composed reply.
const MAX_COMPOSED_CARS: usize = 6;

/// A named rule-based reply mode.
trait ResponseStrategy {
    fn name(&self) -> &'static str;
    fn try_respond(&self, catalog: &Catalog, intent: &ExtractedIntent) -> Option<ChatReply>;
}

/// Run the rule-based modes in priority order; first reply wins.
pub fn rule_based_reply(catalog: &Catalog, intent: &ExtractedIntent) -> Option<ChatReply> {
    let strategies: [&dyn ResponseStrategy; 5] = [
        &DetailsStrategy,
        &BrandModelStrategy,
        &ModelOnlyStrategy,
        &BrandOnlyStrategy,
        &ShowAllStrategy,
    ];
    for strategy in strategies {
        if let Some(reply) = strategy.try_respond(catalog, intent) {
            tracing::info!(mode = strategy.name(), "rule-based mode matched");
            return Some(reply);
        }
    }
    None
}

fn sorted_by_price(mut cars: Vec<CarRecord>) -> Vec<CarRecord> {
    cars.sort_by_key(|c| c.price);
    cars
}

/// Up to `take` cheapest in-budget cars from the whole catalog.
fn within_budget(catalog: &Catalog, budget: u32, take: usize) -> Vec<CarRecord> {
    let mut cars = sorted_by_price(
        catalog
            .cars()
            .iter()
            .filter(|c| c.price <= budget)
            .cloned()
            .collect(),
    );
    cars.truncate(take);
    cars
}

/// Up to two cars just over budget but inside the stretch band.
fn stretch_over_budget(catalog: &Catalog, budget: u32) -> Vec<CarRecord> {
    let ceiling = budget as f64 * STRETCH_FACTOR;
    let mut cars = sorted_by_price(
        catalog
            .cars()
            .iter()
            .filter(|c| c.price > budget && c.price as f64 <= ceiling)
            .cloned()
            .collect(),
    );
    cars.truncate(2);
    cars
}

/// In-region cars resembling the primary pick (same body or tag overlap),
/// optionally falling back to the two cheapest local cars.
fn similar_in_region(
    catalog: &Catalog,
    primary: &CarRecord,
    uf: &str,
    cheapest_fallback: bool,
) -> Vec<CarRecord> {
    let mut similar: Vec<CarRecord> = catalog
        .cars()
        .iter()
        .filter(|c| {
            let same_uf = c.region() == Some(uf);
            let body_match = primary.body.is_some() && c.body == primary.body;
            let tag_overlap = c.tags.iter().any(|t| primary.tags.contains(t));
            same_uf && (body_match || tag_overlap)
        })
        .take(3)
        .cloned()
        .collect();
    if similar.is_empty() && cheapest_fallback {
        similar = sorted_by_price(
            catalog
                .cars()
                .iter()
                .filter(|c| c.region() == Some(uf))
                .cloned()
                .collect(),
        );
        similar.truncate(2);
    }
    similar
}

/// Merge car lists in display order, dropping duplicate
/// (name, model, location, price) identities, capped at six.
fn dedup_and_cap(groups: &[&[CarRecord]]) -> Vec<CarRecord> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for group in groups {
        for car in *group {
            if merged.len() == MAX_COMPOSED_CARS {
                return merged;
            }
            if seen.insert(car.identity_key()) {
                merged.push(car.clone());
            }
        }
    }
    merged
}

/// Budget similar/stretch alternatives, when a budget was stated.
fn budget_alternatives(
    catalog: &Catalog,
    budget: Option<u32>,
    similar_take: usize,
) -> (Vec<CarRecord>, Vec<CarRecord>) {
    match budget {
        Some(budget) => (
            within_budget(catalog, budget, similar_take),
            stretch_over_budget(catalog, budget),
        ),
        None => (Vec::new(), Vec::new()),
    }
}

/// "Show details" mode: one specific car, resolved from message or history
/// with fuzzy fallback.
struct DetailsStrategy;

impl ResponseStrategy for DetailsStrategy {
    fn name(&self) -> &'static str {
        "details"
    }

    fn try_respond(&self, catalog: &Catalog, intent: &ExtractedIntent) -> Option<ChatReply> {
        if !intent.details {
            return None;
        }
        let find_in = |text: &str, vocab: &[String]| -> Option<String> {
            vocab
                .iter()
                .find(|v| text.contains(v.as_str()) || fuzzy_includes(text, v))
                .cloned()
        };
        let brand = find_in(&intent.norm_message, catalog.brands())
            .or_else(|| find_in(&intent.history_text, catalog.brands()));
        let model = find_in(&intent.norm_message, catalog.models())
            .or_else(|| find_in(&intent.history_text, catalog.models()));

        let target = match (brand.as_deref(), model.as_deref()) {
            (Some(brand), Some(model)) => catalog
                .cars()
                .iter()
                .find(|c| normalize(&c.name) == brand && normalize(&c.model) == model)
                .cloned(),
            (Some(brand), None) => sorted_by_price(
                catalog
                    .cars()
                    .iter()
                    .filter(|c| normalize(&c.name) == brand)
                    .cloned()
                    .collect(),
            )
            .into_iter()
            .next(),
            (None, Some(model)) => catalog
                .cars()
                .iter()
                .find(|c| normalize(&c.model) == model)
                .cloned(),
            (None, None) => None,
        }?;

        let message = build_details_message(&target, intent.budget);
        Some(ChatReply {
            message,
            cars: vec![target],
            success: true,
        })
    }
}

/// Brand+model mode: region-first search cascade with budget and region
/// alternatives.
struct BrandModelStrategy;

impl ResponseStrategy for BrandModelStrategy {
    fn name(&self) -> &'static str {
        "brand+model"
    }

    fn try_respond(&self, catalog: &Catalog, intent: &ExtractedIntent) -> Option<ChatReply> {
        let brand = intent.brand.as_deref()?;
        let model = intent.model.as_deref()?;
        let user_uf = intent.region.as_deref();

        let run = |location: Option<&str>, max_price: Option<u32>| {
            search_cars(
                catalog,
                &SearchCriteria {
                    name: Some(brand.to_string()),
                    model: Some(model.to_string()),
                    location: location.map(str::to_string),
                    max_price,
                    ..Default::default()
                },
            )
        };

        let empty = || SearchOutcome {
            count: 0,
            results: Vec::new(),
        };
        let (in_region_budgeted, in_region_unpriced) = match user_uf {
            Some(uf) => (run(Some(uf), intent.budget), run(Some(uf), None)),
            None => (empty(), empty()),
        };
        let found_in_region = in_region_budgeted.count > 0 || in_region_unpriced.count > 0;
        let anywhere_budgeted = run(None, intent.budget);
        let anywhere_unpriced = run(None, None);

        // Region first, then budgeted anywhere, then unpriced anywhere.
        let base = [
            in_region_budgeted,
            in_region_unpriced,
            anywhere_budgeted,
            anywhere_unpriced,
        ]
        .into_iter()
        .find(|o| o.count > 0)?;

        let primary = base.results;
        let (similar, stretch) = budget_alternatives(catalog, intent.budget, 2);
        let in_region = match user_uf {
            Some(uf) if !found_in_region => similar_in_region(catalog, &primary[0], uf, true),
            _ => Vec::new(),
        };
        let context_note = (user_uf.is_some() && !found_in_region).then(|| {
            "O modelo está disponível fora da sua região. Sugeri alternativas locais parecidas."
                .to_string()
        });

        let message = build_salesman_message(
            &primary[0],
            &SalesmanOptions {
                budget: intent.budget,
                user_uf,
                similar: &similar,
                similar_in_region: &in_region,
                context_note,
            },
        );
        Some(ChatReply {
            message,
            cars: dedup_and_cap(&[&similar, &primary, &stretch, &in_region]),
            success: true,
        })
    }
}

/// Model-only mode: cheapest in-region pick for the detected model.
struct ModelOnlyStrategy;

impl ResponseStrategy for ModelOnlyStrategy {
    fn name(&self) -> &'static str {
        "model-only"
    }

    fn try_respond(&self, catalog: &Catalog, intent: &ExtractedIntent) -> Option<ChatReply> {
        if intent.brand.is_some() {
            return None;
        }
        let model = intent.model.as_deref()?;
        let user_uf = intent.region.as_deref();

        let model_cars: Vec<CarRecord> = catalog
            .cars()
            .iter()
            .filter(|c| normalize(&c.model) == model)
            .cloned()
            .collect();
        if model_cars.is_empty() {
            return None;
        }

        let cheapest_in_region = user_uf.and_then(|uf| {
            sorted_by_price(
                model_cars
                    .iter()
                    .filter(|c| c.region() == Some(uf))
                    .cloned()
                    .collect(),
            )
            .into_iter()
            .next()
        });
        let cheapest_anywhere = sorted_by_price(model_cars).into_iter().next()?;
        let primary_in_region = cheapest_in_region.is_some();
        let primary = vec![cheapest_in_region.unwrap_or(cheapest_anywhere)];

        let (similar, stretch) = budget_alternatives(catalog, intent.budget, 3);
        let in_region = match user_uf {
            Some(uf) if !primary_in_region => similar_in_region(catalog, &primary[0], uf, true),
            _ => Vec::new(),
        };

        let mut context_note: Option<String> = None;
        if let Some(budget) = intent.budget {
            if primary[0].price > budget {
                context_note = Some(
                    "A versão mais barata disponível desse modelo está acima do seu orçamento."
                        .to_string(),
                );
            }
        }
        if user_uf.is_some() && !primary_in_region {
            context_note = Some(match context_note {
                Some(note) => format!("{} Também selecionei alternativas locais parecidas.", note),
                None => {
                    "O modelo está disponível fora da sua região. Selecionei alternativas locais parecidas."
                        .to_string()
                }
            });
        }

        let message = build_salesman_message(
            &primary[0],
            &SalesmanOptions {
                budget: intent.budget,
                user_uf,
                similar: &similar,
                similar_in_region: &in_region,
                context_note,
            },
        );
        Some(ChatReply {
            message,
            cars: dedup_and_cap(&[&similar, &primary, &stretch, &in_region]),
            success: true,
        })
    }
}

/// Brand-only mode: cheapest car of the detected brand.
struct BrandOnlyStrategy;

impl ResponseStrategy for BrandOnlyStrategy {
    fn name(&self) -> &'static str {
        "brand-only"
    }

    fn try_respond(&self, catalog: &Catalog, intent: &ExtractedIntent) -> Option<ChatReply> {
        if intent.model.is_some() {
            return None;
        }
        let brand = intent.brand.as_deref()?;
        let user_uf = intent.region.as_deref();

        let brand_cars: Vec<CarRecord> = catalog
            .cars()
            .iter()
            .filter(|c| normalize(&c.name) == brand)
            .cloned()
            .collect();
        if brand_cars.is_empty() {
            return None;
        }

        let cheapest_in_region = user_uf.and_then(|uf| {
            sorted_by_price(
                brand_cars
                    .iter()
                    .filter(|c| c.region() == Some(uf))
                    .cloned()
                    .collect(),
            )
            .into_iter()
            .next()
        });
        let cheapest_anywhere = sorted_by_price(brand_cars).into_iter().next()?;
        let primary = vec![cheapest_in_region.unwrap_or(cheapest_anywhere)];

        let (similar, stretch) = budget_alternatives(catalog, intent.budget, 3);
        let in_region = match user_uf {
            Some(uf) if primary[0].region() != Some(uf) => {
                similar_in_region(catalog, &primary[0], uf, false)
            }
            _ => Vec::new(),
        };

        let context_note = intent
            .budget
            .filter(|&budget| primary[0].price > budget)
            .map(|_| "A opção mais barata da marca está acima do seu orçamento.".to_string());

        let message = build_salesman_message(
            &primary[0],
            &SalesmanOptions {
                budget: intent.budget,
                user_uf,
                similar: &similar,
                similar_in_region: &in_region,
                context_note,
            },
        );
        Some(ChatReply {
            message,
            cars: dedup_and_cap(&[&similar, &primary, &stretch, &in_region]),
            success: true,
        })
    }
}

/// Broad "show everything" requests return the catalog verbatim.
struct ShowAllStrategy;

impl ResponseStrategy for ShowAllStrategy {
    fn name(&self) -> &'static str {
        "show-all"
    }

    fn try_respond(&self, catalog: &Catalog, intent: &ExtractedIntent) -> Option<ChatReply> {
        if !intent.ask_all {
            return None;
        }
        Some(ChatReply {
            message:
                "Aqui estão todos os carros disponíveis. Quer que eu destaque os melhores custo-benefício?"
                    .to_string(),
            cars: catalog.cars().to_vec(),
            success: true,
        })
    }
}

/// Single local search pass used when no LLM credential is configured:
/// whatever location/brand/model/powertrain/body/budget the message yields
/// directly.
pub fn offline_reply(catalog: &Catalog, intent: &ExtractedIntent) -> ChatReply {
    tracing::warn!("LLM credentials absent, using local heuristic search");
    let msg = &intent.norm_message;
    let criteria = SearchCriteria {
        location: catalog
            .locations()
            .iter()
            .find(|loc| msg.contains(loc.as_str()))
            .cloned(),
        name: catalog
            .brands()
            .iter()
            .find(|b| msg.contains(b.as_str()))
            .cloned(),
        model: catalog
            .models()
            .iter()
            .find(|m| msg.contains(m.as_str()))
            .cloned(),
        powertrain: detect_powertrain(msg).map(str::to_string),
        body: detect_body(msg).map(str::to_string),
        max_price: intent.budget,
        ..Default::default()
    };
    let outcome = search_cars(catalog, &criteria);
    let message = if outcome.count > 0 {
        "Encontrei estas opções para você."
    } else {
        "Não encontrei resultados exatos. Posso sugerir alternativas próximas?"
    };
    ChatReply {
        message: message.to_string(),
        cars: outcome.results,
        success: true,
    }
}
