//! Rule-based intent extraction
//!
//! Derives structured signals (budget, region, brand, model, intent flags)
//! from the current message plus recent history. Everything here operates
//! on normalized text and is recomputed per request; budget and location
//! mentioned earlier in the conversation stay sticky through the combined
//! text.

use crate::catalog::{region, Catalog};
use crate::chat::ConversationTurn;
use crate::text::normalize;
use crate::HISTORY_WINDOW;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BUDGET_K_RE: Regex = Regex::new(r"(\d{1,3})\s*k\b").unwrap();
    static ref BUDGET_MIL_RE: Regex = Regex::new(r"(\d{1,3})\s*mil(\s+reais)?\b").unwrap();
    static ref BUDGET_MILLION_RE: Regex =
        Regex::new(r"(\d{1,2})\s*(milhao(?:es)?|milhoes|mi)\b").unwrap();
    static ref BUDGET_MONEY_RE: Regex =
        Regex::new(r"(?:r\$\s*)?(\d{1,3}(?:[.,]\d{3})+|\d{2,7})").unwrap();
    static ref ASK_ALL_RE: Regex = Regex::new(r"(todos|todas|all)\s+(os\s+)?carros").unwrap();
    static ref ASK_BROAD_RE: Regex = Regex::new(r"(carros).*(brasil|pais|estado|estados)").unwrap();
    static ref DETAILS_RE: Regex = Regex::new(
        r"(detalh|mostrar|mostre|ver\s+mais|mais\s+do|quero\s+ver|fotos|interior|traseira|porta[-\s]?malas)"
    )
    .unwrap();
    static ref POWERTRAIN_ELECTRIC_RE: Regex = Regex::new(r"(eletric|ev)").unwrap();
    static ref POWERTRAIN_HYBRID_RE: Regex = Regex::new(r"hibrid").unwrap();
    static ref BODY_SUV_RE: Regex = Regex::new(r"\bsuv\b").unwrap();
}

/// Signals extracted from one request. Ephemeral, never cached.
#[derive(Debug, Clone, Default)]
pub struct ExtractedIntent {
    /// Maximum the user is willing to pay, in whole BRL
    pub budget: Option<u32>,

    /// Inferred UF code ("sp", "rj", ...)
    pub region: Option<String>,

    /// Brand detected in the current message (normalized)
    pub brand: Option<String>,

    /// Model detected in the current message (normalized)
    pub model: Option<String>,

    /// "show me all cars" style request
    pub ask_all: bool,

    /// "show me more details / photos" style request
    pub details: bool,

    /// Normalized current message
    pub norm_message: String,

    /// Normalized concatenated history
    pub history_text: String,

    /// History + current message, the sticky-context haystack
    pub combined_text: String,
}

impl ExtractedIntent {
    /// Extract intent signals from the message and trimmed history.
    pub fn extract(message: &str, history: &[ConversationTurn], catalog: &Catalog) -> Self {
        let norm_message = normalize(message);
        let recent: Vec<&ConversationTurn> =
            history.iter().rev().take(HISTORY_WINDOW).rev().collect();
        let history_text = normalize(
            &recent
                .iter()
                .map(|t| t.content.as_str())
                .collect::<Vec<_>>()
                .join(" \n "),
        );
        let combined_text = format!("{} \n {}", history_text, norm_message);

        let budget = extract_max_budget(&combined_text);
        let region = region::infer_region(&combined_text);
        let brand = catalog
            .brands()
            .iter()
            .find(|b| norm_message.contains(b.as_str()))
            .cloned();
        let model = catalog
            .models()
            .iter()
            .find(|m| norm_message.contains(m.as_str()))
            .cloned();
        let ask_all =
            ASK_ALL_RE.is_match(&norm_message) || ASK_BROAD_RE.is_match(&norm_message);
        let details = DETAILS_RE.is_match(&norm_message);

        let intent = Self {
            budget,
            region,
            brand,
            model,
            ask_all,
            details,
            norm_message,
            history_text,
            combined_text,
        };
        tracing::debug!(
            budget = ?intent.budget,
            region = ?intent.region,
            brand = ?intent.brand,
            model = ?intent.model,
            ask_all = intent.ask_all,
            details = intent.details,
            "extracted intent"
        );
        intent
    }
}

/// Extract the maximum budget from normalized text.
///
/// Layered cascade, first matching rule wins:
/// 1. shorthand thousands: "80k"
/// 2. Portuguese thousands: "80 mil", "80mil reais"
/// 3. millions: "1 milhao", "2 milhoes", "1 mi"
/// 4. formatted currency: "r$ 100.000", "100,000", bare 2-7 digit numbers
pub fn extract_max_budget(text: &str) -> Option<u32> {
    if let Some(caps) = BUDGET_K_RE.captures(text) {
        if let Ok(base) = caps[1].parse::<u32>() {
            return Some(base * 1_000);
        }
    }
    if let Some(caps) = BUDGET_MIL_RE.captures(text) {
        if let Ok(base) = caps[1].parse::<u32>() {
            return Some(base * 1_000);
        }
    }
    if let Some(caps) = BUDGET_MILLION_RE.captures(text) {
        if let Ok(base) = caps[1].parse::<u32>() {
            return Some(base * 1_000_000);
        }
    }
    if let Some(caps) = BUDGET_MONEY_RE.captures(text) {
        let raw: String = caps[1].chars().filter(|c| c.is_ascii_digit()).collect();
        if let Ok(value) = raw.parse::<u32>() {
            return Some(value);
        }
    }
    None
}

/// Detect an explicit powertrain request ("quero um eletrico").
pub fn detect_powertrain(norm_message: &str) -> Option<&'static str> {
    if POWERTRAIN_ELECTRIC_RE.is_match(norm_message) {
        Some("electric")
    } else if POWERTRAIN_HYBRID_RE.is_match(norm_message) {
        Some("hybrid")
    } else if norm_message.contains("diesel") {
        Some("diesel")
    } else if norm_message.contains("gasolina") {
        Some("gasoline")
    } else if norm_message.contains("flex") {
        Some("flex")
    } else {
        None
    }
}

/// Detect an explicit body-style request ("um suv espaçoso").
pub fn detect_body(norm_message: &str) -> Option<&'static str> {
    if BODY_SUV_RE.is_match(norm_message) {
        Some("suv")
    } else if norm_message.contains("sedan") {
        Some("sedan")
    } else if norm_message.contains("hatch") {
        Some("hatch")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CarImages, CarRecord, Catalog};
    use crate::chat::{ConversationTurn, Role};

    fn catalog() -> Catalog {
        let car = |name: &str, model: &str| CarRecord {
            name: name.to_string(),
            model: model.to_string(),
            images: CarImages {
                quarter: String::new(),
                side: String::new(),
                back: String::new(),
                interior: String::new(),
            },
            price: 100_000,
            location: "São Paulo".to_string(),
            powertrain: None,
            body: None,
            seats: None,
            trunk_liters: None,
            tags: Vec::new(),
        };
        Catalog::from_records(vec![car("Honda", "Civic"), car("BYD", "Dolphin")])
    }

    #[test]
    fn budget_cascade_first_rule_wins() {
        assert_eq!(extract_max_budget("tenho 80k"), Some(80_000));
        assert_eq!(extract_max_budget("ate 80 mil reais"), Some(80_000));
        assert_eq!(extract_max_budget("uns 120mil"), Some(120_000));
        assert_eq!(extract_max_budget("1 milhao"), Some(1_000_000));
        assert_eq!(extract_max_budget("2 milhoes"), Some(2_000_000));
        assert_eq!(extract_max_budget("r$ 100.000"), Some(100_000));
        assert_eq!(extract_max_budget("100000"), Some(100_000));
        assert_eq!(extract_max_budget("nada de numeros"), None);
    }

    #[test]
    fn budget_sticks_from_history() {
        let history = vec![ConversationTurn {
            role: Role::User,
            content: "meu orçamento é 90 mil".to_string(),
        }];
        let intent = ExtractedIntent::extract("quero um honda", &history, &catalog());
        assert_eq!(intent.budget, Some(90_000));
        assert_eq!(intent.brand.as_deref(), Some("honda"));
    }

    #[test]
    fn brand_and_model_detection_uses_current_message_only() {
        let history = vec![ConversationTurn {
            role: Role::User,
            content: "gostei do civic".to_string(),
        }];
        let intent = ExtractedIntent::extract("e o dolphin?", &history, &catalog());
        assert_eq!(intent.brand, None);
        assert_eq!(intent.model.as_deref(), Some("dolphin"));
    }

    #[test]
    fn ask_all_matches_broad_requests() {
        let intent = ExtractedIntent::extract("todos os carros", &[], &catalog());
        assert!(intent.ask_all);
        let intent = ExtractedIntent::extract("quais carros tem no brasil", &[], &catalog());
        assert!(intent.ask_all);
        let intent = ExtractedIntent::extract("quero um civic", &[], &catalog());
        assert!(!intent.ask_all);
    }

    #[test]
    fn details_intent_matches_photo_requests() {
        let intent = ExtractedIntent::extract("quero ver fotos do civic", &[], &catalog());
        assert!(intent.details);
        let intent = ExtractedIntent::extract("como é o porta-malas?", &[], &catalog());
        assert!(intent.details);
    }

    #[test]
    fn powertrain_and_body_detection() {
        assert_eq!(detect_powertrain(&normalize("um elétrico")), Some("electric"));
        assert_eq!(detect_powertrain(&normalize("híbrido")), Some("hybrid"));
        assert_eq!(detect_powertrain("a diesel"), Some("diesel"));
        assert_eq!(detect_powertrain("carro comum"), None);
        assert_eq!(detect_body("um suv grande"), Some("suv"));
        assert_eq!(detect_body("um sedan"), Some("sedan"));
        assert_eq!(detect_body("qualquer um"), None);
    }

    #[test]
    fn history_window_is_bounded() {
        let mut history = Vec::new();
        history.push(ConversationTurn {
            role: Role::User,
            content: "tenho 500 mil".to_string(),
        });
        for _ in 0..HISTORY_WINDOW {
            history.push(ConversationTurn {
                role: Role::Assistant,
                content: "certo".to_string(),
            });
        }
        // The budget mention fell out of the 12-turn window.
        let intent = ExtractedIntent::extract("quero um honda", &history, &catalog());
        assert_eq!(intent.budget, None);
    }
}
