//! Brazilian region (UF) resolution
//!
//! Location matching works on two-letter state codes. Coverage is a small
//! fixed set of major cities and states; anything else falls back to
//! substring matching at the search layer.

use crate::text::{initials, normalize};
use lazy_static::lazy_static;
use regex::Regex;

/// City name (normalized) to UF code. Ordered: lookups scan front to back.
pub const CITY_TO_UF: &[(&str, &str)] = &[
    ("sao paulo", "sp"),
    ("campinas", "sp"),
    ("rio de janeiro", "rj"),
    ("belo horizonte", "mg"),
    ("curitiba", "pr"),
    ("porto alegre", "rs"),
];

/// State name (normalized) to UF code. Checked before the city table when
/// inferring a region from free text.
pub const STATE_TO_UF: &[(&str, &str)] = &[
    ("sao paulo", "sp"),
    ("rio de janeiro", "rj"),
    ("minas gerais", "mg"),
    ("parana", "pr"),
    ("rio grande do sul", "rs"),
];

lazy_static! {
    static ref UF_TOKEN_RE: Regex = Regex::new(r"\b(sp|rj|mg|pr|rs)\b").unwrap();
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, uf)| *uf)
}

/// UF code for a catalog car's free-text location, via the city table.
pub fn region_of(location: &str) -> Option<&'static str> {
    lookup(CITY_TO_UF, &normalize(location))
}

/// Infer a UF code from combined conversation text: state names first,
/// then city names, then bare UF tokens.
pub fn infer_region(combined_text: &str) -> Option<String> {
    for (state, uf) in STATE_TO_UF {
        if combined_text.contains(state) {
            return Some((*uf).to_string());
        }
    }
    for (city, uf) in CITY_TO_UF {
        if combined_text.contains(city) {
            return Some((*uf).to_string());
        }
    }
    UF_TOKEN_RE
        .captures(combined_text)
        .map(|c| c[1].to_string())
}

/// Resolve a cleaned location phrase to a UF code.
///
/// Any two-letter token is taken as a literal UF code (even unknown ones,
/// which then simply match nothing), otherwise the state and city tables
/// are consulted.
pub fn resolve_region(cleaned_location: &str) -> Option<String> {
    if cleaned_location.is_empty() {
        return None;
    }
    if cleaned_location.len() == 2 && cleaned_location.chars().all(|c| c.is_ascii_alphabetic()) {
        return Some(cleaned_location.to_string());
    }
    lookup(STATE_TO_UF, cleaned_location)
        .or_else(|| lookup(CITY_TO_UF, cleaned_location))
        .map(str::to_string)
}

/// Matching tokens for a car's city: the normalized name, its UF code if
/// known, and the word initials ("sao paulo" -> "sp").
pub fn location_tokens(city: &str) -> Vec<String> {
    let norm_city = normalize(city);
    let mut tokens = vec![norm_city.clone()];
    if let Some(uf) = lookup(CITY_TO_UF, &norm_city) {
        tokens.push(uf.to_string());
    }
    let init = initials(&norm_city);
    if !init.is_empty() {
        tokens.push(init);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_of_known_cities() {
        assert_eq!(region_of("São Paulo"), Some("sp"));
        assert_eq!(region_of("Campinas"), Some("sp"));
        assert_eq!(region_of("Curitiba"), Some("pr"));
        assert_eq!(region_of("Niterói"), None);
    }

    #[test]
    fn infer_prefers_state_names_over_tokens() {
        assert_eq!(infer_region("moro em minas gerais"), Some("mg".to_string()));
        assert_eq!(infer_region("estou em porto alegre"), Some("rs".to_string()));
        assert_eq!(infer_region("carros em sp ate 100 mil"), Some("sp".to_string()));
        assert_eq!(infer_region("quero um carro barato"), None);
    }

    #[test]
    fn resolve_accepts_any_two_letter_code() {
        assert_eq!(resolve_region("sp"), Some("sp".to_string()));
        assert_eq!(resolve_region("xy"), Some("xy".to_string()));
        assert_eq!(resolve_region("sao paulo"), Some("sp".to_string()));
        assert_eq!(resolve_region("parana"), Some("pr".to_string()));
        assert_eq!(resolve_region(""), None);
        assert_eq!(resolve_region("gotham"), None);
    }

    #[test]
    fn tokens_cover_name_uf_and_initials() {
        let tokens = location_tokens("São Paulo");
        assert_eq!(tokens, vec!["sao paulo", "sp", "sp"]);
        let tokens = location_tokens("Campinas");
        assert_eq!(tokens, vec!["campinas", "sp", "c"]);
    }
}
