//! Salesman-style message templates
//!
//! Persuasive, benefit-oriented copy framing a single recommended car,
//! with bullet reasons and a fixed call-to-action.

use crate::catalog::{Body, CarRecord, Powertrain};

/// Fixed call-to-action line closing every salesman message.
pub const CALL_TO_ACTION: &str = "**Quer que eu separe essa opção para você?**";

/// Maximum bullet reasons surfaced per message.
const MAX_BULLETS: usize = 5;

/// Options for [`build_salesman_message`].
#[derive(Debug, Default)]
pub struct SalesmanOptions<'a> {
    pub budget: Option<u32>,
    pub user_uf: Option<&'a str>,
    pub similar: &'a [CarRecord],
    pub similar_in_region: &'a [CarRecord],
    pub context_note: Option<String>,
}

/// Format a whole-BRL amount with dot thousand separators ("129.900").
pub fn format_brl(value: u32) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Compose the salesman pitch for the primary pick.
pub fn build_salesman_message(first: &CarRecord, opts: &SalesmanOptions) -> String {
    let mut bullets = Vec::new();

    if let Some(uf) = opts.user_uf {
        if first.region() == Some(uf) {
            bullets.push("**Disponível na sua região** (entrega rápida)".to_string());
        }
    }
    if let Some(budget) = opts.budget {
        if first.price <= budget {
            bullets.push("**Dentro do seu orçamento**".to_string());
        } else {
            bullets.push(format!(
                "**Acima do seu orçamento** (R$ {} > R$ {}). Condições de **financiamento** e ótimo **valor de revenda**.",
                format_brl(first.price),
                format_brl(budget)
            ));
        }
    }
    if first.tags.iter().any(|t| t == "economy") {
        bullets.push("**Econômico** no dia a dia".to_string());
    }
    if first.tags.iter().any(|t| t == "tech") {
        bullets.push("Pacote **tecnológico** completo".to_string());
    }
    if first.tags.iter().any(|t| t == "comfort") {
        bullets.push("Ótimo **conforto** e acabamento".to_string());
    }
    if first.tags.iter().any(|t| t == "family") {
        bullets.push("Bom para **família**".to_string());
    }
    if first.body == Some(Body::Suv) {
        bullets.push("**SUV** com altura e versatilidade".to_string());
    }

    let mut lines = Vec::new();
    lines.push(format!(
        "Aqui está uma ótima opção para você: **{} {}**.",
        first.name, first.model
    ));
    bullets.truncate(MAX_BULLETS);
    lines.push(format!("- {}", bullets.join("\n- ")));
    if !opts.similar.is_empty() {
        lines.push(
            "\nTambém separei **opções dentro do seu orçamento** com ótimo custo-benefício."
                .to_string(),
        );
    }
    if !opts.similar_in_region.is_empty() {
        lines.push(
            "\nTambém separei alternativas na sua região com ótimo custo-benefício.".to_string(),
        );
    }
    if let Some(note) = &opts.context_note {
        lines.push(format!("\n{}", note));
    }
    lines.push(format!("\n{}", CALL_TO_ACTION));
    lines.join("\n")
}

/// Compose the single-car details message (photos/interior intent).
pub fn build_details_message(target: &CarRecord, budget: Option<u32>) -> String {
    let mut bullets = Vec::new();
    if let Some(max) = budget {
        if target.price <= max {
            bullets.push("**Dentro do seu orçamento**".to_string());
        } else {
            bullets.push(format!(
                "**Acima do seu orçamento** (R$ {} > R$ {})",
                format_brl(target.price),
                format_brl(max)
            ));
        }
    }
    if target.powertrain == Some(Powertrain::Electric) {
        bullets.push("**Elétrico** (zero emissões)".to_string());
    }
    if target.body == Some(Body::Suv) {
        bullets.push("**SUV** com versatilidade".to_string());
    }
    if let Some(seats) = target.seats {
        bullets.push(format!("{} assentos", seats));
    }
    bullets.push(format!("Disponível em {}", target.location));

    let mut lines = vec![
        format!(
            "Aqui estão mais detalhes do **{} {}**:",
            target.name, target.model
        ),
        format!("- Preço: **R$ {}**", format_brl(target.price)),
    ];
    lines.extend(bullets.into_iter().map(|b| format!("- {}", b)));
    lines.push(String::new());
    lines.push(
        "Quer ver o **interior** ou a visão **3/4**? Posso destacar os pontos fortes para o seu uso."
            .to_string(),
    );
    lines.push(CALL_TO_ACTION.to_string());
    lines.join("\n")
}
