//! Bounded tool-calling loop
//!
//! A fixed number of rounds against the LLM: each round either yields a
//! final text answer or a batch of tool calls, which are executed
//! sequentially and fed back before the next round. The last successful
//! tool's result set is the car list carried into the reply.

use crate::catalog::{CarRecord, Catalog};
use crate::chat::{ChatReply, ConversationTurn, Role};
use crate::intent::ExtractedIntent;
use crate::llm::client::{ChatMessage, LLMClient};
use crate::llm::tools::{execute_tool, tool_definitions};

/// Maximum model rounds before giving up on a final answer.
pub const MAX_TOOL_ROUNDS: usize = 3;

/// Reply used when the round limit is hit without a plain-text answer.
const ROUND_LIMIT_MESSAGE: &str =
    "Encontrei algumas opções interessantes! Quer me dizer sua faixa de preço e cidade para eu refinar?";

/// Fixed persona and policy prompt for the assistant.
const SYSTEM_PROMPT: &str = "Você é o CarFinder AI: um especialista em carros que ajuda usuários a encontrar e decidir a compra. \
Diretrizes: \
- Sempre USE as ferramentas (search_cars/recommend_cars). Para listar ou checar disponibilidade/preço use search_cars. Para \"qual o melhor para meu uso/perfil\" use recommend_cars. \
- Use o histórico da conversa. Se o usuário já informou localização, orçamento ou preferências, NÃO repita a pergunta. \
- Se faltar informação (ex: localização, orçamento, preferências), faça no máximo 1 pergunta curta e objetiva antes de recomendar. \
- Quando o orçamento for menor que os preços encontrados, sugira alternativas próximas e benefícios (financiamento, economia de combustível, valor de revenda). \
- Quando a localização não bater, sugira opções similares na região do usuário e destaque vantagens. \
- MODO VENDEDOR: ao tratar de um veículo específico ou 1-2 opções, assuma postura consultiva. Destaque 3-5 motivos práticos alinhados ao perfil do usuário, antecipe objeções comuns (consumo, seguro, manutenção) e finalize com um convite de próxima etapa. \
- Use linguagem persuasiva, mas honesta. Destaque pontos fortes do veículo e do perfil do usuário. \
- Sobre imagens: prefira ângulo 3/4 (quarter) para destaque visual, lateral (side) para proporções, traseira (back) para porta-malas e interior (interior) para conforto/tecnologia. \
- Se o usuário pedir \"todos os carros\" ou resultados amplos, chame search_cars SEM filtros e sem limitar (retorne todos disponíveis). \
- Ao procurar por elétricos/híbridos, passe explicitamente powertrain (electric/hybrid). Por SUV/sedã/hatch, passe body (suv/sedan/hatch). \
- Sempre que souber orçamento e localização, inclua maxPrice e location na chamada da ferramenta. \
- Se o carro pedido existir, retorne-o chamando search_cars com filtros precisos (marca+modelo) e assuma o modo vendedor. Se o orçamento for menor que o disponível, repita com maxPrice ~10-15% maior OU chame recommend_cars e destaque financiamento e 1-2 alternativas próximas. Se o carro existir em outra localidade, repita a busca SEM location para achar a disponibilidade real e sugira similares na região do usuário. \
Formato da resposta: Comece com uma frase curta. Em seguida, use uma lista com hifens para destacar razões de compra e o porquê da recomendação. Use negrito com ** para pontos-chave. Evite texto excessivo, não invente informações. Depois da lista, finalize com um CTA curto. NÃO inclua markdown de imagem nem links de imagens; as fotos serão exibidas pela interface. \
- Ao finalizar, inclua um call-to-action curto (ex: **Quer que eu separe essa opção para você?**).";

/// System message carrying budget/region already extracted from history,
/// so the model does not re-ask for them.
fn context_message(intent: &ExtractedIntent) -> Option<ChatMessage> {
    let mut lines = Vec::new();
    if let Some(region) = &intent.region {
        lines.push(format!("Localização: {}", region.to_uppercase()));
    }
    if let Some(budget) = intent.budget {
        lines.push(format!("Orçamento máximo: R$ {}", budget));
    }
    if lines.is_empty() {
        None
    } else {
        Some(ChatMessage::system(format!(
            "Contexto do usuário (do histórico): {}",
            lines.join(" | ")
        )))
    }
}

/// Delegate the request to the LLM with the two callable tools.
pub async fn run_tool_loop(
    client: &dyn LLMClient,
    catalog: &Catalog,
    intent: &ExtractedIntent,
    history: &[ConversationTurn],
    message: &str,
) -> crate::error::Result<ChatReply> {
    let tools = tool_definitions();

    let mut conversation = vec![ChatMessage::system(SYSTEM_PROMPT)];
    if let Some(context) = context_message(intent) {
        conversation.push(context);
    }
    for turn in history {
        conversation.push(match turn.role {
            Role::User => ChatMessage::user(&turn.content),
            Role::Assistant => ChatMessage::assistant(&turn.content),
        });
    }
    conversation.push(ChatMessage::user(message));

    let mut last_results: Option<Vec<CarRecord>> = None;

    for round in 0..MAX_TOOL_ROUNDS {
        let turn = client.chat_completion(conversation.clone(), &tools).await?;
        tracing::info!(
            round,
            tool_calls = turn.tool_calls.len(),
            "LLM responded"
        );
        conversation.push(ChatMessage::from_turn(&turn));

        if turn.tool_calls.is_empty() {
            // Final assistant answer.
            return Ok(ChatReply {
                message: turn.content,
                cars: last_results.unwrap_or_default(),
                success: true,
            });
        }

        for call in &turn.tool_calls {
            let execution = execute_tool(catalog, &call.function.name, &call.function.arguments);
            if let Some(results) = execution.results {
                last_results = Some(results);
            }
            conversation.push(ChatMessage::tool(call.id.clone(), execution.payload));
        }
    }

    tracing::warn!("tool loop hit round limit without a final answer");
    Ok(ChatReply {
        message: ROUND_LIMIT_MESSAGE.to_string(),
        cars: last_results.unwrap_or_default(),
        success: true,
    })
}
