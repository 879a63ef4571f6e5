use crate::{
    AppState,
    assembly::FALLBACK_WARNING,
    types::{AppError, AskRequest, AskResponse, Result, SourceTag},
};
use axum::{Json, extract::State};

/// Sources searched when the request does not name any.
const DEFAULT_SOURCES: [SourceTag; 4] = [
    SourceTag::Nasa,
    SourceTag::Arxiv,
    SourceTag::Pubmed,
    SourceTag::Crossref,
];

/// Answer a question from aggregated reference sources
pub async fn ask(
    State(state): State<AppState>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponse>> {
    let question = payload.question.trim();
    if question.is_empty() {
        return Err(AppError::InvalidInput("question is required".to_string()));
    }

    // Unknown source names are dropped rather than rejected, so a request
    // naming only unknown sources searches nothing and falls back.
    let sources = match payload.sources.as_deref() {
        Some(names) => SourceTag::parse_list(names),
        None => DEFAULT_SOURCES.to_vec(),
    };

    let documents = state
        .aggregator
        .aggregate(
            question,
            &sources,
            state.config.retrieval.max_per_source,
            payload.urls.as_deref(),
        )
        .await;

    let assembled = state
        .assembler
        .assemble(question, payload.role.as_deref(), &documents)
        .await;

    Ok(Json(AskResponse {
        answer: assembled.answer,
        references: assembled.references,
        warning: assembled.degraded.then(|| FALLBACK_WARNING.to_string()),
    }))
}
