//! Answer assembly over retrieved documents.
//!
//! Renders the aggregated documents into a citation-indexed context block,
//! asks the configured chat model for a synthesis, and falls back to a
//! deterministic extractive answer when generation is unavailable. The
//! fallback keeps the same reference list, so callers can render citations
//! identically on both paths.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::assembly::prompts::{self, Role};
use crate::llm::{ChatClient, ChatMessage};
use crate::types::{Reference, RetrievedDocument};
use crate::utils::text::truncate_chars;

/// Characters of summary or snippet rendered per context entry.
pub const EXCERPT_CHARS: usize = 800;

/// Upper bound on the rendered context. Entries are appended whole until
/// the next one would cross this bound.
pub const MAX_CONTEXT_CHARS: usize = 12_000;

/// Low temperature keeps citation indices stable across retries.
pub const GENERATION_TEMPERATURE: f32 = 0.2;

/// Warning attached to responses produced by the fallback path.
pub const FALLBACK_WARNING: &str =
    "Using fallback synthesis (language model or upstream sources unavailable)";

const NO_SOURCES_ANSWER: &str =
    "No sources available. Try rephrasing your query or enable more sources.";

const FALLBACK_EXCERPTS: usize = 3;

// ============= Assembled Answer =============

/// A generated answer together with the citation list it indexes into.
#[derive(Debug, Clone)]
pub struct AssembledAnswer {
    /// Answer text, citing documents as `[n]`.
    pub answer: String,
    /// One entry per retrieved document, indexed from 1.
    pub references: Vec<Reference>,
    /// True when the deterministic fallback produced `answer`.
    pub degraded: bool,
}

// ============= Assembler =============

/// Turns aggregated documents into a citation-indexed answer.
pub struct AnswerAssembler {
    llm: Arc<dyn ChatClient>,
}

impl AnswerAssembler {
    /// Create an assembler backed by the given chat client.
    pub fn new(llm: Arc<dyn ChatClient>) -> Self {
        Self { llm }
    }

    /// Generate an answer for `question` grounded in `documents`.
    ///
    /// Never fails: any generation error routes to the fallback answer
    /// and sets `degraded` on the result.
    pub async fn assemble(
        &self,
        question: &str,
        role: Option<&str>,
        documents: &[RetrievedDocument],
    ) -> AssembledAnswer {
        let references = Reference::enumerate(documents);
        let role = Role::from_name(role);
        let context = render_context(documents);

        let messages = [
            ChatMessage::system(prompts::system_message(role)),
            ChatMessage::user(prompts::user_message(question, &context)),
        ];

        match self.llm.chat(&messages, None, GENERATION_TEMPERATURE).await {
            Ok(answer) => AssembledAnswer {
                answer,
                references,
                degraded: false,
            },
            Err(err) => {
                warn!(error = %err, "answer generation failed, using fallback synthesis");
                AssembledAnswer {
                    answer: fallback_answer(documents),
                    references,
                    degraded: true,
                }
            }
        }
    }
}

// ============= Context Rendering =============

/// Render documents as numbered context entries separated by blank lines.
///
/// Each entry is a `[i] title (source) url` heading followed by an excerpt
/// capped at [`EXCERPT_CHARS`]. Entries past [`MAX_CONTEXT_CHARS`] are
/// dropped whole rather than split mid-entry; the first entry is always
/// included and clipped to the bound if it alone exceeds it.
fn render_context(documents: &[RetrievedDocument]) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut total = 0usize;

    for (i, doc) in documents.iter().enumerate() {
        let heading = match doc.url.as_deref() {
            Some(url) => format!("[{}] {} ({}) {}", i + 1, doc.title, doc.source, url),
            None => format!("[{}] {} ({})", i + 1, doc.title, doc.source),
        };
        let excerpt = truncate_chars(doc.excerpt().unwrap_or(""), EXCERPT_CHARS);
        let block = format!("{heading}\n{excerpt}");

        let projected = total + block.chars().count() + if blocks.is_empty() { 0 } else { 2 };
        if projected > MAX_CONTEXT_CHARS && !blocks.is_empty() {
            debug!(dropped = documents.len() - i, "context bound reached");
            break;
        }
        total = projected;
        blocks.push(block);
    }

    let context = blocks.join("\n\n");
    if total > MAX_CONTEXT_CHARS {
        // Only reachable when the sole kept entry is itself oversized,
        // e.g. an absurdly long caller-supplied URL standing in as title.
        debug!(chars = total, "clipping oversized context entry");
        return truncate_chars(&context, MAX_CONTEXT_CHARS);
    }
    context
}

// ============= Fallback Synthesis =============

/// Deterministic answer used when generation is unavailable.
///
/// Concatenates the first few excerpts into a rough synthesis and lists
/// every document as a bulleted reference, keeping the same 1-based
/// indices the generated path would cite.
fn fallback_answer(documents: &[RetrievedDocument]) -> String {
    if documents.is_empty() {
        return NO_SOURCES_ANSWER.to_string();
    }

    let bullets: Vec<String> = documents
        .iter()
        .enumerate()
        .map(|(i, doc)| {
            let mut line = format!("- [{}] {} ({})", i + 1, doc.title, doc.source);
            if let Some(url) = doc.url.as_deref() {
                line.push_str(" - ");
                line.push_str(url);
            }
            line
        })
        .collect();

    let excerpts: Vec<&str> = documents
        .iter()
        .filter_map(|doc| doc.excerpt())
        .take(FALLBACK_EXCERPTS)
        .collect();
    let synthesis = if excerpts.is_empty() {
        "insufficient context".to_string()
    } else {
        excerpts.join(" ")
    };

    format!(
        "Preliminary synthesis (offline mode): {synthesis}\n\nReferences:\n{}",
        bullets.join("\n")
    )
}
