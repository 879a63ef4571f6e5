//! Retrieval-augmented answer assembly.
//!
//! # Module Structure
//!
//! - `prompts`: role parsing and prompt templates
//! - `assembler`: context rendering, generation and the fallback path
//!
//! The assembler never fails outward. When the chat backend is missing or
//! errors, it produces a deterministic extractive answer instead and marks
//! the result as degraded so the API layer can attach a warning.
//!
//! ```ignore
//! let assembler = AnswerAssembler::new(llm);
//! let assembled = assembler.assemble("What does microgravity do to bone?", None, &docs).await;
//! for reference in &assembled.references {
//!     println!("[{}] {}", reference.index, reference.title);
//! }
//! ```

/// Context rendering, generation and fallback synthesis
pub mod assembler;
/// Role parsing and prompt templates
pub mod prompts;

pub use assembler::{AnswerAssembler, AssembledAnswer, FALLBACK_WARNING};
pub use prompts::Role;
