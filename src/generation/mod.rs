//! Generation Pipeline — structured educational content from raw model text.
//!
//! This module turns user requests into prompts and free-form model output
//! into application data:
//! - Prompt assembly for the three generation modes (chat, quiz, document)
//! - Conversational context windowing (last 5 turns, chronological)
//! - Quiz extraction with validation and deterministic fallback
//! - The orchestrator exposing `answer_chat` / `build_quiz` / `build_document`
//!
//! The contract throughout: callers always receive a renderable result.
//! No operation in this module returns an error.

pub mod context;
pub mod orchestrator;
pub mod parser;
pub mod prompts;
pub mod types;

// Re-exports for convenience
pub use context::{build_context, TurnOrder, CONTEXT_TURNS};
pub use orchestrator::{GenerationOrchestrator, TextGenerator, UNAVAILABLE_MESSAGE};
pub use parser::{extract_quiz_items, fallback_quiz_item};
pub use types::{
    ConversationTurn, Difficulty, DocumentSection, OptionLabel, QuizItem, SectionKey,
    StudyDocument,
};
