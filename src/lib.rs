//! tutorgen — AI generation pipeline for locally hosted tutoring content.
//!
//! Turns requests for educational content — conversational answers,
//! multiple-choice quizzes, and multi-section study documents — into calls
//! against a local Ollama-style inference server, and turns the server's
//! free-form text back into structured application data.
//!
//! The design contract: **every entry point resolves to a usable value**.
//! An unreachable server, a timed-out call, an error status, or unparsable
//! model output each map to a deterministic substitute (a fixed message, a
//! one-item fallback quiz, placeholder document sections) — never an error
//! to the caller. Request-handling code renders whatever comes back.
//!
//! ```no_run
//! use tutorgen::{
//!     Difficulty, GenerationOrchestrator, InferenceConfig, OllamaClient, TurnOrder,
//! };
//!
//! # async fn example() -> Result<(), tutorgen::InferenceError> {
//! let client = OllamaClient::from_config(InferenceConfig::default())?;
//! let model = client.default_model().to_string();
//! let orchestrator = GenerationOrchestrator::new(client, model);
//!
//! let reply = orchestrator
//!     .answer_chat("What is gravity?", &[], TurnOrder::OldestFirst)
//!     .await;
//! let quiz = orchestrator
//!     .build_quiz("Photosynthesis", Difficulty::Intermediate, 5)
//!     .await;
//! let document = orchestrator.build_document("Recursion").await;
//! # Ok(())
//! # }
//! ```

pub mod generation;
pub mod inference;

pub use generation::{
    ConversationTurn, Difficulty, DocumentSection, GenerationOrchestrator, OptionLabel,
    QuizItem, SectionKey, StudyDocument, TextGenerator, TurnOrder,
};
pub use inference::{GenerationOutcome, InferenceConfig, InferenceError, ModelDescriptor, OllamaClient};
