//! Generation entry points used by the rest of the application.
//!
//! Three operations: conversational answers, quiz generation, and
//! five-section study documents. Every call resolves to a usable value —
//! failures inside the pipeline become fixed substitute text here, at the
//! orchestrator boundary, and are never raised to the caller. Callers render
//! whatever comes back.
//!
//! The orchestrator is generic over [`TextGenerator`] so web handlers inject
//! one long-lived [`OllamaClient`] per process and tests inject a stub.

use std::future::Future;

use futures::future::join_all;

use crate::inference::{GenerationOutcome, ModelDescriptor, OllamaClient};

use super::context::{self, TurnOrder};
use super::parser;
use super::prompts;
use super::types::{ConversationTurn, Difficulty, QuizItem, SectionKey, StudyDocument};

// ─── Fixed user-facing strings ───────────────────────────────────────────────

/// Reply when the availability probe fails before a chat call. The probe
/// short-circuits the pipeline: no generation request is attempted.
pub const UNAVAILABLE_MESSAGE: &str =
    "Ollama is not available. Please make sure Ollama is running on your system.";

/// Reply when a chat generation call exceeds its deadline.
const TIMEOUT_MESSAGE: &str =
    "Request timed out. The model might be processing a complex query.";

/// Reply when the server vanishes between the probe and the generation call.
const CONNECTION_ERROR_MESSAGE: &str =
    "Error connecting to Ollama. Please check that it is running.";

// ─── TextGenerator ───────────────────────────────────────────────────────────

/// The inference operations the orchestrator depends on.
///
/// Implemented by [`OllamaClient`]; test code implements it with a stub to
/// exercise the fallback paths without a server.
pub trait TextGenerator {
    /// Bounded-timeout availability probe. Never errors.
    fn is_available(&self) -> impl Future<Output = bool> + Send;

    /// Models installed on the server; empty on any failure.
    fn list_models(&self) -> impl Future<Output = Vec<ModelDescriptor>> + Send;

    /// One generation attempt; every failure class is an outcome variant.
    fn generate(
        &self,
        prompt: &str,
        model: &str,
        system: Option<&str>,
    ) -> impl Future<Output = GenerationOutcome> + Send;
}

impl TextGenerator for OllamaClient {
    fn is_available(&self) -> impl Future<Output = bool> + Send {
        OllamaClient::is_available(self)
    }

    fn list_models(&self) -> impl Future<Output = Vec<ModelDescriptor>> + Send {
        OllamaClient::list_models(self)
    }

    fn generate(
        &self,
        prompt: &str,
        model: &str,
        system: Option<&str>,
    ) -> impl Future<Output = GenerationOutcome> + Send {
        OllamaClient::generate(self, prompt, model, system)
    }
}

// ─── GenerationOrchestrator ──────────────────────────────────────────────────

/// Composes prompt assembly, context windowing, the inference backend, and
/// response parsing into the three application-facing operations.
pub struct GenerationOrchestrator<G> {
    backend: G,
    model: String,
}

impl<G: TextGenerator> GenerationOrchestrator<G> {
    /// Create an orchestrator that sends all calls to `model` on `backend`.
    pub fn new(backend: G, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    /// The model name used for every generation call.
    pub fn model(&self) -> &str {
        &self.model
    }

    // ─── Chat ────────────────────────────────────────────────────────────

    /// Answer a chat message with the prior conversation folded in.
    ///
    /// Always returns displayable text: the fixed unavailability message when
    /// the probe fails, substitute text for timeout/error outcomes, or the
    /// model's reply verbatim.
    pub async fn answer_chat(
        &self,
        message: &str,
        turns: &[ConversationTurn],
        order: TurnOrder,
    ) -> String {
        if !self.backend.is_available().await {
            tracing::warn!("inference server unreachable, skipping chat generation");
            return UNAVAILABLE_MESSAGE.to_string();
        }

        let context = context::build_context(turns, order);
        let prompt = prompts::chat_prompt(&context, message);
        let outcome = self
            .backend
            .generate(&prompt, &self.model, Some(prompts::CHAT_SYSTEM_PROMPT))
            .await;

        match outcome {
            GenerationOutcome::Success(text) => text,
            GenerationOutcome::Timeout => TIMEOUT_MESSAGE.to_string(),
            GenerationOutcome::ServerError { status, body } => {
                format!("Error: {status} - {body}")
            }
            GenerationOutcome::Unavailable => CONNECTION_ERROR_MESSAGE.to_string(),
        }
    }

    // ─── Quizzes ─────────────────────────────────────────────────────────

    /// Generate `count` multiple-choice questions about `topic`.
    ///
    /// Never empty: the probe-failure and generation-failure paths both yield
    /// the single-item topic fallback, and the parser applies the same policy
    /// to unusable model output.
    pub async fn build_quiz(
        &self,
        topic: &str,
        difficulty: Difficulty,
        count: u32,
    ) -> Vec<QuizItem> {
        if !self.backend.is_available().await {
            tracing::warn!(topic, "inference server unreachable, returning fallback quiz");
            return vec![parser::fallback_quiz_item(topic)];
        }

        let system = prompts::quiz_system_prompt(topic, difficulty, count);
        let prompt = prompts::quiz_prompt(topic, difficulty, count);

        match self
            .backend
            .generate(&prompt, &self.model, Some(&system))
            .await
        {
            GenerationOutcome::Success(text) => parser::extract_quiz_items(&text, topic),
            outcome => {
                tracing::warn!(topic, ?outcome, "quiz generation failed, returning fallback");
                vec![parser::fallback_quiz_item(topic)]
            }
        }
    }

    // ─── Study Documents ─────────────────────────────────────────────────

    /// Generate a five-section study document about `topic`.
    ///
    /// The five section calls are independent and fan out concurrently; one
    /// section's failure substitutes that section's placeholder and never
    /// aborts the other four. Sections always come back in document order.
    pub async fn build_document(&self, topic: &str) -> StudyDocument {
        if !self.backend.is_available().await {
            tracing::warn!(topic, "inference server unreachable, returning placeholder document");
            return StudyDocument::from_fn(|key| offline_placeholder(key, topic));
        }

        let calls = SectionKey::ALL.map(|key| self.build_section(key, topic));
        let texts = join_all(calls).await;

        // join_all preserves input order, which is document order.
        let mut texts = texts.into_iter();
        StudyDocument::from_fn(|_| texts.next().unwrap_or_default())
    }

    /// Generate one document section, substituting its placeholder on failure.
    async fn build_section(&self, key: SectionKey, topic: &str) -> String {
        let prompt = prompts::section_prompt(key, topic);

        match self
            .backend
            .generate(&prompt, &self.model, Some(prompts::DOCUMENT_SYSTEM_PROMPT))
            .await
        {
            GenerationOutcome::Success(text) => text,
            outcome => {
                tracing::warn!(
                    section = key.as_str(),
                    topic,
                    ?outcome,
                    "section generation failed, substituting placeholder"
                );
                section_placeholder(key)
            }
        }
    }
}

// ─── Placeholders ────────────────────────────────────────────────────────────

/// One-line per-section placeholder used when the probe fails and no
/// generation is attempted at all.
fn offline_placeholder(key: SectionKey, topic: &str) -> String {
    match key {
        SectionKey::Introduction => format!("This study material covers {topic}."),
        SectionKey::KeyConcepts => format!("Key concepts related to {topic}."),
        SectionKey::Examples => format!("Practical examples of {topic}."),
        SectionKey::PracticeQuestions => format!("Practice questions about {topic}."),
        SectionKey::Summary => format!("Summary of {topic} concepts."),
    }
}

/// Fixed substitute text for a single section whose generation call failed.
fn section_placeholder(key: SectionKey) -> String {
    format!(
        "Content for {} could not be generated at this time.",
        key.as_str()
    )
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::{ready, Future};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Route pipeline logs to the test harness when `RUST_LOG` is set.
    fn init_test_tracing() {
        use tracing_subscriber::EnvFilter;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// Scripted backend: availability flag plus a per-prompt outcome function.
    /// Counts generation calls so tests can assert the probe short-circuit.
    struct StubBackend {
        available: bool,
        script: fn(&str) -> GenerationOutcome,
        generate_calls: AtomicUsize,
    }

    impl StubBackend {
        fn new(available: bool, script: fn(&str) -> GenerationOutcome) -> Self {
            Self {
                available,
                script,
                generate_calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.generate_calls.load(Ordering::SeqCst)
        }
    }

    impl TextGenerator for StubBackend {
        fn is_available(&self) -> impl Future<Output = bool> + Send {
            ready(self.available)
        }

        fn list_models(&self) -> impl Future<Output = Vec<ModelDescriptor>> + Send {
            ready(Vec::new())
        }

        fn generate(
            &self,
            prompt: &str,
            _model: &str,
            _system: Option<&str>,
        ) -> impl Future<Output = GenerationOutcome> + Send {
            self.generate_calls.fetch_add(1, Ordering::SeqCst);
            ready((self.script)(prompt))
        }
    }

    fn echo_backend() -> StubBackend {
        StubBackend::new(true, |prompt| GenerationOutcome::Success(prompt.to_string()))
    }

    fn orchestrator(backend: StubBackend) -> GenerationOrchestrator<StubBackend> {
        GenerationOrchestrator::new(backend, "test-model")
    }

    // ─── Chat ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_chat_unreachable_short_circuits() {
        init_test_tracing();
        let orch = orchestrator(StubBackend::new(false, |_| GenerationOutcome::Unavailable));
        let reply = orch.answer_chat("What is gravity?", &[], TurnOrder::OldestFirst).await;

        assert_eq!(reply, UNAVAILABLE_MESSAGE);
        assert_eq!(orch.backend.calls(), 0, "no generation call after a failed probe");
    }

    #[tokio::test]
    async fn test_chat_returns_model_text_verbatim() {
        let orch = orchestrator(StubBackend::new(true, |_| {
            GenerationOutcome::Success("Gravity is a force.".to_string())
        }));
        let reply = orch.answer_chat("What is gravity?", &[], TurnOrder::OldestFirst).await;
        assert_eq!(reply, "Gravity is a force.");
        assert_eq!(orch.backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_chat_prompt_folds_in_context() {
        let orch = orchestrator(echo_backend());
        let turns = vec![ConversationTurn::new("first question", "first answer")];
        let reply = orch.answer_chat("second question", &turns, TurnOrder::OldestFirst).await;

        // The echo backend returns the prompt it was sent.
        assert!(reply.contains("User: first question\nAssistant: first answer"));
        assert!(reply.ends_with("User: second question\nAssistant:"));
    }

    #[tokio::test]
    async fn test_chat_timeout_substitutes_text() {
        let orch = orchestrator(StubBackend::new(true, |_| GenerationOutcome::Timeout));
        let reply = orch.answer_chat("slow question", &[], TurnOrder::OldestFirst).await;
        assert_eq!(reply, TIMEOUT_MESSAGE);
    }

    #[tokio::test]
    async fn test_chat_server_error_surfaces_status_and_body() {
        let orch = orchestrator(StubBackend::new(true, |_| GenerationOutcome::ServerError {
            status: 500,
            body: "model exploded".to_string(),
        }));
        let reply = orch.answer_chat("question", &[], TurnOrder::OldestFirst).await;
        assert_eq!(reply, "Error: 500 - model exploded");
    }

    // ─── Quizzes ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_quiz_unreachable_returns_topic_fallback() {
        let orch = orchestrator(StubBackend::new(false, |_| GenerationOutcome::Unavailable));
        let items = orch.build_quiz("Photosynthesis", Difficulty::default(), 3).await;

        assert_eq!(items.len(), 1);
        assert!(items[0].question.contains("Photosynthesis"));
        assert_eq!(items[0].correct, crate::generation::types::OptionLabel::A);
        assert_eq!(orch.backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_quiz_server_error_returns_topic_fallback() {
        let orch = orchestrator(StubBackend::new(true, |_| GenerationOutcome::ServerError {
            status: 500,
            body: "boom".to_string(),
        }));
        let items = orch.build_quiz("Photosynthesis", Difficulty::Intermediate, 5).await;

        assert_eq!(items.len(), 1);
        assert!(items[0].question.contains("Photosynthesis"));
        assert_eq!(items[0].correct, crate::generation::types::OptionLabel::A);
    }

    #[tokio::test]
    async fn test_quiz_parses_prose_wrapped_output() {
        let orch = orchestrator(StubBackend::new(true, |_| {
            GenerationOutcome::Success(
                "Sure! Here you go: [{\"question\":\"Q1?\",\"options\":[\"A\",\"B\",\"C\",\"D\"],\"correct\":\"B\"}] Hope that helps."
                    .to_string(),
            )
        }));
        let items = orch.build_quiz("anything", Difficulty::Intermediate, 1).await;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].question, "Q1?");
        assert_eq!(items[0].correct, crate::generation::types::OptionLabel::B);
    }

    #[tokio::test]
    async fn test_quiz_every_item_holds_invariants() {
        let orch = orchestrator(StubBackend::new(true, |_| {
            GenerationOutcome::Success("nonsense with no JSON at all".to_string())
        }));
        let items = orch.build_quiz("Recursion", Difficulty::Advanced, 4).await;

        assert!(!items.is_empty());
        for item in &items {
            assert_eq!(item.options.len(), 4);
            assert!(item.correct.index() < item.options.len());
        }
    }

    // ─── Study Documents ─────────────────────────────────────────────────

    #[tokio::test]
    async fn test_document_unreachable_returns_placeholders() {
        let orch = orchestrator(StubBackend::new(false, |_| GenerationOutcome::Unavailable));
        let doc = orch.build_document("Recursion").await;

        assert_eq!(doc.sections().len(), 5);
        assert_eq!(doc.section(SectionKey::Introduction), "This study material covers Recursion.");
        assert_eq!(doc.section(SectionKey::Summary), "Summary of Recursion concepts.");
        assert_eq!(orch.backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_document_success_has_all_sections_in_order() {
        let orch = orchestrator(echo_backend());
        let doc = orch.build_document("Recursion").await;

        let keys: Vec<SectionKey> = doc.sections().iter().map(|s| s.key).collect();
        assert_eq!(keys, SectionKey::ALL.to_vec());
        assert_eq!(orch.backend.calls(), 5);
        for section in doc.sections() {
            assert!(section.text.contains("Recursion"));
        }
    }

    #[tokio::test]
    async fn test_document_one_section_timeout_does_not_abort_others() {
        init_test_tracing();
        // The examples prompt is the only one mentioning "real-world" — time
        // that call out, let the rest succeed.
        let orch = orchestrator(StubBackend::new(true, |prompt| {
            if prompt.contains("real-world") {
                GenerationOutcome::Timeout
            } else {
                GenerationOutcome::Success(prompt.to_string())
            }
        }));
        let doc = orch.build_document("Recursion").await;

        assert_eq!(doc.sections().len(), 5);
        assert_eq!(
            doc.section(SectionKey::Examples),
            "Content for examples could not be generated at this time."
        );
        // The other four carry their (distinct) generated texts
        let others = [
            SectionKey::Introduction,
            SectionKey::KeyConcepts,
            SectionKey::PracticeQuestions,
            SectionKey::Summary,
        ];
        for key in others {
            assert!(doc.section(key).contains("Recursion"));
        }
        assert_ne!(doc.section(SectionKey::Introduction), doc.section(SectionKey::Summary));
        assert_eq!(orch.backend.calls(), 5);
    }

    #[tokio::test]
    async fn test_document_all_sections_fail_still_complete() {
        let orch = orchestrator(StubBackend::new(true, |_| GenerationOutcome::ServerError {
            status: 503,
            body: String::new(),
        }));
        let doc = orch.build_document("Recursion").await;

        assert_eq!(doc.sections().len(), 5);
        for (key, section) in SectionKey::ALL.iter().zip(doc.sections()) {
            assert!(section.text.contains(key.as_str()));
            assert!(section.text.contains("could not be generated"));
        }
    }
}
