//! Prompt construction for the three generation modes.
//!
//! Pure functions only — the exact text sent to the model is assembled here
//! and nowhere else. The quiz system instruction doubles as the output
//! contract that [`parser`](super::parser) later enforces; this module does
//! not validate model output.

use super::types::{Difficulty, SectionKey};

// ─── System Instructions ─────────────────────────────────────────────────────

/// System instruction for conversational answers.
pub const CHAT_SYSTEM_PROMPT: &str = "You are a helpful AI teaching assistant. \
You provide clear, educational responses and help students learn various subjects. \
Be encouraging, patient, and provide examples when helpful. If asked about complex \
topics, break them down into understandable parts.";

/// Shared system instruction for all study-document sections.
pub const DOCUMENT_SYSTEM_PROMPT: &str = "You are an expert educational content creator. \
Generate comprehensive study material that is well-structured, informative, and \
educational. Use clear language and provide practical examples.";

// ─── Chat ────────────────────────────────────────────────────────────────────

/// Build the user prompt for a chat turn.
///
/// `context` is the rendered output of
/// [`context::build_context`](super::context::build_context); pass an empty
/// string when there is no prior conversation.
pub fn chat_prompt(context: &str, message: &str) -> String {
    format!("{context}User: {message}\nAssistant:")
}

// ─── Quizzes ─────────────────────────────────────────────────────────────────

/// System instruction for quiz generation.
///
/// Demands a JSON array of exactly `count` objects with the keys
/// `question` / `options` (4 strings) / `correct` (single letter A–D) /
/// `explanation`. This instruction is the sole contract enforced on the
/// model; anything that doesn't match it is handled by the parser's fallback.
pub fn quiz_system_prompt(topic: &str, difficulty: Difficulty, count: u32) -> String {
    format!(
        "You are an expert quiz generator. Create {count} multiple choice questions \
about {topic} at {level} level.\n\n\
Format your response as a JSON array with this exact structure:\n\
[\n\
  {{\n\
    \"question\": \"Question text here?\",\n\
    \"options\": [\"Option A\", \"Option B\", \"Option C\", \"Option D\"],\n\
    \"correct\": \"A\",\n\
    \"explanation\": \"Brief explanation of why this is correct\"\n\
  }}\n\
]\n\n\
Make sure:\n\
- Questions are clear and educational\n\
- Options are plausible but only one is correct\n\
- Difficulty matches the requested level\n\
- Include brief explanations\n\
- Return valid JSON only",
        level = difficulty.as_str(),
    )
}

/// User prompt for quiz generation.
pub fn quiz_prompt(topic: &str, difficulty: Difficulty, count: u32) -> String {
    format!(
        "Generate {count} {} level multiple choice questions about: {topic}",
        difficulty.as_str()
    )
}

// ─── Study Documents ─────────────────────────────────────────────────────────

/// Per-section document prompt, with that section's target word-count range.
pub fn section_prompt(key: SectionKey, topic: &str) -> String {
    match key {
        SectionKey::Introduction => format!(
            "Write a comprehensive introduction to {topic}. Explain what it is, why \
it's important, and what students will learn. Make it engaging and informative \
(200-300 words)."
        ),
        SectionKey::KeyConcepts => format!(
            "List and explain the key concepts, principles, or components of {topic}. \
Use bullet points or numbered lists for clarity. Include definitions and brief \
explanations (300-400 words)."
        ),
        SectionKey::Examples => format!(
            "Provide 3-4 practical, real-world examples that illustrate {topic}. Make \
them relatable and easy to understand. Show how the concepts apply in practice \
(250-350 words)."
        ),
        SectionKey::PracticeQuestions => format!(
            "Create 5-7 practice questions about {topic} with brief answers. Include a \
mix of question types: multiple choice, short answer, and application questions \
(200-300 words)."
        ),
        SectionKey::Summary => format!(
            "Write a concise summary of {topic} that reinforces the main points. \
Include key takeaways and suggestions for further learning (150-200 words)."
        ),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
