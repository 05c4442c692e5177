//! Value objects flowing out of the generation pipeline.
//!
//! Everything here is an immutable value: constructed once by the pipeline
//! (or supplied once by the caller) and handed outward to persistence and
//! presentation collaborators.

use serde::{Deserialize, Serialize};

// ─── Conversation ────────────────────────────────────────────────────────────

/// One prior exchange in a chat conversation.
///
/// Owned by the caller's chat storage; the pipeline receives an ordered
/// sequence and never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub user_text: String,
    pub model_text: String,
}

impl ConversationTurn {
    pub fn new(user_text: impl Into<String>, model_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            model_text: model_text.into(),
        }
    }
}

// ─── Quizzes ─────────────────────────────────────────────────────────────────

/// Label of a multiple-choice option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    /// Zero-based index of the option this label refers to.
    pub fn index(self) -> usize {
        match self {
            OptionLabel::A => 0,
            OptionLabel::B => 1,
            OptionLabel::C => 2,
            OptionLabel::D => 3,
        }
    }

    /// Parse a single-letter label, tolerating surrounding whitespace.
    pub fn from_letter(s: &str) -> Option<Self> {
        match s.trim() {
            "A" => Some(OptionLabel::A),
            "B" => Some(OptionLabel::B),
            "C" => Some(OptionLabel::C),
            "D" => Some(OptionLabel::D),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        }
    }
}

/// A validated multiple-choice quiz item.
///
/// Invariant: `options` always has exactly four entries and `correct`
/// indexes one of them. Construction goes through the parser's validation
/// or its deterministic fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizItem {
    pub question: String,
    pub options: [String; 4],
    pub correct: OptionLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl QuizItem {
    /// Text of the correct option.
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct.index()]
    }
}

/// Requested quiz difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

// ─── Study Documents ─────────────────────────────────────────────────────────

/// Section of a study document, in fixed document order.
///
/// The declaration order here IS the document order — [`SectionKey::ALL`]
/// and the derived `Ord` both follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Introduction,
    KeyConcepts,
    Examples,
    PracticeQuestions,
    Summary,
}

impl SectionKey {
    /// All section keys in document order.
    pub const ALL: [SectionKey; 5] = [
        SectionKey::Introduction,
        SectionKey::KeyConcepts,
        SectionKey::Examples,
        SectionKey::PracticeQuestions,
        SectionKey::Summary,
    ];

    /// Wire key, as used in serialized documents.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Introduction => "introduction",
            SectionKey::KeyConcepts => "key_concepts",
            SectionKey::Examples => "examples",
            SectionKey::PracticeQuestions => "practice_questions",
            SectionKey::Summary => "summary",
        }
    }

    /// Human-readable heading for the external document renderer.
    pub fn title(self) -> &'static str {
        match self {
            SectionKey::Introduction => "Introduction",
            SectionKey::KeyConcepts => "Key Concepts",
            SectionKey::Examples => "Examples and Applications",
            SectionKey::PracticeQuestions => "Practice Questions",
            SectionKey::Summary => "Summary and Key Takeaways",
        }
    }
}

/// One rendered section of a study document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSection {
    pub key: SectionKey,
    pub text: String,
}

/// A complete five-section study document.
///
/// Always carries exactly one section per [`SectionKey`], in document order —
/// per-section generation failures substitute placeholder text rather than
/// dropping the section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyDocument {
    sections: Vec<DocumentSection>,
}

impl StudyDocument {
    /// Build a document by producing the text for each key in document order.
    pub fn from_fn(mut text_for: impl FnMut(SectionKey) -> String) -> Self {
        Self {
            sections: SectionKey::ALL
                .iter()
                .map(|&key| DocumentSection {
                    key,
                    text: text_for(key),
                })
                .collect(),
        }
    }

    /// The five sections, in document order.
    pub fn sections(&self) -> &[DocumentSection] {
        &self.sections
    }

    /// Text of a single section.
    pub fn section(&self, key: SectionKey) -> &str {
        // ALL order matches construction order, so the key's position in ALL
        // is its position in `sections`.
        &self.sections[key as usize].text
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
