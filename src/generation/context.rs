//! Conversation context windowing.
//!
//! Bounds and orders prior turns before they are folded into a chat prompt.
//! Order is a correctness contract: model continuity degrades when turns are
//! rendered newest-first, so this module owns restoring chronological order
//! no matter how the caller's storage returned them.

use super::types::ConversationTurn;

/// Maximum number of prior turns folded into a chat prompt.
pub const CONTEXT_TURNS: usize = 5;

/// Ordering of the turn sequence supplied by the caller's storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOrder {
    /// Chronological: earliest turn first.
    OldestFirst,
    /// Reverse-chronological: most recent turn first, typical of
    /// `ORDER BY timestamp DESC` queries.
    NewestFirst,
}

/// Render the chronologically-last [`CONTEXT_TURNS`] turns as prompt context.
///
/// Each turn renders as `User: <u>\nAssistant: <m>`; turns are joined with
/// newlines and the result ends with a blank line so the new message can be
/// appended directly. Returns an empty string for empty input.
pub fn build_context(turns: &[ConversationTurn], order: TurnOrder) -> String {
    if turns.is_empty() {
        return String::new();
    }

    let rendered: Vec<String> = match order {
        TurnOrder::OldestFirst => turns[turns.len().saturating_sub(CONTEXT_TURNS)..]
            .iter()
            .map(render_turn)
            .collect(),
        // The most recent turns are at the front; take them, then flip back
        // to chronological order.
        TurnOrder::NewestFirst => turns
            .iter()
            .take(CONTEXT_TURNS)
            .map(render_turn)
            .rev()
            .collect(),
    };

    format!("{}\n\n", rendered.join("\n"))
}

fn render_turn(turn: &ConversationTurn) -> String {
    format!("User: {}\nAssistant: {}", turn.user_text, turn.model_text)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
