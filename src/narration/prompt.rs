//! Prompt text for the guardian's thoughts

use crate::core::error::{GameError, Result};
use crate::simulation::tick::NarrationTopic;

/// Shown before the first reply arrives
pub const INITIAL_THOUGHT: &str = "Nobody touches my family!";

/// Shown whenever a request fails
pub const FALLBACK_THOUGHT: &str = "I am this family's shield!";

pub const PERSONA_PROMPT: &str = "You are Thor, an immortal guard dog escorting a family \
through a dark forest. Answer with one short, brave, protective dog thought of at most \
eight words. Reply with the thought only.";

/// Context line sent for each narration topic
pub fn topic_context(topic: NarrationTopic) -> &'static str {
    match topic {
        NarrationTopic::SessionStart => "Welcome to the forest! I will look after you.",
        NarrationTopic::Bark => "Back off! *Woof*",
    }
}

pub fn user_message(context: &str) -> String {
    format!("Context: {}", context)
}

/// Trim a model reply down to a displayable line
pub fn clean_thought(reply: &str) -> Result<String> {
    let thought = reply
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '“' || c == '”')
        .trim();

    if thought.is_empty() {
        return Err(GameError::Narration("Empty response".into()));
    }

    Ok(thought.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_thought_strips_quotes_and_whitespace() {
        assert_eq!(
            clean_thought("  \"Stay behind me, pups!\"\n").unwrap(),
            "Stay behind me, pups!"
        );
        assert_eq!(clean_thought("Grr.").unwrap(), "Grr.");
    }

    #[test]
    fn test_clean_thought_rejects_empty() {
        assert!(clean_thought("   ").is_err());
        assert!(clean_thought("\"\"").is_err());
    }

    #[test]
    fn test_topics_have_distinct_context() {
        assert_ne!(
            topic_context(NarrationTopic::SessionStart),
            topic_context(NarrationTopic::Bark)
        );
        assert!(user_message("Back off!").contains("Back off!"));
    }
}
