//! Pippy's persona and generation prompt construction
//!
//! The prompt is plain text: persona description, a CURRENT SITUATION block
//! describing the turn, response guidelines, and a `User:`/`Pippy:` tail
//! the model continues from.

use std::fmt::Write;

use crate::state_machine::{Intent, Mode};

/// Number of trailing user messages shown to the model
pub const CONTEXT_TURNS: usize = 5;

/// Longest user message copied into the prompt, in characters
const MAX_MESSAGE_CHARS: usize = 500;

const PERSONA: &str = r"You are Pippy, a small, gentle penguin who keeps people company. You speak warmly and simply, in short sentences. You add little actions in <i>italics</i> like <i>waddles closer</i> or <i>nuzzles gently</i>, and you sometimes say pip. You never diagnose, never give medical advice, and never argue about what someone is experiencing. When someone is struggling you validate their feelings, help them feel safe, and offer grounding techniques (breathing, sensory grounding, body scans) or light distraction games. When someone just wants to chat you are playful, curious and kind.";

const GUIDELINES: &str = r"RESPONSE GUIDELINES:
- Reply in one to three short sentences.
- Stay in character as Pippy the penguin.
- Include one gentle action in <i>italics</i>.
- If the person seems distressed, be calm and validating and offer to try a technique together.
- Do not repeat what you said in the recent conversation.
- Never end mid-sentence.";

/// Everything the prompt needs to know about the current turn
#[derive(Debug, Clone)]
pub struct PromptContext<'a> {
    pub message: &'a str,
    pub intent: Intent,
    pub mode: Mode,
    pub episode_hint: Option<bool>,
    /// Earlier user messages, oldest first
    pub recent: Vec<&'a str>,
}

fn episode_status(mode: Mode, hint: Option<bool>) -> &'static str {
    match (mode, hint) {
        (Mode::Support, _) | (_, Some(true)) => {
            "The user is currently experiencing symptoms or an episode."
        }
        (_, Some(false)) => "The user is not experiencing symptoms and wants to chat.",
        (_, None) => "It is not yet known whether the user is experiencing symptoms.",
    }
}

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Support => "support",
        Mode::Neutral => "casual chat",
    }
}

fn clipped(message: &str) -> String {
    if message.chars().count() > MAX_MESSAGE_CHARS {
        let head: String = message.chars().take(MAX_MESSAGE_CHARS).collect();
        format!("{head}...")
    } else {
        message.to_string()
    }
}

/// Build the text sent to the generation model
pub fn build_prompt(ctx: &PromptContext<'_>) -> String {
    let message = clipped(ctx.message);
    let recent: Vec<&str> = ctx
        .recent
        .iter()
        .rev()
        .take(CONTEXT_TURNS)
        .rev()
        .copied()
        .collect();
    let recent = if recent.is_empty() {
        "(none)".to_string()
    } else {
        recent.join(" | ")
    };

    let mut prompt = String::with_capacity(PERSONA.len() + GUIDELINES.len() + 512);
    prompt.push_str(PERSONA);
    prompt.push_str("\n\nCURRENT SITUATION:\n");
    let _ = writeln!(prompt, "- User message: \"{message}\"");
    let _ = writeln!(prompt, "- Detected intent: {}", ctx.intent.label());
    let _ = writeln!(
        prompt,
        "- Episode status: {}",
        episode_status(ctx.mode, ctx.episode_hint)
    );
    let _ = writeln!(prompt, "- Recent conversation: {recent}");
    let _ = writeln!(prompt, "- Current mode: {}", mode_label(ctx.mode));
    prompt.push('\n');
    prompt.push_str(GUIDELINES);
    let _ = write!(prompt, "\n\nUser: {message}\nPippy:");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context<'a>(message: &'a str, recent: Vec<&'a str>) -> PromptContext<'a> {
        PromptContext {
            message,
            intent: Intent::GeneralTalk,
            mode: Mode::Neutral,
            episode_hint: Some(false),
            recent,
        }
    }

    #[test]
    fn test_prompt_ends_with_pippy_turn() {
        let prompt = build_prompt(&context("tell me about snow", vec![]));
        assert!(prompt.starts_with("You are Pippy"));
        assert!(prompt.ends_with("User: tell me about snow\nPippy:"));
        assert!(prompt.contains("CURRENT SITUATION:"));
        assert!(prompt.contains("- Detected intent: general_talk"));
        assert!(prompt.contains("not experiencing symptoms"));
        assert!(prompt.contains("- Recent conversation: (none)"));
    }

    #[test]
    fn test_recent_context_keeps_last_five() {
        let recent = vec!["one", "two", "three", "four", "five", "six"];
        let prompt = build_prompt(&context("hi", recent));
        assert!(prompt.contains("- Recent conversation: two | three | four | five | six"));
    }

    #[test]
    fn test_support_mode_wins_over_hint() {
        let ctx = PromptContext {
            mode: Mode::Support,
            ..context("hm", vec![])
        };
        assert!(build_prompt(&ctx).contains("currently experiencing symptoms"));
    }

    #[test]
    fn test_long_message_clipped() {
        let long = "a".repeat(2000);
        let prompt = build_prompt(&context(&long, vec![]));
        assert!(prompt.len() < 3000);
        assert!(prompt.contains("..."));
    }
}
