//! Reply value objects

use serde::{Deserialize, Serialize};

use super::intent::Intent;
use super::lexicon::TROUBLE_REPLY;

/// One reply from Pippy, as handed to the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    grounding_technique: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    distraction_game: Option<String>,
    should_animate: bool,
}

impl Response {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            grounding_technique: None,
            distraction_game: None,
            should_animate: true,
        }
    }

    /// The fixed reply used when a turn cannot be completed
    pub fn trouble() -> Self {
        Self::new(TROUBLE_REPLY)
    }

    #[must_use]
    pub fn with_grounding(mut self, tag: &str) -> Self {
        self.grounding_technique = Some(tag.to_string());
        self
    }

    #[must_use]
    pub fn with_game(mut self, tag: &str) -> Self {
        self.distraction_game = Some(tag.to_string());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    #[cfg(test)]
    pub fn grounding_technique(&self) -> Option<&str> {
        self.grounding_technique.as_deref()
    }

    #[cfg(test)]
    pub fn distraction_game(&self) -> Option<&str> {
        self.distraction_game.as_deref()
    }

    #[cfg(test)]
    pub fn should_animate(&self) -> bool {
        self.should_animate
    }
}

/// What the selector decided for a turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Send this reply as-is
    Reply(Response),
    /// Try remote generation first; use `fallback` if it fails or is rejected
    Generate { intent: Intent, fallback: Response },
}

impl Selection {
    /// The reply used when generation is unavailable
    pub fn into_fallback(self) -> Response {
        match self {
            Selection::Reply(response) | Selection::Generate { fallback: response, .. } => {
                response
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case_and_skips_empty_tags() {
        let json = serde_json::to_value(Response::new("hi pip!").with_grounding("breathing"))
            .expect("serialize");
        assert_eq!(json["text"], "hi pip!");
        assert_eq!(json["groundingTechnique"], "breathing");
        assert_eq!(json["shouldAnimate"], true);
        assert!(json.get("distractionGame").is_none());
    }

    #[test]
    fn test_trouble_reply_is_fixed() {
        assert_eq!(Response::trouble().text(), TROUBLE_REPLY);
        assert!(Response::trouble().should_animate());
    }

    #[test]
    fn test_fallback_extraction() {
        let selection = Selection::Generate {
            intent: Intent::Unclear,
            fallback: Response::new("fallback"),
        };
        assert_eq!(selection.into_fallback().text(), "fallback");
    }
}
