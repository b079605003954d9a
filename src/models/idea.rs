use serde::{Deserialize, Serialize};

/// Qualitative rating the model assigns to feasibility and impact.
///
/// Lowercase aliases absorb the casing drift seen in live model output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    #[serde(alias = "low")]
    Low,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
    #[default]
    #[serde(alias = "none")]
    None,
}

/// One AI-produced idea candidate.
///
/// `title` is the canonical name field; `aiName` is still accepted on input
/// for compatibility with replies shaped by the older prompt wording. The
/// score is attached after parsing, so it defaults to zero when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedIdea {
    #[serde(alias = "aiName")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub feasibility: Rating,
    #[serde(default)]
    pub impact: Rating,
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub score: u8,
}

impl GeneratedIdea {
    /// Placeholder returned when no AI credential is configured.
    pub fn missing_credential() -> Self {
        Self {
            title: "API Key Missing".to_string(),
            description: "Please provide a valid Google Gemini API key to generate real ideas."
                .to_string(),
            feasibility: Rating::Low,
            impact: Rating::Low,
            analysis: String::new(),
            score: 0,
        }
    }

    /// Placeholder returned when generation failed for any other reason.
    pub fn generation_failed(reason: &str) -> Self {
        Self {
            title: "Generation Failed".to_string(),
            description: format!("Could not generate ideas with AI. {}", reason),
            feasibility: Rating::None,
            impact: Rating::None,
            analysis: String::new(),
            score: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn accepts_legacy_ai_name_field() {
        let idea: GeneratedIdea = serde_json::from_str(
            r#"{"aiName": "Solar Backpack", "description": "d", "feasibility": "High", "impact": "Medium", "analysis": "a"}"#,
        )
        .unwrap();

        assert_eq!(idea.title, "Solar Backpack");
        assert_eq!(idea.feasibility, Rating::High);
        assert_eq!(idea.impact, Rating::Medium);
        assert_eq!(idea.score, 0);
    }

    #[test]
    fn canonical_title_field_wins_over_missing_alias() {
        let idea: GeneratedIdea =
            serde_json::from_str(r#"{"title": "Name", "description": "d"}"#).unwrap();

        assert_eq!(idea.title, "Name");
        assert_eq!(idea.feasibility, Rating::None);
        assert_eq!(idea.impact, Rating::None);
        assert!(idea.analysis.is_empty());
    }

    #[rstest]
    #[case("\"High\"", Rating::High)]
    #[case("\"high\"", Rating::High)]
    #[case("\"medium\"", Rating::Medium)]
    #[case("\"Low\"", Rating::Low)]
    #[case("\"low\"", Rating::Low)]
    fn rating_accepts_both_casings(#[case] json: &str, #[case] expected: Rating) {
        let rating: Rating = serde_json::from_str(json).unwrap();
        assert_eq!(rating, expected);
    }

    #[test]
    fn rating_serializes_capitalized() {
        assert_eq!(serde_json::to_string(&Rating::High).unwrap(), "\"High\"");
        assert_eq!(serde_json::to_string(&Rating::None).unwrap(), "\"None\"");
    }

    #[test]
    fn placeholders_carry_fixed_titles() {
        assert_eq!(GeneratedIdea::missing_credential().title, "API Key Missing");
        let failed = GeneratedIdea::generation_failed("boom");
        assert_eq!(failed.title, "Generation Failed");
        assert!(failed.description.contains("boom"));
        assert_eq!(failed.feasibility, Rating::None);
    }
}
